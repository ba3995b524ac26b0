//! Test fixtures shared across the relay-core crates.

pub mod bookkeeper;
pub mod mpt;

pub use bookkeeper::{build_genesis_header, build_signed_header, header_hash, BookkeeperSet};
