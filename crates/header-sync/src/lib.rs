//! Header synchronizer for bookkeeper-consensus chains.
//!
//! Builds the relay's notion of "what is true on chain X at height H":
//! the genesis header fixes the starting bookkeeper set, every later
//! header must carry a quorum of signatures from the set active at its
//! height, and a header may rotate the set for its successors by
//! embedding the next config.

pub mod errors;
pub mod sync;
pub mod types;
pub mod verify;

pub use errors::SyncError;
pub use sync::{sync_block_header, sync_genesis_header};
pub use types::{
    HeaderCore, NextConfig, SignedHeader, SyncBlockHeaderParam, SyncGenesisHeaderParam,
};
pub use verify::verify_header_quorum;
