//! Collection of generic internal data types that are used widely.

#[macro_use]
mod macros;

pub mod buf;
pub mod errors;
pub mod hash;

pub use buf::{Buf20, Buf32, Buf33};
pub use errors::ErrorKind;

/// Identifier of a source or destination chain, assigned at registration.
pub type ChainId = u64;

/// Account/contract address on the relay chain.
pub type Address = Buf20;
