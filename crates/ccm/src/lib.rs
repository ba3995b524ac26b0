//! Cross-chain manager.
//!
//! Receives inbound cross-chain proof requests, selects the registered
//! chain family for the claimed source chain, enforces one-time use of
//! every proof, and on success emits the canonical [`MakeTxParam`]
//! instruction consumed by the relay's state transition. Chain families
//! are capability sets, not a class hierarchy: anything implementing
//! [`ChainHandler`] can be registered under a chain ID.

pub mod asset;
pub mod bookkeeper;
pub mod errors;
pub mod evm;
pub mod handler;
pub mod keys;
pub mod router;
pub mod transfer;
pub mod types;
pub mod utils;
pub mod verify;

pub use bookkeeper::BookkeeperChain;
pub use errors::CcmError;
pub use evm::{BlockRef, ChainProvider, EvmOracleChain, ProviderError};
pub use handler::ChainHandler;
pub use router::CcmRouter;
pub use types::{EntranceParam, EthProof, MakeTxParam, StagedTransfer, TransferPayload};
