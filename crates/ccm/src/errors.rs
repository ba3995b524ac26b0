use pontoon_chain_store::StoreError;
use pontoon_header_sync::SyncError;
use pontoon_host::{DbError, HostError};
use pontoon_primitives::{Address, ChainId, ErrorKind};
use pontoon_trie::ProofError;
use thiserror::Error;

use crate::evm::ProviderError;

/// Error surface of the cross-chain manager; this is what the enclosing
/// transaction sees and reports.
#[derive(Debug, Error)]
pub enum CcmError {
    #[error("no handler registered for chain {0}")]
    UnknownChain(ChainId),

    #[error("malformed entrance parameter: {0}")]
    MalformedParam(&'static str),

    #[error("malformed proof document: {0}")]
    MalformedProof(&'static str),

    #[error("malformed hex field: {0}")]
    MalformedHex(&'static str),

    #[error("malformed transfer value: {0}")]
    MalformedValue(&'static str),

    #[error("proof for storage key {0} already processed")]
    ProofAlreadyProcessed(String),

    #[error("stored value does not commit to the claimed transfer value")]
    ValueCommitmentMismatch,

    #[error("chain {0} keeps no on-relay header log")]
    NoHeaderLog(ChainId),

    #[error("no asset binding for source asset between chains {from_chain_id} and {to_chain_id}")]
    AssetNotBound {
        from_chain_id: ChainId,
        to_chain_id: ChainId,
    },

    #[error("address {0} is not a transaction witness")]
    Unauthorized(Address),

    /// External chain-data fetch failed or timed out; never treated as
    /// success-by-default.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Proof(#[from] ProofError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl CcmError {
    /// Receipt classification; `None` marks a process-level storage
    /// fault.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::UnknownChain(_) | Self::AssetNotBound { .. } => Some(ErrorKind::NotFound),
            Self::MalformedParam(_)
            | Self::MalformedProof(_)
            | Self::MalformedHex(_)
            | Self::MalformedValue(_) => Some(ErrorKind::Format),
            Self::ProofAlreadyProcessed(_) => Some(ErrorKind::Replay),
            Self::ValueCommitmentMismatch | Self::Unauthorized(_) | Self::Provider(_) => {
                Some(ErrorKind::Verification)
            }
            Self::NoHeaderLog(_) => Some(ErrorKind::State),
            Self::Proof(e) => e.kind(),
            Self::Sync(e) => e.kind(),
            Self::Store(e) => e.kind(),
            Self::Host(e) => e.kind(),
            Self::Db(_) => None,
        }
    }
}
