use pontoon_host::DbError;
use pontoon_primitives::{Buf32, ChainId, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("chain {0} is not initialized")]
    UnknownChain(ChainId),

    #[error("chain {0} already initialized")]
    AlreadyInitialized(ChainId),

    #[error("no header at height {height} for chain {chain_id}")]
    HeaderNotFound { chain_id: ChainId, height: u64 },

    #[error("no header with hash {hash} for chain {chain_id}")]
    HeaderHashNotFound { chain_id: ChainId, hash: Buf32 },

    #[error("no consensus config active at height {height} for chain {chain_id}")]
    ConfigNotFound { chain_id: ChainId, height: u64 },

    /// Height at or below the accepted tip. Covers both replayed
    /// headers and competing headers for an occupied height; the first
    /// accepted header wins and later submissions fail here.
    #[error("header height {got} not above current height {current}")]
    StaleHeight { current: u64, got: u64 },

    #[error("non-contiguous header height: expected {expected}, got {got}")]
    NonContiguousHeight { expected: u64, got: u64 },

    /// A stored record failed to decode. The log is corrupt; escalate.
    #[error("inconsistent store record: {0}")]
    Inconsistent(&'static str),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl StoreError {
    /// Receipt classification; `None` marks a process-level storage
    /// fault.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::UnknownChain(_)
            | Self::HeaderNotFound { .. }
            | Self::HeaderHashNotFound { .. }
            | Self::ConfigNotFound { .. } => Some(ErrorKind::NotFound),
            Self::AlreadyInitialized(_)
            | Self::StaleHeight { .. }
            | Self::NonContiguousHeight { .. } => Some(ErrorKind::State),
            Self::Inconsistent(_) | Self::Db(_) => None,
        }
    }
}
