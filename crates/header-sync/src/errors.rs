use pontoon_chain_store::StoreError;
use pontoon_host::HostError;
use pontoon_primitives::{Address, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    #[error("header chain id {got} does not match request chain id {expected}")]
    ChainIdMismatch { expected: u64, got: u64 },

    #[error("genesis header carries no bookkeeper config")]
    MissingGenesisConfig,

    #[error("invalid bookkeeper config: {0}")]
    InvalidConfig(&'static str),

    #[error("{got} signatures for {signers} listed signers")]
    SignatureCountMismatch { signers: usize, got: usize },

    #[error("address {0} is not a transaction witness")]
    Unauthorized(Address),

    #[error("quorum not reached: {got} valid signatures, need {need}")]
    QuorumNotReached { got: u32, need: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl SyncError {
    /// Receipt classification; `None` marks a process-level storage
    /// fault.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::MalformedHeader(_)
            | Self::ChainIdMismatch { .. }
            | Self::MissingGenesisConfig
            | Self::InvalidConfig(_)
            | Self::SignatureCountMismatch { .. } => Some(ErrorKind::Format),
            Self::Unauthorized(_) | Self::QuorumNotReached { .. } => {
                Some(ErrorKind::Verification)
            }
            Self::Store(e) => e.kind(),
            Self::Host(e) => e.kind(),
        }
    }
}
