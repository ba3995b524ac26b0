use pontoon_primitives::ErrorKind;
use thiserror::Error;

use crate::kv::DbError;

#[derive(Debug, Error)]
pub enum HostError {
    /// A nested native invocation would exceed the frame-stack cap.
    #[error("call stack limit of {0} frames exceeded")]
    CallStackLimit(usize),

    /// The shared gas counter cannot cover the requested charge. Fatal
    /// to the call chain, not to the process.
    #[error("out of gas: needed {needed}, {left} left")]
    OutOfGas { needed: u64, left: u64 },

    #[error(transparent)]
    Db(#[from] DbError),
}

impl HostError {
    /// Receipt classification; `None` marks a process-level storage
    /// fault that must be escalated instead of reported.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::CallStackLimit(_) | Self::OutOfGas { .. } => {
                Some(ErrorKind::ResourceExhausted)
            }
            Self::Db(_) => None,
        }
    }
}
