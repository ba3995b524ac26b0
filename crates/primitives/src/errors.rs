//! Error taxonomy shared by every relay-core operation.

/// Coarse classification of a rejected operation, surfaced to the
/// submitting party in the transaction receipt.
///
/// None of these are process-fatal; only the storage layer's own I/O
/// errors escalate beyond the enclosing transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed serialized input, never partially trusted.
    Format,
    /// Operation invalid for the current state-machine phase.
    State,
    /// Signature, quorum, or trie-proof check failed.
    Verification,
    /// Proof key already recorded.
    Replay,
    /// Unknown chain, height, or hash.
    NotFound,
    /// Gas or call-stack limit exceeded.
    ResourceExhausted,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Format => "FormatError",
            Self::State => "StateError",
            Self::Verification => "VerificationError",
            Self::Replay => "ReplayError",
            Self::NotFound => "NotFoundError",
            Self::ResourceExhausted => "ResourceExhausted",
        };
        f.write_str(s)
    }
}
