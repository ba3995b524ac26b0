use pontoon_primitives::{Buf32, ErrorKind};
use thiserror::Error;

/// Errors during Merkle-Patricia trie proof verification. All of them
/// classify as verification failures: a proof that cannot be walked is
/// as untrusted as one that walks to the wrong value.
#[derive(Debug, Error)]
pub enum ProofError {
    #[error("empty proof: no trie nodes provided")]
    EmptyProof,

    #[error("root {expected} not present in the proof node set")]
    RootMismatch { expected: Buf32 },

    #[error("undecodable trie node at step {depth}")]
    InvalidNode { depth: usize },

    #[error("proof node set is missing a referenced node at step {depth}")]
    MissingNode { depth: usize },

    #[error("trie traversal did not terminate after {depth} steps")]
    IncompleteProof { depth: usize },

    #[error("account {0} is absent from the state trie")]
    AccountNotFound(String),

    #[error("account leaf does not match the claimed account state")]
    AccountMismatch,

    #[error("storage key {0} is absent from the storage trie")]
    StorageNotFound(String),

    #[error("invalid storage value encoding")]
    InvalidValueEncoding,
}

impl ProofError {
    pub fn kind(&self) -> Option<ErrorKind> {
        Some(ErrorKind::Verification)
    }
}
