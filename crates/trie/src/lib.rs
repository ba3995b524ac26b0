//! Merkle-Patricia trie proof verification.
//!
//! Verifies Ethereum-format inclusion proofs against a committed root:
//! the proof is an unordered set of RLP-encoded trie nodes, keyed by
//! their keccak256 digest, and the walk from the root resolves child
//! references through that set. Used for the account-then-storage
//! chain of custody in cross-chain proof verification.

pub mod account;
pub mod errors;
pub mod proof;

pub use account::ProofAccount;
pub use errors::ProofError;
pub use proof::{verify_account_proof, verify_proof, verify_storage_proof};
