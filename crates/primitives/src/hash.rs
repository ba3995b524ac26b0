//! Hashing helpers used across the relay core.

use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

use crate::{Address, Buf32};

/// Double-SHA256, used for chain-family header digests.
pub fn sha256d(data: &[u8]) -> Buf32 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    Buf32::new(second.into())
}

/// Single-SHA256.
pub fn sha256(data: &[u8]) -> Buf32 {
    Buf32::new(Sha256::digest(data).into())
}

/// Keccak-256, used for Ethereum-format trie keys and value commitments.
pub fn keccak256(data: &[u8]) -> Buf32 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    Buf32::new(output)
}

/// Derives the relay address for a bookkeeper public key.
pub fn address_from_key_bytes(key: &[u8]) -> Address {
    let digest = sha256(key);
    Address::try_from_slice(&digest.as_slice()[..Address::LEN])
        .expect("prefix of a 32-byte digest fits an address")
}
