use borsh::{BorshDeserialize, BorshSerialize};
use pontoon_primitives::{Buf32, Buf33};

/// Validator/bookkeeper set governing a chain from `activation_height`
/// onward, until a later config activates.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ConsensusConfig {
    /// Ordered set of bookkeeper public keys (compressed secp256k1).
    pub keys: Vec<Buf33>,
    /// Minimum number of distinct valid signatures a header needs.
    pub threshold: u32,
    /// First height this config verifies.
    pub activation_height: u64,
}

impl ConsensusConfig {
    /// BFT quorum for `n` keys: `n - (n - 1) / 3`, i.e. `2f + 1` of
    /// `3f + 1`.
    pub fn default_threshold(n: usize) -> u32 {
        (n - (n - 1) / 3) as u32
    }

    pub fn contains_key(&self, key: &Buf33) -> bool {
        self.keys.contains(key)
    }
}

/// Accepted header record: the chain-family raw bytes plus the derived
/// fields the relay core needs after acceptance.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StoredHeader {
    pub height: u64,
    pub hash: Buf32,
    pub state_root: Buf32,
    pub raw: Vec<u8>,
}
