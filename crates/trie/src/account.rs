//! Canonical account-leaf encoding.

use pontoon_primitives::Buf32;
use rlp::RlpStream;

/// Claimed account state, RLP-encoded as
/// `[nonce, balance, storageRoot, codeHash]` and compared byte-for-byte
/// against the leaf the account proof resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofAccount {
    pub nonce: u64,
    /// Big-endian balance with no leading zero bytes; empty means zero.
    pub balance: Vec<u8>,
    pub storage_root: Buf32,
    pub code_hash: Buf32,
}

impl ProofAccount {
    pub fn rlp_encode(&self) -> Vec<u8> {
        let mut s = RlpStream::new_list(4);
        s.append(&self.nonce);
        s.append(&self.balance);
        s.append(&self.storage_root.as_bytes().to_vec());
        s.append(&self.code_hash.as_bytes().to_vec());
        s.out().to_vec()
    }
}
