//! Hand-built Merkle-Patricia tries for proof fixtures.

use pontoon_primitives::{hash::keccak256, Buf32};
use rlp::RlpStream;

pub fn to_nibbles(bytes: &[u8]) -> Vec<u8> {
    let mut nibbles = Vec::with_capacity(bytes.len() * 2);
    for byte in bytes {
        nibbles.push(byte >> 4);
        nibbles.push(byte & 0x0f);
    }
    nibbles
}

/// Hex-prefix encodes a nibble path.
pub fn encode_compact(nibbles: &[u8], is_leaf: bool) -> Vec<u8> {
    let mut flag: u8 = if is_leaf { 2 } else { 0 };
    let odd = nibbles.len() % 2 == 1;
    let mut out = Vec::new();
    if odd {
        flag |= 1;
        out.push(flag << 4 | nibbles[0]);
        for pair in nibbles[1..].chunks(2) {
            out.push(pair[0] << 4 | pair[1]);
        }
    } else {
        out.push(flag << 4);
        for pair in nibbles.chunks(2) {
            out.push(pair[0] << 4 | pair[1]);
        }
    }
    out
}

pub fn leaf_node(path_nibbles: &[u8], value: &[u8]) -> Vec<u8> {
    let mut s = RlpStream::new_list(2);
    s.append(&encode_compact(path_nibbles, true));
    s.append(&value.to_vec());
    s.out().to_vec()
}

/// A trie holding exactly one entry under `key_digest`; returns the
/// root and the proof node set.
pub fn single_leaf_trie(key_digest: &Buf32, value: &[u8]) -> (Buf32, Vec<Vec<u8>>) {
    let leaf = leaf_node(&to_nibbles(key_digest.as_slice()), value);
    let root = keccak256(&leaf);
    (root, vec![leaf])
}

/// RLP byte-string encoding, as storage slot values are stored.
pub fn rlp_bytes(value: &[u8]) -> Vec<u8> {
    let mut s = RlpStream::new();
    s.append(&value.to_vec());
    s.out().to_vec()
}
