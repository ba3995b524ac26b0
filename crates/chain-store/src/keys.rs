//! Storage key schema for the header log.
//!
//! Every key starts with a one-byte table tag followed by the
//! little-endian chain ID, so per-chain records stay clustered in
//! ordered stores.

use pontoon_primitives::{Buf32, ChainId};

const TAG_GENESIS: u8 = 0x10;
const TAG_CURRENT_HEIGHT: u8 = 0x11;
const TAG_HEADER: u8 = 0x12;
const TAG_HASH_INDEX: u8 = 0x13;
const TAG_EPOCH_LIST: u8 = 0x14;
const TAG_CONFIG: u8 = 0x15;

fn chain_key(tag: u8, chain_id: ChainId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(tag);
    key.extend_from_slice(&chain_id.to_le_bytes());
    key
}

fn chain_u64_key(tag: u8, chain_id: ChainId, value: u64) -> Vec<u8> {
    let mut key = chain_key(tag, chain_id);
    key.extend_from_slice(&value.to_le_bytes());
    key
}

/// Marker fixing the chain's genesis height.
pub fn genesis_key(chain_id: ChainId) -> Vec<u8> {
    chain_key(TAG_GENESIS, chain_id)
}

pub fn current_height_key(chain_id: ChainId) -> Vec<u8> {
    chain_key(TAG_CURRENT_HEIGHT, chain_id)
}

pub fn header_key(chain_id: ChainId, height: u64) -> Vec<u8> {
    chain_u64_key(TAG_HEADER, chain_id, height)
}

/// Maps a header hash back to its height.
pub fn hash_index_key(chain_id: ChainId, hash: &Buf32) -> Vec<u8> {
    let mut key = chain_key(TAG_HASH_INDEX, chain_id);
    key.extend_from_slice(hash.as_slice());
    key
}

/// Sorted list of config activation heights for the chain.
pub fn epoch_list_key(chain_id: ChainId) -> Vec<u8> {
    chain_key(TAG_EPOCH_LIST, chain_id)
}

pub fn config_key(chain_id: ChainId, activation_height: u64) -> Vec<u8> {
    chain_u64_key(TAG_CONFIG, chain_id, activation_height)
}
