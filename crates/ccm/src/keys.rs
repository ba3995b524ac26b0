//! Storage key schema for cross-chain manager records.

use pontoon_primitives::{Address, Buf20, Buf32, ChainId};

/// Well-known address of the cross-chain manager native contract.
pub const CCM_CONTRACT_ADDRESS: Address = Buf20::new([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x07,
]);

const TAG_PROOF_RECORD: u8 = 0x20;
const TAG_ASSET_BINDING: u8 = 0x21;
const TAG_STAGED_TX: u8 = 0x22;

fn ccm_key(tag: u8) -> Vec<u8> {
    let mut key = Vec::with_capacity(64);
    key.extend_from_slice(CCM_CONTRACT_ADDRESS.as_slice());
    key.push(tag);
    key
}

/// Replay-protection key for a processed proof: the manager contract
/// address, the source chain, and the proven storage key.
pub fn proof_record_key(chain_id: ChainId, storage_key: &[u8]) -> Vec<u8> {
    let mut key = ccm_key(TAG_PROOF_RECORD);
    key.extend_from_slice(&chain_id.to_le_bytes());
    key.extend_from_slice(storage_key);
    key
}

pub fn asset_binding_key(
    from_chain_id: ChainId,
    to_chain_id: ChainId,
    from_asset: &[u8],
) -> Vec<u8> {
    let mut key = ccm_key(TAG_ASSET_BINDING);
    key.extend_from_slice(&from_chain_id.to_le_bytes());
    key.extend_from_slice(&to_chain_id.to_le_bytes());
    key.extend_from_slice(from_asset);
    key
}

/// One staged outbound payload per originating relay transaction.
pub fn staged_tx_key(to_chain_id: ChainId, tx_hash: &Buf32) -> Vec<u8> {
    let mut key = ccm_key(TAG_STAGED_TX);
    key.extend_from_slice(&to_chain_id.to_le_bytes());
    key.extend_from_slice(tx_hash.as_slice());
    key
}
