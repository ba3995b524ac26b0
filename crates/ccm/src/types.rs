//! Wire types for cross-chain proof entrance and instruction emission.

use borsh::{BorshDeserialize, BorshSerialize};
use pontoon_primitives::ChainId;
use serde::{Deserialize, Serialize};

use crate::{errors::CcmError, utils};

/// Sink parameter opening a cross-chain proof request.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct EntranceParam {
    pub source_chain_id: ChainId,
    /// Source-chain height the proof is rooted at.
    pub height: u64,
    /// Hex-encoded proof document; decodes to an [`EthProof`] JSON
    /// structure.
    pub proof: String,
    /// Claimed application-level value, committed to by the proven
    /// storage slot.
    pub value: String,
}

/// Proof document in `eth_getProof` shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthProof {
    pub address: String,
    pub balance: String,
    pub code_hash: String,
    pub nonce: String,
    pub storage_hash: String,
    pub account_proof: Vec<String>,
    pub storage_proof: Vec<StorageProofEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProofEntry {
    pub key: String,
    pub value: String,
    pub proof: Vec<String>,
}

/// Claimed transfer payload carried in [`EntranceParam::value`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    /// Source-chain asset contract the transfer originated from (hex).
    pub from_contract: String,
    pub to_chain_id: ChainId,
    /// Destination account (hex).
    pub to_address: String,
    /// Decimal amount string.
    pub amount: String,
}

impl TransferPayload {
    /// Converts the claimed payload into the canonical instruction once
    /// the proof behind it has been verified.
    pub fn into_make_tx(self, from_chain_id: ChainId) -> Result<MakeTxParam, CcmError> {
        let amount: u128 = self
            .amount
            .parse()
            .map_err(|_| CcmError::MalformedValue("amount is not a decimal integer"))?;
        Ok(MakeTxParam {
            from_chain_id,
            to_chain_id: self.to_chain_id,
            from_contract: utils::decode_hex(&self.from_contract, "fromContract")?,
            to_address: utils::decode_hex(&self.to_address, "toAddress")?,
            amount,
        })
    }
}

/// Canonical cross-chain instruction. Produced only by a successful
/// proof verification; consumed immediately by the state-transition
/// layer.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MakeTxParam {
    pub from_chain_id: ChainId,
    pub to_chain_id: ChainId,
    pub from_contract: Vec<u8>,
    pub to_address: Vec<u8>,
    pub amount: u128,
}

/// Outbound transfer payload staged for external relaying to the
/// destination chain.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StagedTransfer {
    pub to_chain_id: ChainId,
    pub target_asset: Vec<u8>,
    pub to_address: Vec<u8>,
    pub amount: u128,
}

/// Sink parameter binding a source asset to its destination-chain
/// counterpart.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RegisterAssetParam {
    pub from_chain_id: ChainId,
    pub to_chain_id: ChainId,
    pub from_asset: Vec<u8>,
    pub to_asset: Vec<u8>,
}
