//! Common proof-verification core shared by the chain families.
//!
//! Both families walk the same chain of custody: account proof against
//! a state root, storage proof against the proven account's storage
//! root, then a commitment check tying the stored slot value to the
//! claimed transfer payload. They differ only in where the state root
//! comes from (a trusted synced header, or an oracle-fetched block).

use pontoon_host::{NativeContext, NotifyEvent};
use pontoon_primitives::{hash::keccak256, Buf32};
use pontoon_trie::{verify_account_proof, verify_storage_proof, ProofAccount};
use tracing::info;

use crate::{
    errors::CcmError,
    keys,
    types::{EntranceParam, EthProof, MakeTxParam, TransferPayload},
    utils,
};

/// Shortest slot commitment accepted; anything shorter no longer binds
/// the claimed value.
const MIN_COMMITMENT_LEN: usize = 20;

/// Verifies `param` against the given state root, records the replay
/// key, and returns the canonical instruction.
pub(crate) fn verify_with_root(
    ctx: &mut NativeContext<'_, '_>,
    param: &EntranceParam,
    state_root: &Buf32,
) -> Result<MakeTxParam, CcmError> {
    let proof_bytes = utils::decode_hex(&param.proof, "proof")?;
    let eth_proof: EthProof = serde_json::from_slice(&proof_bytes)
        .map_err(|_| CcmError::MalformedProof("not a valid proof document"))?;
    if eth_proof.storage_proof.len() != 1 {
        return Err(CcmError::MalformedProof("expected exactly one storage proof"));
    }
    let slot = &eth_proof.storage_proof[0];
    let slot_key = utils::decode_hex(&slot.key, "storage key")?;

    // One-time use: a proof for an already-recorded key must fail
    // before any verification work happens.
    let replay_key = keys::proof_record_key(param.source_chain_id, &slot_key);
    if ctx.cache().get(&replay_key)?.is_some() {
        return Err(CcmError::ProofAlreadyProcessed(slot.key.clone()));
    }

    // Account leg: the proof must resolve the contract address to the
    // exact claimed account state under the trusted state root.
    let address = utils::decode_hex(&eth_proof.address, "address")?;
    let account = ProofAccount {
        nonce: utils::parse_hex_u64(&eth_proof.nonce, "nonce")?,
        balance: utils::parse_hex_quantity(&eth_proof.balance, "balance")?,
        storage_root: utils::parse_hex_buf32(&eth_proof.storage_hash, "storageHash")?,
        code_hash: utils::parse_hex_buf32(&eth_proof.code_hash, "codeHash")?,
    };
    let account_nodes = utils::decode_hex_nodes(&eth_proof.account_proof, "accountProof")?;
    verify_account_proof(state_root, &address, &account, &account_nodes)?;

    // Storage leg: resolve the slot under the proven storage root.
    let storage_nodes = utils::decode_hex_nodes(&slot.proof, "storageProof")?;
    let stored = verify_storage_proof(&account.storage_root, &slot_key, &storage_nodes)?;

    check_value_commitment(&stored, &param.value)?;

    let payload: TransferPayload = serde_json::from_str(&param.value)
        .map_err(|_| CcmError::MalformedValue("not a valid transfer payload"))?;
    let make_tx = payload.into_make_tx(param.source_chain_id)?;

    ctx.cache_mut().put(replay_key, proof_bytes);

    info!(
        chain_id = param.source_chain_id,
        height = param.height,
        storage_key = %slot.key,
        "verified cross-chain proof"
    );
    let contract = *ctx.current_context().contract();
    ctx.notify(NotifyEvent {
        contract,
        states: vec![
            "verifyProof".to_owned(),
            param.source_chain_id.to_string(),
            slot.key.clone(),
        ],
    });
    Ok(make_tx)
}

/// Checks that the stored slot value is the low-order bytes of
/// `keccak256(value)`, with the accepted length derived from the
/// stored encoding rather than a hard-coded offset.
fn check_value_commitment(stored: &[u8], value: &str) -> Result<(), CcmError> {
    if stored.len() < MIN_COMMITMENT_LEN || stored.len() > 32 {
        return Err(CcmError::ValueCommitmentMismatch);
    }
    let digest = keccak256(value.as_bytes());
    let suffix = &digest.as_slice()[32 - stored.len()..];
    if stored != suffix {
        return Err(CcmError::ValueCommitmentMismatch);
    }
    Ok(())
}
