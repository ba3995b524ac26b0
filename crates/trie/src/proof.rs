//! Proof walks against a committed root.

use std::collections::HashMap;

use pontoon_primitives::{hash::keccak256, Buf32};
use rlp::Rlp;

use crate::{account::ProofAccount, errors::ProofError};

/// Steps a walk can take after resolving a child reference.
enum Step<'a> {
    /// Continue into the referenced node.
    Into(&'a [u8]),
    /// The child slot is empty: a valid proof of absence.
    Absent,
}

/// Verifies an inclusion proof for `key_digest` against `root`.
///
/// `proof_nodes` is an unordered set of RLP-encoded nodes; children are
/// resolved by keccak256 digest, or inline for nodes shorter than 32
/// bytes. Returns the stored value, or `None` for a well-formed proof
/// of absence.
pub fn verify_proof(
    root: &Buf32,
    key_digest: &Buf32,
    proof_nodes: &[Vec<u8>],
) -> Result<Option<Vec<u8>>, ProofError> {
    if proof_nodes.is_empty() {
        return Err(ProofError::EmptyProof);
    }

    let mut nodes: HashMap<[u8; 32], &[u8]> = HashMap::with_capacity(proof_nodes.len());
    for node in proof_nodes {
        nodes.insert(keccak256(node).into_inner(), node.as_slice());
    }

    let nibbles = to_nibbles(key_digest.as_slice());
    let mut path: &[u8] = &nibbles;
    let mut current: &[u8] = nodes
        .get(root.as_bytes())
        .copied()
        .ok_or(ProofError::RootMismatch { expected: *root })?;

    // A 64-nibble key bounds the walk: every branch consumes a nibble
    // and every extension at least one, plus a terminal node.
    for depth in 0..=nibbles.len() + 1 {
        let node = Rlp::new(current);
        let items = node
            .item_count()
            .map_err(|_| ProofError::InvalidNode { depth })?;
        match items {
            17 => {
                if path.is_empty() {
                    let value = node
                        .at(16)
                        .and_then(|v| v.data())
                        .map_err(|_| ProofError::InvalidNode { depth })?;
                    return Ok(non_empty(value));
                }
                let child = node
                    .at(path[0] as usize)
                    .map_err(|_| ProofError::InvalidNode { depth })?;
                path = &path[1..];
                match resolve_child(child, &nodes, depth)? {
                    Step::Into(next) => current = next,
                    Step::Absent => return Ok(None),
                }
            }
            2 => {
                let encoded_path = node
                    .at(0)
                    .and_then(|p| p.data())
                    .map_err(|_| ProofError::InvalidNode { depth })?;
                let (prefix, is_leaf) = decode_compact(encoded_path);
                if is_leaf {
                    if path != prefix.as_slice() {
                        // Leaf for a different key: proof of absence.
                        return Ok(None);
                    }
                    let value = node
                        .at(1)
                        .and_then(|v| v.data())
                        .map_err(|_| ProofError::InvalidNode { depth })?;
                    return Ok(non_empty(value));
                }
                if !path.starts_with(&prefix) {
                    return Ok(None);
                }
                path = &path[prefix.len()..];
                let child = node
                    .at(1)
                    .map_err(|_| ProofError::InvalidNode { depth })?;
                match resolve_child(child, &nodes, depth)? {
                    Step::Into(next) => current = next,
                    Step::Absent => return Ok(None),
                }
            }
            _ => return Err(ProofError::InvalidNode { depth }),
        }
    }

    Err(ProofError::IncompleteProof {
        depth: nibbles.len() + 1,
    })
}

/// Verifies the account leg: the proof must resolve `address` to
/// exactly the claimed account state under `state_root`.
pub fn verify_account_proof(
    state_root: &Buf32,
    address: &[u8],
    account: &ProofAccount,
    proof_nodes: &[Vec<u8>],
) -> Result<(), ProofError> {
    let key = keccak256(address);
    let leaf = verify_proof(state_root, &key, proof_nodes)?
        .ok_or_else(|| ProofError::AccountNotFound(hex::encode(address)))?;
    if leaf != account.rlp_encode() {
        return Err(ProofError::AccountMismatch);
    }
    Ok(())
}

/// Verifies the storage leg: resolves `slot` under the account's
/// storage root and returns the raw stored bytes.
pub fn verify_storage_proof(
    storage_root: &Buf32,
    slot: &[u8],
    proof_nodes: &[Vec<u8>],
) -> Result<Vec<u8>, ProofError> {
    let key = keccak256(slot);
    let raw = verify_proof(storage_root, &key, proof_nodes)?
        .ok_or_else(|| ProofError::StorageNotFound(hex::encode(slot)))?;
    // Stored slot values are themselves RLP byte strings.
    let value = Rlp::new(&raw)
        .data()
        .map_err(|_| ProofError::InvalidValueEncoding)?;
    Ok(value.to_vec())
}

fn resolve_child<'a>(
    child: Rlp<'a>,
    nodes: &HashMap<[u8; 32], &'a [u8]>,
    depth: usize,
) -> Result<Step<'a>, ProofError> {
    // Nodes shorter than 32 bytes are embedded in the parent instead of
    // being referenced by hash.
    if child.is_list() {
        return Ok(Step::Into(child.as_raw()));
    }
    let data = child
        .data()
        .map_err(|_| ProofError::InvalidNode { depth })?;
    if data.is_empty() {
        return Ok(Step::Absent);
    }
    if data.len() == 32 {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(data);
        return nodes
            .get(&digest)
            .copied()
            .map(Step::Into)
            .ok_or(ProofError::MissingNode { depth });
    }
    Err(ProofError::InvalidNode { depth })
}

fn non_empty(value: &[u8]) -> Option<Vec<u8>> {
    (!value.is_empty()).then(|| value.to_vec())
}

fn to_nibbles(bytes: &[u8]) -> Vec<u8> {
    let mut nibbles = Vec::with_capacity(bytes.len() * 2);
    for byte in bytes {
        nibbles.push(byte >> 4);
        nibbles.push(byte & 0x0f);
    }
    nibbles
}

/// Decodes the hex-prefix path encoding; returns the path nibbles and
/// whether the node is a leaf.
fn decode_compact(encoded: &[u8]) -> (Vec<u8>, bool) {
    if encoded.is_empty() {
        return (Vec::new(), false);
    }
    let flag = encoded[0] >> 4;
    let is_leaf = flag >= 2;
    let is_odd = flag & 1 == 1;

    let mut nibbles = Vec::new();
    if is_odd {
        nibbles.push(encoded[0] & 0x0f);
    }
    for byte in &encoded[1..] {
        nibbles.push(byte >> 4);
        nibbles.push(byte & 0x0f);
    }
    (nibbles, is_leaf)
}
