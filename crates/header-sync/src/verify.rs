//! Quorum signature verification against the active bookkeeper set.

use pontoon_chain_store::ConsensusConfig;
use pontoon_primitives::Buf33;
use secp256k1::{ecdsa::Signature, Message, PublicKey, SECP256K1};
use tracing::debug;

use crate::{errors::SyncError, types::SignedHeader};

/// Checks that the header carries at least `threshold` valid signatures
/// from distinct keys of the active config, over the canonical header
/// digest.
///
/// Signatures by keys outside the active set are skipped, not errors: a
/// header signed during an epoch handover may legitimately carry
/// next-set signatures that simply do not count yet.
pub fn verify_header_quorum(
    header: &SignedHeader,
    config: &ConsensusConfig,
) -> Result<(), SyncError> {
    if header.bookkeepers.len() != header.sig_data.len() {
        return Err(SyncError::SignatureCountMismatch {
            signers: header.bookkeepers.len(),
            got: header.sig_data.len(),
        });
    }

    let digest = header.core.hash();
    let msg = Message::from_digest_slice(digest.as_slice()).expect("32-byte digest");

    let mut counted: Vec<&Buf33> = Vec::new();
    for (key, sig) in header.bookkeepers.iter().zip(header.sig_data.iter()) {
        if !config.contains_key(key) || counted.contains(&key) {
            continue;
        }
        let Ok(pubkey) = PublicKey::from_slice(key.as_slice()) else {
            continue;
        };
        let Ok(signature) = Signature::from_compact(sig) else {
            continue;
        };
        if SECP256K1.verify_ecdsa(&msg, &signature, &pubkey).is_ok() {
            counted.push(key);
        }
    }

    let got = counted.len() as u32;
    if got < config.threshold {
        debug!(got, need = config.threshold, "header quorum not reached");
        return Err(SyncError::QuorumNotReached {
            got,
            need: config.threshold,
        });
    }
    Ok(())
}
