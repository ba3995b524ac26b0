//! Genesis and block-header admission.

use pontoon_chain_store::HeaderStore;
use pontoon_host::{
    NativeContext, NotifyEvent, SYNC_BLOCK_HEADER_GAS, SYNC_GENESIS_HEADER_GAS,
};
use pontoon_primitives::Address;
use tracing::info;

use crate::{
    errors::SyncError,
    types::{SignedHeader, SyncBlockHeaderParam, SyncGenesisHeaderParam},
    verify::verify_header_quorum,
};

/// Admits a chain's genesis header and fixes its starting bookkeeper
/// set. Valid only while the chain is uninitialized; the caller must be
/// the relay operator and a transaction witness.
///
/// The genesis header itself is the trust root and carries its config
/// in the `next_bookkeepers` slot; no quorum check applies to it.
pub fn sync_genesis_header(
    ctx: &mut NativeContext<'_, '_>,
    param: &SyncGenesisHeaderParam,
    operator: &Address,
) -> Result<(), SyncError> {
    if !ctx.check_witness(operator) {
        return Err(SyncError::Unauthorized(*operator));
    }
    ctx.check_use_gas(SYNC_GENESIS_HEADER_GAS)?;

    let signed = SignedHeader::decode(&param.genesis_header)?;
    if signed.core.chain_id != param.chain_id {
        return Err(SyncError::ChainIdMismatch {
            expected: param.chain_id,
            got: signed.core.chain_id,
        });
    }
    let next = signed
        .core
        .next_bookkeepers
        .clone()
        .ok_or(SyncError::MissingGenesisConfig)?;
    let config = next.into_config(signed.core.height)?;
    let stored = signed.to_stored(&param.genesis_header);

    {
        let mut store = HeaderStore::new(ctx.cache_mut());
        store.init_genesis(param.chain_id, &stored, config)?;
    }

    info!(
        chain_id = param.chain_id,
        height = stored.height,
        hash = %stored.hash,
        "admitted genesis header"
    );
    let contract = *ctx.current_context().contract();
    ctx.notify(NotifyEvent {
        contract,
        states: vec![
            "syncGenesisHeader".to_owned(),
            param.chain_id.to_string(),
            stored.height.to_string(),
            stored.hash.to_string(),
        ],
    });
    Ok(())
}

/// Admits a batch of consecutive headers, each verified against the
/// bookkeeper set active at its height.
///
/// Headers are applied in order and the batch stops at the first
/// failure; already-admitted headers stay in the transaction overlay,
/// and the enclosing transaction decides whether they commit.
pub fn sync_block_header(
    ctx: &mut NativeContext<'_, '_>,
    param: &SyncBlockHeaderParam,
) -> Result<(), SyncError> {
    if !ctx.check_witness(&param.address) {
        return Err(SyncError::Unauthorized(param.address));
    }

    for raw in &param.headers {
        ctx.check_use_gas(SYNC_BLOCK_HEADER_GAS)?;

        let signed = SignedHeader::decode(raw)?;
        if signed.core.chain_id != param.chain_id {
            return Err(SyncError::ChainIdMismatch {
                expected: param.chain_id,
                got: signed.core.chain_id,
            });
        }
        let stored = signed.to_stored(raw);

        {
            let mut store = HeaderStore::new(ctx.cache_mut());
            let config = store.get_config(param.chain_id, signed.core.height)?;
            verify_header_quorum(&signed, &config)?;
            store.append_header(param.chain_id, &stored)?;

            // Epoch rotation takes effect on the following header, not
            // retroactively on the one carrying the new set.
            if let Some(next) = signed.core.next_bookkeepers.clone() {
                let rotated = next.into_config(signed.core.height + 1)?;
                store.put_config(param.chain_id, rotated)?;
            }
        }

        info!(
            chain_id = param.chain_id,
            height = stored.height,
            hash = %stored.hash,
            "admitted block header"
        );
        let contract = *ctx.current_context().contract();
        ctx.notify(NotifyEvent {
            contract,
            states: vec![
                "syncBlockHeader".to_owned(),
                param.chain_id.to_string(),
                stored.height.to_string(),
                stored.hash.to_string(),
            ],
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pontoon_chain_store::StoreError;
    use pontoon_host::{CacheDb, HostError, MemStore};
    use pontoon_primitives::{hash, Buf20, Buf32, Buf33};
    use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

    use super::*;
    use crate::types::{HeaderCore, NextConfig};

    const CHAIN: u64 = 3;

    fn ccm_addr() -> Address {
        Buf20::new([0xcc; 20])
    }

    fn relayer() -> Address {
        Buf20::new([0x11; 20])
    }

    fn keypair(tag: u8) -> (SecretKey, Buf33) {
        let sk = SecretKey::from_slice(&[tag; 32]).expect("nonzero scalar");
        let pk = PublicKey::from_secret_key(SECP256K1, &sk);
        (sk, Buf33::new(pk.serialize()))
    }

    fn keyset(tags: &[u8]) -> Vec<(SecretKey, Buf33)> {
        tags.iter().map(|t| keypair(*t)).collect()
    }

    fn next_config(keys: &[(SecretKey, Buf33)], threshold: u32) -> NextConfig {
        NextConfig {
            keys: keys.iter().map(|(_, k)| *k).collect(),
            threshold,
        }
    }

    fn build_header(
        height: u64,
        prev_hash: Buf32,
        next: Option<NextConfig>,
        signers: &[&(SecretKey, Buf33)],
    ) -> Vec<u8> {
        let core = HeaderCore {
            version: 1,
            chain_id: CHAIN,
            prev_hash,
            tx_root: Buf32::zero(),
            state_root: hash::sha256d(&height.to_le_bytes()),
            timestamp: 1_700_000_000 + height,
            height,
            consensus_payload: Vec::new(),
            next_bookkeepers: next,
        };
        let msg = Message::from_digest_slice(core.hash().as_slice()).expect("32-byte digest");
        let mut bookkeepers = Vec::new();
        let mut sig_data = Vec::new();
        for (sk, key) in signers {
            bookkeepers.push(*key);
            sig_data.push(SECP256K1.sign_ecdsa(&msg, sk).serialize_compact());
        }
        SignedHeader {
            core,
            bookkeepers,
            sig_data,
        }
        .encode()
    }

    fn genesis_param(keys: &[(SecretKey, Buf33)], threshold: u32) -> SyncGenesisHeaderParam {
        SyncGenesisHeaderParam {
            chain_id: CHAIN,
            genesis_header: build_header(0, Buf32::zero(), Some(next_config(keys, threshold)), &[]),
        }
    }

    fn block_param(headers: Vec<Vec<u8>>) -> SyncBlockHeaderParam {
        SyncBlockHeaderParam {
            chain_id: CHAIN,
            address: relayer(),
            headers,
        }
    }

    fn new_ctx<'c, 's>(cache: &'c mut CacheDb<'s>) -> NativeContext<'c, 's> {
        NativeContext::new(
            cache,
            Buf32::zero(),
            vec![relayer()],
            100_000_000,
            ccm_addr(),
            true,
        )
    }

    fn header_hash(raw: &[u8]) -> Buf32 {
        SignedHeader::decode(raw).unwrap().core.hash()
    }

    #[test]
    fn test_sync_genesis_header() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);

        sync_genesis_header(&mut ctx, &genesis_param(&keys, 3), &relayer()).unwrap();

        let store = HeaderStore::new(ctx.cache_mut());
        assert_eq!(store.current_height(CHAIN).unwrap(), 0);
        let cfg = store.get_config(CHAIN, 0).unwrap();
        assert_eq!(cfg.keys.len(), 4);
        assert_eq!(cfg.threshold, 3);
    }

    #[test]
    fn test_sync_genesis_twice_fails() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);

        let mut ctx = new_ctx(&mut cache);
        sync_genesis_header(&mut ctx, &genesis_param(&keys, 3), &relayer()).unwrap();
        drop(ctx);

        let mut ctx = new_ctx(&mut cache);
        let err =
            sync_genesis_header(&mut ctx, &genesis_param(&keys, 3), &relayer()).unwrap_err();
        assert!(matches!(
            err,
            SyncError::Store(StoreError::AlreadyInitialized(CHAIN))
        ));
    }

    #[test]
    fn test_sync_genesis_requires_witness() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);

        let stranger = Buf20::new([0x99; 20]);
        let err =
            sync_genesis_header(&mut ctx, &genesis_param(&keys, 3), &stranger).unwrap_err();
        assert!(matches!(err, SyncError::Unauthorized(_)));
    }

    #[test]
    fn test_sync_genesis_without_config_fails() {
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);

        let param = SyncGenesisHeaderParam {
            chain_id: CHAIN,
            genesis_header: build_header(0, Buf32::zero(), None, &[]),
        };
        let err = sync_genesis_header(&mut ctx, &param, &relayer()).unwrap_err();
        assert!(matches!(err, SyncError::MissingGenesisConfig));
    }

    #[test]
    fn test_sync_block_headers() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);
        sync_genesis_header(&mut ctx, &genesis_param(&keys, 3), &relayer()).unwrap();

        let g_hash = header_hash(&genesis_param(&keys, 3).genesis_header);
        let signers: Vec<_> = keys.iter().take(3).collect();
        let h1 = build_header(1, g_hash, None, &signers);
        let h2 = build_header(2, header_hash(&h1), None, &signers);

        sync_block_header(&mut ctx, &block_param(vec![h1, h2])).unwrap();

        let store = HeaderStore::new(ctx.cache_mut());
        assert_eq!(store.current_height(CHAIN).unwrap(), 2);
        let notes = ctx.notifications();
        // One genesis notification plus one per admitted header.
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[2].states[0], "syncBlockHeader");
        assert_eq!(notes[2].states[2], "2");
    }

    #[test]
    fn test_sync_same_batch_twice_fails() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);

        let mut ctx = new_ctx(&mut cache);
        let gparam = genesis_param(&keys, 3);
        sync_genesis_header(&mut ctx, &gparam, &relayer()).unwrap();

        let signers: Vec<_> = keys.iter().take(3).collect();
        let h1 = build_header(1, header_hash(&gparam.genesis_header), None, &signers);
        let h2 = build_header(2, header_hash(&h1), None, &signers);
        sync_block_header(&mut ctx, &block_param(vec![h1.clone(), h2.clone()])).unwrap();
        drop(ctx);

        // Resubmitting the identical batch fails on the first height,
        // even though the bytes are unchanged.
        let mut ctx = new_ctx(&mut cache);
        let err = sync_block_header(&mut ctx, &block_param(vec![h1, h2])).unwrap_err();
        assert!(matches!(
            err,
            SyncError::Store(StoreError::StaleHeight { current: 2, got: 1 })
        ));
        let store = HeaderStore::new(ctx.cache_mut());
        assert_eq!(store.current_height(CHAIN).unwrap(), 2);
    }

    #[test]
    fn test_quorum_boundary() {
        let keys = keyset(&[1, 2, 3, 4, 5, 6, 7]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);
        let gparam = genesis_param(&keys, 5);
        sync_genesis_header(&mut ctx, &gparam, &relayer()).unwrap();
        let g_hash = header_hash(&gparam.genesis_header);

        // Four of seven signatures is below the threshold of five.
        let four: Vec<_> = keys.iter().take(4).collect();
        let short = build_header(1, g_hash, None, &four);
        let err = sync_block_header(&mut ctx, &block_param(vec![short])).unwrap_err();
        assert!(matches!(
            err,
            SyncError::QuorumNotReached { got: 4, need: 5 }
        ));

        // Exactly the threshold is accepted.
        let five: Vec<_> = keys.iter().take(5).collect();
        let exact = build_header(1, g_hash, None, &five);
        sync_block_header(&mut ctx, &block_param(vec![exact])).unwrap();
    }

    #[test]
    fn test_duplicate_signer_counts_once() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);
        let gparam = genesis_param(&keys, 3);
        sync_genesis_header(&mut ctx, &gparam, &relayer()).unwrap();

        let signers = [&keys[0], &keys[0], &keys[1]];
        let h1 = build_header(1, header_hash(&gparam.genesis_header), None, &signers);
        let err = sync_block_header(&mut ctx, &block_param(vec![h1])).unwrap_err();
        assert!(matches!(
            err,
            SyncError::QuorumNotReached { got: 2, need: 3 }
        ));
    }

    #[test]
    fn test_epoch_rotation_applies_next_height() {
        let old = keyset(&[1, 2, 3, 4]);
        let new = keyset(&[11, 12, 13, 14]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);
        let gparam = genesis_param(&old, 3);
        sync_genesis_header(&mut ctx, &gparam, &relayer()).unwrap();

        // H1 rotates the set but is still verified against the old one;
        // the new-set-only signature contributes nothing yet.
        let h1_signers = [&old[0], &old[1], &old[2], &new[0]];
        let h1 = build_header(
            1,
            header_hash(&gparam.genesis_header),
            Some(next_config(&new, 3)),
            &h1_signers,
        );
        sync_block_header(&mut ctx, &block_param(vec![h1.clone()])).unwrap();

        // From H2 on, the old set no longer reaches quorum.
        let old_signers: Vec<_> = old.iter().take(3).collect();
        let h2_old = build_header(2, header_hash(&h1), None, &old_signers);
        let err = sync_block_header(&mut ctx, &block_param(vec![h2_old])).unwrap_err();
        assert!(matches!(err, SyncError::QuorumNotReached { got: 0, need: 3 }));

        let new_signers: Vec<_> = new.iter().take(3).collect();
        let h2_new = build_header(2, header_hash(&h1), None, &new_signers);
        sync_block_header(&mut ctx, &block_param(vec![h2_new])).unwrap();

        let store = HeaderStore::new(ctx.cache_mut());
        assert_eq!(store.current_height(CHAIN).unwrap(), 2);
        assert_eq!(store.get_config(CHAIN, 1).unwrap().keys, old_keys(&old));
        assert_eq!(store.get_config(CHAIN, 2).unwrap().keys, old_keys(&new));
    }

    fn old_keys(set: &[(SecretKey, Buf33)]) -> Vec<Buf33> {
        set.iter().map(|(_, k)| *k).collect()
    }

    #[test]
    fn test_gap_rejected() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);
        let gparam = genesis_param(&keys, 3);
        sync_genesis_header(&mut ctx, &gparam, &relayer()).unwrap();

        let signers: Vec<_> = keys.iter().take(3).collect();
        let h2 = build_header(2, Buf32::zero(), None, &signers);
        let err = sync_block_header(&mut ctx, &block_param(vec![h2])).unwrap_err();
        assert!(matches!(
            err,
            SyncError::Store(StoreError::NonContiguousHeight { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn test_partial_batch_keeps_prefix() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);
        let gparam = genesis_param(&keys, 3);
        sync_genesis_header(&mut ctx, &gparam, &relayer()).unwrap();

        let signers: Vec<_> = keys.iter().take(3).collect();
        let h1 = build_header(1, header_hash(&gparam.genesis_header), None, &signers);
        let h3 = build_header(3, Buf32::zero(), None, &signers);

        let err = sync_block_header(&mut ctx, &block_param(vec![h1, h3])).unwrap_err();
        assert!(matches!(err, SyncError::Store(_)));
        // H1 stays applied in the overlay; the transaction boundary
        // owns rollback.
        let store = HeaderStore::new(ctx.cache_mut());
        assert_eq!(store.current_height(CHAIN).unwrap(), 1);
    }

    #[test]
    fn test_malformed_header_rejected() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);
        sync_genesis_header(&mut ctx, &genesis_param(&keys, 3), &relayer()).unwrap();

        let err = sync_block_header(&mut ctx, &block_param(vec![vec![0xde, 0xad]])).unwrap_err();
        assert!(matches!(err, SyncError::MalformedHeader(_)));
    }

    #[test]
    fn test_unauthorized_relayer_rejected() {
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);

        let mut param = block_param(Vec::new());
        param.address = Buf20::new([0x77; 20]);
        let err = sync_block_header(&mut ctx, &param).unwrap_err();
        assert!(matches!(err, SyncError::Unauthorized(_)));
    }

    #[test]
    fn test_out_of_gas_aborts_batch() {
        let keys = keyset(&[1, 2, 3, 4]);
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut ctx = new_ctx(&mut cache);
        let gparam = genesis_param(&keys, 3);
        sync_genesis_header(&mut ctx, &gparam, &relayer()).unwrap();
        drop(ctx);

        let mut ctx = NativeContext::new(
            &mut cache,
            Buf32::zero(),
            vec![relayer()],
            SYNC_BLOCK_HEADER_GAS - 1,
            ccm_addr(),
            true,
        );
        let signers: Vec<_> = keys.iter().take(3).collect();
        let h1 = build_header(1, header_hash(&gparam.genesis_header), None, &signers);
        let err = sync_block_header(&mut ctx, &block_param(vec![h1])).unwrap_err();
        assert!(matches!(err, SyncError::Host(HostError::OutOfGas { .. })));
    }
}
