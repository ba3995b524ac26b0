//! Bookkeeper keyset and signed-header construction.

use pontoon_header_sync::{HeaderCore, NextConfig, SignedHeader};
use pontoon_primitives::{Buf32, Buf33, ChainId};
use rand::RngCore;
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

/// A set of bookkeeper keypairs for building signed test headers.
#[derive(Clone, Debug)]
pub struct BookkeeperSet {
    pairs: Vec<(SecretKey, Buf33)>,
}

impl BookkeeperSet {
    /// Keypairs derived from fixed scalars, for reproducible fixtures.
    pub fn deterministic(n: u8) -> Self {
        assert!(n > 0, "bookkeeper set cannot be empty");
        let pairs = (1..=n).map(|tag| keypair_from_bytes([tag; 32])).collect();
        Self { pairs }
    }

    pub fn random(n: usize) -> Self {
        let mut rng = rand::thread_rng();
        let mut pairs = Vec::with_capacity(n);
        while pairs.len() < n {
            let mut scalar = [0u8; 32];
            rng.fill_bytes(&mut scalar);
            if let Ok(sk) = SecretKey::from_slice(&scalar) {
                let pk = PublicKey::from_secret_key(SECP256K1, &sk);
                pairs.push((sk, Buf33::new(pk.serialize())));
            }
        }
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn keys(&self) -> Vec<Buf33> {
        self.pairs.iter().map(|(_, k)| *k).collect()
    }

    pub fn next_config(&self, threshold: u32) -> NextConfig {
        NextConfig {
            keys: self.keys(),
            threshold,
        }
    }

    /// Signs `digest` with the first `take` keys of the set.
    pub fn sign_digest(&self, digest: &Buf32, take: usize) -> (Vec<Buf33>, Vec<[u8; 64]>) {
        let msg = Message::from_digest_slice(digest.as_slice()).expect("32-byte digest");
        let mut bookkeepers = Vec::with_capacity(take);
        let mut sig_data = Vec::with_capacity(take);
        for (sk, key) in self.pairs.iter().take(take) {
            bookkeepers.push(*key);
            sig_data.push(SECP256K1.sign_ecdsa(&msg, sk).serialize_compact());
        }
        (bookkeepers, sig_data)
    }
}

fn keypair_from_bytes(scalar: [u8; 32]) -> (SecretKey, Buf33) {
    let sk = SecretKey::from_slice(&scalar).expect("fixture scalar is valid");
    let pk = PublicKey::from_secret_key(SECP256K1, &sk);
    (sk, Buf33::new(pk.serialize()))
}

/// Builds a header signed by the first `signers` keys of `set`.
pub fn build_signed_header(
    chain_id: ChainId,
    height: u64,
    prev_hash: Buf32,
    state_root: Buf32,
    next: Option<NextConfig>,
    set: &BookkeeperSet,
    signers: usize,
) -> Vec<u8> {
    let core = HeaderCore {
        version: 1,
        chain_id,
        prev_hash,
        tx_root: Buf32::zero(),
        state_root,
        timestamp: 1_700_000_000 + height,
        height,
        consensus_payload: Vec::new(),
        next_bookkeepers: next,
    };
    let (bookkeepers, sig_data) = set.sign_digest(&core.hash(), signers);
    SignedHeader {
        core,
        bookkeepers,
        sig_data,
    }
    .encode()
}

/// Builds an unsigned genesis header embedding the set as the chain's
/// starting config.
pub fn build_genesis_header(
    chain_id: ChainId,
    height: u64,
    state_root: Buf32,
    set: &BookkeeperSet,
    threshold: u32,
) -> Vec<u8> {
    build_signed_header(
        chain_id,
        height,
        Buf32::zero(),
        state_root,
        Some(set.next_config(threshold)),
        set,
        0,
    )
}

/// Hash of an encoded header's signed payload.
pub fn header_hash(raw: &[u8]) -> Buf32 {
    SignedHeader::decode(raw)
        .expect("fixture header decodes")
        .core
        .hash()
}
