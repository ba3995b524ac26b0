//! Wire types for the bookkeeper chain family.

use borsh::{BorshDeserialize, BorshSerialize};
use pontoon_chain_store::{ConsensusConfig, StoredHeader};
use pontoon_primitives::{hash, Address, Buf32, Buf33, ChainId};

use crate::errors::SyncError;

/// Bookkeeper set embedded in a header, effective from the following
/// height. A zero threshold selects the BFT default for the key count.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct NextConfig {
    pub keys: Vec<Buf33>,
    pub threshold: u32,
}

impl NextConfig {
    /// Validates the embedded set and pins it to an activation height.
    pub fn into_config(self, activation_height: u64) -> Result<ConsensusConfig, SyncError> {
        if self.keys.is_empty() {
            return Err(SyncError::InvalidConfig("empty bookkeeper set"));
        }
        if self.threshold as usize > self.keys.len() {
            return Err(SyncError::InvalidConfig("threshold exceeds key count"));
        }
        let threshold = if self.threshold == 0 {
            ConsensusConfig::default_threshold(self.keys.len())
        } else {
            self.threshold
        };
        Ok(ConsensusConfig {
            keys: self.keys,
            threshold,
            activation_height,
        })
    }
}

/// Consensus fields of a bookkeeper header; this is the signed payload.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct HeaderCore {
    pub version: u32,
    pub chain_id: ChainId,
    pub prev_hash: Buf32,
    pub tx_root: Buf32,
    pub state_root: Buf32,
    pub timestamp: u64,
    pub height: u64,
    /// Opaque chain-family consensus payload (VRF material and the
    /// like); carried, not interpreted.
    pub consensus_payload: Vec<u8>,
    pub next_bookkeepers: Option<NextConfig>,
}

impl HeaderCore {
    /// Canonical header digest the bookkeepers sign.
    pub fn hash(&self) -> Buf32 {
        let enc = borsh::to_vec(self).expect("header core encoding is infallible");
        hash::sha256d(&enc)
    }
}

/// A header together with its consensus proof: the bookkeepers that
/// signed it and one compact ECDSA signature per listed key.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SignedHeader {
    pub core: HeaderCore,
    pub bookkeepers: Vec<Buf33>,
    pub sig_data: Vec<[u8; 64]>,
}

impl SignedHeader {
    pub fn decode(raw: &[u8]) -> Result<Self, SyncError> {
        borsh::from_slice(raw).map_err(|_| SyncError::MalformedHeader("undecodable bytes"))
    }

    pub fn encode(&self) -> Vec<u8> {
        borsh::to_vec(self).expect("header encoding is infallible")
    }

    /// Record form persisted after acceptance.
    pub fn to_stored(&self, raw: &[u8]) -> StoredHeader {
        StoredHeader {
            height: self.core.height,
            hash: self.core.hash(),
            state_root: self.core.state_root,
            raw: raw.to_vec(),
        }
    }
}

/// Sink parameter admitting a chain's genesis header.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SyncGenesisHeaderParam {
    pub chain_id: ChainId,
    pub genesis_header: Vec<u8>,
}

/// Sink parameter admitting a batch of consecutive headers.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SyncBlockHeaderParam {
    pub chain_id: ChainId,
    /// Submitting relayer; must be a transaction witness.
    pub address: Address,
    pub headers: Vec<Vec<u8>>,
}
