//! Header log operations over the transactional cache.

use std::fmt;

use pontoon_host::CacheDb;
use pontoon_primitives::{Buf32, ChainId};
use tracing::debug;

use crate::{
    errors::StoreError,
    keys,
    types::{ConsensusConfig, StoredHeader},
};

/// View over one transaction's cache giving access to every chain's
/// header log.
///
/// Writers (`init_genesis`, `append_header`, `put_config`) are reserved
/// for the owning header synchronizer; everything else is read-only.
pub struct HeaderStore<'a, 's> {
    cache: &'a mut CacheDb<'s>,
}

impl fmt::Debug for HeaderStore<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderStore").finish_non_exhaustive()
    }
}

impl<'a, 's> HeaderStore<'a, 's> {
    pub fn new(cache: &'a mut CacheDb<'s>) -> Self {
        Self { cache }
    }

    pub fn is_initialized(&self, chain_id: ChainId) -> Result<bool, StoreError> {
        Ok(self.cache.get(&keys::genesis_key(chain_id))?.is_some())
    }

    /// Admits the genesis header and the chain's starting config.
    /// Valid exactly once per chain.
    pub fn init_genesis(
        &mut self,
        chain_id: ChainId,
        header: &StoredHeader,
        config: ConsensusConfig,
    ) -> Result<(), StoreError> {
        if self.is_initialized(chain_id)? {
            return Err(StoreError::AlreadyInitialized(chain_id));
        }

        self.cache.put(
            keys::genesis_key(chain_id),
            encode(&header.height),
        );
        self.cache
            .put(keys::current_height_key(chain_id), encode(&header.height));
        self.put_header_record(chain_id, header);

        let activations = vec![config.activation_height];
        self.cache
            .put(keys::epoch_list_key(chain_id), encode(&activations));
        self.cache.put(
            keys::config_key(chain_id, config.activation_height),
            encode(&config),
        );

        debug!(chain_id, height = header.height, "initialized header log");
        Ok(())
    }

    pub fn genesis_height(&self, chain_id: ChainId) -> Result<u64, StoreError> {
        let raw = self
            .cache
            .get(&keys::genesis_key(chain_id))?
            .ok_or(StoreError::UnknownChain(chain_id))?;
        decode(&raw, "genesis height")
    }

    pub fn current_height(&self, chain_id: ChainId) -> Result<u64, StoreError> {
        let raw = self
            .cache
            .get(&keys::current_height_key(chain_id))?
            .ok_or(StoreError::UnknownChain(chain_id))?;
        decode(&raw, "current height")
    }

    /// Appends the next header. Heights must advance by exactly one;
    /// anything at or below the tip is rejected, never merged.
    pub fn append_header(
        &mut self,
        chain_id: ChainId,
        header: &StoredHeader,
    ) -> Result<(), StoreError> {
        let current = self.current_height(chain_id)?;
        if header.height <= current {
            return Err(StoreError::StaleHeight {
                current,
                got: header.height,
            });
        }
        if header.height != current + 1 {
            return Err(StoreError::NonContiguousHeight {
                expected: current + 1,
                got: header.height,
            });
        }

        self.put_header_record(chain_id, header);
        self.cache
            .put(keys::current_height_key(chain_id), encode(&header.height));
        Ok(())
    }

    pub fn get_header(
        &self,
        chain_id: ChainId,
        height: u64,
    ) -> Result<StoredHeader, StoreError> {
        let raw = self
            .cache
            .get(&keys::header_key(chain_id, height))?
            .ok_or(StoreError::HeaderNotFound { chain_id, height })?;
        decode(&raw, "header record")
    }

    pub fn get_header_by_hash(
        &self,
        chain_id: ChainId,
        hash: &Buf32,
    ) -> Result<StoredHeader, StoreError> {
        let raw = self
            .cache
            .get(&keys::hash_index_key(chain_id, hash))?
            .ok_or(StoreError::HeaderHashNotFound {
                chain_id,
                hash: *hash,
            })?;
        let height: u64 = decode(&raw, "hash index")?;
        self.get_header(chain_id, height)
    }

    /// Registers a config taking effect at its activation height.
    /// Activation heights strictly increase because each config rides in
    /// an accepted header, so re-registration only overwrites an equal
    /// entry.
    pub fn put_config(
        &mut self,
        chain_id: ChainId,
        config: ConsensusConfig,
    ) -> Result<(), StoreError> {
        let mut activations = self.epoch_list(chain_id)?;
        if let Err(pos) = activations.binary_search(&config.activation_height) {
            activations.insert(pos, config.activation_height);
            self.cache
                .put(keys::epoch_list_key(chain_id), encode(&activations));
        }
        self.cache.put(
            keys::config_key(chain_id, config.activation_height),
            encode(&config),
        );
        debug!(
            chain_id,
            activation = config.activation_height,
            keys = config.keys.len(),
            "registered consensus config"
        );
        Ok(())
    }

    /// Config active at `height`: the latest whose activation height is
    /// at or below it.
    pub fn get_config(
        &self,
        chain_id: ChainId,
        height: u64,
    ) -> Result<ConsensusConfig, StoreError> {
        let activations = self.epoch_list(chain_id)?;
        let active = activations
            .iter()
            .rev()
            .find(|a| **a <= height)
            .ok_or(StoreError::ConfigNotFound { chain_id, height })?;

        let raw = self
            .cache
            .get(&keys::config_key(chain_id, *active))?
            .ok_or(StoreError::Inconsistent("config listed but absent"))?;
        decode(&raw, "consensus config")
    }

    fn epoch_list(&self, chain_id: ChainId) -> Result<Vec<u64>, StoreError> {
        let raw = self
            .cache
            .get(&keys::epoch_list_key(chain_id))?
            .ok_or(StoreError::UnknownChain(chain_id))?;
        decode(&raw, "epoch list")
    }

    fn put_header_record(&mut self, chain_id: ChainId, header: &StoredHeader) {
        self.cache
            .put(keys::header_key(chain_id, header.height), encode(header));
        self.cache.put(
            keys::hash_index_key(chain_id, &header.hash),
            encode(&header.height),
        );
    }
}

fn encode<T: borsh::BorshSerialize>(value: &T) -> Vec<u8> {
    borsh::to_vec(value).expect("borsh encoding of store records is infallible")
}

fn decode<T: borsh::BorshDeserialize>(
    raw: &[u8],
    what: &'static str,
) -> Result<T, StoreError> {
    borsh::from_slice(raw).map_err(|_| StoreError::Inconsistent(what))
}

#[cfg(test)]
mod tests {
    use pontoon_host::MemStore;
    use pontoon_primitives::{hash, Buf33};

    use super::*;

    fn header(height: u64, tag: u8) -> StoredHeader {
        let raw = vec![tag, height as u8];
        StoredHeader {
            height,
            hash: hash::sha256d(&raw),
            state_root: Buf32::new([tag; 32]),
            raw,
        }
    }

    fn config(activation: u64, n: usize) -> ConsensusConfig {
        ConsensusConfig {
            keys: (0..n).map(|i| Buf33::new([i as u8; 33])).collect(),
            threshold: ConsensusConfig::default_threshold(n),
            activation_height: activation,
        }
    }

    #[test]
    fn test_unknown_chain() {
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let store = HeaderStore::new(&mut cache);
        assert!(matches!(
            store.current_height(9).unwrap_err(),
            StoreError::UnknownChain(9)
        ));
        assert!(matches!(
            store.get_config(9, 0).unwrap_err(),
            StoreError::UnknownChain(9)
        ));
    }

    #[test]
    fn test_genesis_idempotence() {
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut store = HeaderStore::new(&mut cache);

        store.init_genesis(3, &header(100, 1), config(100, 7)).unwrap();
        assert_eq!(store.current_height(3).unwrap(), 100);

        let err = store
            .init_genesis(3, &header(100, 2), config(100, 7))
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyInitialized(3)));
        // The failed call must not have disturbed the log.
        assert_eq!(store.get_header(3, 100).unwrap(), header(100, 1));
    }

    #[test]
    fn test_append_monotonicity() {
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut store = HeaderStore::new(&mut cache);
        store.init_genesis(3, &header(0, 0), config(0, 4)).unwrap();

        store.append_header(3, &header(1, 1)).unwrap();
        store.append_header(3, &header(2, 2)).unwrap();
        assert_eq!(store.current_height(3).unwrap(), 2);

        // Replaying an accepted height is an error, not a no-op.
        assert!(matches!(
            store.append_header(3, &header(2, 2)).unwrap_err(),
            StoreError::StaleHeight { current: 2, got: 2 }
        ));
        // A competing header for an occupied height loses to the first.
        assert!(matches!(
            store.append_header(3, &header(1, 9)).unwrap_err(),
            StoreError::StaleHeight { current: 2, got: 1 }
        ));
        // No gaps.
        assert!(matches!(
            store.append_header(3, &header(4, 4)).unwrap_err(),
            StoreError::NonContiguousHeight { expected: 3, got: 4 }
        ));
        assert_eq!(store.current_height(3).unwrap(), 2);
    }

    #[test]
    fn test_lookup_by_height_and_hash_agree() {
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut store = HeaderStore::new(&mut cache);
        store.init_genesis(3, &header(0, 0), config(0, 4)).unwrap();
        let h1 = header(1, 1);
        store.append_header(3, &h1).unwrap();

        let by_height = store.get_header(3, 1).unwrap();
        let by_hash = store.get_header_by_hash(3, &h1.hash).unwrap();
        assert_eq!(by_height, by_hash);

        assert!(matches!(
            store.get_header(3, 7).unwrap_err(),
            StoreError::HeaderNotFound { chain_id: 3, height: 7 }
        ));
    }

    #[test]
    fn test_config_epoch_selection() {
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut store = HeaderStore::new(&mut cache);
        store.init_genesis(3, &header(10, 0), config(10, 4)).unwrap();
        store.put_config(3, config(21, 7)).unwrap();

        assert_eq!(store.get_config(3, 10).unwrap().keys.len(), 4);
        assert_eq!(store.get_config(3, 20).unwrap().keys.len(), 4);
        assert_eq!(store.get_config(3, 21).unwrap().keys.len(), 7);
        assert_eq!(store.get_config(3, 500).unwrap().keys.len(), 7);

        // Below genesis there is no active config.
        assert!(matches!(
            store.get_config(3, 9).unwrap_err(),
            StoreError::ConfigNotFound { chain_id: 3, height: 9 }
        ));
    }

    #[test]
    fn test_per_chain_isolation() {
        let mut base = MemStore::new();
        let mut cache = CacheDb::new(&mut base);
        let mut store = HeaderStore::new(&mut cache);
        store.init_genesis(3, &header(0, 3), config(0, 4)).unwrap();
        store.init_genesis(5, &header(7, 5), config(7, 7)).unwrap();

        assert_eq!(store.current_height(3).unwrap(), 0);
        assert_eq!(store.current_height(5).unwrap(), 7);
        assert_eq!(store.get_config(5, 7).unwrap().keys.len(), 7);
    }
}
