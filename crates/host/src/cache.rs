//! Copy-on-write overlay for state modifications during transaction
//! execution.
//!
//! Reads check the overlay first, then fall through to the base store.
//! Writes populate the overlay; deletes leave tombstones. Nothing
//! reaches the base until [`CacheDb::commit`], so a rejected transaction
//! rolls back by simply dropping the overlay. Batch-level atomicity is
//! therefore owned by the enclosing transaction, not by the operations
//! writing through this cache.

use std::{collections::BTreeMap, fmt};

use tracing::debug;

use crate::kv::{DbError, KvStore};

pub struct CacheDb<'s> {
    base: &'s mut dyn KvStore,
    overlay: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl fmt::Debug for CacheDb<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheDb")
            .field("overlay_entries", &self.overlay.len())
            .finish()
    }
}

impl<'s> CacheDb<'s> {
    pub fn new(base: &'s mut dyn KvStore) -> Self {
        Self {
            base,
            overlay: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DbError> {
        if let Some(entry) = self.overlay.get(key) {
            return Ok(entry.clone());
        }
        self.base.get(key)
    }

    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.overlay.insert(key, Some(value));
    }

    pub fn delete(&mut self, key: &[u8]) {
        self.overlay.insert(key.to_vec(), None);
    }

    /// Number of keys touched since the last commit.
    pub fn dirty_len(&self) -> usize {
        self.overlay.len()
    }

    /// Applies the overlay to the base store and clears it.
    ///
    /// Called once per successful transaction; a failed transaction
    /// instead calls [`CacheDb::discard`] (or just drops the cache).
    pub fn commit(&mut self) -> Result<(), DbError> {
        let overlay = std::mem::take(&mut self.overlay);
        let entries = overlay.len();
        for (key, value) in overlay {
            match value {
                Some(v) => self.base.put(key, v)?,
                None => self.base.delete(&key)?,
            }
        }
        debug!(entries, "committed overlay to base store");
        Ok(())
    }

    /// Throws away all uncommitted writes.
    pub fn discard(&mut self) {
        self.overlay.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemStore;

    #[test]
    fn test_overlay_read_through() {
        let mut store = MemStore::new();
        store.put(b"a".to_vec(), vec![1]).unwrap();

        let mut cache = CacheDb::new(&mut store);
        assert_eq!(cache.get(b"a").unwrap(), Some(vec![1]));

        cache.put(b"a".to_vec(), vec![2]);
        assert_eq!(cache.get(b"a").unwrap(), Some(vec![2]));

        cache.delete(b"a");
        assert_eq!(cache.get(b"a").unwrap(), None);
    }

    #[test]
    fn test_discard_rolls_back() {
        let mut store = MemStore::new();
        store.put(b"a".to_vec(), vec![1]).unwrap();

        let mut cache = CacheDb::new(&mut store);
        cache.put(b"a".to_vec(), vec![9]);
        cache.put(b"b".to_vec(), vec![9]);
        cache.discard();
        assert_eq!(cache.get(b"a").unwrap(), Some(vec![1]));
        assert_eq!(cache.get(b"b").unwrap(), None);
    }

    #[test]
    fn test_commit_applies_writes_and_tombstones() {
        let mut store = MemStore::new();
        store.put(b"gone".to_vec(), vec![1]).unwrap();

        let mut cache = CacheDb::new(&mut store);
        cache.put(b"kept".to_vec(), vec![7]);
        cache.delete(b"gone");
        cache.commit().unwrap();
        assert_eq!(cache.dirty_len(), 0);

        assert_eq!(store.get(b"kept").unwrap(), Some(vec![7]));
        assert_eq!(store.get(b"gone").unwrap(), None);
    }
}
