//! Key/value store contract required from the surrounding node.
//!
//! The relay core only ever sees this trait; the durable implementation
//! (and its recovery story) belongs to the ledger-store layer outside
//! this workspace.

use std::collections::BTreeMap;

use thiserror::Error;

/// Catastrophic storage I/O fault.
///
/// Unlike every other error in the relay core this is not attributable
/// to the submitted transaction and must be escalated as a process-level
/// fault rather than a transaction rejection.
#[derive(Debug, Error)]
#[error("storage fault: {0}")]
pub struct DbError(pub String);

/// Transactional key/value contract.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DbError>;

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<(), DbError>;

    fn delete(&mut self, key: &[u8]) -> Result<(), DbError>;
}

/// In-memory store backing tests and tools.
#[derive(Debug, Default)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DbError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<(), DbError> {
        self.entries.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), DbError> {
        self.entries.remove(key);
        Ok(())
    }
}
