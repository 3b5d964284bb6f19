//! In-memory store for tests and headless runs

use std::collections::BTreeMap;

use super::{KeyValueStore, PersistenceError};

/// Keeps pending writes apart from flushed ones so tests can see durability
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pending: BTreeMap<String, i64>,
    durable: BTreeMap<String, i64>,
    flushes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with already durable values
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        let durable: BTreeMap<String, i64> =
            values.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        Self {
            pending: BTreeMap::new(),
            durable,
            flushes: 0,
        }
    }

    /// Value as it would survive a crash right now
    pub fn durable_int(&self, key: &str) -> Option<i64> {
        self.durable.get(key).copied()
    }

    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    pub fn has_pending_writes(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.pending
            .get(key)
            .or_else(|| self.durable.get(key))
            .copied()
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.pending.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), PersistenceError> {
        self.durable.append(&mut self.pending);
        self.flushes += 1;
        Ok(())
    }
}
