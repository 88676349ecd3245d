//! Mock key-value store for integration testing.
//!
//! Provides a deterministic `KeyValueStore` implementation whose reads and
//! writes can be forced to fail, and which records every write so tests can
//! check exactly what was persisted and when.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fightbet::storage::KeyValueStore;

/// A mock store for deterministic testing.
///
/// Clones share state, so a test can keep a handle while the session owns
/// the store.
#[derive(Clone, Default)]
pub struct MockStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<Mutex<Vec<(String, String)>>>,
    /// If set, reads return this error.
    read_error: Arc<Mutex<Option<String>>>,
    /// If set, writes return this error.
    write_error: Arc<Mutex<Option<String>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `value` already stored under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn fail_reads(&self, msg: &str) {
        *self.read_error.lock().unwrap() = Some(msg.to_string());
    }

    pub fn fail_writes(&self, msg: &str) {
        *self.write_error.lock().unwrap() = Some(msg.to_string());
    }

    pub fn clear_errors(&self) {
        *self.read_error.lock().unwrap() = None;
        *self.write_error.lock().unwrap() = None;
    }

    /// Every successful write, in order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl KeyValueStore for MockStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(msg) = self.read_error.lock().unwrap().as_ref() {
            return Err(anyhow!("{msg}"));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(msg) = self.write_error.lock().unwrap().as_ref() {
            return Err(anyhow!("{msg}"));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_writes() {
        let mut store = MockStore::new();
        store.set("balance", "1100").unwrap();
        store.set("balance", "900").unwrap();
        assert_eq!(store.get("balance").unwrap().as_deref(), Some("900"));
        assert_eq!(store.writes().len(), 2);
    }

    #[test]
    fn test_mock_forced_errors() {
        let mut store = MockStore::with_entry("balance", "5");
        store.fail_reads("boom");
        assert!(store.get("balance").is_err());
        store.fail_writes("full");
        assert!(store.set("balance", "6").unwrap_err().to_string().contains("full"));

        store.clear_errors();
        assert_eq!(store.get("balance").unwrap().as_deref(), Some("5"));
        assert!(store.writes().is_empty());
    }
}
