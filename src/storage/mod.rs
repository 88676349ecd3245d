//! Persistence layer.
//!
//! The game persists exactly one value: the balance, stored as a decimal
//! string under the key `"balance"` in a small key-value store. A JSON file
//! backs the store on disk; an in-memory map backs ephemeral sessions.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::types::FightError;

/// Key the balance is stored under.
pub const BALANCE_KEY: &str = "balance";

/// Default storage file path.
pub const DEFAULT_STORAGE_FILE: &str = "fightbet_storage.json";

// ---------------------------------------------------------------------------
// Key-value backends
// ---------------------------------------------------------------------------

/// Minimal string key-value store scoped to one installation.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A JSON object of string keys to string values in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Raw file contents, or `None` when the file is absent or blank.
    fn read_raw(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store {}", self.path.display()))?;
        Ok(Some(json).filter(|j| !j.trim().is_empty()))
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match self.read_raw()? {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse store {}", self.path.display())),
            None => Ok(BTreeMap::new()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced; I/O failures still propagate.
        let mut entries: BTreeMap<String, String> = match self.read_raw()? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "Store file is corrupt, overwriting");
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };
        entries.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&entries).context("Failed to serialise store")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write store {}", self.path.display()))?;

        debug!(path = %self.path.display(), key, "Store updated");
        Ok(())
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Balance store
// ---------------------------------------------------------------------------

/// Loads and saves the player's balance through a key-value backend.
pub struct BalanceStore<S> {
    store: S,
    default_balance: f64,
}

impl<S: KeyValueStore> BalanceStore<S> {
    pub fn new(store: S, default_balance: f64) -> Self {
        Self {
            store,
            default_balance,
        }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Persisted balance, or the default when nothing usable is stored.
    ///
    /// Read failures degrade to the default; they are logged, never returned.
    pub fn load(&self) -> f64 {
        let raw = match self.store.get(BALANCE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(default = self.default_balance, "No saved balance found, starting fresh");
                return self.default_balance;
            }
            Err(e) => {
                warn!(error = %e, default = self.default_balance, "Failed to load balance, using default");
                return self.default_balance;
            }
        };

        match decode_balance(&raw) {
            Some(balance) => {
                info!(balance, "Balance loaded");
                balance
            }
            None => {
                warn!(raw = %raw, default = self.default_balance, "Stored balance is unusable, using default");
                self.default_balance
            }
        }
    }

    /// Persist `value`. Failures come back as `FightError::Persistence`.
    pub fn save(&mut self, value: f64) -> Result<(), FightError> {
        self.store
            .set(BALANCE_KEY, &encode_balance(value))
            .map_err(|e| FightError::Persistence {
                key: BALANCE_KEY.to_string(),
                message: format!("{e:#}"),
            })?;
        debug!(balance = value, "Balance saved");
        Ok(())
    }
}

/// Decimal-string encoding of a balance.
pub fn encode_balance(value: f64) -> String {
    value.to_string()
}

/// Parse a stored balance. Empty, malformed and non-finite values yield `None`.
pub fn decode_balance(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
