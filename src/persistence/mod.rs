//! Cross-session key-value persistence
//!
//! Features:
//! - Integer keys with documented defaults on read miss
//! - Explicit flush; writes are only durable after `flush` returns
//! - In-memory, JSON file (tmp → rename) and LocalStorage backends

mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

use thiserror::Error;

/// Best score ever reached (integer, default 0)
pub const HIGH_SCORE_KEY: &str = "HighScore";
/// Restart intent flag (0/1, default 0)
pub const RESTART_KEY: &str = "IsRestart";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Durable integer key-value store that survives a session reload
pub trait KeyValueStore {
    fn get_int(&self, key: &str) -> Option<i64>;
    fn set_int(&mut self, key: &str, value: i64);
    /// Make every prior `set_int` durable
    fn flush(&mut self) -> Result<(), PersistenceError>;

    /// Read a non-negative integer, falling back to `default` on miss
    fn get_u64_or(&self, key: &str, default: u64) -> u64 {
        match self.get_int(key) {
            Some(v) => u64::try_from(v).unwrap_or_else(|_| {
                log::warn!("Ignoring negative value {} for key {}", v, key);
                default
            }),
            None => default,
        }
    }

    /// Read a 0/1 flag; any non-zero value is true
    fn get_flag(&self, key: &str) -> bool {
        self.get_int(key).is_some_and(|v| v != 0)
    }

    fn set_flag(&mut self, key: &str, value: bool) {
        self.set_int(key, i64::from(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_miss_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.get_u64_or(HIGH_SCORE_KEY, 0), 0);
        assert!(!store.get_flag(RESTART_KEY));
    }

    #[test]
    fn test_negative_value_falls_back() {
        let mut store = MemoryStore::new();
        store.set_int(HIGH_SCORE_KEY, -4);
        assert_eq!(store.get_u64_or(HIGH_SCORE_KEY, 0), 0);
    }

    #[test]
    fn test_flag_round_trip() {
        let mut store = MemoryStore::new();
        store.set_flag(RESTART_KEY, true);
        assert!(store.get_flag(RESTART_KEY));
        assert_eq!(store.get_int(RESTART_KEY), Some(1));
        store.set_flag(RESTART_KEY, false);
        assert!(!store.get_flag(RESTART_KEY));
    }
}
