//! LocalStorage backend (wasm32)

use super::{KeyValueStore, PersistenceError};

/// Keys are namespaced with a prefix; LocalStorage writes are synchronous,
/// so flush only has to confirm the storage handle is still reachable.
pub struct LocalStorageStore {
    storage: web_sys::Storage,
    prefix: String,
}

impl LocalStorageStore {
    pub fn open(prefix: &str) -> Result<Self, PersistenceError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("LocalStorage".to_string()))?;
        Ok(Self {
            storage,
            prefix: prefix.to_string(),
        })
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key)
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.storage
            .get_item(&self.full_key(key))
            .ok()
            .flatten()
            .and_then(|v| v.parse().ok())
    }

    fn set_int(&mut self, key: &str, value: i64) {
        if self
            .storage
            .set_item(&self.full_key(key), &value.to_string())
            .is_err()
        {
            log::warn!("LocalStorage rejected write for {}", key);
        }
    }

    fn flush(&mut self) -> Result<(), PersistenceError> {
        Ok(())
    }
}
