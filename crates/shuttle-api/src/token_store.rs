//! Persisted session credentials.
//!
//! The store is an opaque key-value map. The client reads
//! [`SESSION_TOKEN_KEY`] for bearer-authenticated calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ApiError;

pub const SESSION_TOKEN_KEY: &str = "session_token";
pub const ACCESS_TOKEN_KEY: &str = "access_token";

pub trait TokenStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ApiError::TokenStore`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, ApiError>;

    /// # Errors
    ///
    /// Returns [`ApiError::TokenStore`] if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TokenStore`] if the backing storage cannot be written.
    fn delete(&self, key: &str) -> Result<(), ApiError>;
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> ApiError {
    ApiError::TokenStore("token store lock poisoned".to_string())
}

/// In-process store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.entries.lock().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.entries
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.entries.lock().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

/// JSON file holding a flat string map. A missing file reads as empty.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, ApiError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(ApiError::TokenStore(format!(
                    "read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| ApiError::Deserialize {
            context: self.path.display().to_string(),
            source: e,
        })
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::TokenStore(format!("create {}: {e}", parent.display()))
            })?;
        }
        let body = serde_json::to_string_pretty(map).map_err(|e| ApiError::Deserialize {
            context: self.path.display().to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, body)
            .map_err(|e| ApiError::TokenStore(format!("write {}: {e}", self.path.display())))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn delete(&self, key: &str) -> Result<(), ApiError> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("shuttle-token-store-{}-{name}", std::process::id()))
            .join("tokens.json")
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(SESSION_TOKEN_KEY).unwrap(), None);
        store.set(SESSION_TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(SESSION_TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        store.delete(SESSION_TOKEN_KEY).unwrap();
        store.delete(SESSION_TOKEN_KEY).unwrap();
        assert_eq!(store.get(SESSION_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let path = temp_path("persist");
        let _ = std::fs::remove_file(&path);

        FileTokenStore::new(&path).set(SESSION_TOKEN_KEY, "tok-1").unwrap();
        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get(SESSION_TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        assert_eq!(reopened.get(ACCESS_TOKEN_KEY).unwrap(), None);

        reopened.delete(SESSION_TOKEN_KEY).unwrap();
        assert_eq!(FileTokenStore::new(&path).get(SESSION_TOKEN_KEY).unwrap(), None);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_reads_empty() {
        let store = FileTokenStore::new(temp_path("missing"));
        assert_eq!(store.get(SESSION_TOKEN_KEY).unwrap(), None);
        store.delete(SESSION_TOKEN_KEY).unwrap();
    }
}
