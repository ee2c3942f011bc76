//! Persistent key-value storage for credentials.
//!
//! The gateway only ever reads from a store; writing the token after a login
//! (and removing it on logout) is the caller's job.

use crate::error::GatewayError;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// String key-value store, modelled on browser `localStorage`.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, GatewayError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), GatewayError>;
    fn remove_item(&self, key: &str) -> Result<(), GatewayError>;
}

/// Process-local store. Useful for tests and for sessions that should not
/// outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, GatewayError> {
        let items = self
            .items
            .read()
            .map_err(|_| GatewayError::StorageError("memory store lock poisoned".to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), GatewayError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| GatewayError::StorageError("memory store lock poisoned".to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), GatewayError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| GatewayError::StorageError("memory store lock poisoned".to_string()))?;
        items.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// The file is re-read on every lookup, so a token written by another
/// process (or another `FileStore` on the same path) is picked up by the
/// next request. A missing file reads as an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<serde_json::Map<String, serde_json::Value>, GatewayError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(serde_json::Map::new());
            }
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(serde_json::Map::new());
        }
        match serde_json::from_str(&raw) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(_) => Err(GatewayError::StorageError(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(GatewayError::StorageError(format!(
                "{} is not valid JSON: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, map: &serde_json::Map<String, serde_json::Value>) -> Result<(), GatewayError> {
        let serialized = serde_json::to_vec_pretty(map)?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        // Uniquely named sibling, renamed over the target: readers never see
        // a partial file and concurrent writers never share a temp path.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&serialized)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<(), GatewayError>
    where
        F: FnOnce(&mut serde_json::Map<String, serde_json::Value>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| GatewayError::StorageError("file store lock poisoned".to_string()))?;
        let mut map = self.load()?;
        f(&mut map);
        self.save(&map)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, GatewayError> {
        match self.load()?.remove(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(GatewayError::StorageError(format!(
                "value for '{key}' is not a string: {other}"
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), GatewayError> {
        self.modify(|map| {
            map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), GatewayError> {
        self.modify(|map| {
            map.remove(key);
        })
    }
}
