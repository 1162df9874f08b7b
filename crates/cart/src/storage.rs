//! Key/value persistence for the cart.
//!
//! Mirrors the browser's `localStorage` contract: string keys, string values,
//! scoped to one origin or (natively) one data file.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store cannot be reached at all (no data dir, private mode, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage io failed: {0}")]
    Io(String),

    /// Stored bytes could not be (de)serialized.
    #[error("storage payload is malformed: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        StorageError::Serialize(value.to_string())
    }
}

pub trait CartStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> CartStorage for Arc<S>
where
    S: CartStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S> CartStorage for Box<S>
where
    S: CartStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory storage for tests and sessions that should not persist.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. with a payload left by an older session.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut map) = storage.inner.write() {
            map.insert(key.into(), value.into());
        }
        storage
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".into()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".into()))?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{CartStorage, StorageError};

    /// A JSON object on disk, one entry per key.
    ///
    /// Every `set` rewrites the whole file via a sibling temp file + rename,
    /// so a crash mid-write leaves the previous contents in place.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `{data_dir}/storefront/storage.json`.
        pub fn default_location() -> Result<Self, StorageError> {
            let mut dir = dirs::data_dir()
                .or_else(|| {
                    dirs::home_dir().map(|mut h| {
                        h.push(".local");
                        h.push("share");
                        h
                    })
                })
                .ok_or_else(|| {
                    StorageError::Unavailable(
                        "no OS data directory (tried data_dir() and home_dir()/.local/share)"
                            .into(),
                    )
                })?;
            dir.push("storefront");
            dir.push("storage.json");
            Ok(Self::new(dir))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
            match std::fs::read_to_string(&self.path) {
                Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(raw) => Ok(serde_json::from_str(&raw)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(StorageError::Io(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                ))),
            }
        }

        fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Io(format!("failed to create {}: {e}", parent.display()))
                })?;
            }

            let payload = serde_json::to_string_pretty(map)?;
            let tmp = self.path.with_extension("json.tmp");
            std::fs::write(&tmp, payload)
                .map_err(|e| StorageError::Io(format!("failed to write {}: {e}", tmp.display())))?;
            std::fs::rename(&tmp, &self.path).map_err(|e| {
                StorageError::Io(format!("failed to replace {}: {e}", self.path.display()))
            })
        }

        /// Reads for writing: a corrupt file is replaced rather than blocking
        /// every future save.
        fn read_map_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
            match self.read_map() {
                Err(StorageError::Serialize(msg)) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %msg,
                        "storage file is corrupt; starting a fresh one"
                    );
                    Ok(BTreeMap::new())
                }
                other => other,
            }
        }
    }

    impl CartStorage for FileStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.read_map()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let mut map = self.read_map_for_update()?;
            map.insert(key.to_string(), value.to_string());
            self.write_map(&map)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            let mut map = self.read_map_for_update()?;
            if map.remove(key).is_some() {
                self.write_map(&map)?;
            }
            Ok(())
        }
    }
}
