//! `window.localStorage` as cart storage.

use storefront_cart::{CartStorage, StorageError};

/// Stateless handle; the browser scopes the data to the page's origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn handle() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window object".into()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))
    }
}

impl CartStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::handle()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors land here.
        Self::handle()?
            .set_item(key, value)
            .map_err(|e| StorageError::Io(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::handle()?
            .remove_item(key)
            .map_err(|e| StorageError::Io(format!("{e:?}")))
    }
}
