//! Browser `localStorage` backend.

use wasm_bindgen::{JsCast, JsValue};

use crate::{Storage, StorageError};

/// [`Storage`] backed by `window.localStorage`.
///
/// The handle is looked up on every call, so a page where storage becomes
/// unavailable (privacy settings, sandboxed iframe) degrades to
/// [`StorageError::Unavailable`] instead of failing at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// Create a handle to the page's `localStorage`.
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(describe(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::OperationFailed(describe(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| {
            let quota = e
                .dyn_ref::<web_sys::DomException>()
                .is_some_and(|ex| ex.name() == "QuotaExceededError");
            if quota {
                StorageError::QuotaExceeded(key.to_string())
            } else {
                StorageError::OperationFailed(describe(&e))
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::OperationFailed(describe(&e)))
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<web_sys::DomException>().map(|e| e.message()))
        .unwrap_or_else(|| format!("{:?}", value))
}
