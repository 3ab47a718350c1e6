//! Storage port and typed JSON wrapper.

use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};

/// String key-value storage, the shape of browser `localStorage`.
///
/// Implementations are single-threaded and synchronous: a `set_item` that
/// returns `Ok` is visible to the next `get_item` on the same backend.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Storage {
    /// Read the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Typed wrapper over a [`Storage`] backend.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone, Default)]
pub struct JsonStore<S> {
    backend: S,
}

impl<S: Storage> JsonStore<S> {
    /// Wrap a storage backend.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Get a value from storage.
    ///
    /// Returns `None` if the key doesn't exist, and a
    /// [`StorageError::SerializeError`] if the stored text is not a valid `T`.
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<Item>> = store.get("airtech_cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in storage.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(key, &raw)
    }

    /// Delete a value from storage.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove_item(key)
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.backend.get_item(key)?.is_some())
    }

    /// Access the raw backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;
    use mockall::predicate::eq;

    #[test]
    fn test_json_round_trip() {
        let store = JsonStore::new(MemoryStorage::new());
        store.set("numbers", &vec![1, 2, 3]).unwrap();

        let numbers: Option<Vec<i32>> = store.get("numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = JsonStore::new(MemoryStorage::new());
        let value: Option<String> = store.get("missing").unwrap();
        assert!(value.is_none());
        assert!(!store.exists("missing").unwrap());
    }

    #[test]
    fn test_invalid_json_is_serialize_error() {
        let backend = MemoryStorage::new();
        backend.set_item("broken", "{not json").unwrap();

        let store = JsonStore::new(backend);
        let result: Result<Option<Vec<i32>>, _> = store.get("broken");
        assert!(matches!(result, Err(StorageError::SerializeError(_))));
    }

    #[test]
    fn test_delete() {
        let store = JsonStore::new(MemoryStorage::new());
        store.set("key", "value").unwrap();
        assert!(store.exists("key").unwrap());

        store.delete("key").unwrap();
        assert!(!store.exists("key").unwrap());
    }

    #[test]
    fn test_backend_error_propagates() {
        let mut backend = MockStorage::new();
        backend
            .expect_set_item()
            .with(eq("cart"), eq("[]"))
            .times(1)
            .returning(|key, _| Err(StorageError::QuotaExceeded(key.to_string())));

        let store = JsonStore::new(backend);
        let result = store.set("cart", &Vec::<i32>::new());
        assert!(matches!(result, Err(StorageError::QuotaExceeded(k)) if k == "cart"));
    }
}
