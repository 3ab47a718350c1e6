//! Key-value storage for the AirTech cart.
//!
//! The cart persists a single JSON document under one key. Everything that
//! touches persistence goes through the [`Storage`] port so the cart logic can
//! run against browser `localStorage` in the page and against
//! [`MemoryStorage`] everywhere else.
//!
//! # Example
//!
//! ```rust
//! use airtech_storage::{JsonStore, MemoryStorage};
//!
//! let store = JsonStore::new(MemoryStorage::new());
//!
//! store.set("cart", &vec![1, 2, 3]).unwrap();
//! let items: Option<Vec<i32>> = store.get("cart").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod memory;

#[cfg(target_arch = "wasm32")]
mod local;

pub use error::StorageError;
pub use kv::{JsonStore, Storage};
pub use memory::MemoryStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

#[cfg(any(test, feature = "mock"))]
pub use kv::MockStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{JsonStore, MemoryStorage, Storage, StorageError};
}
