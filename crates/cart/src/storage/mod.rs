//! Key-value persistence for the cart.
//!
//! The cart is stored as one text value under one key, so the backend only
//! needs string get/set/remove. Two backends ship with the crate:
//!
//! - [`MemoryStore`] - in-process map, shared between clones; used in tests
//! - [`FileStore`] - one file per key under a root directory
//!
//! # Example
//!
//! ```rust,ignore
//! use go_marketplace_cart::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set_item("@GoMarketplace", "[]").await?;
//! assert_eq!(store.get_item("@GoMarketplace").await?.as_deref(), Some("[]"));
//! ```

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::future::Future;

use thiserror::Error;

/// Errors that can occur when talking to a key-value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be stored by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Async string key-value storage.
///
/// Implementations must be safe to share across tasks; the cart store holds
/// one instance for its whole lifetime.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`, or `None` if there is none.
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete the value under `key`. Deleting a missing key succeeds.
    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
