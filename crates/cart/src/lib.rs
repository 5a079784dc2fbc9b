//! Go Marketplace Cart - Persistent cart store.
//!
//! [`CartStore`] owns the shopper's cart, applies add/increment/decrement
//! mutations, notifies subscribers, and mirrors the whole cart to a
//! [`KeyValueStore`] under a single key after every mutation.
//!
//! # Lifecycle
//!
//! A store starts `Uninitialized`. [`CartStore::initialize`] loads the
//! persisted cart (missing or unreadable data yields an empty cart) and moves
//! it to `Ready`. [`CartStore::shutdown`] moves it to `Closed`. Mutations
//! outside `Ready` fail with a usage error.
//!
//! # Example
//!
//! ```rust,ignore
//! use go_marketplace_cart::{CartConfig, CartStore, FileStore};
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::open(FileStore::new(&config.storage_dir), config.cart_key).await?;
//!
//! let mut updates = store.subscribe();
//! store.add_to_cart(item).await?;
//! updates.changed().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, Lifecycle};

pub use go_marketplace_core::{CartChange, CartItem, CartState, NewCartItem, Price, ProductId};
