//! Integration tests for Go Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end cart flows over the in-memory backend
//! - `cart_persistence` - File-backed storage, restarts and stored data compatibility

use std::path::{Path, PathBuf};

use go_marketplace_cart::{CartStore, FileStore};
use go_marketplace_core::{NewCartItem, Price, ProductId};
use uuid::Uuid;

/// Storage key used by the mobile client.
pub const CART_KEY: &str = "@GoMarketplace";

/// A scratch directory under the system temp dir, removed on drop.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    /// Create a fresh, not-yet-existing directory path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("gm-it-{}", Uuid::new_v4())),
        }
    }

    /// The directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a file-backed cart store rooted here.
    ///
    /// # Panics
    ///
    /// Panics if the stored cart cannot be read.
    pub async fn open_store(&self) -> CartStore<FileStore> {
        CartStore::open(FileStore::new(&self.path), CART_KEY)
            .await
            .expect("Failed to open cart store")
    }
}

impl Default for TempDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Build a product descriptor with a deterministic title and image.
#[must_use]
pub fn product(id: &str, cents: i64) -> NewCartItem {
    NewCartItem {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        image_url: format!("https://storage.example.com/products/{id}.png"),
        price: Price::from_cents(cents),
    }
}
