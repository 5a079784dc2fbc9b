//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! gm-cli cart show
//! gm-cli cart add --id 1 -t "Cadeira Rivatti" -i https://... -p 1400.90
//! gm-cli cart increment 1
//! gm-cli cart decrement 1
//! ```
//!
//! # Environment Variables
//!
//! - `GO_MARKETPLACE_STORAGE_DIR` - Directory holding the stored cart
//! - `GO_MARKETPLACE_CART_KEY` - Storage key of the cart

use go_marketplace_cart::{CartConfig, CartError, CartState, CartStore, FileStore};
use go_marketplace_core::{NewCartItem, Price, PriceError, ProductId, ProductIdError};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Product ID argument is invalid.
    #[error("Invalid product id: {0}")]
    InvalidProductId(#[from] ProductIdError),

    /// Price argument is invalid.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// Cart store operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Open the file-backed cart described by `config`.
async fn open_store(config: &CartConfig) -> Result<CartStore<FileStore>, CartError> {
    let storage = FileStore::new(&config.storage_dir);
    let store = CartStore::from_config(storage, config);
    store.initialize().await?;
    Ok(store)
}

/// Show the cart.
///
/// # Errors
///
/// Returns an error if the stored cart cannot be read.
pub async fn show(config: &CartConfig) -> Result<(), CartCommandError> {
    let store = open_store(config).await?;
    log_cart(&store.items());
    store.shutdown().await;
    Ok(())
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns an error if the ID or price is invalid, or storage fails.
pub async fn add(
    config: &CartConfig,
    id: &str,
    title: String,
    image_url: String,
    price: &str,
) -> Result<(), CartCommandError> {
    let item = NewCartItem {
        id: ProductId::parse(id)?,
        title,
        image_url,
        price: Price::parse(price)?,
    };

    let store = open_store(config).await?;
    let cart = store.add_to_cart(item).await?;
    log_cart(&cart);
    store.shutdown().await;
    Ok(())
}

/// Increment a product's quantity.
///
/// # Errors
///
/// Returns an error if the ID is invalid or storage fails.
pub async fn increment(config: &CartConfig, id: &str) -> Result<(), CartCommandError> {
    let id = ProductId::parse(id)?;
    let store = open_store(config).await?;
    if !store.items().contains(&id) {
        info!(product_id = %id, "Product not in cart; nothing to increment");
    }
    let cart = store.increment(&id).await?;
    log_cart(&cart);
    store.shutdown().await;
    Ok(())
}

/// Decrement a product's quantity.
///
/// # Errors
///
/// Returns an error if the ID is invalid or storage fails.
pub async fn decrement(config: &CartConfig, id: &str) -> Result<(), CartCommandError> {
    let id = ProductId::parse(id)?;
    let store = open_store(config).await?;
    if !store.items().contains(&id) {
        info!(product_id = %id, "Product not in cart; nothing to decrement");
    }
    let cart = store.decrement(&id).await?;
    log_cart(&cart);
    store.shutdown().await;
    Ok(())
}

fn log_cart(cart: &CartState) {
    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    info!("Cart");
    info!("====");
    for item in cart {
        info!(
            "  {} x{} {} @ {} = {}",
            item.id,
            item.quantity,
            item.title,
            item.price,
            item.line_total()
        );
    }
    info!("Items: {}", cart.total_quantity());
    info!("Subtotal: {}", cart.subtotal());
}
