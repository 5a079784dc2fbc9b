//! The cart store.
//!
//! [`CartStore`] is a cheaply cloneable handle; all clones share one cart.
//! Mutations take the store's async mutex, apply the reducer from
//! `go-marketplace-core`, publish the new state to subscribers, and write the
//! whole cart to storage before releasing the lock. Writes therefore reach
//! storage in call order and the last one wins.
//!
//! Every mutation writes, including no-op increments and decrements.

use std::sync::Arc;

use go_marketplace_core::{CartChange, CartState, NewCartItem, ProductId};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::storage::KeyValueStore;

/// Lifecycle phase of a [`CartStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed; persisted state not loaded yet.
    Uninitialized,
    /// Loaded and accepting mutations.
    Ready,
    /// Shut down; no further mutations.
    Closed,
}

/// Persistent, observable cart.
pub struct CartStore<S> {
    inner: Arc<CartStoreInner<S>>,
}

struct CartStoreInner<S> {
    storage: S,
    key: String,
    state: Mutex<StoreState>,
    updates: watch::Sender<CartState>,
}

struct StoreState {
    lifecycle: Lifecycle,
    cart: CartState,
}

impl StoreState {
    fn ensure_ready(&self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Ready => Ok(()),
            Lifecycle::Uninitialized => Err(CartError::NotInitialized),
            Lifecycle::Closed => Err(CartError::Closed),
        }
    }
}

impl<S> Clone for CartStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create an uninitialized store persisting under `key`.
    ///
    /// The cart reads as empty and mutations fail until
    /// [`initialize`](Self::initialize) completes.
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        let (updates, _) = watch::channel(CartState::new());
        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                key: key.into(),
                state: Mutex::new(StoreState {
                    lifecycle: Lifecycle::Uninitialized,
                    cart: CartState::new(),
                }),
                updates,
            }),
        }
    }

    /// Create an uninitialized store using the configured cart key.
    #[must_use]
    pub fn from_config(storage: S, config: &CartConfig) -> Self {
        Self::new(storage, config.cart_key.clone())
    }

    /// Create a store and load the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the persisted cart cannot be read.
    pub async fn open(storage: S, key: impl Into<String>) -> Result<Self> {
        let store = Self::new(storage, key);
        store.initialize().await?;
        Ok(store)
    }

    /// Load the persisted cart and mark the store ready.
    ///
    /// Missing or unparseable data yields an empty cart. Calling this on a
    /// ready store returns the current cart without touching storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Closed` after shutdown, or `CartError::Storage` if
    /// the backend read fails. A failed read leaves the store uninitialized so
    /// the call can be retried without overwriting the stored cart.
    #[instrument(skip(self), fields(key = %self.inner.key))]
    pub async fn initialize(&self) -> Result<CartState> {
        let mut state = self.inner.state.lock().await;
        match state.lifecycle {
            Lifecycle::Closed => return Err(CartError::Closed),
            Lifecycle::Ready => return Ok(state.cart.clone()),
            Lifecycle::Uninitialized => {}
        }

        let cart = match self.inner.storage.get_item(&self.inner.key).await? {
            Some(json) => CartState::from_json(&json).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable persisted cart");
                CartState::new()
            }),
            None => {
                debug!("No persisted cart found");
                CartState::new()
            }
        };

        state.cart = cart.clone();
        state.lifecycle = Lifecycle::Ready;
        self.inner.updates.send_replace(cart.clone());

        info!(
            items = cart.len(),
            quantity = cart.total_quantity(),
            "Cart store initialized"
        );
        Ok(cart)
    }

    /// Add a product, or bump its quantity if it is already in the cart.
    ///
    /// # Errors
    ///
    /// Returns a usage error outside the ready phase, or `CartError::Storage`
    /// if persisting fails. On a storage failure the in-memory cart keeps the
    /// change.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub async fn add_to_cart(&self, item: NewCartItem) -> Result<CartState> {
        self.apply(|cart| cart.add(item)).await
    }

    /// Raise the quantity of `id` by one. Unknown IDs leave the cart as is but
    /// still persist it.
    ///
    /// # Errors
    ///
    /// Same as [`add_to_cart`](Self::add_to_cart).
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn increment(&self, id: &ProductId) -> Result<CartState> {
        self.apply(|cart| cart.increment(id)).await
    }

    /// Lower the quantity of `id` by one, stopping at zero. The line stays in
    /// the cart at zero. No-ops still persist the cart.
    ///
    /// # Errors
    ///
    /// Same as [`add_to_cart`](Self::add_to_cart).
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> Result<CartState> {
        self.apply(|cart| cart.decrement(id)).await
    }

    /// Shut the store down. Later mutations fail with `CartError::Closed`.
    ///
    /// Subscribers keep the last published cart and see the channel close once
    /// every handle is dropped.
    #[instrument(skip(self), fields(key = %self.inner.key))]
    pub async fn shutdown(&self) {
        let mut state = self.inner.state.lock().await;
        if state.lifecycle != Lifecycle::Closed {
            state.lifecycle = Lifecycle::Closed;
            info!("Cart store shut down");
        }
    }

    /// Current lifecycle phase.
    pub async fn lifecycle(&self) -> Lifecycle {
        self.inner.state.lock().await.lifecycle
    }

    /// Snapshot of the current cart. Empty until initialized.
    #[must_use]
    pub fn items(&self) -> CartState {
        self.inner.updates.borrow().clone()
    }

    /// Receive every cart installed by `initialize` or a changing mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.updates.subscribe()
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// The storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    /// Read current, compute next, install next, persist next.
    async fn apply<F>(&self, mutate: F) -> Result<CartState>
    where
        F: FnOnce(&mut CartState) -> CartChange + Send,
    {
        let mut state = self.inner.state.lock().await;
        state.ensure_ready()?;

        let change = mutate(&mut state.cart);
        let cart = state.cart.clone();
        debug!(?change, items = cart.len(), "Applied cart mutation");

        if change.is_changed() {
            self.inner.updates.send_replace(cart.clone());
        }

        let json = cart.to_json()?;
        if let Err(e) = self.inner.storage.set_item(&self.inner.key, &json).await {
            warn!(error = %e, "Failed to persist cart; in-memory state is ahead of storage");
            return Err(e.into());
        }

        Ok(cart)
    }
}
