//! Cart store error type.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`CartStore`](crate::CartStore) operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The store was used before `initialize` completed.
    #[error("cart store used before initialization")]
    NotInitialized,

    /// The store was used after `shutdown`.
    #[error("cart store has been shut down")]
    Closed,

    /// Reading or writing the persisted cart failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serializing the cart failed.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CartError {
    /// Whether this is a lifecycle misuse rather than an I/O problem.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::NotInitialized | Self::Closed)
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
