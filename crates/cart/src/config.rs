//! Cart store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GO_MARKETPLACE_STORAGE_DIR` - Directory for the file-backed store (default: `.go-marketplace`)
//! - `GO_MARKETPLACE_CART_KEY` - Storage key holding the cart (default: `@GoMarketplace`)

use std::path::PathBuf;

use thiserror::Error;

/// Storage key the mobile client has always used for the cart.
pub const DEFAULT_CART_KEY: &str = "@GoMarketplace";

/// Default directory for [`FileStore`](crate::FileStore) values.
pub const DEFAULT_STORAGE_DIR: &str = ".go-marketplace";

const STORAGE_DIR_VAR: &str = "GO_MARKETPLACE_STORAGE_DIR";
const CART_KEY_VAR: &str = "GO_MARKETPLACE_CART_KEY";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Root directory for file-backed storage
    pub storage_dir: PathBuf,
    /// Key the serialized cart is stored under
    pub cart_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(get_optional_env)
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = match lookup(STORAGE_DIR_VAR) {
            Some(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    STORAGE_DIR_VAR.to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(dir) => PathBuf::from(dir),
            None => defaults.storage_dir,
        };

        let cart_key = match lookup(CART_KEY_VAR) {
            Some(key) => validate_cart_key(&key, CART_KEY_VAR)?,
            None => defaults.cart_key,
        };

        Ok(Self {
            storage_dir,
            cart_key,
        })
    }

    /// Replace the storage directory.
    #[must_use]
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Replace the cart key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the key is empty.
    pub fn with_cart_key(mut self, key: &str) -> Result<Self, ConfigError> {
        self.cart_key = validate_cart_key(key, "cart key")?;
        Ok(self)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Validate that a storage key is usable.
fn validate_cart_key(key: &str, var_name: &str) -> Result<String, ConfigError> {
    if key.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(key.to_string())
}
