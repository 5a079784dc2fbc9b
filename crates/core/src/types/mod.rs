//! Core types for Go Marketplace.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{CartChange, CartItem, CartState, CartStateError, NewCartItem};
pub use id::{ProductId, ProductIdError};
pub use price::{Price, PriceError};
