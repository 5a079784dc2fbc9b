//! Go Marketplace Core - Shared cart types.
//!
//! This crate provides the types used across all Go Marketplace components:
//! - `cart` - Cart store with persistence and change notification
//! - `cli` - Command-line tools for inspecting and editing the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! storage access, no async runtime. Serialization to the persisted JSON form
//! lives here so every component agrees on the wire format.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, cart items and the cart state reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
