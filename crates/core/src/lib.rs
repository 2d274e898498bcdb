//! Albarka Core - Shared domain types.
//!
//! This crate provides common types used across all Albarka Store components:
//! - `storefront` - The state layer (catalog, cart, orders, persistence)
//! - `cli` - Command-line driver for the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, ratings, emails,
//!   and the display theme

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
