//! Albarka Storefront library - the state layer behind the store UI.
//!
//! This crate owns everything between user intent and durable storage:
//! the product catalog, the cart, the inventory reconciler that keeps the
//! two in lock-step, the order ledger, and the key-value persistence
//! gateway. Rendering is somebody else's problem; callers get back
//! snapshots and human-readable [`Notification`]s and decide how to show
//! them.
//!
//! # Architecture
//!
//! ```text
//! user intent -> Storefront facade -> Reconciler / OrderLedger
//!                                       |  mutates CatalogStore + CartStore
//!                                       v
//!                                    Gateway -> KeyValueStore (the only I/O)
//! ```
//!
//! Reservation-path operations are optimistic: state is mutated in memory
//! first, then persisted, and rolled back if the write fails. See
//! [`reconciler`] for the exact protocol.
//!
//! The whole crate is single-threaded and synchronous; storage writes
//! either succeed or fail immediately, so no operation can observe another
//! mid-mutation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reconciler;
pub mod report;
pub mod seed;
pub mod state;
pub mod storage;

pub use error::StoreError;
pub use state::{CheckoutPreview, Notification, Severity, Storefront};
