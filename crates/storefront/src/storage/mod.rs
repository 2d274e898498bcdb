//! Key-value persistence - the only I/O boundary of the state layer.
//!
//! Everything durable goes through a [`KeyValueStore`]: an opaque,
//! synchronous string-to-string store (the browser-local storage analog).
//! The typed [`Gateway`] sits on top and owns JSON (de)serialization plus
//! the corrupt-state recovery policy.
//!
//! # Key layout
//!
//! | key               | contents                                   |
//! |-------------------|--------------------------------------------|
//! | `catalog`         | sequence of products                       |
//! | `cart`            | sequence of cart lines                     |
//! | `orders`          | append-only sequence of completed orders   |
//! | `analyticsEvents` | append-only event log, never validated     |
//! | `theme`           | plain `light` / `dark` string              |
//! | `contactMessages` | append-only contact form submissions       |

pub mod file;
pub mod gateway;
pub mod memory;

pub use file::FileStore;
pub use gateway::Gateway;
pub use memory::MemoryStore;

use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    pub const CATALOG: &str = "catalog";
    pub const CART: &str = "cart";
    pub const ORDERS: &str = "orders";
    pub const ANALYTICS_EVENTS: &str = "analyticsEvents";
    pub const THEME: &str = "theme";
    pub const CONTACT_MESSAGES: &str = "contactMessages";
}

/// Errors raised by a [`KeyValueStore`] or the [`Gateway`] on top of it.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying store rejected a write (e.g. quota exceeded).
    #[error("storage write rejected for `{key}`: {reason}")]
    WriteRejected {
        /// Storage key the write targeted.
        key: String,
        /// Store-specific failure description.
        reason: String,
    },

    /// A read from the underlying store failed outright.
    ///
    /// Distinct from corrupt content, which is recovered locally by the
    /// gateway and never surfaces as an error.
    #[error("storage read failed for `{key}`: {reason}")]
    ReadFailed {
        /// Storage key the read targeted.
        key: String,
        /// Store-specific failure description.
        reason: String,
    },

    /// A value could not be serialized for storage.
    #[error("failed to serialize value for `{key}`: {reason}")]
    Serialize {
        /// Storage key the write targeted.
        key: String,
        /// Serializer failure description.
        reason: String,
    },
}

/// A synchronous string key-value store.
///
/// Implementations use interior mutability: the state layer is
/// single-threaded and run-to-completion, so `&self` writes need no
/// locking. Writes either complete or fail before the call returns.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadFailed`] if the store itself cannot be
    /// read (not for a missing key, which is `Ok(None)`).
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::WriteRejected`] if the store refuses the
    /// write, e.g. when out of quota.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::WriteRejected`] if the deletion fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
