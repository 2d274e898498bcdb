//! Unified error type for storefront operations.
//!
//! Every error carries a message fit for display as a transient
//! notification; nothing here is fatal, and the application stays
//! interactive after any failure.

use thiserror::Error;

use crate::ledger::CheckoutError;
use crate::reconciler::ReconcileError;
use crate::storage::StorageError;

/// Application-level error type for the storefront state layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A reserve / change-quantity operation failed.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Checkout failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// A storage write outside the reconciler's rollback protocol failed.
    /// The in-memory state is kept and remains authoritative.
    #[error("could not save changes: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
