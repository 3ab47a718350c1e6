//! Commerce error types.

use airtech_storage::StorageError;
use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Quantity below 1 on a stored line item.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Price that is negative or not a finite number.
    #[error("Invalid price for {id}: {reason}")]
    InvalidPrice { id: String, reason: String },

    /// Two line items share a product id.
    #[error("Duplicate line item: {0}")]
    DuplicateItem(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
