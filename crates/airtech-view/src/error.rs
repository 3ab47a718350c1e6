//! View error types.

use thiserror::Error;

use crate::lifecycle::ViewPhase;

/// Errors raised by the cart view.
///
/// None of these are fatal: the view logs them and keeps the page usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A lifecycle transition that is not allowed from the current phase.
    #[error("Invalid view transition: {from} -> {to}")]
    InvalidTransition { from: ViewPhase, to: ViewPhase },

    /// Add-to-cart control with missing or malformed product attributes.
    #[error("Invalid product attributes: {0}")]
    InvalidProduct(String),
}
