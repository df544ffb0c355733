//! Cart errors.
//!
//! The `Display` text of [`CartError::MaxQuantityReached`] is shown to the
//! shopper as-is.

use thiserror::Error;

/// Errors returned by cart operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CartError {
    /// The item is already at its per-customer limit.
    #[error("Sorry, maximum {max} per customer")]
    MaxQuantityReached {
        /// Item id.
        id: String,
        /// The limit.
        max: u32,
    },

    /// No item with this id is in the cart.
    #[error("Item not in cart: {0}")]
    UnknownItem(String),

    /// Storage or serialization failure.
    #[error(transparent)]
    Core(#[from] croft_core::Error),
}

impl CartError {
    /// Whether this is a limit the shopper should be told about.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::MaxQuantityReached { .. })
    }
}

/// Result type alias using [`CartError`].
pub type Result<T> = std::result::Result<T, CartError>;
