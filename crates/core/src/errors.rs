//! Delivery Errors

use thiserror::Error;

/// Failure kinds shared by the checkout flow and every external provider.
///
/// Kinds are compared by value, so callers can branch on them after any
/// display re-labelling has happened further up.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// Transport failure or unexpected HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// A response body could not be decoded.
    #[error("Failed to decode data: {0}")]
    Decoding(String),

    /// The provider answered with something structurally wrong.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// The delivery address failed validation locally or at the provider.
    #[error("Please enter a valid delivery address")]
    InvalidAddress,

    /// Checkout was attempted without any items.
    #[error("Your cart is empty. Add items before checkout.")]
    EmptyCart,

    /// Provider reported a failure of its own.
    #[error("API error: {0}")]
    Provider(String),

    /// Anything else.
    #[error("An unknown error occurred")]
    Unknown,
}
