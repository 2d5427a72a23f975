//! Checkout errors.

use courier::DeliveryError;
use thiserror::Error;

/// Why an order could not be placed.
///
/// Compare against a [`DeliveryError`] to branch on the underlying kind; the
/// display text may carry checkout-specific wording.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// A provider refused the delivery address after local validation passed.
    #[error("Order not processed: Invalid Address")]
    AddressRejected,

    /// Any other failure, shown as is.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl CheckoutError {
    /// Wrap a provider failure, re-labelling a rejected address.
    pub(crate) fn from_provider(error: DeliveryError) -> Self {
        match error {
            DeliveryError::InvalidAddress => Self::AddressRejected,
            other => Self::Delivery(other),
        }
    }

    /// The underlying failure kind.
    pub fn kind(&self) -> DeliveryError {
        match self {
            Self::AddressRejected => DeliveryError::InvalidAddress,
            Self::Delivery(error) => error.clone(),
        }
    }
}

impl PartialEq<DeliveryError> for CheckoutError {
    fn eq(&self, other: &DeliveryError) -> bool {
        self.kind() == *other
    }
}
