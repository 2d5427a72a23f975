//! ETA service.

use async_trait::async_trait;
use courier::{DeliveryError, address::DeliveryAddress};
use mockall::automock;

/// Estimates how long a delivery will take.
#[automock]
#[async_trait]
pub trait EtaService: Send + Sync {
    /// Minutes until an order sent to `address` arrives.
    ///
    /// Implementations reject an address that fails
    /// [`DeliveryAddress::is_valid`] with [`DeliveryError::InvalidAddress`]
    /// before doing any other work.
    async fn estimate_minutes(&self, address: &DeliveryAddress) -> Result<u32, DeliveryError>;
}
