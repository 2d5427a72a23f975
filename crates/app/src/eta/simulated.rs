//! Simulated ETA provider.

use std::{ops::RangeInclusive, time::Duration};

use async_trait::async_trait;
use courier::{DeliveryError, address::DeliveryAddress};
use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

use super::EtaService;

/// Range the simulated estimate is drawn from.
pub const SIMULATED_ETA_MINUTES: RangeInclusive<u32> = 20..=40;

/// Answers with a random estimate after an artificial delay.
#[derive(Debug, Clone)]
pub struct SimulatedEtaService {
    latency: Duration,
}

impl SimulatedEtaService {
    /// Create a provider that waits `latency` before answering.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl EtaService for SimulatedEtaService {
    async fn estimate_minutes(&self, address: &DeliveryAddress) -> Result<u32, DeliveryError> {
        if !address.is_valid() {
            return Err(DeliveryError::InvalidAddress);
        }

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        let minutes = rand::thread_rng().gen_range(SIMULATED_ETA_MINUTES);

        debug!(minutes, "simulated delivery estimate");

        Ok(minutes)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn estimate_is_within_range() -> TestResult {
        let service = SimulatedEtaService::new(Duration::ZERO);
        let address = DeliveryAddress::new("1 Main St", "Roanoke", "VA", "24011");

        for _ in 0..50 {
            let minutes = service.estimate_minutes(&address).await?;

            assert!(SIMULATED_ETA_MINUTES.contains(&minutes), "{minutes} out of range");
        }

        Ok(())
    }

    #[tokio::test]
    async fn invalid_address_is_rejected() {
        let service = SimulatedEtaService::new(Duration::ZERO);
        let address = DeliveryAddress::new("1 Main St", "Roanoke 2", "VA", "24011");

        let result = service.estimate_minutes(&address).await;

        assert_eq!(result, Err(DeliveryError::InvalidAddress));
    }
}
