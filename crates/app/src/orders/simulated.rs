//! Simulated order backend.

use std::{ops::RangeInclusive, time::Duration};

use async_trait::async_trait;
use courier::{
    DeliveryError,
    orders::{NewOrder, Order, OrderStage, OrderUuid, StatusUpdate},
};
use rand::{Rng, seq::SliceRandom};
use tokio::time::sleep;
use tracing::{debug, info};

use super::OrdersService;

/// Range stage-transition estimates are drawn from.
pub const SIMULATED_STAGE_ETA_MINUTES: RangeInclusive<u32> = 15..=45;

/// Accepts every order and moves it along with random estimates.
#[derive(Debug, Clone)]
pub struct SimulatedOrdersService {
    latency: Duration,
}

impl SimulatedOrdersService {
    /// Create a backend that waits `latency` before every answer.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }
}

fn random_eta() -> u32 {
    rand::thread_rng().gen_range(SIMULATED_STAGE_ETA_MINUTES)
}

#[async_trait]
impl OrdersService for SimulatedOrdersService {
    async fn place_order(&self, order: NewOrder) -> Result<Order, DeliveryError> {
        self.simulate_latency().await;

        let order = Order::place(order);

        info!(
            order = %order.uuid(),
            restaurant = order.restaurant_name(),
            total_cents = order.total_cents(),
            "order accepted"
        );

        Ok(order)
    }

    async fn advance_stage(&self, current: OrderStage) -> Result<StatusUpdate, DeliveryError> {
        self.simulate_latency().await;

        let update = StatusUpdate::advance(current, random_eta);

        debug!(from = %current, to = %update.stage, eta = ?update.eta_minutes, "stage advanced");

        Ok(update)
    }

    async fn fetch_status(&self, order: OrderUuid) -> Result<StatusUpdate, DeliveryError> {
        self.simulate_latency().await;

        let stage = OrderStage::ALL
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(OrderStage::Received);

        let eta_minutes = (!stage.is_terminal()).then(random_eta);

        debug!(order = %order, %stage, eta = ?eta_minutes, "fetched order status");

        Ok(StatusUpdate { stage, eta_minutes })
    }
}

#[cfg(test)]
mod tests {
    use courier::{address::DeliveryAddress, cart::CartItem, menu::MenuItem};
    use testresult::TestResult;

    use super::*;

    fn service() -> SimulatedOrdersService {
        SimulatedOrdersService::new(Duration::ZERO)
    }

    fn new_order() -> NewOrder {
        NewOrder {
            restaurant_id: "2".to_string(),
            restaurant_name: "Burger Barn".to_string(),
            items: vec![CartItem::new(
                MenuItem::new("2-1", "2", "Classic Burger", 8_99),
                1,
                "",
            )],
            address: DeliveryAddress::new("1 Main St", "Roanoke", "VA", "24011"),
            total_cents: 14_71,
            eta_minutes: Some(25),
        }
    }

    #[tokio::test]
    async fn placed_order_is_received_with_given_eta_and_total() -> TestResult {
        let order = service().place_order(new_order()).await?;

        assert_eq!(order.stage(), OrderStage::Received);
        assert_eq!(order.eta_minutes(), Some(25));
        assert_eq!(order.total_cents(), 14_71);
        assert_eq!(order.restaurant_name(), "Burger Barn");

        Ok(())
    }

    #[tokio::test]
    async fn placed_orders_get_distinct_ids() -> TestResult {
        let first = service().place_order(new_order()).await?;
        let second = service().place_order(new_order()).await?;

        assert_ne!(first.uuid(), second.uuid());

        Ok(())
    }

    #[tokio::test]
    async fn advancing_draws_eta_from_range() -> TestResult {
        let update = service().advance_stage(OrderStage::Received).await?;

        assert_eq!(update.stage, OrderStage::Preparing);
        assert!(
            update
                .eta_minutes
                .is_some_and(|eta| SIMULATED_STAGE_ETA_MINUTES.contains(&eta)),
            "unexpected eta {:?}",
            update.eta_minutes
        );

        Ok(())
    }

    #[tokio::test]
    async fn advancing_to_or_from_delivered_has_no_eta() -> TestResult {
        for current in [OrderStage::OutForDelivery, OrderStage::Delivered] {
            let update = service().advance_stage(current).await?;

            assert_eq!(
                update,
                StatusUpdate {
                    stage: OrderStage::Delivered,
                    eta_minutes: None,
                }
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn fetched_status_has_eta_unless_delivered() -> TestResult {
        for _ in 0..50 {
            let update = service().fetch_status(OrderUuid::new()).await?;

            assert_eq!(update.eta_minutes.is_none(), update.stage.is_terminal());
        }

        Ok(())
    }
}
