//! Orders service.

use async_trait::async_trait;
use courier::{
    DeliveryError,
    orders::{NewOrder, Order, OrderStage, OrderUuid, StatusUpdate},
};
use mockall::automock;

/// Accepts orders and reports on their progress.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order. The returned order is in the `Received` stage.
    async fn place_order(&self, order: NewOrder) -> Result<Order, DeliveryError>;

    /// The stage after `current` with a fresh ETA; no ETA once delivered.
    async fn advance_stage(&self, current: OrderStage) -> Result<StatusUpdate, DeliveryError>;

    /// Latest known status of an order.
    async fn fetch_status(&self, order: OrderUuid) -> Result<StatusUpdate, DeliveryError>;
}
