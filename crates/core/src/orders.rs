//! Orders
//!
//! A placed order is a frozen snapshot of the cart plus a stage and ETA that
//! move forward as the order is fulfilled:
//!
//! `Received -> Preparing -> OutForDelivery -> Delivered`
//!
//! `Delivered` is terminal.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{address::DeliveryAddress, cart::CartItem, uuids::TypedUuid};

/// Order identifier
pub type OrderUuid = TypedUuid<Order>;

/// Fulfilment stage. Declaration order is the lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStage {
    /// Accepted by the restaurant
    Received,

    /// Being cooked
    Preparing,

    /// With the courier
    OutForDelivery,

    /// Handed over
    Delivered,
}

impl OrderStage {
    /// Every stage in lifecycle order.
    pub const ALL: [OrderStage; 4] = [
        OrderStage::Received,
        OrderStage::Preparing,
        OrderStage::OutForDelivery,
        OrderStage::Delivered,
    ];

    /// Position in the lifecycle, starting at zero.
    pub fn index(self) -> usize {
        match self {
            OrderStage::Received => 0,
            OrderStage::Preparing => 1,
            OrderStage::OutForDelivery => 2,
            OrderStage::Delivered => 3,
        }
    }

    /// The following stage. `Delivered` stays `Delivered`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            OrderStage::Received => OrderStage::Preparing,
            OrderStage::Preparing => OrderStage::OutForDelivery,
            OrderStage::OutForDelivery | OrderStage::Delivered => OrderStage::Delivered,
        }
    }

    /// Whether no further transitions exist.
    pub fn is_terminal(self) -> bool {
        self == OrderStage::Delivered
    }

    /// Whether this stage lies strictly before `current`.
    pub fn is_completed(self, current: OrderStage) -> bool {
        self.index() < current.index()
    }

    /// Whether this stage is `current`.
    pub fn is_active(self, current: OrderStage) -> bool {
        self == current
    }

    /// Where this stage sits relative to `current`.
    pub fn progress(self, current: OrderStage) -> StageProgress {
        if self.is_completed(current) {
            StageProgress::Completed
        } else if self.is_active(current) {
            StageProgress::Active
        } else {
            StageProgress::Pending
        }
    }

    /// Human-readable label
    pub fn display_name(self) -> &'static str {
        match self {
            OrderStage::Received => "Order Received",
            OrderStage::Preparing => "Preparing",
            OrderStage::OutForDelivery => "Out for Delivery",
            OrderStage::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A stage as seen from the order's current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageProgress {
    /// Already passed
    Completed,

    /// The current stage
    Active,

    /// Not reached yet
    Pending,
}

/// A new stage together with a freshly estimated ETA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Stage the order is now in
    pub stage: OrderStage,

    /// Minutes until delivery; `None` once delivered
    pub eta_minutes: Option<u32>,
}

impl StatusUpdate {
    /// Move one stage forward from `current`, asking `estimate` for a new ETA
    /// unless the order is now delivered. Advancing a delivered order yields
    /// `Delivered` with no ETA.
    pub fn advance(current: OrderStage, estimate: impl FnOnce() -> u32) -> Self {
        let stage = current.next();
        let eta_minutes = (!stage.is_terminal()).then(estimate);

        Self { stage, eta_minutes }
    }
}

/// Everything needed to place an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Restaurant the items come from
    pub restaurant_id: String,

    /// Restaurant display name
    pub restaurant_name: String,

    /// Cart lines at placement time
    pub items: Vec<CartItem>,

    /// Validated delivery address
    pub address: DeliveryAddress,

    /// Amount charged, in minor units
    pub total_cents: u64,

    /// Initial ETA
    pub eta_minutes: Option<u32>,
}

/// A placed order.
///
/// Only the stage and ETA change after placement; everything else is fixed,
/// including the total, which is never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    uuid: OrderUuid,
    restaurant_id: String,
    restaurant_name: String,
    items: Vec<CartItem>,
    address: DeliveryAddress,
    stage: OrderStage,
    eta_minutes: Option<u32>,
    created_at: Timestamp,
    total_cents: u64,
}

impl Order {
    /// Place an order: fresh id, `Received` stage, created now.
    pub fn place(order: NewOrder) -> Self {
        Self {
            uuid: OrderUuid::new(),
            restaurant_id: order.restaurant_id,
            restaurant_name: order.restaurant_name,
            items: order.items,
            address: order.address,
            stage: OrderStage::Received,
            eta_minutes: order.eta_minutes,
            created_at: Timestamp::now(),
            total_cents: order.total_cents,
        }
    }

    /// Order identifier
    pub fn uuid(&self) -> OrderUuid {
        self.uuid
    }

    /// Restaurant the order was placed with
    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    /// Restaurant display name
    pub fn restaurant_name(&self) -> &str {
        &self.restaurant_name
    }

    /// Lines as they were at placement
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Delivery address
    pub fn address(&self) -> &DeliveryAddress {
        &self.address
    }

    /// Current stage
    pub fn stage(&self) -> OrderStage {
        self.stage
    }

    /// Current ETA in minutes
    pub fn eta_minutes(&self) -> Option<u32> {
        self.eta_minutes
    }

    /// Placement time
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Amount charged at placement
    pub fn total_cents(&self) -> u64 {
        self.total_cents
    }

    /// Apply a status update. Updates that would move the order backwards are
    /// ignored and `false` is returned. A delivered order never keeps an ETA.
    pub fn apply_status(&mut self, update: StatusUpdate) -> bool {
        if update.stage < self.stage {
            return false;
        }

        self.stage = update.stage;
        self.eta_minutes = if update.stage.is_terminal() {
            None
        } else {
            update.eta_minutes
        };

        true
    }

    /// Advance one stage, estimating a new ETA with `estimate`.
    pub fn advance(&mut self, estimate: impl FnOnce() -> u32) -> StatusUpdate {
        let update = StatusUpdate::advance(self.stage, estimate);

        self.apply_status(update);

        update
    }
}

/// Holds the single order currently being tracked, if any.
///
/// Replacing the current order discards the previous one; no history is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderTracker {
    current: Option<Order>,
}

impl OrderTracker {
    /// A tracker with no current order.
    pub fn new() -> Self {
        Self::default()
    }

    /// The order being tracked
    pub fn current_order(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    /// Track `order`, replacing whatever was there.
    pub fn set_current_order(&mut self, order: Order) {
        self.current = Some(order);
    }

    /// Stop tracking.
    pub fn clear_current_order(&mut self) {
        self.current = None;
    }

    /// Apply a status update to the current order. Returns `false` when there
    /// is no current order or the update is stale.
    pub fn apply_status(&mut self, update: StatusUpdate) -> bool {
        self.current
            .as_mut()
            .is_some_and(|order| order.apply_status(update))
    }

    /// Advance the current order one stage.
    pub fn advance(&mut self, estimate: impl FnOnce() -> u32) -> Option<StatusUpdate> {
        self.current.as_mut().map(|order| order.advance(estimate))
    }
}
