//! Checkout service.
//!
//! Turns a cart and a delivery address into a placed order:
//!
//! 1. reject an empty cart,
//! 2. reject an address that fails local validation,
//! 3. ask the ETA provider for an estimate,
//! 4. hand the priced snapshot to the orders provider.
//!
//! The cart is not cleared and no current order is set here; callers decide
//! what to do with the returned [`Order`].

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use courier::{
    DeliveryError,
    address::DeliveryAddress,
    cart::Cart,
    orders::{NewOrder, Order, OrderStage},
    pricing::Pricing,
};
use tracing::{info, warn};

use crate::{checkout::CheckoutError, eta::EtaService, orders::OrdersService};

/// Name used when the cart never recorded one.
pub const FALLBACK_RESTAURANT_NAME: &str = "Restaurant";

/// Shared view of whether any placement is in flight.
#[derive(Debug, Clone, Default)]
pub struct PlacingFlag(Arc<AtomicUsize>);

impl PlacingFlag {
    /// Whether at least one placement is running.
    pub fn is_placing(&self) -> bool {
        self.0.load(Ordering::Acquire) > 0
    }

    fn enter(&self) -> PlacingGuard<'_> {
        self.0.fetch_add(1, Ordering::AcqRel);

        PlacingGuard(&self.0)
    }
}

/// Marks one placement in flight until dropped.
struct PlacingGuard<'a>(&'a AtomicUsize);

impl Drop for PlacingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Places orders through the configured providers.
pub struct CheckoutService {
    eta: Arc<dyn EtaService>,
    orders: Arc<dyn OrdersService>,
    pricing: Pricing,
    placing: PlacingFlag,
}

impl fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutService")
            .field("pricing", &self.pricing)
            .field("placing", &self.placing)
            .finish_non_exhaustive()
    }
}

impl CheckoutService {
    /// Create a checkout over the given providers and pricing rules.
    #[must_use]
    pub fn new(
        eta: Arc<dyn EtaService>,
        orders: Arc<dyn OrdersService>,
        pricing: Pricing,
    ) -> Self {
        Self {
            eta,
            orders,
            pricing,
            placing: PlacingFlag::default(),
        }
    }

    /// Pricing rules applied to every order.
    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    /// Whether an order is being placed right now.
    pub fn is_placing(&self) -> bool {
        self.placing.is_placing()
    }

    /// A handle that reports [`Self::is_placing`] from elsewhere.
    pub fn placing_flag(&self) -> PlacingFlag {
        self.placing.clone()
    }

    /// Place an order for everything in `cart`, delivered to `address`.
    ///
    /// # Errors
    ///
    /// - `EmptyCart` when the cart has no lines, whatever the address.
    /// - `InvalidAddress` when the address fails validation; no provider is
    ///   called.
    /// - [`CheckoutError::AddressRejected`] when a provider refuses the
    ///   address.
    /// - Any other provider failure unchanged.
    pub async fn place_order(
        &self,
        cart: &Cart,
        address: &DeliveryAddress,
    ) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            warn!("checkout attempted with an empty cart");

            return Err(DeliveryError::EmptyCart.into());
        }

        let address = address.trimmed();

        if !address.is_valid() {
            warn!(%address, "checkout attempted with an invalid address");

            return Err(DeliveryError::InvalidAddress.into());
        }

        let _placing = self.placing.enter();

        let eta_minutes = self
            .eta
            .estimate_minutes(&address)
            .await
            .map_err(CheckoutError::from_provider)?;

        let new_order = NewOrder {
            restaurant_id: cart.restaurant_id().unwrap_or_default().to_string(),
            restaurant_name: cart
                .restaurant_name()
                .unwrap_or(FALLBACK_RESTAURANT_NAME)
                .to_string(),
            items: cart.items().to_vec(),
            address,
            total_cents: cart.total_cents(&self.pricing),
            eta_minutes: Some(eta_minutes),
        };

        let order = self
            .orders
            .place_order(new_order)
            .await
            .map_err(CheckoutError::from_provider)?;

        if order.stage() != OrderStage::Received {
            warn!(stage = %order.stage(), "orders provider returned an order past Received");

            return Err(DeliveryError::InvalidResponse.into());
        }

        info!(
            order = %order.uuid(),
            restaurant = order.restaurant_name(),
            total = %self.pricing.format(order.total_cents()),
            eta_minutes,
            "order placed"
        );

        Ok(order)
    }
}
