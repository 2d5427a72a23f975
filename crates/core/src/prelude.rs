//! Courier prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    address::DeliveryAddress,
    cart::{Cart, CartError, CartItem, CartItemUuid, NewCartItem},
    errors::DeliveryError,
    menu::{MenuItem, Restaurant},
    orders::{NewOrder, Order, OrderStage, OrderTracker, OrderUuid, StageProgress, StatusUpdate},
    pricing::{PriceBreakdown, Pricing, PricingError, format_cents, subtotal_cents},
    receipt::{Receipt, ReceiptError},
};
