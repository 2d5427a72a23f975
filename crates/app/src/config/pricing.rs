//! Pricing Config

use clap::Args;
use courier::pricing::{
    DEFAULT_DELIVERY_FEE_CENTS, DEFAULT_FREE_DELIVERY_THRESHOLD_CENTS, DEFAULT_TAX_RATE, Pricing,
    PricingError,
};
use decimal_percentage::Percentage;

/// Tax and delivery fee settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Sales tax rate as a fraction of the subtotal
    #[arg(long, env = "COURIER_TAX_RATE", default_value_t = DEFAULT_TAX_RATE)]
    pub tax_rate: f64,

    /// Subtotal in cents at or above which delivery is free
    #[arg(
        long,
        env = "COURIER_FREE_DELIVERY_THRESHOLD_CENTS",
        default_value_t = DEFAULT_FREE_DELIVERY_THRESHOLD_CENTS
    )]
    pub free_delivery_threshold_cents: u64,

    /// Flat delivery fee in cents below the threshold
    #[arg(
        long,
        env = "COURIER_DELIVERY_FEE_CENTS",
        default_value_t = DEFAULT_DELIVERY_FEE_CENTS
    )]
    pub delivery_fee_cents: u64,

    /// ISO 4217 currency code used to display amounts
    #[arg(long, env = "COURIER_CURRENCY", default_value = "USD")]
    pub currency: String,
}

impl PricingConfig {
    /// Build the pricing rules these settings describe.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative tax rate or an unknown currency.
    pub fn pricing(&self) -> Result<Pricing, PricingError> {
        Pricing::with_currency_code(
            Percentage::from(self.tax_rate),
            self.free_delivery_threshold_cents,
            self.delivery_fee_cents,
            &self.currency,
        )
    }
}
