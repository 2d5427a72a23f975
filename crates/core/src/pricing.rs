//! Pricing
//!
//! All amounts are integer minor units (cents). The engine is total: given
//! non-negative inputs it never fails, saturating at `u64::MAX` rather than
//! wrapping.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Findable, Money,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::cart::CartItem;

/// Default sales tax rate applied to the subtotal (8%).
pub const DEFAULT_TAX_RATE: f64 = 0.08;

/// Subtotal at or above which delivery is free ($50.00).
pub const DEFAULT_FREE_DELIVERY_THRESHOLD_CENTS: u64 = 50_00;

/// Flat delivery fee charged below the threshold ($5.00).
pub const DEFAULT_DELIVERY_FEE_CENTS: u64 = 5_00;

/// Errors raised while building a pricing configuration.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Tax rates below zero would produce negative tax.
    #[error("tax rate must not be negative")]
    NegativeTaxRate,

    /// The currency code is not a known ISO currency.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Pricing rules: tax rate, free delivery threshold, flat delivery fee and the
/// currency used to display amounts.
#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    tax_rate: Percentage,
    free_delivery_threshold_cents: u64,
    delivery_fee_cents: u64,
    currency: &'static Currency,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            tax_rate: Percentage::from(DEFAULT_TAX_RATE),
            free_delivery_threshold_cents: DEFAULT_FREE_DELIVERY_THRESHOLD_CENTS,
            delivery_fee_cents: DEFAULT_DELIVERY_FEE_CENTS,
            currency: iso::USD,
        }
    }
}

impl Pricing {
    /// Create pricing rules.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NegativeTaxRate`] if `tax_rate` is below zero.
    pub fn new(
        tax_rate: Percentage,
        free_delivery_threshold_cents: u64,
        delivery_fee_cents: u64,
        currency: &'static Currency,
    ) -> Result<Self, PricingError> {
        if (tax_rate * Decimal::ONE).is_sign_negative() {
            return Err(PricingError::NegativeTaxRate);
        }

        Ok(Self {
            tax_rate,
            free_delivery_threshold_cents,
            delivery_fee_cents,
            currency,
        })
    }

    /// Create pricing rules from an ISO currency code such as `"USD"`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownCurrency`] for an unrecognised code, or
    /// [`PricingError::NegativeTaxRate`] for a negative rate.
    pub fn with_currency_code(
        tax_rate: Percentage,
        free_delivery_threshold_cents: u64,
        delivery_fee_cents: u64,
        currency_code: &str,
    ) -> Result<Self, PricingError> {
        let currency = Currency::find(currency_code)
            .ok_or_else(|| PricingError::UnknownCurrency(currency_code.to_string()))?;

        Self::new(
            tax_rate,
            free_delivery_threshold_cents,
            delivery_fee_cents,
            currency,
        )
    }

    /// Tax rate applied to the subtotal.
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// Subtotal at or above which delivery is free.
    pub fn free_delivery_threshold_cents(&self) -> u64 {
        self.free_delivery_threshold_cents
    }

    /// Currency used for display.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Tax on a subtotal, rounded to the nearest cent with midpoints rounded
    /// away from zero.
    pub fn tax_cents(&self, subtotal_cents: u64) -> u64 {
        // decimal_percentage doesn't expose the inner Decimal
        (self.tax_rate * Decimal::ONE)
            .checked_mul(Decimal::from(subtotal_cents))
            .map(|tax| tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|tax| tax.to_u64())
            .unwrap_or(u64::MAX)
    }

    /// Delivery fee for a subtotal. The threshold is inclusive.
    pub fn delivery_fee_cents(&self, subtotal_cents: u64) -> u64 {
        if subtotal_cents >= self.free_delivery_threshold_cents {
            0
        } else {
            self.delivery_fee_cents
        }
    }

    /// Subtotal plus tax plus delivery.
    pub fn total_cents(&self, items: &[CartItem]) -> u64 {
        self.breakdown(items).total_cents
    }

    /// Every derived amount for a set of lines.
    pub fn breakdown(&self, items: &[CartItem]) -> PriceBreakdown {
        let subtotal_cents = subtotal_cents(items);
        let tax_cents = self.tax_cents(subtotal_cents);
        let delivery_fee_cents = self.delivery_fee_cents(subtotal_cents);

        PriceBreakdown {
            subtotal_cents,
            tax_cents,
            delivery_fee_cents,
            total_cents: subtotal_cents
                .saturating_add(tax_cents)
                .saturating_add(delivery_fee_cents),
        }
    }

    /// Format minor units in the configured currency, e.g. `1999` as `$19.99`.
    pub fn format(&self, cents: u64) -> String {
        format_cents(cents, self.currency)
    }
}

/// Sum of every line total. Empty input is zero.
pub fn subtotal_cents(items: &[CartItem]) -> u64 {
    items
        .iter()
        .fold(0, |acc: u64, item| acc.saturating_add(item.line_total_cents()))
}

/// Format minor units in `currency`.
pub fn format_cents(cents: u64, currency: &'static Currency) -> String {
    Money::from_minor(i64::try_from(cents).unwrap_or(i64::MAX), currency).to_string()
}

/// Derived amounts for a cart or order, all in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceBreakdown {
    /// Sum of line totals
    pub subtotal_cents: u64,

    /// Tax on the subtotal
    pub tax_cents: u64,

    /// Delivery fee, zero at or above the threshold
    pub delivery_fee_cents: u64,

    /// Subtotal + tax + delivery
    pub total_cents: u64,
}
