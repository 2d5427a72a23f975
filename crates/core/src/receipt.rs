//! Receipt

use std::io;

use rusty_money::iso::Currency;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartItem},
    orders::Order,
    pricing::{PriceBreakdown, Pricing, format_cents},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output could not be written.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// One printed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    /// Dish name
    pub name: String,

    /// Line note
    pub note: String,

    /// Units
    pub quantity: u32,

    /// Unit price in minor units
    pub unit_cents: u64,

    /// Line total in minor units
    pub line_total_cents: u64,
}

impl From<&CartItem> for ReceiptLine {
    fn from(item: &CartItem) -> Self {
        Self {
            name: item.menu_item().name.clone(),
            note: item.note().to_string(),
            quantity: item.quantity(),
            unit_cents: item.menu_item().price_cents,
            line_total_cents: item.line_total_cents(),
        }
    }
}

/// Itemised summary of a cart or an order.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: SmallVec<[ReceiptLine; 8]>,
    breakdown: Option<PriceBreakdown>,
    total_cents: u64,
    currency: &'static Currency,
}

impl Receipt {
    /// Receipt for the cart as it stands.
    pub fn for_cart(cart: &Cart, pricing: &Pricing) -> Self {
        let breakdown = cart.breakdown(pricing);

        Self {
            lines: cart.items().iter().map(ReceiptLine::from).collect(),
            breakdown: Some(breakdown),
            total_cents: breakdown.total_cents,
            currency: pricing.currency(),
        }
    }

    /// Receipt for a placed order. The total is the amount charged at
    /// placement. Subtotal, tax and delivery are shown only while `pricing`
    /// still reproduces that total.
    pub fn for_order(order: &Order, pricing: &Pricing) -> Self {
        let breakdown = pricing.breakdown(order.items());

        Self {
            lines: order.items().iter().map(ReceiptLine::from).collect(),
            breakdown: (breakdown.total_cents == order.total_cents()).then_some(breakdown),
            total_cents: order.total_cents(),
            currency: pricing.currency(),
        }
    }

    /// Printed lines
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Itemised amounts, when they add up to the total
    pub fn breakdown(&self) -> Option<PriceBreakdown> {
        self.breakdown
    }

    /// Amount due or charged
    pub fn total_cents(&self) -> u64 {
        self.total_cents
    }

    /// Label/value pairs for the summary block.
    pub fn summary(&self) -> SmallVec<[(&'static str, String); 4]> {
        let mut summary = SmallVec::new();

        if let Some(breakdown) = self.breakdown {
            let delivery = if breakdown.delivery_fee_cents == 0 {
                "Free".to_string()
            } else {
                format_cents(breakdown.delivery_fee_cents, self.currency)
            };

            summary.push(("Subtotal:", format_cents(breakdown.subtotal_cents, self.currency)));
            summary.push(("Tax:", format_cents(breakdown.tax_cents, self.currency)));
            summary.push(("Delivery:", delivery));
        }

        summary.push(("Total:", format_cents(self.total_cents, self.currency)));

        summary
    }

    /// Write the table and summary to `out`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Note", "Qty", "Price", "Total"]);

        for line in &self.lines {
            builder.push_record([
                line.name.clone(),
                line.note.clone(),
                line.quantity.to_string(),
                format_cents(line.unit_cents, self.currency),
                format_cents(line.line_total_cents, self.currency),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "{table}")?;

        self.write_summary_to(out)
    }

    /// Write only the summary block to `out`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if writing fails.
    pub fn write_summary_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let summary = self.summary();
        let label_width = summary.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = summary.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in summary {
            writeln!(out, " {label:<label_width$} {value:>value_width$}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        address::DeliveryAddress,
        cart::NewCartItem,
        menu::MenuItem,
        orders::NewOrder,
    };

    use super::*;

    fn cart() -> Cart {
        let mut cart = Cart::new();

        cart.add_item(
            NewCartItem::new(MenuItem::new("1-1", "1", "Margherita Pizza", 12_99)).with_quantity(2),
            Some("Pizza Palace"),
        );
        cart.add_item(
            NewCartItem::new(MenuItem::new("1-11", "1", "Coca Cola", 1_99)).with_note("no ice"),
            None,
        );

        cart
    }

    #[test]
    fn cart_receipt_lists_every_line() {
        let receipt = Receipt::for_cart(&cart(), &Pricing::default());

        let names: Vec<_> = receipt.lines().iter().map(|line| line.name.as_str()).collect();

        assert_eq!(names, ["Margherita Pizza", "Coca Cola"]);
        assert_eq!(receipt.breakdown().map(|amounts| amounts.subtotal_cents), Some(27_97));
        assert_eq!(receipt.total_cents(), 35_21);
    }

    #[test]
    fn summary_shows_formatted_amounts() {
        let receipt = Receipt::for_cart(&cart(), &Pricing::default());

        assert_eq!(
            receipt.summary().as_slice(),
            [
                ("Subtotal:", "$27.97".to_string()),
                ("Tax:", "$2.24".to_string()),
                ("Delivery:", "$5.00".to_string()),
                ("Total:", "$35.21".to_string()),
            ]
        );
    }

    fn placed(cart: &Cart, total_cents: u64) -> Order {
        Order::place(NewOrder {
            restaurant_id: "1".to_string(),
            restaurant_name: "Pizza Palace".to_string(),
            items: cart.items().to_vec(),
            address: DeliveryAddress::new("1 Main St", "Roanoke", "VA", "24011"),
            total_cents,
            eta_minutes: None,
        })
    }

    #[test]
    fn order_receipt_itemises_when_pricing_agrees() {
        let cart = cart();
        let pricing = Pricing::default();
        let order = placed(&cart, cart.total_cents(&pricing));

        let receipt = Receipt::for_order(&order, &pricing);

        assert_eq!(receipt.breakdown(), Some(cart.breakdown(&pricing)));
        assert_eq!(receipt.summary().len(), 4);
        assert_eq!(receipt.total_cents(), 35_21);
    }

    #[test]
    fn order_receipt_shows_only_charged_total_after_pricing_changes() -> TestResult {
        let cart = cart();
        let order = placed(&cart, cart.total_cents(&Pricing::default()));
        let raised = Pricing::new(Percentage::from(0.1), 50_00, 5_00, iso::USD)?;

        let receipt = Receipt::for_order(&order, &raised);

        assert_eq!(receipt.breakdown(), None);
        assert_eq!(receipt.summary().as_slice(), [("Total:", "$35.21".to_string())]);

        Ok(())
    }

    #[test]
    fn writes_table_and_summary() -> TestResult {
        let receipt = Receipt::for_cart(&cart(), &Pricing::default());
        let mut out = Vec::new();

        receipt.write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Margherita Pizza"));
        assert!(text.contains("no ice"));
        assert!(text.contains("$25.98"));
        assert!(text.contains("$35.21"));

        Ok(())
    }
}
