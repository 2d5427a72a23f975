//! Prints the receipt for a small cart.
//!
//! ```sh
//! cargo run -p courier --example receipt
//! ```

use std::io;

use courier::prelude::*;

fn main() -> Result<(), ReceiptError> {
    let pricing = Pricing::default();
    let mut cart = Cart::new();

    cart.add_item(
        NewCartItem::new(
            MenuItem::new("5-1", "5", "Chicken Tikka Masala", 14_99)
                .with_description("Creamy tomato curry"),
        ),
        Some("Curry House"),
    );
    cart.add_item(
        NewCartItem::new(MenuItem::new("5-7", "5", "Garlic Naan", 3_99)).with_quantity(2),
        None,
    );
    cart.add_item(
        NewCartItem::new(MenuItem::new("5-9", "5", "Mango Lassi", 4_99)).with_note("no ice"),
        None,
    );

    Receipt::for_cart(&cart, &pricing).write_to(io::stdout().lock())
}
