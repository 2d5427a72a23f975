use std::{io, str::FromStr};

use clap::Args;
use courier::{
    address::DeliveryAddress,
    cart::NewCartItem,
    orders::{Order, OrderStage, StageProgress},
    receipt::Receipt,
};
use courier_app::{context::AppContext, store::Session};
use tracing::info;

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Restaurant id to order from
    #[arg(long)]
    restaurant: String,

    /// Menu item as `id[:quantity[:note]]`; repeat for more lines
    #[arg(long = "item", required = true)]
    items: Vec<ItemSpec>,

    /// Delivery street line
    #[arg(long)]
    line1: String,

    /// Delivery city
    #[arg(long)]
    city: String,

    /// Delivery state
    #[arg(long)]
    state: String,

    /// Delivery ZIP code
    #[arg(long)]
    zip: String,

    /// Follow the order until it is delivered
    #[arg(long)]
    track: bool,
}

/// One `--item` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemSpec {
    menu_item_id: String,
    quantity: u32,
    note: String,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.splitn(3, ':');

        let menu_item_id = parts
            .next()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "menu item id cannot be empty".to_string())?
            .to_string();

        let quantity = match parts.next().map(str::trim) {
            None | Some("") => 1,
            Some(quantity) => quantity
                .parse::<u32>()
                .map_err(|error| format!("invalid quantity '{quantity}': {error}"))?,
        };

        if quantity == 0 {
            return Err("quantity must be at least 1".to_string());
        }

        let note = parts.next().unwrap_or_default().trim().to_string();

        Ok(Self {
            menu_item_id,
            quantity,
            note,
        })
    }
}

pub(crate) async fn run(context: &AppContext, args: OrderArgs) -> Result<(), String> {
    let restaurant = context
        .catalog
        .list_restaurants()
        .await
        .map_err(|error| format!("failed to load restaurants: {error}"))?
        .into_iter()
        .find(|restaurant| restaurant.id == args.restaurant)
        .ok_or_else(|| format!("unknown restaurant '{}'", args.restaurant))?;

    let menu = context
        .catalog
        .list_menu_items(&restaurant.id)
        .await
        .map_err(|error| format!("failed to load menu: {error}"))?;

    let session = Session::new();

    for spec in args.items {
        let menu_item = menu
            .iter()
            .find(|item| item.id == spec.menu_item_id)
            .cloned()
            .ok_or_else(|| {
                format!(
                    "unknown menu item '{}' at {}",
                    spec.menu_item_id, restaurant.name
                )
            })?;

        session
            .add_item(
                NewCartItem::new(menu_item)
                    .with_quantity(spec.quantity)
                    .with_note(spec.note),
                Some(restaurant.name.as_str()),
            )
            .map_err(|error| error.to_string())?;
    }

    let cart = session.cart().snapshot();

    Receipt::for_cart(&cart, &context.pricing)
        .write_to(io::stdout().lock())
        .map_err(|error| error.to_string())?;

    let address = DeliveryAddress::new(args.line1, args.city, args.state, args.zip);

    let order = context
        .checkout
        .place_order(&cart, &address)
        .await
        .map_err(|error| error.to_string())?;

    println!();
    println!("order_uuid: {}", order.uuid());
    println!("restaurant: {}", order.restaurant_name());
    println!("deliver_to: {}", order.address());

    Receipt::for_order(&order, &context.pricing)
        .write_summary_to(io::stdout().lock())
        .map_err(|error| error.to_string())?;

    session.complete_checkout(order);

    if !args.track {
        if let Some(order) = session.current_order() {
            print_timeline(&order);
        }

        return Ok(());
    }

    while let Some(order) = session.current_order() {
        print_timeline(&order);

        if order.stage().is_terminal() {
            break;
        }

        let update = context
            .orders
            .advance_stage(order.stage())
            .await
            .map_err(|error| format!("failed to update order status: {error}"))?;

        if !session.apply_status(update) {
            break;
        }

        info!(stage = %update.stage, "order progressed");
    }

    Ok(())
}

fn print_timeline(order: &Order) {
    println!();

    for stage in OrderStage::ALL {
        let marker = match stage.progress(order.stage()) {
            StageProgress::Completed => "[x]",
            StageProgress::Active => "[>]",
            StageProgress::Pending => "[ ]",
        };

        println!("{marker} {stage}");
    }

    match order.eta_minutes() {
        Some(minutes) => println!("eta: {minutes} min"),
        None if order.stage().is_terminal() => println!("delivered"),
        None => println!("eta: unknown"),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bare_id_means_one_unit_without_note() -> TestResult {
        assert_eq!(
            "1-1".parse::<ItemSpec>()?,
            ItemSpec {
                menu_item_id: "1-1".to_string(),
                quantity: 1,
                note: String::new(),
            }
        );

        Ok(())
    }

    #[test]
    fn quantity_and_note_are_parsed() -> TestResult {
        assert_eq!(
            "1-2:3:extra cheese: light sauce".parse::<ItemSpec>()?,
            ItemSpec {
                menu_item_id: "1-2".to_string(),
                quantity: 3,
                note: "extra cheese: light sauce".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn empty_quantity_defaults_to_one() -> TestResult {
        let spec: ItemSpec = "2-6::no salt".parse()?;

        assert_eq!(spec.quantity, 1);
        assert_eq!(spec.note, "no salt");

        Ok(())
    }

    #[test]
    fn invalid_specs_are_rejected() {
        for value in ["", ":2", "1-1:0", "1-1:-1", "1-1:lots"] {
            assert!(value.parse::<ItemSpec>().is_err(), "{value:?} should fail");
        }
    }
}
