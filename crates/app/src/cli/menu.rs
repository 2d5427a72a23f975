use clap::Args;
use courier_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Restaurant id, as listed by `courier restaurants`
    restaurant: String,
}

pub(crate) async fn run(context: &AppContext, args: MenuArgs) -> Result<(), String> {
    let items = context
        .catalog
        .list_menu_items(&args.restaurant)
        .await
        .map_err(|error| format!("failed to load menu: {error}"))?;

    if items.is_empty() {
        println!("no menu found for restaurant {}", args.restaurant);
        return Ok(());
    }

    for item in items {
        println!(
            "{:<6} {:<22} {:>8}  {}",
            item.id,
            item.name,
            context.pricing.format(item.price_cents),
            item.description.unwrap_or_default()
        );
    }

    Ok(())
}
