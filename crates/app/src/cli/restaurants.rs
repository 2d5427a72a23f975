use courier_app::context::AppContext;

pub(crate) async fn run(context: &AppContext) -> Result<(), String> {
    let restaurants = context
        .catalog
        .list_restaurants()
        .await
        .map_err(|error| format!("failed to load restaurants: {error}"))?;

    for restaurant in restaurants {
        let rating = restaurant
            .rating
            .map_or_else(|| "unrated".to_string(), |rating| format!("{rating:.1}"));

        println!(
            "{:>3}  {:<16} {:<10} {rating}",
            restaurant.id, restaurant.name, restaurant.cuisine
        );
    }

    Ok(())
}
