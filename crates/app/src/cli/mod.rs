use clap::{Parser, Subcommand};
use courier_app::{config::AppConfig, context::AppContext};

mod menu;
mod order;
mod restaurants;

#[derive(Debug, Parser)]
#[command(name = "courier", about = "Courier food ordering", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List restaurants
    Restaurants,

    /// Show a restaurant's menu
    Menu(menu::MenuArgs),

    /// Build a cart, check out and optionally follow the delivery
    Order(order::OrderArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to start: {error}"))?;

        match self.command {
            Commands::Restaurants => restaurants::run(&context).await,
            Commands::Menu(args) => menu::run(&context, args).await,
            Commands::Order(args) => order::run(&context, args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use courier_app::config::EtaProvider;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn configuration_flags_sit_beside_the_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "courier",
            "--tax-rate",
            "0.1",
            "--eta-provider",
            "mapbox",
            "restaurants",
        ])?;

        assert!((cli.config.pricing.tax_rate - 0.1).abs() < f64::EPSILON);
        assert_eq!(cli.config.providers.eta_provider, EtaProvider::Mapbox);
        assert!(matches!(cli.command, Commands::Restaurants));

        Ok(())
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["courier"]).is_err());
    }
}
