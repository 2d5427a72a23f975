//! Application configuration

use clap::Parser;

use crate::config::{
    observability::LoggingConfig, pricing::PricingConfig, providers::ProvidersConfig,
};

pub mod observability;
pub mod pricing;
pub mod providers;

pub use observability::LogFormat;
pub use providers::EtaProvider;

/// Courier configuration
#[derive(Debug, Parser)]
#[command(name = "courier", about = "Courier food ordering", long_about = None)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tax and delivery fee settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Catalog, ETA and orders provider settings.
    #[command(flatten)]
    pub providers: ProvidersConfig,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use courier::pricing::Pricing;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_match_documented_values() -> TestResult {
        let config = AppConfig::try_parse_from(["courier"])?;

        assert!((config.pricing.tax_rate - 0.08).abs() < f64::EPSILON);
        assert_eq!(config.pricing.free_delivery_threshold_cents, 50_00);
        assert_eq!(config.pricing.delivery_fee_cents, 5_00);
        assert_eq!(config.pricing.currency, "USD");
        assert_eq!(config.providers.eta_provider, EtaProvider::Simulated);
        assert_eq!(config.providers.latency(), Duration::from_millis(500));
        assert_eq!(
            config.providers.origin().formatted(),
            "285 Ag-Quad Ln, Blacksburg, VA 24060"
        );

        let pricing = config.pricing.pricing()?;
        let default = Pricing::default();

        assert_eq!(pricing.tax_cents(10_00), default.tax_cents(10_00));
        assert_eq!(pricing.delivery_fee_cents(49_99), 5_00);
        assert_eq!(pricing.delivery_fee_cents(50_00), 0);

        Ok(())
    }

    #[test]
    fn pricing_flags_override_defaults() -> TestResult {
        let config = AppConfig::try_parse_from([
            "courier",
            "--tax-rate",
            "0.1",
            "--free-delivery-threshold-cents",
            "3000",
            "--delivery-fee-cents",
            "299",
            "--currency",
            "EUR",
        ])?;

        let pricing = config.pricing.pricing()?;

        assert_eq!(pricing.tax_cents(10_00), 1_00);
        assert_eq!(pricing.delivery_fee_cents(29_99), 2_99);
        assert_eq!(pricing.delivery_fee_cents(30_00), 0);
        assert_eq!(pricing.currency().iso_alpha_code, "EUR");

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected_when_building_pricing() -> TestResult {
        let config = AppConfig::try_parse_from(["courier", "--currency", "XXY"])?;

        assert!(config.pricing.pricing().is_err());

        Ok(())
    }

    #[test]
    fn mapbox_provider_and_token_parse() -> TestResult {
        let config = AppConfig::try_parse_from([
            "courier",
            "--eta-provider",
            "mapbox",
            "--mapbox-token",
            "pk.test",
            "--simulated-latency-ms",
            "0",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.providers.eta_provider, EtaProvider::Mapbox);
        assert_eq!(config.providers.mapbox_token.as_deref(), Some("pk.test"));
        assert!(config.providers.latency().is_zero());
        assert!(matches!(config.logging.log_format, LogFormat::Json));

        Ok(())
    }

    #[test]
    fn unknown_provider_is_a_parse_error() {
        let result = AppConfig::try_parse_from(["courier", "--eta-provider", "carrier-pigeon"]);

        assert!(result.is_err());
    }
}
