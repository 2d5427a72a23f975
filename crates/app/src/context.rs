//! App Context

use std::sync::Arc;

use courier::pricing::{Pricing, PricingError};
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{CatalogFixtureError, CatalogService, FixtureCatalogService},
    checkout::CheckoutService,
    config::{AppConfig, EtaProvider, providers::ProvidersConfig},
    eta::{EtaService, MapboxConfig, MapboxEtaService, SimulatedEtaService},
    orders::{OrdersService, SimulatedOrdersService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("invalid pricing configuration")]
    Pricing(#[from] PricingError),

    #[error("failed to load catalog")]
    Catalog(#[from] CatalogFixtureError),

    #[error("the mapbox ETA provider needs MAPBOX_ACCESS_TOKEN")]
    MissingMapboxToken,
}

/// Providers and services wired together for one process.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<CheckoutService>,
    pub pricing: Pricing,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when pricing settings are invalid, the bundled catalog
    /// cannot be loaded, or the mapbox provider is chosen without a token.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let pricing = config.pricing.pricing()?;
        let latency = config.providers.latency();

        let catalog: Arc<dyn CatalogService> = Arc::new(FixtureCatalogService::bundled(latency)?);
        let orders: Arc<dyn OrdersService> = Arc::new(SimulatedOrdersService::new(latency));
        let eta = eta_service(&config.providers)?;

        info!(
            eta_provider = ?config.providers.eta_provider,
            currency = pricing.currency().iso_alpha_code,
            "providers selected"
        );

        Ok(Self {
            checkout: Arc::new(CheckoutService::new(eta, Arc::clone(&orders), pricing)),
            catalog,
            orders,
            pricing,
        })
    }
}

fn eta_service(config: &ProvidersConfig) -> Result<Arc<dyn EtaService>, AppInitError> {
    match config.eta_provider {
        EtaProvider::Simulated => Ok(Arc::new(SimulatedEtaService::new(config.latency()))),
        EtaProvider::Mapbox => {
            let access_token = config
                .mapbox_token
                .as_deref()
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .ok_or(AppInitError::MissingMapboxToken)?;

            Ok(Arc::new(MapboxEtaService::new(MapboxConfig {
                base_url: config.mapbox_base_url.clone(),
                access_token: access_token.to_string(),
                origin: config.origin(),
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    fn config(args: &[&str]) -> Result<AppConfig, clap::Error> {
        AppConfig::try_parse_from(["courier", "--simulated-latency-ms", "0"].iter().chain(args))
    }

    #[tokio::test]
    async fn simulated_context_serves_catalog() -> TestResult {
        let context = AppContext::from_config(&config(&[])?)?;

        assert_eq!(context.catalog.list_restaurants().await?.len(), 5);
        assert!(!context.checkout.is_placing());

        Ok(())
    }

    #[test]
    fn mapbox_without_token_fails_at_startup() -> TestResult {
        let result = AppContext::from_config(&config(&[
            "--eta-provider",
            "mapbox",
            "--mapbox-token",
            "  ",
        ])?);

        assert!(
            matches!(result, Err(AppInitError::MissingMapboxToken)),
            "expected MissingMapboxToken"
        );

        Ok(())
    }

    #[test]
    fn mapbox_with_token_builds() -> TestResult {
        AppContext::from_config(&config(&[
            "--eta-provider",
            "mapbox",
            "--mapbox-token",
            "pk.test",
        ])?)?;

        Ok(())
    }

    #[test]
    fn negative_tax_rate_fails_at_startup() -> TestResult {
        let result = AppContext::from_config(&config(&["--tax-rate=-0.05"])?);

        assert!(matches!(result, Err(AppInitError::Pricing(PricingError::NegativeTaxRate))));

        Ok(())
    }
}
