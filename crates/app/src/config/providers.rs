//! Provider Config

use std::time::Duration;

use clap::Args;
use courier::address::DeliveryAddress;

use crate::eta::mapbox::DEFAULT_MAPBOX_BASE_URL;

/// Where delivery estimates come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum EtaProvider {
    /// Random estimates, no network access.
    Simulated,

    /// Mapbox geocoding and driving directions.
    Mapbox,
}

/// Catalog, ETA and orders provider settings.
#[derive(Debug, Args)]
pub struct ProvidersConfig {
    /// ETA provider (simulated, mapbox)
    #[arg(long, env = "COURIER_ETA_PROVIDER", value_enum, default_value_t = EtaProvider::Simulated)]
    pub eta_provider: EtaProvider,

    /// Mapbox access token, required by the mapbox provider
    #[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true)]
    pub mapbox_token: Option<String>,

    /// Mapbox API base URL
    #[arg(long, env = "MAPBOX_BASE_URL", default_value = DEFAULT_MAPBOX_BASE_URL)]
    pub mapbox_base_url: String,

    /// Street line deliveries are routed from
    #[arg(long, env = "COURIER_ORIGIN_LINE1", default_value = "285 Ag-Quad Ln")]
    pub origin_line1: String,

    /// City deliveries are routed from
    #[arg(long, env = "COURIER_ORIGIN_CITY", default_value = "Blacksburg")]
    pub origin_city: String,

    /// State deliveries are routed from
    #[arg(long, env = "COURIER_ORIGIN_STATE", default_value = "VA")]
    pub origin_state: String,

    /// ZIP code deliveries are routed from
    #[arg(long, env = "COURIER_ORIGIN_ZIP", default_value = "24060")]
    pub origin_zip: String,

    /// Artificial delay added by simulated providers, in milliseconds
    #[arg(long, env = "COURIER_SIMULATED_LATENCY_MS", default_value_t = 500_u64)]
    pub simulated_latency_ms: u64,
}

impl ProvidersConfig {
    /// Address every delivery is routed from.
    pub fn origin(&self) -> DeliveryAddress {
        DeliveryAddress::new(
            &self.origin_line1,
            &self.origin_city,
            &self.origin_state,
            &self.origin_zip,
        )
    }

    /// Delay applied by simulated providers.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
