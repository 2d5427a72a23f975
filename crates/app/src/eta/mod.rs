//! Delivery ETA estimation

pub mod mapbox;
pub mod service;
pub mod simulated;

pub use mapbox::{MapboxConfig, MapboxEtaService};
pub use service::*;
pub use simulated::SimulatedEtaService;
