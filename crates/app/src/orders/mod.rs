//! Order placement and status

pub mod service;
pub mod simulated;

pub use service::*;
pub use simulated::SimulatedOrdersService;
