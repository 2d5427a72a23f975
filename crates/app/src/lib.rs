//! Courier application layer: providers, checkout orchestration, observable
//! session state and runtime configuration.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod context;
pub mod eta;
pub mod observability;
pub mod orders;
pub mod store;
