//! Catalog

pub mod fixture;
pub mod service;

pub use fixture::{CatalogFixtureError, FixtureCatalogService};
pub use service::*;
