//! Courier
//!
//! Courier is the ordering core of a food delivery client: catalog types, a
//! minor-unit pricing engine, the cart aggregate, delivery addresses and the
//! order lifecycle. Everything in this crate is synchronous and free of I/O so
//! that an application layer can wrap it with whatever providers and state
//! containers it needs.

pub mod address;
pub mod cart;
pub mod errors;
pub mod menu;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod uuids;

pub use errors::DeliveryError;
