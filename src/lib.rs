//! Solar home kit prescription engine.
//!
//! Given a location's modeled production, a kit size and a household's
//! appliances, decides whether the kit will cover the household's needs
//! and what to recommend instead when it won't.

#[cfg(feature = "api")]
pub mod api;
/// Appliance and product reference tables.
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
mod report;

pub use error::{Error, Result};
