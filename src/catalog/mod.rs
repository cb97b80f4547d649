//! Reference tables consulted by the engine.
//!
//! A [`Catalog`] is built once at startup and then only borrowed.

/// Appliance power draw and usage table.
pub mod appliance;
/// Kit hardware specifications.
pub mod product;

pub use appliance::{ApplianceCatalog, ApplianceSpec};
pub use product::{ProductCatalog, ProductInfo, ProductSpec};

use crate::config::CatalogConfig;
use crate::error::Result;

/// Both reference tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub appliances: ApplianceCatalog,
    pub products: ProductCatalog,
}

impl Catalog {
    pub fn new(appliances: ApplianceCatalog, products: ProductCatalog) -> Self {
        Self {
            appliances,
            products,
        }
    }

    /// Builds the catalog described by the config.
    ///
    /// A configured appliance table must load; the product table degrades
    /// to its built-in entry instead of failing.
    ///
    /// # Errors
    ///
    /// Returns an error if `appliances_path` is set and cannot be loaded.
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let appliances = match &config.appliances_path {
            Some(path) => ApplianceCatalog::from_toml_file(path)?,
            None => ApplianceCatalog::builtin(),
        };
        let products = ProductCatalog::load_or_fallback(config.products_path.as_deref());
        Ok(Self::new(appliances, products))
    }
}
