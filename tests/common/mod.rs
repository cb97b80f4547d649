//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use solar_prescription::catalog::{ApplianceCatalog, Catalog, ProductCatalog};
use solar_prescription::engine::{
    ApplianceSelection, CoverageTarget, Location, PrescriptionRequest, ProductionSeries,
};

/// Path to the shipped product table.
pub fn products_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/products.json")
}

/// Built-in appliances plus the shipped product table.
pub fn shipped_catalog() -> Catalog {
    let products = ProductCatalog::from_json_file(&products_path())
        .unwrap_or_else(|e| panic!("shipped product table should load: {e}"));
    Catalog::new(ApplianceCatalog::builtin(), products)
}

pub fn nairobi() -> Location {
    Location {
        name: "Nairobi, Kenya".to_string(),
        latitude: -1.2921,
        longitude: 36.8219,
    }
}

pub fn location(name: &str, latitude: f64) -> Location {
    Location {
        name: name.to_string(),
        latitude,
        longitude: 0.0,
    }
}

/// Nairobi production for a 300 W kit: 438 kWh/yr, worst month 30.6 kWh.
pub fn nairobi_300w() -> ProductionSeries {
    ProductionSeries::new(
        438.0,
        vec![
            35.8, 36.4, 38.9, 36.1, 33.2, 31.8, 30.6, 32.1, 34.3, 36.7, 35.9, 36.2,
        ],
    )
}

/// Three LED bulbs, two phone charges and a small TV: 390 Wh/day.
pub fn household() -> Vec<ApplianceSelection> {
    vec![
        ApplianceSelection::new("led_bulb", 3),
        ApplianceSelection::new("phone_charger", 2),
        ApplianceSelection::new("small_tv", 1),
    ]
}

/// One LED bulb and one phone charge: 70 Wh/day.
pub fn minimal_household() -> Vec<ApplianceSelection> {
    vec![
        ApplianceSelection::new("led_bulb", 1),
        ApplianceSelection::new("phone_charger", 1),
    ]
}

pub fn request(
    location: Location,
    kit_watts: u32,
    appliances: Vec<ApplianceSelection>,
    coverage_target: CoverageTarget,
) -> PrescriptionRequest {
    PrescriptionRequest {
        location,
        kit_watts,
        appliances,
        coverage_target,
    }
}
