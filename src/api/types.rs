//! API response types.

use serde::Serialize;

use crate::catalog::{ApplianceSpec, ProductInfo, ProductSpec};

/// One appliance table row, with its derived daily energy.
#[derive(Debug, Serialize)]
pub struct ApplianceRecord {
    pub id: String,
    pub label: String,
    pub watts: f64,
    pub hours_per_day: f64,
    pub daily_wh: f64,
}

impl From<&ApplianceSpec> for ApplianceRecord {
    fn from(spec: &ApplianceSpec) -> Self {
        Self {
            id: spec.id.clone(),
            label: spec.label.clone(),
            watts: spec.watts,
            hours_per_day: spec.hours_per_day,
            daily_wh: spec.daily_wh(),
        }
    }
}

/// One product table entry as shown to a shopper.
#[derive(Debug, Serialize)]
pub struct ProductRecord {
    pub kit_watts: u32,
    #[serde(flatten)]
    pub info: ProductInfo,
}

impl ProductRecord {
    pub fn new(kit_watts: u32, spec: &ProductSpec) -> Self {
        Self {
            kit_watts,
            info: spec.info(kit_watts),
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
