//! Prescription input documents (TOML or JSON).
//!
//! An input carries the caller's request together with the production
//! series already fetched from the production estimate collaborator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::DefaultsConfig;
use crate::engine::{
    ApplianceSelection, CoverageTarget, Location, PrescriptionRequest, ProductionSeries,
};
use crate::error::{Error, Result};

/// Production data as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductionInput {
    /// Kit size (W) the series was modeled for. Defaults to the requested
    /// kit, or the configured reference kit when auto-selecting.
    #[serde(default)]
    pub modeled_kit_watts: Option<u32>,
    /// Annual total (kWh). Defaults to the sum of the months.
    #[serde(default)]
    pub annual_kwh: Option<f64>,
    pub monthly_kwh: Vec<f64>,
}

/// A request document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrescriptionInput {
    pub location: Location,
    #[serde(default)]
    pub kit_watts: u32,
    /// 50, 70 or 90; any other integer falls back to 70.
    #[serde(default)]
    pub coverage_target: Option<i64>,
    #[serde(default)]
    pub appliances: Vec<ApplianceSelection>,
    pub production: ProductionInput,
}

/// Validated engine inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInput {
    pub request: PrescriptionRequest,
    pub production: ProductionSeries,
    pub modeled_kit_watts: u32,
}

impl PrescriptionInput {
    /// Reads an input file, choosing the format from the extension
    /// (`.json`, anything else is TOML).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or a parse error.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Toml`] if the document is malformed.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// # Errors
    ///
    /// Returns [`Error::Json`] if the document is malformed.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Validates the input and fills in configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for an out-of-range location and
    /// the errors of [`ProductionSeries::validate`] for bad production data.
    pub fn resolve(self, defaults: &DefaultsConfig) -> Result<ResolvedInput> {
        let lat = self.location.latitude;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidRequest(format!(
                "latitude must be within [-90, 90], got {lat}"
            )));
        }
        let lon = self.location.longitude;
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::InvalidRequest(format!(
                "longitude must be within [-180, 180], got {lon}"
            )));
        }

        let production = match self.production.annual_kwh {
            Some(annual) => ProductionSeries::new(annual, self.production.monthly_kwh),
            None => ProductionSeries::from_monthly(self.production.monthly_kwh),
        };
        production.validate()?;

        let modeled_kit_watts = match self.production.modeled_kit_watts {
            Some(0) => {
                return Err(Error::InvalidRequest(
                    "production.modeled_kit_watts must be > 0".to_string(),
                ));
            }
            Some(watts) => watts,
            None if self.kit_watts > 0 => self.kit_watts,
            None => defaults.reference_kit_watts,
        };

        let coverage_target = self.coverage_target.map_or(
            CoverageTarget::from_percent(defaults.coverage_target),
            |pct| u8::try_from(pct).map_or(CoverageTarget::Balanced, CoverageTarget::from_percent),
        );

        Ok(ResolvedInput {
            request: PrescriptionRequest {
                location: self.location,
                kit_watts: self.kit_watts,
                appliances: self.appliances,
                coverage_target,
            },
            production,
            modeled_kit_watts,
        })
    }
}
