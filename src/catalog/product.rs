//! Kit hardware specifications keyed by kit size in watts.
//!
//! The `tested_daily_usable_wh` figure is a lab-measured daily usable energy
//! value. When it is lower than the irradiance-based estimate it caps the
//! usable production of the kit.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterySpec {
    pub voltage: f64,
    pub capacity_ah: f64,
    pub capacity_wh: f64,
    pub chemistry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightsSpec {
    pub count: u32,
    pub lumens: u32,
    pub runtime_hours: f64,
}

/// Output ports; absent kinds are omitted from summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortsSpec {
    #[serde(default)]
    pub usb: Option<u32>,
    #[serde(default)]
    pub barrel_jack: Option<u32>,
    #[serde(default)]
    pub dc: Option<u32>,
    #[serde(default)]
    pub ac: Option<u32>,
}

impl PortsSpec {
    /// `"2 USB, 3 Barrel Jack"`, or `"N/A"` when the kit lists no ports.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            (self.usb, "USB"),
            (self.barrel_jack, "Barrel Jack"),
            (self.dc, "DC"),
            (self.ac, "AC"),
        ]
        .iter()
        .filter_map(|(count, name)| count.map(|n| format!("{n} {name}")))
        .collect();

        if parts.is_empty() {
            "N/A".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Hardware specification of one kit model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub model: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Panel rating when it differs from the catalog key.
    #[serde(default)]
    pub pv_watts: Option<u32>,
    pub battery: BatterySpec,
    pub lights: LightsSpec,
    #[serde(default)]
    pub ports: PortsSpec,
    #[serde(default)]
    pub features: Vec<String>,
    /// Measured daily usable energy (Wh/day).
    #[serde(default, alias = "daily_energy_available")]
    pub tested_daily_usable_wh: Option<f64>,
    pub warranty_months: u32,
    #[serde(default)]
    pub verasol_certified: bool,
}

impl ProductSpec {
    /// Tested figure, ignoring missing or non-positive values.
    pub fn tested_value(&self) -> Option<f64> {
        self.tested_daily_usable_wh.filter(|wh| *wh > 0.0)
    }

    /// Display-ready summary for a kit of `kit_watts`.
    pub fn info(&self, kit_watts: u32) -> ProductInfo {
        let b = &self.battery;
        ProductInfo {
            model: self.model.clone(),
            brand: self.brand.clone(),
            kind: self.kind.clone(),
            pv_watts: self.pv_watts.unwrap_or(kit_watts),
            battery: format!(
                "{}Wh ({}V, {}Ah {})",
                b.capacity_wh, b.voltage, b.capacity_ah, b.chemistry
            ),
            lights: format!("{} LEDs, {} lumens", self.lights.count, self.lights.lumens),
            runtime: format!("{} hours", self.lights.runtime_hours),
            ports: self.ports.summary(),
            features: self.features.clone(),
            warranty: format!("{} months", self.warranty_months),
            tested_daily_energy_wh: self.tested_value(),
            verasol_certified: self.verasol_certified,
        }
    }
}

/// Product details as carried in a prescription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInfo {
    pub model: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub pv_watts: u32,
    pub battery: String,
    pub lights: String,
    pub runtime: String,
    pub ports: String,
    pub features: Vec<String>,
    pub warranty: String,
    pub tested_daily_energy_wh: Option<f64>,
    pub verasol_certified: bool,
}

/// Immutable product table keyed by kit size (W).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCatalog {
    specs: BTreeMap<u32, ProductSpec>,
}

impl ProductCatalog {
    pub fn from_specs(specs: BTreeMap<u32, ProductSpec>) -> Self {
        Self { specs }
    }

    /// Single-entry table used when no product data can be loaded.
    pub fn fallback() -> Self {
        let spec = ProductSpec {
            model: "SL1210".to_string(),
            brand: "Shenzhen FengWo".to_string(),
            kind: "Pico PV System".to_string(),
            pv_watts: None,
            battery: BatterySpec {
                voltage: 11.1,
                capacity_ah: 10.0,
                capacity_wh: 111.0,
                chemistry: "Li-ion".to_string(),
            },
            lights: LightsSpec {
                count: 4,
                lumens: 680,
                runtime_hours: 13.0,
            },
            ports: PortsSpec {
                usb: Some(2),
                barrel_jack: Some(3),
                ..PortsSpec::default()
            },
            features: vec![
                "Phone charging".to_string(),
                "Radio support".to_string(),
                "4 LED lights".to_string(),
                "Plug-and-play".to_string(),
            ],
            tested_daily_usable_wh: Some(35.0),
            warranty_months: 12,
            verasol_certified: true,
        };
        Self::from_specs(BTreeMap::from([(10, spec)]))
    }

    /// Parses a JSON object whose keys are kit sizes in watts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed JSON and
    /// [`Error::InvalidProductKey`] if a key is not an unsigned integer.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: BTreeMap<String, ProductSpec> = serde_json::from_str(s)?;
        let mut specs = BTreeMap::new();
        for (key, spec) in raw {
            let watts = key
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::InvalidProductKey(key.clone()))?;
            specs.insert(watts, spec);
        }
        Ok(Self::from_specs(specs))
    }

    /// Reads the JSON product table from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise the
    /// errors of [`ProductCatalog::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), count = catalog.len(), "loaded product catalog");
        Ok(catalog)
    }

    /// Loads the table at `path`, degrading to [`ProductCatalog::fallback`]
    /// when it is missing or unreadable.
    pub fn load_or_fallback(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("no product catalog configured, using built-in entry");
            return Self::fallback();
        };
        match Self::from_json_file(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "could not load product specs, using built-in entry");
                Self::fallback()
            }
        }
    }

    pub fn get(&self, kit_watts: u32) -> Option<&ProductSpec> {
        self.specs.get(&kit_watts)
    }

    /// Tested daily usable energy for a kit size, if the table has one.
    pub fn tested_daily_usable_wh(&self, kit_watts: u32) -> Option<f64> {
        self.get(kit_watts).and_then(ProductSpec::tested_value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &ProductSpec)> {
        self.specs.iter().map(|(w, s)| (*w, s))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}
