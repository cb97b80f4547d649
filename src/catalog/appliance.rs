//! Appliance reference table: power draw and typical daily usage.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Static description of one appliance type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceSpec {
    /// Lookup key used by selections (e.g. `"led_bulb"`).
    pub id: String,
    /// Power draw while running (W).
    pub watts: f64,
    /// Typical hours of use per day.
    pub hours_per_day: f64,
    /// Display label.
    pub label: String,
}

impl ApplianceSpec {
    fn new(id: &str, watts: f64, hours_per_day: f64, label: &str) -> Self {
        Self {
            id: id.to_string(),
            watts,
            hours_per_day,
            label: label.to_string(),
        }
    }

    /// Daily energy for a single unit (Wh).
    pub fn daily_wh(&self) -> f64 {
        self.watts * self.hours_per_day
    }
}

/// Immutable appliance table, kept in declaration order for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplianceCatalog {
    specs: Vec<ApplianceSpec>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ApplianceFile {
    #[serde(default, rename = "appliance")]
    appliances: Vec<ApplianceSpec>,
}

impl ApplianceCatalog {
    /// Builds a catalog from explicit specs. Later duplicates of an id are ignored.
    pub fn from_specs(specs: Vec<ApplianceSpec>) -> Self {
        let mut unique: Vec<ApplianceSpec> = Vec::with_capacity(specs.len());
        for spec in specs {
            if unique.iter().any(|s| s.id == spec.id) {
                tracing::warn!(id = %spec.id, "duplicate appliance id ignored");
                continue;
            }
            unique.push(spec);
        }
        Self { specs: unique }
    }

    /// The built-in household appliance table.
    pub fn builtin() -> Self {
        Self::from_specs(vec![
            ApplianceSpec::new("led_bulb", 10.0, 5.0, "Household LED Bulb (10W)"),
            ApplianceSpec::new("kit_light", 2.0, 5.0, "Pico Kit Light Point (2W)"),
            ApplianceSpec::new("phone_charger", 10.0, 2.0, "Phone Charger"),
            ApplianceSpec::new("laptop", 65.0, 4.0, "Laptop"),
            ApplianceSpec::new("small_tv", 50.0, 4.0, "Small TV (24\")"),
            ApplianceSpec::new("large_tv", 150.0, 4.0, "Large TV (42\")"),
            ApplianceSpec::new("fan", 75.0, 8.0, "Fan"),
            ApplianceSpec::new("radio", 10.0, 3.0, "Radio"),
            ApplianceSpec::new("wifi_router", 10.0, 24.0, "WiFi Router"),
            ApplianceSpec::new("small_fridge", 100.0, 24.0, "Small Fridge (DC)"),
            ApplianceSpec::new("laptop_charger", 45.0, 3.0, "Laptop Charger"),
            ApplianceSpec::new("decoder", 15.0, 4.0, "TV Decoder"),
            ApplianceSpec::new("security_lights", 20.0, 12.0, "Security Lights"),
        ])
    }

    /// Parses a table of `[[appliance]]` entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Toml`] if the document is malformed.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ApplianceFile = toml::from_str(s)?;
        Ok(Self::from_specs(file.appliances))
    }

    /// Reads a TOML appliance table from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Toml`]
    /// if it cannot be parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), count = catalog.len(), "loaded appliance catalog");
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&ApplianceSpec> {
        self.specs.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApplianceSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for ApplianceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_known_appliances() {
        let catalog = ApplianceCatalog::builtin();
        assert_eq!(catalog.len(), 13);
        let bulb = catalog.get("led_bulb").map(ApplianceSpec::daily_wh);
        assert_eq!(bulb, Some(50.0));
        assert!(catalog.get("hair_dryer").is_none());
    }

    #[test]
    fn toml_table_parses_in_order() {
        let toml = r#"
[[appliance]]
id = "pump"
watts = 40.0
hours_per_day = 2.0
label = "Water Pump"

[[appliance]]
id = "lamp"
watts = 3.0
hours_per_day = 6.0
label = "Desk Lamp"
"#;
        let catalog = ApplianceCatalog::from_toml_str(toml);
        assert!(catalog.is_ok(), "{:?}", catalog.err());
        let ids: Vec<String> = catalog
            .map(|c| c.iter().map(|s| s.id.clone()).collect())
            .unwrap_or_default();
        assert_eq!(ids, vec!["pump", "lamp"]);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let catalog = ApplianceCatalog::from_specs(vec![
            ApplianceSpec::new("fan", 75.0, 8.0, "Fan"),
            ApplianceSpec::new("fan", 1.0, 1.0, "Other Fan"),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("fan").map(|s| s.watts), Some(75.0));
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = r#"
[[appliance]]
id = "x"
watts = 1.0
hours_per_day = 1.0
label = "X"
color = "red"
"#;
        assert!(ApplianceCatalog::from_toml_str(toml).is_err());
    }
}
