//! Daily energy demand from a list of appliance selections.

use serde::{Deserialize, Serialize};

use crate::catalog::ApplianceCatalog;

fn default_quantity() -> u32 {
    1
}

/// One appliance the household wants to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceSelection {
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ApplianceSelection {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// Itemized contribution of one recognized selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedApplianceLine {
    pub label: String,
    pub quantity: u32,
    pub watts: f64,
    pub hours: f64,
    pub daily_wh: f64,
}

/// Total daily demand and its itemization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnergyNeed {
    pub daily_wh: f64,
    pub appliances: Vec<AppliedApplianceLine>,
}

/// Sums `watts × hours_per_day × quantity` over the selections.
///
/// Unknown ids are skipped and left out of the itemization. Lines keep
/// the order of `selections`.
pub fn daily_energy_need(catalog: &ApplianceCatalog, selections: &[ApplianceSelection]) -> EnergyNeed {
    let mut need = EnergyNeed::default();

    for selection in selections {
        let Some(spec) = catalog.get(&selection.id) else {
            tracing::debug!(id = %selection.id, "skipping unknown appliance");
            continue;
        };
        let daily_wh = spec.daily_wh() * f64::from(selection.quantity);
        need.daily_wh += daily_wh;
        need.appliances.push(AppliedApplianceLine {
            label: spec.label.clone(),
            quantity: selection.quantity,
            watts: spec.watts,
            hours: spec.hours_per_day,
            daily_wh,
        });
    }

    need
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household() -> Vec<ApplianceSelection> {
        vec![
            ApplianceSelection::new("led_bulb", 3),
            ApplianceSelection::new("phone_charger", 2),
            ApplianceSelection::new("small_tv", 1),
        ]
    }

    #[test]
    fn sums_known_appliances() {
        let need = daily_energy_need(&ApplianceCatalog::builtin(), &household());
        // 10*5*3 + 10*2*2 + 50*4*1
        assert_eq!(need.daily_wh, 390.0);
        let itemized: Vec<f64> = need.appliances.iter().map(|l| l.daily_wh).collect();
        assert_eq!(itemized, vec![150.0, 40.0, 200.0]);
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let mut selections = household();
        selections.insert(1, ApplianceSelection::new("jacuzzi", 4));
        let need = daily_energy_need(&ApplianceCatalog::builtin(), &selections);
        assert_eq!(need.daily_wh, 390.0);
        assert_eq!(need.appliances.len(), 3);
        assert_eq!(need.appliances[1].label, "Phone Charger");
    }

    #[test]
    fn zero_quantity_contributes_nothing() {
        let selections = vec![ApplianceSelection::new("fan", 0)];
        let need = daily_energy_need(&ApplianceCatalog::builtin(), &selections);
        assert_eq!(need.daily_wh, 0.0);
        assert_eq!(need.appliances.len(), 1);
    }

    #[test]
    fn quantity_defaults_to_one() {
        let selection: Result<ApplianceSelection, _> = serde_json::from_str(r#"{"id": "radio"}"#);
        assert_eq!(selection.ok().map(|s| s.quantity), Some(1));
    }

    #[test]
    fn empty_selection_is_zero() {
        let need = daily_energy_need(&ApplianceCatalog::builtin(), &[]);
        assert_eq!(need, EnergyNeed::default());
    }
}
