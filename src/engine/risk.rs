//! Location and seasonality warnings, independent of the verdict.

use serde::Serialize;

use super::production::ProductionSummary;

const HIGH_LATITUDE_DEG: f64 = 40.0;
const MID_LATITUDE_DEG: f64 = 25.0;
const HIGH_VARIANCE_PCT: f64 = 40.0;
const MODERATE_VARIANCE_PCT: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// Which check raised a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    Latitude,
    SeasonalVariance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrradianceWarning {
    pub level: Severity,
    pub kind: RiskKind,
    pub message: String,
}

/// Best-to-worst month production drop as a percentage of the best month.
/// Zero when there is no production.
pub fn seasonal_variance_pct(production: &ProductionSummary) -> f64 {
    let best = production.best_month_daily_wh;
    if best > 0.0 {
        (best - production.worst_month_daily_wh) / best * 100.0
    } else {
        0.0
    }
}

/// Latitude and seasonal-swing warnings, at most one of each kind. The
/// two checks are independent and may both fire.
pub fn irradiance_warnings(latitude: f64, production: &ProductionSummary) -> Vec<IrradianceWarning> {
    let mut warnings = Vec::new();

    let abs_lat = latitude.abs();
    if abs_lat > HIGH_LATITUDE_DEG {
        warnings.push(IrradianceWarning {
            level: Severity::High,
            kind: RiskKind::Latitude,
            message: "Your location receives significantly less sun than equatorial regions. \
                      Solar kit performance will be notably lower than advertised."
                .to_string(),
        });
    } else if abs_lat > MID_LATITUDE_DEG {
        warnings.push(IrradianceWarning {
            level: Severity::Medium,
            kind: RiskKind::Latitude,
            message: "Your location has moderate seasonal variation in solar production. \
                      Winter months will see reduced performance."
                .to_string(),
        });
    }

    let variance = seasonal_variance_pct(production);
    if variance > HIGH_VARIANCE_PCT {
        warnings.push(IrradianceWarning {
            level: Severity::High,
            kind: RiskKind::SeasonalVariance,
            message: format!(
                "High seasonal variation: Production drops {variance:.0}% in worst month. \
                 Plan accordingly."
            ),
        });
    } else if variance > MODERATE_VARIANCE_PCT {
        warnings.push(IrradianceWarning {
            level: Severity::Medium,
            kind: RiskKind::SeasonalVariance,
            message: format!(
                "Moderate seasonal variation: Expect {variance:.0}% less production in rainy season."
            ),
        });
    }

    warnings
}
