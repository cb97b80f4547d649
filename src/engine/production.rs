//! Monthly production data and its reduction to daily figures.
//!
//! Month-daily figures use a fixed 30-day month. The verdict thresholds
//! were tuned against this approximation, so it is kept as is.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Months expected in a production series.
pub const MONTHS: usize = 12;
/// Days per month used for month-daily figures.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Days per year used for the daily average.
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Smallest capacity (W) the production estimate collaborator models.
/// Smaller kits are modeled at a larger capacity and scaled down.
pub const MIN_MODELED_KIT_WATTS: u32 = 50;

/// Capacity (W) to request from the production estimate collaborator for a
/// kit. Kits below [`MIN_MODELED_KIT_WATTS`] are modeled at 100 W and the
/// result rescaled with [`ProductionSeries::rescaled_for_kit`].
pub fn modeled_capacity_watts(kit_watts: u32) -> u32 {
    if kit_watts < MIN_MODELED_KIT_WATTS {
        100
    } else {
        kit_watts
    }
}

/// Modeled AC energy for one kit size at one location/orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSeries {
    /// Annual total (kWh).
    pub annual_kwh: f64,
    /// Twelve monthly totals (kWh), January first.
    pub monthly_kwh: Vec<f64>,
}

impl ProductionSeries {
    pub fn new(annual_kwh: f64, monthly_kwh: Vec<f64>) -> Self {
        Self {
            annual_kwh,
            monthly_kwh,
        }
    }

    /// Builds a series whose annual total is the sum of the months.
    pub fn from_monthly(monthly_kwh: Vec<f64>) -> Self {
        let annual_kwh = monthly_kwh.iter().sum();
        Self::new(annual_kwh, monthly_kwh)
    }

    /// Checks the series before it is handed to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProductionSeries`] unless there are exactly
    /// twelve monthly values, and [`Error::InvalidRequest`] if any value is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.monthly_kwh.len() != MONTHS {
            return Err(Error::InvalidProductionSeries {
                found: self.monthly_kwh.len(),
            });
        }
        let all_values = std::iter::once(&self.annual_kwh).chain(self.monthly_kwh.iter());
        for value in all_values {
            if !value.is_finite() || *value < 0.0 {
                return Err(Error::InvalidRequest(format!(
                    "production values must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Scales every figure by `factor`.
    ///
    /// Production is linear in kit capacity, so a series modeled at one
    /// size can be rescaled to another.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            annual_kwh: self.annual_kwh * factor,
            monthly_kwh: self.monthly_kwh.iter().map(|m| m * factor).collect(),
        }
    }

    /// Rescales a series modeled for `from_watts` to `to_watts`.
    pub fn rescaled_for_kit(&self, from_watts: u32, to_watts: u32) -> Self {
        if from_watts == 0 || from_watts == to_watts {
            return self.clone();
        }
        self.scaled(f64::from(to_watts) / f64::from(from_watts))
    }
}

/// Daily production figures derived from a [`ProductionSeries`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductionSummary {
    pub daily_avg_wh: f64,
    pub best_month_daily_wh: f64,
    pub worst_month_daily_wh: f64,
    pub annual_wh: f64,
    pub monthly_wh: Vec<f64>,
}

/// Reduces a series to average, best-month and worst-month daily production.
///
/// An empty monthly series gives zero best/worst figures rather than an
/// error. `_kit_watts` is informational: the series is already specific to
/// the kit size.
pub fn summarize(series: &ProductionSeries, _kit_watts: u32) -> ProductionSummary {
    let annual_wh = series.annual_kwh * 1000.0;
    let monthly_wh: Vec<f64> = series.monthly_kwh.iter().map(|m| m * 1000.0).collect();

    let best = monthly_wh.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let worst = monthly_wh.iter().copied().reduce(f64::min).unwrap_or(0.0);

    ProductionSummary {
        daily_avg_wh: annual_wh / DAYS_PER_YEAR,
        best_month_daily_wh: best / DAYS_PER_MONTH,
        worst_month_daily_wh: worst / DAYS_PER_MONTH,
        annual_wh,
        monthly_wh,
    }
}

/// Panel orientation and loss parameters for the production estimate request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrayOrientation {
    /// Tilt from horizontal (degrees).
    pub tilt_deg: f64,
    /// Azimuth (degrees, 180 = south).
    pub azimuth_deg: f64,
    /// Modeled system losses (%).
    pub losses_pct: f64,
}

impl ArrayOrientation {
    const MIN_TILT_DEG: f64 = 15.0;
    const EQUATORIAL_BAND_DEG: f64 = 5.0;
    const DEFAULT_LOSSES_PCT: f64 = 14.0;

    /// Fixed roof-mounted orientation facing the equator.
    ///
    /// Tilt follows latitude with a 15° floor. Panels face south in the
    /// northern hemisphere and within 5° of the equator, north otherwise.
    pub fn for_latitude(latitude: f64) -> Self {
        let azimuth_deg = if latitude.abs() < Self::EQUATORIAL_BAND_DEG || latitude >= 0.0 {
            180.0
        } else {
            0.0
        };
        Self {
            tilt_deg: latitude.abs().max(Self::MIN_TILT_DEG),
            azimuth_deg,
            losses_pct: Self::DEFAULT_LOSSES_PCT,
        }
    }
}
