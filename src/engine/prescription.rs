//! The prescription pipeline: demand, production, verdict, recommendation
//! and risk combined into one self-contained record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::demand::{ApplianceSelection, EnergyNeed, daily_energy_need};
use super::production::{ProductionSeries, ProductionSummary, summarize};
use super::recommendation::{CoverageExplanation, Recommendation, recommend};
use super::risk::{IrradianceWarning, irradiance_warnings};
use super::sizing::auto_select_kit_size;
use super::verdict::{CoverageTarget, VerdictResult, determine_verdict};
use crate::catalog::{Catalog, ProductInfo};

/// Largest kit size (W) covered by the certified product range.
pub const MAX_CERTIFIED_WATTS: u32 = 160;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// Degrees, positive north.
    pub latitude: f64,
    /// Degrees, positive east.
    #[serde(default)]
    pub longitude: f64,
}

/// Caller input for one prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionRequest {
    pub location: Location,
    /// Kit size (W); 0 asks the engine to pick one.
    #[serde(default)]
    pub kit_watts: u32,
    #[serde(default)]
    pub appliances: Vec<ApplianceSelection>,
    #[serde(default)]
    pub coverage_target: CoverageTarget,
}

/// Production figures as reported to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionBreakdown {
    /// Usable daily average after losses or tested override (Wh/day).
    pub daily_avg_wh: f64,
    /// Irradiance-model daily average before losses (Wh/day).
    pub theoretical_avg_wh: f64,
    pub best_month_wh: f64,
    pub worst_month_wh: f64,
    pub annual_kwh: f64,
    pub monthly_wh: Vec<f64>,
    pub using_tested_value: bool,
}

impl ProductionBreakdown {
    fn new(summary: ProductionSummary, verdict: &VerdictResult) -> Self {
        Self {
            daily_avg_wh: verdict.usable_daily_wh,
            theoretical_avg_wh: summary.daily_avg_wh,
            best_month_wh: summary.best_month_daily_wh,
            worst_month_wh: summary.worst_month_daily_wh,
            annual_kwh: summary.annual_wh / 1000.0,
            monthly_wh: summary.monthly_wh,
            using_tested_value: verdict.used_tested_value,
        }
    }
}

/// Complete result of one prescription run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prescription {
    pub location: Location,
    pub kit_watts: u32,
    pub product_info: Option<ProductInfo>,
    pub energy_need: EnergyNeed,
    pub production: ProductionBreakdown,
    pub verdict: VerdictResult,
    pub recommendation: Recommendation,
    pub irradiance_warnings: Vec<IrradianceWarning>,
    pub coverage: CoverageExplanation,
    /// Kit size to browse products for: the suggestion, else the current kit.
    pub browse_kit_watts: u32,
    pub outside_certified_range: bool,
    pub generated_at: DateTime<Utc>,
}

/// Runs prescriptions against a borrowed, immutable [`Catalog`].
///
/// Holds no mutable state, so one engine can serve concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct PrescriptionEngine<'c> {
    catalog: &'c Catalog,
}

impl<'c> PrescriptionEngine<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Prescribes for `request.kit_watts` using `production` modeled for that kit.
    ///
    /// `production` is expected to have passed [`ProductionSeries::validate`];
    /// a degenerate series still produces a (rejected) prescription.
    pub fn prescribe(&self, request: &PrescriptionRequest, production: &ProductionSeries) -> Prescription {
        let kit_watts = request.kit_watts;
        let target = request.coverage_target;

        let energy_need = daily_energy_need(&self.catalog.appliances, &request.appliances);
        let summary = summarize(production, kit_watts);
        let tested = self.catalog.products.tested_daily_usable_wh(kit_watts);
        let verdict = determine_verdict(&summary, energy_need.daily_wh, tested, target);
        let recommendation = recommend(&verdict, energy_need.daily_wh, kit_watts);
        let irradiance_warnings = irradiance_warnings(request.location.latitude, &summary);
        let product_info = self.catalog.products.get(kit_watts).map(|spec| spec.info(kit_watts));

        let browse_kit_watts = recommendation.suggested_kit_watts.unwrap_or(kit_watts);

        tracing::info!(
            location = %request.location.name,
            kit_watts,
            demand_wh = energy_need.daily_wh,
            verdict = %verdict.verdict,
            "generated prescription"
        );

        Prescription {
            location: request.location.clone(),
            kit_watts,
            product_info,
            production: ProductionBreakdown::new(summary, &verdict),
            energy_need,
            verdict,
            recommendation,
            irradiance_warnings,
            coverage: CoverageExplanation::for_target(target),
            browse_kit_watts,
            outside_certified_range: browse_kit_watts > MAX_CERTIFIED_WATTS,
            generated_at: Utc::now(),
        }
    }

    /// Like [`PrescriptionEngine::prescribe`], but when `request.kit_watts`
    /// is 0 the kit size is picked from `production`, which must then be
    /// modeled for `modeled_watts`. The series is rescaled to whichever
    /// kit size is evaluated.
    pub fn prescribe_resolving(
        &self,
        request: &PrescriptionRequest,
        production: &ProductionSeries,
        modeled_watts: u32,
    ) -> Prescription {
        let kit_watts = if request.kit_watts == 0 {
            let need = daily_energy_need(&self.catalog.appliances, &request.appliances);
            auto_select_kit_size(need.daily_wh, &summarize(production, modeled_watts), modeled_watts)
        } else {
            request.kit_watts
        };

        let resolved = PrescriptionRequest {
            kit_watts,
            ..request.clone()
        };
        let series = production.rescaled_for_kit(modeled_watts, kit_watts);
        self.prescribe(&resolved, &series)
    }
}
