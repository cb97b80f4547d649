//! Kit size suggestions for marginal and insufficient verdicts.

use super::production::ProductionSummary;
use super::verdict::{SYSTEM_EFFICIENCY, Verdict, VerdictResult};

/// Standard kit sizes (W), ascending.
pub const STANDARD_KIT_SIZES: [u32; 11] = [10, 20, 30, 50, 70, 100, 150, 200, 300, 500, 1000];
/// Headroom applied to demand when computing a minimum size.
pub const SAFETY_MARGIN: f64 = 1.2;
/// Growth factor when the kit is already at or above the largest standard size.
const OVERSIZE_GROWTH: f64 = 1.5;

fn largest_standard_size() -> u32 {
    STANDARD_KIT_SIZES[STANDARD_KIT_SIZES.len() - 1]
}

/// Next standard size strictly larger than `current_watts`, or 1.5× the
/// current size (rounded up) past the end of the list.
pub fn next_kit_size(current_watts: u32) -> u32 {
    STANDARD_KIT_SIZES
        .iter()
        .copied()
        .find(|size| *size > current_watts)
        .unwrap_or_else(|| ceil_watts(f64::from(current_watts) * OVERSIZE_GROWTH))
}

/// First standard size at or above `watts`; beyond the list, `watts`
/// rounded up to the next 100 W. Saturates at `u32::MAX`.
pub fn round_up_to_standard(watts: f64) -> u32 {
    STANDARD_KIT_SIZES
        .iter()
        .copied()
        .find(|size| f64::from(*size) >= watts)
        .unwrap_or_else(|| ceil_watts((watts / 100.0).ceil() * 100.0))
}

fn ceil_watts(watts: f64) -> u32 {
    // Saturating float-to-int conversion.
    watts.ceil() as u32
}

/// Smallest kit that covers `demand_wh` with a 20% safety margin.
///
/// Extrapolates from the current kit's worst-month usable energy, which
/// is already loss- or tested-adjusted, so no further loss is applied.
/// Falls back to [`next_kit_size`] when that energy is zero, and to the
/// largest standard size when the current kit size is unknown.
pub fn minimum_kit_size(demand_wh: f64, current_watts: u32, worst_month_usable_wh: f64) -> u32 {
    if current_watts == 0 {
        return largest_standard_size();
    }
    if worst_month_usable_wh <= 0.0 || !worst_month_usable_wh.is_finite() {
        return next_kit_size(current_watts);
    }

    let usable_wh_per_watt = worst_month_usable_wh / f64::from(current_watts);
    let required_watts = demand_wh * SAFETY_MARGIN / usable_wh_per_watt;
    let size = round_up_to_standard(required_watts);
    tracing::debug!(usable_wh_per_watt, required_watts, size, "computed minimum kit size");
    size
}

/// Suggested kit size for a verdict, if any.
///
/// Marginal kits get the next standard size; insufficient kits get the
/// computed minimum.
pub fn suggest_kit_size(verdict: &VerdictResult, demand_wh: f64, current_watts: u32) -> Option<u32> {
    match verdict.verdict {
        Verdict::Excellent | Verdict::Good => None,
        Verdict::Marginal => Some(next_kit_size(current_watts)),
        Verdict::Insufficient => Some(minimum_kit_size(
            demand_wh,
            current_watts,
            verdict.worst_month_usable_wh,
        )),
    }
}

/// Picks a kit size when the caller has none, from production modeled for
/// a reference kit.
///
/// The reference figures are theoretical, so the system loss is applied
/// here. No usable production selects the largest standard size.
///
/// Uses the full [`STANDARD_KIT_SIZES`] list and the same uncapped 100 W
/// rounding as [`minimum_kit_size`], so an auto-selected kit can exceed
/// 1000 W.
pub fn auto_select_kit_size(
    demand_wh: f64,
    reference: &ProductionSummary,
    reference_watts: u32,
) -> u32 {
    if reference_watts == 0 {
        return largest_standard_size();
    }
    let usable_wh_per_watt =
        reference.worst_month_daily_wh / f64::from(reference_watts) * SYSTEM_EFFICIENCY;
    if usable_wh_per_watt <= 0.0 || !usable_wh_per_watt.is_finite() {
        return largest_standard_size();
    }

    let size = round_up_to_standard(demand_wh * SAFETY_MARGIN / usable_wh_per_watt);
    tracing::info!(size, reference_watts, "auto-selected kit size");
    size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::production::{ProductionSeries, summarize};
    use crate::engine::verdict::{CoverageTarget, determine_verdict};

    fn verdict(verdict: Verdict, worst_month_usable_wh: f64) -> VerdictResult {
        VerdictResult {
            verdict,
            avg_coverage_pct: 0.0,
            worst_coverage_pct: 0.0,
            usable_daily_wh: worst_month_usable_wh,
            worst_month_usable_wh,
            used_tested_value: false,
            coverage_target: CoverageTarget::Balanced,
        }
    }

    #[test]
    fn next_size_is_strictly_larger() {
        assert_eq!(next_kit_size(10), 20);
        assert_eq!(next_kit_size(0), 10);
        assert_eq!(next_kit_size(120), 150);
        assert_eq!(next_kit_size(500), 1000);
    }

    #[test]
    fn next_size_past_largest_grows_by_half() {
        assert_eq!(next_kit_size(1000), 1500);
        assert_eq!(next_kit_size(1001), 1502);
    }

    #[test]
    fn round_up_beyond_list_uses_hundreds() {
        assert_eq!(round_up_to_standard(26.7), 30);
        assert_eq!(round_up_to_standard(50.0), 50);
        assert_eq!(round_up_to_standard(1000.5), 1100);
        assert_eq!(round_up_to_standard(1234.0), 1300);
        assert_eq!(round_up_to_standard(0.0), 10);
    }

    #[test]
    fn round_up_saturates_for_huge_requirements() {
        assert_eq!(round_up_to_standard(4_294_967_000.0), 4_294_967_000);
        assert_eq!(round_up_to_standard(1e12), u32::MAX);
        assert_eq!(round_up_to_standard(f64::INFINITY), u32::MAX);
    }

    #[test]
    fn minimum_size_with_near_zero_worst_month_saturates() {
        // 390 * 1.2 / 1e-7 Wh/W = 4.68e9 W, past u32
        assert_eq!(minimum_kit_size(390.0, 10, 1e-6), u32::MAX);
        assert_eq!(minimum_kit_size(f64::MAX, 10, 21.6), u32::MAX);
    }

    #[test]
    fn next_size_saturates_at_u32_max() {
        assert_eq!(next_kit_size(u32::MAX), u32::MAX);
    }

    #[test]
    fn minimum_size_from_tested_worst_month() {
        // 24 Wh tested -> 21.6 Wh worst month on a 10 W kit = 2.16 Wh/W
        // 70 Wh * 1.2 / 2.16 = 38.9 W -> 50 W
        assert_eq!(minimum_kit_size(70.0, 10, 21.6), 50);
    }

    #[test]
    fn minimum_size_without_usable_energy_steps_up() {
        assert_eq!(minimum_kit_size(500.0, 30, 0.0), 50);
        assert_eq!(minimum_kit_size(500.0, 0, 10.0), 1000);
    }

    #[test]
    fn suggestion_depends_on_verdict() {
        assert_eq!(suggest_kit_size(&verdict(Verdict::Good, 100.0), 50.0, 100), None);
        assert_eq!(suggest_kit_size(&verdict(Verdict::Excellent, 100.0), 50.0, 100), None);
        assert_eq!(suggest_kit_size(&verdict(Verdict::Marginal, 100.0), 500.0, 100), Some(150));
        // 816 Wh / 300 W = 2.72 Wh/W; 2000 * 1.2 / 2.72 = 882 W -> 1000 W
        assert_eq!(
            suggest_kit_size(&verdict(Verdict::Insufficient, 816.0), 2000.0, 300),
            Some(1000)
        );
    }

    #[test]
    fn auto_select_applies_losses_once() {
        // 100 W reference, worst month 300 Wh/day -> 3 Wh/W theoretical, 2.4 usable
        let reference = ProductionSummary {
            worst_month_daily_wh: 300.0,
            ..ProductionSummary::default()
        };
        // 390 * 1.2 / 2.4 = 195 W -> 200 W
        assert_eq!(auto_select_kit_size(390.0, &reference, 100), 200);
        assert_eq!(auto_select_kit_size(390.0, &ProductionSummary::default(), 100), 1000);
        assert_eq!(auto_select_kit_size(390.0, &reference, 0), 1000);
    }

    #[test]
    fn auto_select_goes_past_largest_standard_size() {
        // 100 W reference, 30 Wh/day worst month -> 0.24 usable Wh/W
        let reference = ProductionSummary {
            worst_month_daily_wh: 30.0,
            ..ProductionSummary::default()
        };
        // 390 * 1.2 / 0.24 = 1950 W -> 2000 W
        assert_eq!(auto_select_kit_size(390.0, &reference, 100), 2000);

        let trickle = ProductionSummary {
            worst_month_daily_wh: 1e-9,
            ..ProductionSummary::default()
        };
        assert_eq!(auto_select_kit_size(390.0, &trickle, 100), u32::MAX);
    }

    #[test]
    fn premium_minimum_size_can_stop_at_marginal() {
        // Flat 3 kWh/month on a 100 W kit: 98.6 Wh/day average against
        // 100 Wh/day in every month, so average coverage trails worst-month.
        let summary = summarize(&ProductionSeries::from_monthly(vec![3.0; 12]), 100);
        let r = determine_verdict(&summary, 133.3, None, CoverageTarget::Premium);
        assert_eq!(r.verdict, Verdict::Insufficient);

        let suggested = suggest_kit_size(&r, 133.3, 100);
        assert_eq!(suggested, Some(200));

        let at_200 = determine_verdict(
            &summarize(&ProductionSeries::from_monthly(vec![6.0; 12]), 200),
            133.3,
            None,
            CoverageTarget::Premium,
        );
        assert!((at_200.avg_coverage_pct - 118.4).abs() < 0.1);
        assert!((at_200.worst_coverage_pct - 120.0).abs() < 0.1);
        // Short of the 120% average the good tier needs.
        assert_eq!(at_200.verdict, Verdict::Marginal);
    }
}
