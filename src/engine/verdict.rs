//! Verdict classification: usable production against demand under a
//! coverage target.
//!
//! Usable production is the theoretical figure after a fixed 20% system
//! loss, capped by the product's tested daily usable energy when that is
//! lower. The verdict is read from an ordered tier table per target; the
//! first matching tier wins, so ties resolve to the more favorable verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::production::ProductionSummary;

/// Fraction of theoretical production left after inverter, battery and wiring losses.
pub const SYSTEM_EFFICIENCY: f64 = 0.8;
/// Worst-month derating applied to a tested usable figure.
pub const TESTED_WORST_MONTH_FACTOR: f64 = 0.9;

/// Share of the year the customer wants reliable power.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum CoverageTarget {
    /// 50%: budget option.
    Budget,
    /// 70%: balanced, the default.
    #[default]
    Balanced,
    /// 90%: premium reliability.
    Premium,
}

impl CoverageTarget {
    pub const ALL: [CoverageTarget; 3] = [Self::Budget, Self::Balanced, Self::Premium];

    /// Exact match on 50, 70 or 90.
    pub fn try_from_percent(pct: u8) -> Option<Self> {
        match pct {
            50 => Some(Self::Budget),
            70 => Some(Self::Balanced),
            90 => Some(Self::Premium),
            _ => None,
        }
    }

    /// Like [`CoverageTarget::try_from_percent`], falling back to 70%.
    pub fn from_percent(pct: u8) -> Self {
        Self::try_from_percent(pct).unwrap_or_default()
    }

    pub fn percent(self) -> u8 {
        match self {
            Self::Budget => 50,
            Self::Balanced => 70,
            Self::Premium => 90,
        }
    }

    fn tiers(self) -> &'static [Tier; 3] {
        match self {
            Self::Budget => &BUDGET_TIERS,
            Self::Balanced => &BALANCED_TIERS,
            Self::Premium => &PREMIUM_TIERS,
        }
    }
}

impl From<u8> for CoverageTarget {
    fn from(pct: u8) -> Self {
        Self::from_percent(pct)
    }
}

impl From<CoverageTarget> for u8 {
    fn from(target: CoverageTarget) -> Self {
        target.percent()
    }
}

/// Engine classification, most favorable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Excellent,
    Good,
    Marginal,
    Insufficient,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Marginal => "marginal",
            Self::Insufficient => "insufficient",
        }
    }

    /// Classifies coverage percentages under `target`.
    pub fn classify(target: CoverageTarget, avg_pct: f64, worst_pct: f64) -> Self {
        target
            .tiers()
            .iter()
            .find(|tier| tier.rule.matches(avg_pct, worst_pct))
            .map_or(Self::Insufficient, |tier| tier.verdict)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage condition for one tier, thresholds in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Rule {
    Avg(f64),
    AvgAndWorst(f64, f64),
    AvgOrWorst(f64, f64),
}

impl Rule {
    fn matches(self, avg_pct: f64, worst_pct: f64) -> bool {
        match self {
            Self::Avg(avg) => avg_pct >= avg,
            Self::AvgAndWorst(avg, worst) => avg_pct >= avg && worst_pct >= worst,
            Self::AvgOrWorst(avg, worst) => avg_pct >= avg || worst_pct >= worst,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tier {
    verdict: Verdict,
    rule: Rule,
}

const fn tier(verdict: Verdict, rule: Rule) -> Tier {
    Tier { verdict, rule }
}

// Good needs average and worst-month coverage together at every target
// (premium excellent too); every marginal tier accepts either one.
const BUDGET_TIERS: [Tier; 3] = [
    tier(Verdict::Excellent, Rule::Avg(80.0)),
    tier(Verdict::Good, Rule::AvgAndWorst(60.0, 40.0)),
    tier(Verdict::Marginal, Rule::AvgOrWorst(50.0, 30.0)),
];

const BALANCED_TIERS: [Tier; 3] = [
    tier(Verdict::Excellent, Rule::Avg(120.0)),
    tier(Verdict::Good, Rule::AvgAndWorst(100.0, 80.0)),
    tier(Verdict::Marginal, Rule::AvgOrWorst(80.0, 60.0)),
];

const PREMIUM_TIERS: [Tier; 3] = [
    tier(Verdict::Excellent, Rule::AvgAndWorst(150.0, 100.0)),
    tier(Verdict::Good, Rule::AvgAndWorst(120.0, 90.0)),
    tier(Verdict::Marginal, Rule::AvgOrWorst(100.0, 80.0)),
];

/// Outcome of [`determine_verdict`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictResult {
    pub verdict: Verdict,
    pub avg_coverage_pct: f64,
    pub worst_coverage_pct: f64,
    /// Usable daily production (Wh/day).
    pub usable_daily_wh: f64,
    /// Usable daily production in the worst month (Wh/day).
    pub worst_month_usable_wh: f64,
    pub used_tested_value: bool,
    #[serde(rename = "coverage_target_pct")]
    pub coverage_target: CoverageTarget,
}

/// Compares usable production against `demand_wh`.
///
/// `tested_daily_usable_wh` replaces the loss-adjusted average when it is
/// strictly lower, and its worst month is taken as 90% of it. Zero demand
/// yields zero coverage.
pub fn determine_verdict(
    production: &ProductionSummary,
    demand_wh: f64,
    tested_daily_usable_wh: Option<f64>,
    target: CoverageTarget,
) -> VerdictResult {
    let mut usable_daily_wh = production.daily_avg_wh * SYSTEM_EFFICIENCY;
    let mut worst_month_usable_wh = production.worst_month_daily_wh * SYSTEM_EFFICIENCY;
    let mut used_tested_value = false;

    if let Some(tested) = tested_daily_usable_wh.filter(|wh| *wh > 0.0) {
        if tested < usable_daily_wh {
            usable_daily_wh = tested;
            worst_month_usable_wh = tested * TESTED_WORST_MONTH_FACTOR;
            used_tested_value = true;
        }
    }

    let coverage = |usable: f64| {
        if demand_wh > 0.0 {
            usable / demand_wh * 100.0
        } else {
            0.0
        }
    };
    let avg_coverage_pct = coverage(usable_daily_wh);
    let worst_coverage_pct = coverage(worst_month_usable_wh);

    let verdict = Verdict::classify(target, avg_coverage_pct, worst_coverage_pct);
    tracing::debug!(
        %verdict,
        avg_coverage_pct,
        worst_coverage_pct,
        used_tested_value,
        target = target.percent(),
        "classified kit"
    );

    VerdictResult {
        verdict,
        avg_coverage_pct,
        worst_coverage_pct,
        usable_daily_wh,
        worst_month_usable_wh,
        used_tested_value,
        coverage_target: target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(daily_avg_wh: f64, worst_month_daily_wh: f64) -> ProductionSummary {
        ProductionSummary {
            daily_avg_wh,
            best_month_daily_wh: worst_month_daily_wh.max(daily_avg_wh),
            worst_month_daily_wh,
            annual_wh: daily_avg_wh * 365.0,
            monthly_wh: Vec::new(),
        }
    }

    #[test]
    fn reference_kit_is_excellent() {
        let r = determine_verdict(&summary(1200.0, 1020.0), 390.0, None, CoverageTarget::Balanced);
        assert_eq!(r.verdict, Verdict::Excellent);
        assert!((r.usable_daily_wh - 960.0).abs() < 1e-9);
        assert!((r.worst_month_usable_wh - 816.0).abs() < 1e-9);
        assert!(r.avg_coverage_pct > 120.0 && r.worst_coverage_pct > 80.0);
        assert!(!r.used_tested_value);
    }

    #[test]
    fn lower_tested_value_overrides() {
        let r = determine_verdict(&summary(50.0, 45.0), 70.0, Some(35.0), CoverageTarget::Balanced);
        assert!(r.used_tested_value);
        assert_eq!(r.usable_daily_wh, 35.0);
        assert!((r.worst_month_usable_wh - 31.5).abs() < 1e-9);
        assert!((r.avg_coverage_pct - 50.0).abs() < 1e-9);
        assert_eq!(r.verdict, Verdict::Insufficient);
    }

    #[test]
    fn higher_or_equal_tested_value_is_ignored() {
        // theoretical usable = 50 * 0.8
        let theoretical = 50.0 * SYSTEM_EFFICIENCY;
        let equal = determine_verdict(
            &summary(50.0, 45.0),
            70.0,
            Some(theoretical),
            CoverageTarget::Balanced,
        );
        assert!(!equal.used_tested_value);
        let higher = determine_verdict(&summary(50.0, 45.0), 70.0, Some(90.0), CoverageTarget::Balanced);
        assert!(!higher.used_tested_value);
        assert!((higher.usable_daily_wh - 40.0).abs() < 1e-9);
    }

    #[test]
    fn zero_demand_gives_zero_coverage() {
        let r = determine_verdict(&summary(1200.0, 1020.0), 0.0, None, CoverageTarget::Balanced);
        assert_eq!(r.avg_coverage_pct, 0.0);
        assert_eq!(r.worst_coverage_pct, 0.0);
        assert_eq!(r.verdict, Verdict::Insufficient);
    }

    #[test]
    fn zero_production_is_insufficient() {
        let r = determine_verdict(&ProductionSummary::default(), 100.0, None, CoverageTarget::Budget);
        assert_eq!(r.verdict, Verdict::Insufficient);
    }

    #[test]
    fn ties_resolve_to_higher_tier() {
        use CoverageTarget::*;
        assert_eq!(Verdict::classify(Balanced, 120.0, 0.0), Verdict::Excellent);
        assert_eq!(Verdict::classify(Balanced, 100.0, 80.0), Verdict::Good);
        assert_eq!(Verdict::classify(Balanced, 80.0, 0.0), Verdict::Marginal);
        assert_eq!(Verdict::classify(Balanced, 0.0, 60.0), Verdict::Marginal);
        assert_eq!(Verdict::classify(Balanced, 79.9, 59.9), Verdict::Insufficient);
    }

    #[test]
    fn budget_table() {
        use CoverageTarget::Budget;
        assert_eq!(Verdict::classify(Budget, 80.0, 0.0), Verdict::Excellent);
        assert_eq!(Verdict::classify(Budget, 60.0, 40.0), Verdict::Good);
        assert_eq!(Verdict::classify(Budget, 60.0, 39.0), Verdict::Marginal);
        assert_eq!(Verdict::classify(Budget, 10.0, 30.0), Verdict::Marginal);
        assert_eq!(Verdict::classify(Budget, 49.0, 29.0), Verdict::Insufficient);
    }

    #[test]
    fn premium_table_needs_worst_month_too() {
        use CoverageTarget::Premium;
        assert_eq!(Verdict::classify(Premium, 200.0, 100.0), Verdict::Excellent);
        assert_eq!(Verdict::classify(Premium, 200.0, 99.0), Verdict::Good);
        assert_eq!(Verdict::classify(Premium, 200.0, 89.0), Verdict::Marginal);
        assert_eq!(Verdict::classify(Premium, 99.0, 80.0), Verdict::Marginal);
        assert_eq!(Verdict::classify(Premium, 99.0, 79.0), Verdict::Insufficient);
    }

    #[test]
    fn unknown_target_falls_back_to_balanced() {
        assert_eq!(CoverageTarget::from_percent(60), CoverageTarget::Balanced);
        assert_eq!(CoverageTarget::from_percent(90), CoverageTarget::Premium);
        assert_eq!(CoverageTarget::try_from_percent(75), None);
    }

    #[test]
    fn target_serializes_as_percent() {
        let json = serde_json::to_string(&CoverageTarget::Premium).ok();
        assert_eq!(json.as_deref(), Some("90"));
        let parsed: Option<CoverageTarget> = serde_json::from_str("55").ok();
        assert_eq!(parsed, Some(CoverageTarget::Balanced));
    }
}
