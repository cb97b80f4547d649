//! User-facing recommendation text for a verdict.

use serde::Serialize;

use super::sizing::suggest_kit_size;
use super::verdict::{CoverageTarget, Verdict, VerdictResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Approved,
    Warning,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub status: Status,
    pub title: String,
    pub message: String,
    pub confidence: Confidence,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Kit size named in `suggestion`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_kit_watts: Option<u32>,
}

const TESTED_DISCLOSURE: &str =
    "Calculation based on real-world tested performance, not theoretical solar panel output";
const TESTED_DISCLOSURE_MARGINAL: &str = "⚠ Based on real-world tested values - theoretical calculations showed higher but unrealistic performance";
const TESTED_DISCLOSURE_INSUFFICIENT: &str =
    "⚠ Based on real-world tested values - this kit cannot support your selected appliances";

/// Renders a verdict for a `kit_watts` kit against `demand_wh`.
///
/// Marginal and insufficient verdicts carry a kit size suggestion. A
/// tested-value override always adds a disclosure warning.
pub fn recommend(verdict: &VerdictResult, demand_wh: f64, kit_watts: u32) -> Recommendation {
    let suggested_kit_watts = suggest_kit_size(verdict, demand_wh, kit_watts);

    let mut rec = match verdict.verdict {
        Verdict::Excellent => Recommendation {
            status: Status::Approved,
            title: "✓ This Kit Will Work Perfectly".to_string(),
            message: format!(
                "This {kit_watts}W kit produces more than enough energy for your needs. \
                 You have a comfortable safety margin even during cloudy days."
            ),
            confidence: Confidence::High,
            warnings: Vec::new(),
            suggestion: None,
            suggested_kit_watts: None,
        },
        Verdict::Good => Recommendation {
            status: Status::Approved,
            title: "✓ This Kit Will Work".to_string(),
            message: format!(
                "This {kit_watts}W kit meets your daily energy needs. \
                 Expect reliable performance year-round."
            ),
            confidence: Confidence::High,
            warnings: vec![
                "Consider reducing usage slightly during the worst month (typically rainy season)"
                    .to_string(),
            ],
            suggestion: None,
            suggested_kit_watts: None,
        },
        Verdict::Marginal => Recommendation {
            status: Status::Warning,
            title: "⚠ This Kit is Marginal".to_string(),
            message: format!(
                "This {kit_watts}W kit will work most of the year, \
                 but you'll face shortages during low-sun months."
            ),
            confidence: Confidence::Medium,
            warnings: vec![
                format!(
                    "You'll get only {:.1}% of your needs in the worst month",
                    verdict.worst_coverage_pct
                ),
                "Plan to reduce usage during rainy/cloudy periods".to_string(),
                "Consider upgrading to the next kit size for better reliability".to_string(),
            ],
            suggestion: suggested_kit_watts
                .map(|w| format!("We recommend upgrading to a {w}W kit for year-round reliability")),
            suggested_kit_watts,
        },
        Verdict::Insufficient => Recommendation {
            status: Status::Rejected,
            title: "✗ This Kit is Too Small".to_string(),
            message: format!(
                "This {kit_watts}W kit cannot meet your energy needs. You need a larger system."
            ),
            confidence: Confidence::High,
            warnings: vec![
                format!(
                    "This kit only provides {:.1}% of your daily needs",
                    verdict.avg_coverage_pct
                ),
                "You will experience frequent power shortages".to_string(),
                "Batteries will discharge completely, reducing their lifespan".to_string(),
            ],
            suggestion: suggested_kit_watts.map(|w| format!("Minimum recommended: {w}W kit")),
            suggested_kit_watts,
        },
    };

    if verdict.used_tested_value {
        let disclosure = match verdict.verdict {
            Verdict::Excellent | Verdict::Good => TESTED_DISCLOSURE,
            Verdict::Marginal => TESTED_DISCLOSURE_MARGINAL,
            Verdict::Insufficient => TESTED_DISCLOSURE_INSUFFICIENT,
        };
        rec.warnings.push(disclosure.to_string());
    }

    rec
}

/// What a coverage target means for the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageExplanation {
    pub title: &'static str,
    pub description: &'static str,
    pub recommendation: &'static str,
}

impl CoverageExplanation {
    pub fn for_target(target: CoverageTarget) -> Self {
        match target {
            CoverageTarget::Budget => Self {
                title: "50% Coverage - Budget Option",
                description: "You'll have reliable power for about 6 months of the year. \
                    During low-sun months (rainy season), expect reduced performance or outages.",
                recommendation: "Consider having a backup plan (like reducing usage or having \
                    alternative power) during worst weather months.",
            },
            CoverageTarget::Balanced => Self {
                title: "70% Coverage - Balanced Choice",
                description: "You'll have reliable power for most of the year (about 8-9 months). \
                    Some reduced performance expected during worst weather months.",
                recommendation: "Monitor your usage during rainy season and be ready to reduce \
                    non-essential loads if needed.",
            },
            CoverageTarget::Premium => Self {
                title: "90% Coverage - Premium Reliability",
                description: "You'll have reliable power year-round, including during worst \
                    weather months. Maximum confidence in your solar system.",
                recommendation: "Your system is designed for consistent performance even during \
                    challenging weather conditions.",
            },
        }
    }
}
