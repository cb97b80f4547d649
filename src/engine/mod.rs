//! The decision engine.
//!
//! Every function here is total over its inputs and performs no I/O.
//! Production data is fetched and validated by the caller beforehand.

pub mod demand;
pub mod prescription;
/// Production series reduction and array orientation.
pub mod production;
pub mod recommendation;
/// Latitude and seasonal-variance warnings.
pub mod risk;
pub mod sizing;
pub mod verdict;

pub use demand::{ApplianceSelection, AppliedApplianceLine, EnergyNeed, daily_energy_need};
pub use prescription::{Location, Prescription, PrescriptionEngine, PrescriptionRequest};
pub use production::{ProductionSeries, ProductionSummary, summarize};
pub use recommendation::{Recommendation, recommend};
pub use risk::{IrradianceWarning, irradiance_warnings};
pub use verdict::{CoverageTarget, Verdict, VerdictResult, determine_verdict};
