//! File input and output around the engine.

/// CSV export of prescription breakdowns.
pub mod export;
/// Prescription input documents.
pub mod request;
