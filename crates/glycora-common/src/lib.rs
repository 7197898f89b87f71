//! glycora-common: Shared types and errors used across all Glycora crates.

pub mod error;
pub mod measurement;

// Re-export commonly used types
pub use error::{ApiError, GlycoraError, Result};
pub use measurement::{Field, MeasurementRecord, FEATURE_COUNT, FEATURE_NAMES};
