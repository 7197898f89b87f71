//! Clinical cutoff table used to interpret individual measurements.

use glycora_common::{Field, GlycoraError, Result};
use serde::{Deserialize, Serialize};

/// Direction in which a measurement becomes clinically unfavorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffKind {
    /// Values at or above the cutoff are unfavorable.
    AdverseAbove,
    /// Values at or above the cutoff are favorable; below is unfavorable.
    Protective,
}

/// A single threshold for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutoff {
    pub field: Field,
    pub kind: CutoffKind,
    pub threshold: f64,
}

/// Ordered set of cutoffs, at most one per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffTable {
    entries: Vec<Cutoff>,
}

impl Default for CutoffTable {
    fn default() -> Self {
        Self::clinical()
    }
}

impl CutoffTable {
    /// Standard adult thresholds (mmol/L for glucose and lipids).
    pub fn clinical() -> Self {
        use CutoffKind::{AdverseAbove, Protective};
        let entry = |field, kind, threshold| Cutoff { field, kind, threshold };
        Self {
            entries: vec![
                entry(Field::Bmi,  AdverseAbove, 25.0),
                entry(Field::Sbp,  AdverseAbove, 130.0),
                entry(Field::Dbp,  AdverseAbove, 90.0),
                entry(Field::Fpg,  AdverseAbove, 5.6),
                entry(Field::Ffpg, AdverseAbove, 7.8),
                entry(Field::Chol, AdverseAbove, 5.2),
                entry(Field::Tri,  AdverseAbove, 1.7),
                entry(Field::Hdl,  Protective,   1.55),
                entry(Field::Ldl,  AdverseAbove, 2.6),
            ],
        }
    }

    /// Build a table from explicit entries, rejecting duplicates and
    /// non-finite thresholds.
    pub fn from_entries(entries: Vec<Cutoff>) -> Result<Self> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    /// Replace the threshold for `field`, keeping its kind and position.
    pub fn with_threshold(mut self, field: Field, threshold: f64) -> Result<Self> {
        let entry = self
            .entries
            .iter_mut()
            .find(|c| c.field == field)
            .ok_or_else(|| GlycoraError::Config(format!("no cutoff defined for {}", field)))?;
        entry.threshold = threshold;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, cutoff) in self.entries.iter().enumerate() {
            if !cutoff.threshold.is_finite() {
                return Err(GlycoraError::Config(format!(
                    "cutoff for {} must be finite, got {}",
                    cutoff.field, cutoff.threshold
                )));
            }
            if self.entries[..i].iter().any(|c| c.field == cutoff.field) {
                return Err(GlycoraError::Config(format!(
                    "duplicate cutoff for {}",
                    cutoff.field
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, field: Field) -> Option<&Cutoff> {
        self.entries.iter().find(|c| c.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cutoff> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
