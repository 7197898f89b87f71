//! Signed deviation of each measurement from its clinical cutoff.
//!
//! Sign convention: a positive deviation is unfavorable by that amount, a
//! negative one is favorable, for both cutoff kinds. A value exactly at the
//! cutoff takes the `>=` branch: unfavorable for adverse-above fields,
//! favorable for protective ones.

use glycora_common::{Field, MeasurementRecord};
use serde::{Deserialize, Serialize};

use crate::cutoffs::{Cutoff, CutoffKind, CutoffTable};

/// Whether a measurement sits on the favorable side of its cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationFlag {
    Favorable,
    Unfavorable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationEntry {
    pub field: Field,
    pub name: String,
    pub deviation: f64,
    pub flag: DeviationFlag,
}

fn deviation_for(value: f64, cutoff: &Cutoff) -> (f64, DeviationFlag) {
    let t = cutoff.threshold;
    match (cutoff.kind, value >= t) {
        (CutoffKind::Protective, true) => (t - value, DeviationFlag::Favorable),
        (CutoffKind::Protective, false) => (t - value, DeviationFlag::Unfavorable),
        (CutoffKind::AdverseAbove, true) => (value - t, DeviationFlag::Unfavorable),
        (CutoffKind::AdverseAbove, false) => (value - t, DeviationFlag::Favorable),
    }
}

/// One entry per cutoff, ordered by absolute deviation (largest first).
/// Equal magnitudes keep the table's order.
pub fn rank_deviations(record: &MeasurementRecord, table: &CutoffTable) -> Vec<DeviationEntry> {
    let mut entries: Vec<DeviationEntry> = table
        .iter()
        .map(|cutoff| {
            let (deviation, flag) = deviation_for(record.value_of(cutoff.field), cutoff);
            DeviationEntry {
                field: cutoff.field,
                name: cutoff.field.label().to_string(),
                deviation,
                flag,
            }
        })
        .collect();

    // sort_by is stable, which gives the tie-break
    entries.sort_by(|a, b| {
        b.deviation
            .abs()
            .partial_cmp(&a.deviation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}
