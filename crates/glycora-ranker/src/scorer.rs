//! Risk scoring: model probability, diagnosis label and ranked deviations.

use glycora_common::{GlycoraError, MeasurementRecord, Result};
use serde::Serialize;

use crate::classifier::Classifier;
use crate::cutoffs::CutoffTable;
use crate::deviation::{rank_deviations, DeviationEntry};
use crate::diagnosis::{classify, Diagnosis};

/// Probability that `record` belongs to the positive class.
///
/// The classifier receives the 14 values in training order. Non-finite
/// inputs are rejected as `InvalidInput`; a probability outside [0, 1]
/// from the classifier is an `Inference` error.
pub fn score(record: &MeasurementRecord, classifier: &dyn Classifier) -> Result<f64> {
    record.ensure_finite()?;

    let probability = classifier.predict_probability(&record.to_feature_vector())?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(GlycoraError::Inference(format!(
            "classifier `{}` returned probability {} outside [0, 1]",
            classifier.name(),
            probability
        )));
    }
    Ok(probability)
}

/// Full result for one record. `probability` is unrounded.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub diagnosis: Diagnosis,
    pub deviations: Vec<DeviationEntry>,
}

pub fn assess(
    record: &MeasurementRecord,
    classifier: &dyn Classifier,
    table: &CutoffTable,
) -> Result<RiskAssessment> {
    let probability = score(record, classifier)?;
    let diagnosis = classify(probability);
    let deviations = rank_deviations(record, table);

    tracing::debug!(
        probability,
        %diagnosis,
        top = deviations.first().map(|d| d.name.as_str()).unwrap_or("-"),
        "Assessed measurement record"
    );

    Ok(RiskAssessment {
        probability,
        diagnosis,
        deviations,
    })
}
