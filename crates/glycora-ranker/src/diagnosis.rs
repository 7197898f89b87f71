//! Binary diagnosis label derived from the model probability.

use serde::{Serialize, Serializer};

/// Probabilities at or above this value are reported as diabetes.
pub const DIAGNOSIS_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    DiabetesDetected,
    NoDiabetesDetected,
}

impl Diagnosis {
    pub fn label(&self) -> &'static str {
        match self {
            Diagnosis::DiabetesDetected => "Diabetes Detected",
            Diagnosis::NoDiabetesDetected => "No Diabetes Detected",
        }
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Diagnosis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Pure threshold, no banding.
pub fn classify(probability: f64) -> Diagnosis {
    if probability >= DIAGNOSIS_THRESHOLD {
        Diagnosis::DiabetesDetected
    } else {
        Diagnosis::NoDiabetesDetected
    }
}

/// Round to 3 decimal places for display.
pub fn round_probability(probability: f64) -> f64 {
    (probability * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(classify(0.5), Diagnosis::DiabetesDetected);
        assert_eq!(classify(0.4999), Diagnosis::NoDiabetesDetected);
        assert_eq!(classify(0.0), Diagnosis::NoDiabetesDetected);
        assert_eq!(classify(1.0), Diagnosis::DiabetesDetected);
    }

    #[test]
    fn test_labels() {
        assert_eq!(classify(0.9).to_string(), "Diabetes Detected");
        assert_eq!(classify(0.1).to_string(), "No Diabetes Detected");
        assert_eq!(
            serde_json::to_string(&Diagnosis::DiabetesDetected).unwrap(),
            "\"Diabetes Detected\""
        );
    }

    #[test]
    fn test_round_probability() {
        assert_eq!(round_probability(0.123456), 0.123);
        assert_eq!(round_probability(0.9996), 1.0);
        assert_eq!(round_probability(0.0004), 0.0);
    }
}
