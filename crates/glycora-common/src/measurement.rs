//! Patient measurement record consumed by the risk scorer.
//!
//! Units follow the training data: BMI in kg/m², blood pressure in mmHg,
//! glucose and lipids in mmol/L. Binary indicators are encoded as 0/1.

use serde::{Deserialize, Serialize};

use crate::error::{GlycoraError, Result};

/// Number of features the classifier expects.
pub const FEATURE_COUNT: usize = 14;

/// Feature names in classifier order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "gender",
    "bmi",
    "sbp",
    "dbp",
    "fpg",
    "ffpg",
    "chol",
    "tri",
    "hdl",
    "ldl",
    "smoking",
    "drinking",
    "family_history",
];

/// One patient's clinical measurements. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub age: f64,
    pub gender: f64,
    /// Body mass index
    pub bmi: f64,
    /// Systolic blood pressure
    pub sbp: f64,
    /// Diastolic blood pressure
    pub dbp: f64,
    /// Fasting plasma glucose
    pub fpg: f64,
    /// Final (post-load) plasma glucose
    pub ffpg: f64,
    /// Total cholesterol
    pub chol: f64,
    /// Triglycerides
    pub tri: f64,
    pub hdl: f64,
    pub ldl: f64,
    pub smoking: f64,
    pub drinking: f64,
    pub family_history: f64,
}

/// Measurements that carry a clinical cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Bmi,
    Sbp,
    Dbp,
    Fpg,
    Ffpg,
    Chol,
    Tri,
    Hdl,
    Ldl,
}

impl Field {
    /// Display order used by charts and the clinical cutoff table.
    pub const ALL: [Field; 9] = [
        Field::Bmi,
        Field::Sbp,
        Field::Dbp,
        Field::Fpg,
        Field::Ffpg,
        Field::Chol,
        Field::Tri,
        Field::Hdl,
        Field::Ldl,
    ];

    /// Short clinical label, e.g. "FFPG".
    pub fn label(&self) -> &'static str {
        match self {
            Field::Bmi => "BMI",
            Field::Sbp => "SBP",
            Field::Dbp => "DBP",
            Field::Fpg => "FPG",
            Field::Ffpg => "FFPG",
            Field::Chol => "Chol",
            Field::Tri => "Tri",
            Field::Hdl => "HDL",
            Field::Ldl => "LDL",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl MeasurementRecord {
    /// Feature vector in the order the classifier was trained on:
    /// age, gender, BMI, SBP, DBP, FPG, FFPG, Chol, Tri, HDL, LDL,
    /// smoking, drinking, family_history.
    pub fn to_feature_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.gender,
            self.bmi,
            self.sbp,
            self.dbp,
            self.fpg,
            self.ffpg,
            self.chol,
            self.tri,
            self.hdl,
            self.ldl,
            self.smoking,
            self.drinking,
            self.family_history,
        ]
    }

    pub fn value_of(&self, field: Field) -> f64 {
        match field {
            Field::Bmi => self.bmi,
            Field::Sbp => self.sbp,
            Field::Dbp => self.dbp,
            Field::Fpg => self.fpg,
            Field::Ffpg => self.ffpg,
            Field::Chol => self.chol,
            Field::Tri => self.tri,
            Field::Hdl => self.hdl,
            Field::Ldl => self.ldl,
        }
    }

    /// Reject NaN and infinite values. JSON cannot carry them, but records
    /// built in code can.
    pub fn ensure_finite(&self) -> Result<()> {
        let values = self.to_feature_vector();
        match values.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(GlycoraError::InvalidInput(format!(
                "field `{}` must be a finite number",
                FEATURE_NAMES[i]
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MeasurementRecord {
        MeasurementRecord {
            age: 52.0,
            gender: 1.0,
            bmi: 30.0,
            sbp: 128.0,
            dbp: 82.0,
            fpg: 6.1,
            ffpg: 8.4,
            chol: 5.0,
            tri: 1.9,
            hdl: 1.2,
            ldl: 3.1,
            smoking: 0.0,
            drinking: 1.0,
            family_history: 1.0,
        }
    }

    #[test]
    fn test_feature_vector_order() {
        let v = sample().to_feature_vector();
        assert_eq!(v.len(), FEATURE_COUNT);
        assert_eq!(v[0], 52.0);
        assert_eq!(v[2], 30.0);
        assert_eq!(v[9], 1.2);
        assert_eq!(v[13], 1.0);
    }

    #[test]
    fn test_value_of_covers_cutoff_fields() {
        let record = sample();
        assert_eq!(record.value_of(Field::Bmi), 30.0);
        assert_eq!(record.value_of(Field::Hdl), 1.2);
        assert_eq!(record.value_of(Field::Ffpg), 8.4);
    }

    #[test]
    fn test_ensure_finite_names_offending_field() {
        let mut record = sample();
        record.tri = f64::NAN;
        let err = record.ensure_finite().unwrap_err();
        assert!(err.to_string().contains("tri"));
        assert!(sample().ensure_finite().is_ok());
    }

    #[test]
    fn test_deserialize_rejects_missing_key() {
        let body = r#"{"age": 40, "gender": 0}"#;
        let parsed: std::result::Result<MeasurementRecord, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_deserialize_accepts_integers() {
        let body = r#"{"age": 40, "gender": 0, "bmi": 25, "sbp": 130, "dbp": 90,
            "fpg": 5.6, "ffpg": 7.8, "chol": 5.2, "tri": 1.7, "hdl": 1.55,
            "ldl": 2.6, "smoking": 0, "drinking": 0, "family_history": 0}"#;
        let record: MeasurementRecord = serde_json::from_str(body).expect("valid body");
        assert_eq!(record.sbp, 130.0);
    }

    #[test]
    fn test_field_serializes_as_request_key() {
        assert_eq!(serde_json::to_string(&Field::Bmi).unwrap(), "\"bmi\"");
        assert_eq!(serde_json::to_string(&Field::Ffpg).unwrap(), "\"ffpg\"");
        let hdl: Field = serde_json::from_str("\"hdl\"").unwrap();
        assert_eq!(hdl, Field::Hdl);
    }
}
