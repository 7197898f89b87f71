//! Logistic-regression classifier loaded from exported parameters.
//!
//! The parameter file is JSON produced by the training pipeline:
//!
//! ```json
//! {
//!   "feature_names": ["age", "gender", ...],
//!   "scaler_mean":   [...],
//!   "scaler_scale":  [...],
//!   "coefficients":  [...],
//!   "intercept":     -0.42
//! }
//! ```
//!
//! Inference standardises each feature, `z = (x - mean) / scale`, then
//! returns `sigmoid(intercept + Σ coef_i · z_i)`.

use std::path::Path;

use glycora_common::{GlycoraError, Result, FEATURE_COUNT, FEATURE_NAMES};
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub feature_names: Vec<String>,
    pub scaler_mean: Vec<f64>,
    pub scaler_scale: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl LogisticModel {
    /// Read and validate a parameter file. Any failure is reported as
    /// `ModelUnavailable`; the server refuses to start without a model.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GlycoraError::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let model = Self::from_json(&content)?;
        tracing::info!(
            "Loaded logistic model from {} ({} features)",
            path.display(),
            model.coefficients.len()
        );
        Ok(model)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let model: LogisticModel = serde_json::from_str(content)
            .map_err(|e| GlycoraError::ModelUnavailable(format!("invalid model JSON: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        let unavailable = |msg: String| Err(GlycoraError::ModelUnavailable(msg));

        if self.feature_names.len() != FEATURE_COUNT {
            return unavailable(format!(
                "expected {} features, model declares {}",
                FEATURE_COUNT,
                self.feature_names.len()
            ));
        }
        if let Some((i, name)) = self
            .feature_names
            .iter()
            .enumerate()
            .find(|(i, name)| name.as_str() != FEATURE_NAMES[*i])
        {
            return unavailable(format!(
                "feature {} is `{}`, expected `{}`",
                i, name, FEATURE_NAMES[i]
            ));
        }
        if self.scaler_mean.len() != FEATURE_COUNT
            || self.scaler_scale.len() != FEATURE_COUNT
            || self.coefficients.len() != FEATURE_COUNT
        {
            return unavailable("model parameter lengths do not match feature_names length".into());
        }

        let all_finite = self
            .scaler_mean
            .iter()
            .chain(&self.scaler_scale)
            .chain(&self.coefficients)
            .chain(std::iter::once(&self.intercept))
            .all(|v| v.is_finite());
        if !all_finite {
            return unavailable("model parameters must be finite".into());
        }
        if let Some(i) = self.scaler_scale.iter().position(|s| *s == 0.0) {
            return unavailable(format!("scaler_scale for `{}` is zero", FEATURE_NAMES[i]));
        }
        Ok(())
    }

    /// Linear predictor before the sigmoid.
    pub fn decision_function(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        features
            .iter()
            .zip(&self.scaler_mean)
            .zip(&self.scaler_scale)
            .zip(&self.coefficients)
            .map(|(((x, mean), scale), coef)| coef * (x - mean) / scale)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LogisticModel {
    fn predict_probability(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64> {
        // ±inf saturates to 0 or 1; NaN means the inputs cancelled out of range.
        let z = self.decision_function(features);
        if z.is_nan() {
            return Err(GlycoraError::InvalidInput(
                "measurements are too large to score".into(),
            ));
        }
        Ok(sigmoid(z))
    }

    fn name(&self) -> &str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_json(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> String {
        let mean = [0.0; FEATURE_COUNT];
        let scale = [1.0; FEATURE_COUNT];
        serde_json::json!({
            "feature_names": FEATURE_NAMES,
            "scaler_mean": mean,
            "scaler_scale": scale,
            "coefficients": coefficients,
            "intercept": intercept,
        })
        .to_string()
    }

    #[test]
    fn test_zero_model_predicts_half() {
        let model = LogisticModel::from_json(&model_json([0.0; FEATURE_COUNT], 0.0)).unwrap();
        let p = model.predict_probability(&[3.0; FEATURE_COUNT]).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_standardisation_applied() {
        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients[5] = 2.0; // fpg
        let mut value: serde_json::Value =
            serde_json::from_str(&model_json(coefficients, -1.0)).unwrap();
        value["scaler_mean"][5] = 5.0.into();
        value["scaler_scale"][5] = 0.5.into();
        let model = LogisticModel::from_json(&value.to_string()).unwrap();

        let mut features = [0.0; FEATURE_COUNT];
        features[5] = 6.0;
        // z = -1 + 2 * (6 - 5) / 0.5 = 3
        assert!((model.decision_function(&features) - 3.0).abs() < 1e-12);
        let p = model.predict_probability(&features).unwrap();
        assert!((p - sigmoid(3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert!(sigmoid(-40.0) > 0.0);
    }

    #[test]
    fn test_overflowing_decision_saturates() {
        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients[2] = 10.0; // bmi
        let model = LogisticModel::from_json(&model_json(coefficients, 0.0)).unwrap();

        let mut features = [0.0; FEATURE_COUNT];
        features[2] = 1e308;
        assert_eq!(model.decision_function(&features), f64::INFINITY);
        assert_eq!(model.predict_probability(&features).unwrap(), 1.0);

        features[2] = -1e308;
        assert_eq!(model.predict_probability(&features).unwrap(), 0.0);
    }

    #[test]
    fn test_cancelling_infinities_are_invalid_input() {
        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients[2] = 10.0; // bmi
        coefficients[3] = -10.0; // sbp
        let model = LogisticModel::from_json(&model_json(coefficients, 0.0)).unwrap();

        let mut features = [0.0; FEATURE_COUNT];
        features[2] = 1e308;
        features[3] = 1e308;
        assert!(model.decision_function(&features).is_nan());
        assert!(matches!(
            model.predict_probability(&features),
            Err(GlycoraError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_feature_order() {
        let mut value: serde_json::Value =
            serde_json::from_str(&model_json([0.0; FEATURE_COUNT], 0.0)).unwrap();
        value["feature_names"][0] = "gender".into();
        value["feature_names"][1] = "age".into();
        let err = LogisticModel::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, GlycoraError::ModelUnavailable(_)));
    }

    #[test]
    fn test_rejects_zero_scale() {
        let mut value: serde_json::Value =
            serde_json::from_str(&model_json([0.0; FEATURE_COUNT], 0.0)).unwrap();
        value["scaler_scale"][2] = 0.0.into();
        let err = LogisticModel::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("bmi"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            LogisticModel::from_json("{not json"),
            Err(GlycoraError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_missing_file_is_model_unavailable() {
        let err = LogisticModel::load("/nonexistent/diabetes_model.json").unwrap_err();
        assert!(matches!(err, GlycoraError::ModelUnavailable(_)));
    }

    #[test]
    fn test_bundled_model_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/diabetes_model.json");
        let model = LogisticModel::load(path).expect("bundled model is valid");
        let healthy = [
            35.0, 0.0, 22.0, 115.0, 75.0, 4.8, 6.0, 4.5, 1.0, 1.7, 2.2, 0.0, 0.0, 0.0,
        ];
        let at_risk = [
            62.0, 1.0, 33.0, 150.0, 95.0, 7.8, 12.5, 6.4, 2.9, 0.9, 4.1, 1.0, 1.0, 1.0,
        ];
        let p_low = model.predict_probability(&healthy).unwrap();
        let p_high = model.predict_probability(&at_risk).unwrap();
        assert!(p_low < 0.5, "healthy profile scored {}", p_low);
        assert!(p_high >= 0.5, "at-risk profile scored {}", p_high);
    }
}
