//! Trait for the pre-trained risk classifier.
//!
//! Decouples scoring from how the model is stored or evaluated so the web
//! layer can hold any implementation behind an `Arc<dyn Classifier>`.

use glycora_common::{GlycoraError, Result, FEATURE_COUNT};

/// Binary classifier estimating the probability of the positive class.
///
/// Implementations can use:
/// - Logistic regression parameters loaded from disk
/// - Mock data (testing)
pub trait Classifier: Send + Sync {
    /// Probability of diabetes for one feature vector in classifier order.
    fn predict_probability(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64>;

    /// Short human-readable identifier used in logs.
    fn name(&self) -> &str;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Mock classifier returning a fixed probability regardless of input.
pub struct MockClassifier {
    probability: f64,
    fail: bool,
}

impl MockClassifier {
    pub fn new(probability: f64) -> Self {
        Self { probability, fail: false }
    }

    /// A classifier whose every call fails with an inference error.
    pub fn failing() -> Self {
        Self { probability: 0.0, fail: true }
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Classifier for MockClassifier {
    fn predict_probability(&self, _features: &[f64; FEATURE_COUNT]) -> Result<f64> {
        if self.fail {
            return Err(GlycoraError::Inference("mock classifier failure".into()));
        }
        Ok(self.probability)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
