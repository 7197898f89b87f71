//! glycora-ranker: Diabetes risk scoring and clinical deviation ranking.
//!
//! Scores a measurement record with a pre-trained classifier, labels the
//! result, and ranks each measurement by how far it sits from its clinical
//! cutoff.

pub mod classifier;
pub mod cutoffs;
pub mod deviation;
pub mod diagnosis;
pub mod logistic;
pub mod scorer;

pub use classifier::{Classifier, MockClassifier};
pub use cutoffs::{CutoffKind, CutoffTable, Cutoff};
pub use deviation::{rank_deviations, DeviationEntry, DeviationFlag};
pub use diagnosis::{classify, round_probability, Diagnosis, DIAGNOSIS_THRESHOLD};
pub use logistic::LogisticModel;
pub use scorer::{assess, score, RiskAssessment};
