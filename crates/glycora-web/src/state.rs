//! Shared application state for the web server.
//!
//! Built once at startup and never mutated, so handlers read it without locks.

use std::sync::Arc;

use glycora_common::Result;
use glycora_ranker::{Classifier, CutoffTable, LogisticModel};

use crate::config::{ChartConfig, Config};

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub cutoffs: CutoffTable,
    pub chart: ChartConfig,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>, cutoffs: CutoffTable, chart: ChartConfig) -> Self {
        Self { classifier, cutoffs, chart }
    }

    /// Load the model and cutoff table named by `config`. A model that cannot
    /// be loaded is fatal.
    pub fn init(config: &Config) -> Result<Self> {
        let model = LogisticModel::load(&config.model.path)?;
        let cutoffs = config.cutoffs.apply()?;
        Ok(Self::new(Arc::new(model), cutoffs, config.chart.clone()))
    }
}

pub type SharedState = Arc<AppState>;
