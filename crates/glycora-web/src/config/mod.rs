//! Configuration loading for Glycora.
//! Reads glycora.toml from the current directory or path in GLYCORA_CONFIG env var.

use glycora_common::Field;
use glycora_ranker::CutoffTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub cutoffs: CutoffOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 10000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

fn default_model_path() -> PathBuf { PathBuf::from("models/diabetes_model.json") }

impl Default for ModelConfig {
    fn default() -> Self {
        Self { path: default_model_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
    /// Give up on the chart after this long and answer without it.
    #[serde(default = "default_chart_timeout_ms")]
    pub timeout_ms: u64,
}

fn bool_true()            -> bool { true }
fn default_chart_width()  -> u32  { 600 }
fn default_chart_height() -> u32  { 400 }
fn default_chart_timeout_ms() -> u64 { 5000 }

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: bool_true(),
            width: default_chart_width(),
            height: default_chart_height(),
            timeout_ms: default_chart_timeout_ms(),
        }
    }
}

/// Optional replacements for the clinical thresholds. Unset fields keep
/// their standard value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CutoffOverrides {
    pub bmi: Option<f64>,
    pub sbp: Option<f64>,
    pub dbp: Option<f64>,
    pub fpg: Option<f64>,
    pub ffpg: Option<f64>,
    pub chol: Option<f64>,
    pub tri: Option<f64>,
    pub hdl: Option<f64>,
    pub ldl: Option<f64>,
}

impl CutoffOverrides {
    fn get(&self, field: Field) -> Option<f64> {
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

    /// Clinical table with these overrides applied.
    pub fn apply(&self) -> glycora_common::Result<CutoffTable> {
        Field::ALL
            .iter()
            .try_fold(CutoffTable::clinical(), |table, &field| match self.get(field) {
                Some(threshold) => {
                    tracing::info!("Cutoff override: {} = {}", field, threshold);
                    table.with_threshold(field, threshold)
                }
                None => Ok(table),
            })
    }
}


impl Config {
    /// Load configuration from glycora.toml.
    /// Checks GLYCORA_CONFIG env var first, then current directory. A missing
    /// file yields the defaults; a malformed one is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("GLYCORA_CONFIG")
            .unwrap_or_else(|_| "glycora.toml".to_string());

        let mut config = Self::load_from(Path::new(&path))?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply GLYCORA_HOST, GLYCORA_PORT and GLYCORA_MODEL_PATH overrides.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(host) = lookup("GLYCORA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GLYCORA_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("GLYCORA_PORT `{}` is not a valid port: {}", port, e))?;
        }
        if let Some(path) = lookup("GLYCORA_MODEL_PATH") {
            self.model.path = PathBuf::from(path);
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
