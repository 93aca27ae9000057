use serde::Deserialize;
use thiserror::Error;

use crate::profile::AnalysisOptions;
use crate::terrain::DEFAULT_STEP_M;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("sampling.max_points must be at least 2, got {0}")]
    MaxPoints(usize),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    /// Options applied when a request does not carry its own.
    #[serde(default)]
    pub analysis: AnalysisOptions,
    #[serde(default)]
    pub sampling: SamplingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_step")]
    pub step_m: f64,
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            step_m: default_step(),
            max_points: default_max_points(),
        }
    }
}

fn default_step() -> f64 {
    DEFAULT_STEP_M
}

fn default_max_points() -> usize {
    10_000
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling.max_points < 2 {
            return Err(ConfigError::MaxPoints(self.sampling.max_points));
        }
        Ok(())
    }
}
