use thiserror::Error;

use crate::profile::AnalysisError;
use crate::terrain::TerrainError;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("profile JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("plan: {0}")]
    Plan(String),
    #[error("terrain: {0}")]
    Terrain(#[from] TerrainError),
    #[error("analysis: {0}")]
    Analysis(#[from] AnalysisError),
}
