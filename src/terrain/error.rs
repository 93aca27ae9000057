use thiserror::Error;

use crate::geodesy::GeodesyError;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("no elevation data along the path")]
    NoElevationData,
    #[error("elevation source returned {got} samples, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("elevation source error: {0}")]
    Source(String),
    #[error("sampling error: {0}")]
    Sampling(#[from] GeodesyError),
}
