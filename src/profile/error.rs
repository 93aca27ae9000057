use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::rf::RfError;

use super::types::Station;

/// Broad class of an analysis failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InputValidation,
    DegenerateGeometry,
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("profile needs at least 2 points, got {len}")]
    ProfileTooShort { len: usize },
    #[error("{distances} distances given for a profile of {points} points")]
    DistanceMismatch { points: usize, distances: usize },
    #[error("profile point {index} has a non-finite coordinate or elevation")]
    InvalidSample { index: usize },
    #[error("{station} station frequency must be positive, got {value} MHz")]
    InvalidFrequency { station: Station, value: f64 },
    #[error("{station} station antenna height must be non-negative, got {value} m")]
    InvalidAntennaHeight { station: Station, value: f64 },
    #[error("{station} station transmit power must be positive, got {value} W")]
    InvalidTransmitPower { station: Station, value: f64 },
    #[error("k-factor must be positive, got {0}")]
    InvalidKFactor(f64),
    #[error("fresnel zone fraction must be 1 or 0.6, got {0}")]
    InvalidZoneFraction(f64),
    #[error("decimation target must be at least 1")]
    InvalidDecimateTarget,
    #[error("path endpoints coincide; the path has no length")]
    DegenerateGeometry,
    #[error(transparent)]
    Rf(#[from] RfError),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::DegenerateGeometry => ErrorKind::DegenerateGeometry,
            _ => ErrorKind::InputValidation,
        }
    }
}
