use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeodesyError {
    #[error("sampling step must be a positive distance, got {0} m")]
    InvalidStep(f64),
    #[error("path endpoints must be finite coordinates")]
    InvalidEndpoint,
    #[error("point cap must allow at least two samples, got {0}")]
    InvalidPointCap(usize),
    #[error("path would need {count} samples, more than the limit of {limit}; widen the step or set a point cap")]
    TooManyPoints { count: f64, limit: usize },
}
