use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RfError {
    #[error("path length must be positive, got {0} m")]
    NonPositiveDistance(f64),
    #[error("frequency must be positive, got {0} MHz")]
    NonPositiveFrequency(f64),
    #[error("transmit power must be positive, got {0} W")]
    NonPositivePower(f64),
}
