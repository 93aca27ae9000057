use serde::Serialize;
use utoipa::ToSchema;

use super::{distance_meters, Coordinates, GeodesyError};

/// Evenly spaced sample locations between two endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PathSamples {
    pub total_m: f64,
    pub step_m: f64,
    pub points: Vec<Coordinates>,
}

/// Upper bound on the number of samples produced without an explicit cap.
pub const MAX_SAMPLE_POINTS: usize = 1_000_000;

/// Lays out `floor(total / step) + 1` points (at least two) from `start` to
/// `end`, interpolating latitude and longitude linearly. With `max_points` set
/// the step is widened until the count fits; without it, paths needing more
/// than [`MAX_SAMPLE_POINTS`] samples are rejected.
pub fn sample_path(
    start: Coordinates,
    end: Coordinates,
    step_m: f64,
    max_points: Option<usize>,
) -> Result<PathSamples, GeodesyError> {
    if !step_m.is_finite() || step_m <= 0.0 {
        return Err(GeodesyError::InvalidStep(step_m));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(GeodesyError::InvalidEndpoint);
    }

    if let Some(max) = max_points.filter(|&m| m < 2) {
        return Err(GeodesyError::InvalidPointCap(max));
    }

    let total_m = distance_meters(start, end);
    let mut step_m = step_m;
    let wanted = point_count(total_m, step_m);

    let n = match max_points {
        Some(max) if wanted > max as f64 => {
            step_m = total_m / (max - 1) as f64;
            max
        }
        Some(_) => wanted as usize,
        None if wanted > MAX_SAMPLE_POINTS as f64 => {
            return Err(GeodesyError::TooManyPoints {
                count: wanted,
                limit: MAX_SAMPLE_POINTS,
            });
        }
        None => wanted as usize,
    };

    let last = (n - 1) as f64;
    let points = (0..n)
        .map(|i| {
            let t = i as f64 / last;
            Coordinates::new(
                start.latitude + (end.latitude - start.latitude) * t,
                start.longitude + (end.longitude - start.longitude) * t,
            )
        })
        .collect();

    Ok(PathSamples {
        total_m,
        step_m,
        points,
    })
}

// Kept in floating point so tiny steps cannot overflow the count.
fn point_count(total_m: f64, step_m: f64) -> f64 {
    ((total_m / step_m).floor() + 1.0).max(2.0)
}
