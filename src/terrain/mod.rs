mod error;
mod source;

pub use error::TerrainError;
pub use source::{
    ElevationSource, FlatSource, ProfileBuilder, DEFAULT_BATCH_SIZE, DEFAULT_STEP_M,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sentinel used by raw elevation tiles for "no data".
pub const NODATA: f64 = -9999.0;

pub fn is_nodata(elevation: f64) -> bool {
    !elevation.is_finite() || elevation == NODATA
}

/// Display smoothing applied to an elevation series.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Smoothing {
    #[default]
    #[strum(to_string = "median3")]
    Median3,
    #[serde(rename = "none")]
    #[strum(to_string = "none")]
    Disabled,
}

/// Returns a new series; the input is never modified. Endpoints are kept as-is.
pub fn smooth(series: &[f64], mode: Smoothing) -> Vec<f64> {
    match mode {
        Smoothing::Disabled => series.to_vec(),
        Smoothing::Median3 => {
            let mut out = series.to_vec();
            for i in 1..series.len().saturating_sub(1) {
                out[i] = median3(series[i - 1], series[i], series[i + 1]);
            }
            out
        }
    }
}

fn median3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).max(a.max(b).min(c))
}

/// Extremes and cumulative climb of an elevation series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ElevationStats {
    pub min_m: f64,
    pub max_m: f64,
    pub ascent_m: f64,
    pub descent_m: f64,
}

impl ElevationStats {
    pub fn from_series(series: &[f64]) -> Option<Self> {
        let first = *series.first()?;
        let mut stats = ElevationStats {
            min_m: first,
            max_m: first,
            ascent_m: 0.0,
            descent_m: 0.0,
        };

        for pair in series.windows(2) {
            let delta = pair[1] - pair[0];
            if delta > 0.0 {
                stats.ascent_m += delta;
            } else {
                stats.descent_m -= delta;
            }
            stats.min_m = stats.min_m.min(pair[1]);
            stats.max_m = stats.max_m.max(pair[1]);
        }

        Some(stats)
    }
}

/// Replaces missing samples: interior gaps are interpolated linearly by index
/// between the nearest valid neighbours, leading and trailing gaps copy the
/// nearest valid value.
pub fn fill_gaps(samples: &[Option<f64>]) -> Result<Vec<f64>, TerrainError> {
    let valid: Vec<(usize, f64)> = samples
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.filter(|e| !is_nodata(*e)).map(|e| (i, e)))
        .collect();

    let (&(first_idx, first_val), &(last_idx, last_val)) =
        match (valid.first(), valid.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(TerrainError::NoElevationData),
        };

    let mut out = vec![0.0; samples.len()];
    out[..=first_idx].fill(first_val);
    out[last_idx..].fill(last_val);

    for pair in valid.windows(2) {
        let (i0, e0) = pair[0];
        let (i1, e1) = pair[1];
        let span = (i1 - i0) as f64;
        for (offset, slot) in out[i0..=i1].iter_mut().enumerate() {
            *slot = e0 + (e1 - e0) * offset as f64 / span;
        }
    }

    let filled = samples.len() - valid.len();
    if filled > 0 {
        log::warn!(
            "filled {} of {} elevation samples with missing data",
            filled,
            samples.len()
        );
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median3_removes_single_spike() {
        let series = [10.0, 10.0, 500.0, 10.0, 10.0];
        assert_eq!(smooth(&series, Smoothing::Median3), vec![10.0; 5]);
    }

    #[test]
    fn median3_keeps_endpoints() {
        let series = [100.0, 0.0, 0.0, 0.0, -50.0];
        let out = smooth(&series, Smoothing::Median3);
        assert_eq!(out[0], 100.0);
        assert_eq!(out[4], -50.0);
    }

    #[test]
    fn median3_is_identity_on_linear_series() {
        let series: Vec<f64> = (0..20).map(|i| 3.0 * i as f64 - 7.0).collect();
        assert_eq!(smooth(&series, Smoothing::Median3), series);
    }

    #[test]
    fn disabled_returns_copy() {
        let series = [1.0, 9.0, 2.0];
        assert_eq!(smooth(&series, Smoothing::Disabled), series.to_vec());
    }

    #[test]
    fn smoothing_short_series() {
        assert!(smooth(&[], Smoothing::Median3).is_empty());
        assert_eq!(smooth(&[4.0], Smoothing::Median3), vec![4.0]);
        assert_eq!(smooth(&[4.0, 8.0], Smoothing::Median3), vec![4.0, 8.0]);
    }

    #[test]
    fn smoothing_labels() {
        assert_eq!(Smoothing::Median3.to_string(), "median3");
        assert_eq!(Smoothing::Disabled.to_string(), "none");
        let parsed: Smoothing = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, Smoothing::Disabled);
    }

    #[test]
    fn stats_track_climb_and_extremes() {
        let stats = ElevationStats::from_series(&[100.0, 150.0, 120.0, 130.0, 90.0]).unwrap();
        assert_eq!(stats.min_m, 90.0);
        assert_eq!(stats.max_m, 150.0);
        assert_eq!(stats.ascent_m, 60.0);
        assert_eq!(stats.descent_m, 70.0);
        assert!(ElevationStats::from_series(&[]).is_none());
    }

    #[test]
    fn fills_interior_and_edge_gaps() {
        let samples = [None, Some(10.0), None, None, Some(40.0), Some(NODATA)];
        let filled = fill_gaps(&samples).unwrap();
        assert_eq!(filled, vec![10.0, 10.0, 20.0, 30.0, 40.0, 40.0]);
    }

    #[test]
    fn all_missing_is_an_error() {
        let samples = [None, Some(NODATA), None];
        assert!(matches!(
            fill_gaps(&samples),
            Err(TerrainError::NoElevationData)
        ));
    }
}
