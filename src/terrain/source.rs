use std::time::Duration;

use crate::geodesy::{sample_path, Coordinates, GeoPoint};

use super::{fill_gaps, TerrainError};

pub const DEFAULT_STEP_M: f64 = 60.0;
pub const DEFAULT_BATCH_SIZE: usize = 150;

/// Something that can look up ground elevation for a set of locations.
/// Missing data is reported as `None`.
pub trait ElevationSource {
    fn elevations(&mut self, points: &[Coordinates]) -> Result<Vec<Option<f64>>, TerrainError>;
}

/// Flat terrain at a fixed elevation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatSource(pub f64);

impl ElevationSource for FlatSource {
    fn elevations(&mut self, points: &[Coordinates]) -> Result<Vec<Option<f64>>, TerrainError> {
        Ok(vec![Some(self.0); points.len()])
    }
}

/// Assembles a terrain profile between two endpoints by querying an
/// [`ElevationSource`] in batches.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    pub step_m: f64,
    pub max_points: Option<usize>,
    pub batch_size: usize,
    pub pacing: Duration,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self {
            step_m: DEFAULT_STEP_M,
            max_points: None,
            batch_size: DEFAULT_BATCH_SIZE,
            pacing: Duration::ZERO,
        }
    }
}

impl ProfileBuilder {
    pub fn step_m(mut self, step_m: f64) -> Self {
        self.step_m = step_m;
        self
    }

    pub fn max_points(mut self, max_points: Option<usize>) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn build<S>(
        &self,
        start: Coordinates,
        end: Coordinates,
        source: &mut S,
    ) -> Result<Vec<GeoPoint>, TerrainError>
    where
        S: ElevationSource + ?Sized,
    {
        let samples = sample_path(start, end, self.step_m, self.max_points)?;
        let batch_size = self.batch_size.max(1);

        let mut raw = Vec::with_capacity(samples.points.len());
        for (i, batch) in samples.points.chunks(batch_size).enumerate() {
            if i > 0 && !self.pacing.is_zero() {
                std::thread::sleep(self.pacing);
            }
            let elevations = source.elevations(batch)?;
            if elevations.len() != batch.len() {
                return Err(TerrainError::LengthMismatch {
                    expected: batch.len(),
                    got: elevations.len(),
                });
            }
            raw.extend(elevations);
        }

        log::debug!(
            "sampled {} points over {:.0} m in batches of {}",
            raw.len(),
            samples.total_m,
            batch_size
        );

        let elevations = fill_gaps(&raw)?;
        Ok(samples
            .points
            .iter()
            .zip(elevations)
            .map(|(c, e)| GeoPoint::new(c.latitude, c.longitude, e))
            .collect())
    }
}
