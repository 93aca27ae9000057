use serde::Serialize;
use utoipa::ToSchema;

use crate::rf::{earth_bulge, fresnel_radius, los_altitude};

use super::error::AnalysisError;
use super::types::GeoPoint;

/// Clearance figures for one profile sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Obstruction {
    pub index: usize,
    pub distance_m: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub terrain_m: f64,
    pub los_m: f64,
    pub bulge_m: f64,
    /// Terrain plus bulge minus LOS; positive means the terrain pierces the LOS.
    pub clearance_m: f64,
    pub fresnel_radius_m: f64,
    /// LOS minus terrain, bulge and Fresnel radius; negative means the zone is intruded.
    pub fresnel_clearance_m: f64,
}

/// Inputs of an obstruction scan. `distances_m` runs parallel to `profile`.
#[derive(Debug, Clone, Copy)]
pub struct ScanParams<'a> {
    pub profile: &'a [GeoPoint],
    pub distances_m: &'a [f64],
    pub tx_asl_m: f64,
    pub rx_asl_m: f64,
    pub frequency_mhz: f64,
    pub zone_fraction: f64,
    pub k_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanOutcome {
    pub worst_los: Obstruction,
    pub worst_fresnel: Obstruction,
}

impl ScanOutcome {
    pub fn los_clear(&self) -> bool {
        self.worst_los.clearance_m <= 0.0
    }

    pub fn fresnel_clear(&self) -> bool {
        self.worst_fresnel.fresnel_clearance_m >= 0.0
    }
}

/// Evaluates every interior sample and keeps the first sample with the
/// highest LOS clearance and the first with the lowest Fresnel clearance.
pub fn scan(params: &ScanParams) -> Result<ScanOutcome, AnalysisError> {
    let profile = params.profile;
    let n = profile.len();
    if n < 2 {
        return Err(AnalysisError::ProfileTooShort { len: n });
    }
    if params.distances_m.len() != n {
        return Err(AnalysisError::DistanceMismatch {
            points: n,
            distances: params.distances_m.len(),
        });
    }
    let total = params.distances_m[n - 1];
    if total <= 0.0 {
        return Err(AnalysisError::DegenerateGeometry);
    }

    let mut worst_los: Option<Obstruction> = None;
    let mut worst_fresnel: Option<Obstruction> = None;

    for i in 1..n - 1 {
        let sample = evaluate(params, i, total);

        if worst_los.map_or(true, |w| sample.clearance_m > w.clearance_m) {
            worst_los = Some(sample);
        }
        if worst_fresnel.map_or(true, |w| sample.fresnel_clearance_m < w.fresnel_clearance_m) {
            worst_fresnel = Some(sample);
        }
    }

    Ok(match (worst_los, worst_fresnel) {
        (Some(worst_los), Some(worst_fresnel)) => ScanOutcome {
            worst_los,
            worst_fresnel,
        },
        _ => {
            let fallback = endpoint_fallback(params);
            ScanOutcome {
                worst_los: fallback,
                worst_fresnel: fallback,
            }
        }
    })
}

fn evaluate(params: &ScanParams, i: usize, total: f64) -> Obstruction {
    let point = params.profile[i];
    let d1 = params.distances_m[i];
    let d2 = total - d1;

    let los = los_altitude(params.tx_asl_m, params.rx_asl_m, d1 / total);
    let bulge = earth_bulge(d1, d2, params.k_factor);
    let apparent = point.elevation + bulge;
    let radius = fresnel_radius(d1, d2, params.frequency_mhz, params.zone_fraction);

    Obstruction {
        index: i,
        distance_m: d1,
        latitude: point.latitude,
        longitude: point.longitude,
        terrain_m: point.elevation,
        los_m: los,
        bulge_m: bulge,
        clearance_m: apparent - los,
        fresnel_radius_m: radius,
        fresnel_clearance_m: los - apparent - radius,
    }
}

/// A two-point profile has nothing between the antennas; report the near end.
fn endpoint_fallback(params: &ScanParams) -> Obstruction {
    let point = params.profile[0];
    Obstruction {
        index: 0,
        distance_m: 0.0,
        latitude: point.latitude,
        longitude: point.longitude,
        terrain_m: point.elevation,
        los_m: params.tx_asl_m,
        bulge_m: 0.0,
        clearance_m: point.elevation - params.tx_asl_m,
        fresnel_radius_m: 0.0,
        fresnel_clearance_m: f64::INFINITY,
    }
}
