use serde::Serialize;
use utoipa::ToSchema;

use crate::geodesy::{cumulative_distances, GeoPoint};
use crate::rf::{antenna_asl, los_altitude, LinkBudget, LinkQuality};
use crate::terrain::{smooth, ElevationStats};

use super::decimate::decimate;
use super::error::AnalysisError;
use super::scanner::{scan, Obstruction, ScanParams};
use super::types::{AnalysisOptions, Station, StationParameters};

/// Where an antenna sits: ground elevation, mast height and the sum of both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct AntennaSite {
    pub ground_m: f64,
    pub height_agl_m: f64,
    pub asl_m: f64,
}

/// Terrain sample to highlight on a profile chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Marker {
    pub distance_m: f64,
    pub elevation_m: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Obstruction> for Marker {
    fn from(o: &Obstruction) -> Self {
        Marker {
            distance_m: o.distance_m,
            elevation_m: o.terrain_m,
            latitude: o.latitude,
            longitude: o.longitude,
        }
    }
}

/// Decimated series for charting. Every series is sampled at `indices`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PlotPayload {
    pub indices: Vec<usize>,
    pub distances_m: Vec<f64>,
    pub elevation_m: Vec<f64>,
    pub display_elevation_m: Vec<f64>,
    pub los_m: Vec<f64>,
    pub worst_los: Marker,
    pub worst_fresnel: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnalysisResult {
    pub total_distance_m: f64,
    pub frequency_mhz: f64,
    pub distances_m: Vec<f64>,
    pub elevation_m: Vec<f64>,
    pub display_elevation_m: Vec<f64>,
    pub near: AntennaSite,
    pub far: AntennaSite,
    pub elevation: ElevationStats,
    pub worst_los: Obstruction,
    pub worst_fresnel: Obstruction,
    pub los_clear: bool,
    pub fresnel_clear: bool,
    /// Near station transmitting to the far one.
    pub forward: LinkBudget,
    /// Far station transmitting to the near one.
    pub reverse: LinkBudget,
    /// Worse of the two directions.
    pub link_quality: LinkQuality,
    pub plot: PlotPayload,
}

/// Runs the full path analysis for a terrain profile between two stations.
///
/// Every geometric figure is computed on the raw elevations; the smoothing
/// option only shapes `display_elevation_m` and its plotted counterpart.
pub fn analyze(
    profile: &[GeoPoint],
    near: &StationParameters,
    far: &StationParameters,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError> {
    let n = profile.len();
    if n < 2 {
        return Err(AnalysisError::ProfileTooShort { len: n });
    }
    if let Some(index) = profile.iter().position(|p| !p.is_finite()) {
        return Err(AnalysisError::InvalidSample { index });
    }
    near.validate(Station::Near)?;
    far.validate(Station::Far)?;
    options.validate()?;

    let first = profile[0];
    let last = profile[n - 1];
    if first.coordinates() == last.coordinates() {
        return Err(AnalysisError::DegenerateGeometry);
    }

    let distances_m = cumulative_distances(profile.iter().map(GeoPoint::coordinates));
    let total_distance_m = distances_m[n - 1];
    if total_distance_m <= 0.0 {
        return Err(AnalysisError::DegenerateGeometry);
    }

    let elevation_m: Vec<f64> = profile.iter().map(|p| p.elevation).collect();
    let display_elevation_m = smooth(&elevation_m, options.smoothing);

    let near_site = site(first.elevation, near.height_agl_m);
    let far_site = site(last.elevation, far.height_agl_m);
    let frequency_mhz = link_frequency(near.frequency_mhz, far.frequency_mhz);

    let outcome = scan(&ScanParams {
        profile,
        distances_m: &distances_m,
        tx_asl_m: near_site.asl_m,
        rx_asl_m: far_site.asl_m,
        frequency_mhz,
        zone_fraction: options.fresnel_zone.value(),
        k_factor: options.k_factor,
    })?;
    let los_clear = outcome.los_clear();
    let fresnel_clear = outcome.fresnel_clear();

    let near_radio = near.radio();
    let far_radio = far.radio();
    let forward = LinkBudget::between(
        &near_radio,
        &far_radio,
        total_distance_m,
        frequency_mhz,
        los_clear,
    )?;
    let reverse = LinkBudget::between(
        &far_radio,
        &near_radio,
        total_distance_m,
        frequency_mhz,
        los_clear,
    )?;
    let link_quality = forward.quality.min(reverse.quality);

    let elevation = ElevationStats::from_series(&elevation_m)
        .ok_or(AnalysisError::ProfileTooShort { len: n })?;

    let indices = decimate(n, options.decimate_target);
    let plot = PlotPayload {
        distances_m: pick(&distances_m, &indices),
        elevation_m: pick(&elevation_m, &indices),
        display_elevation_m: pick(&display_elevation_m, &indices),
        los_m: indices
            .iter()
            .map(|&i| {
                los_altitude(
                    near_site.asl_m,
                    far_site.asl_m,
                    distances_m[i] / total_distance_m,
                )
            })
            .collect(),
        worst_los: Marker::from(&outcome.worst_los),
        worst_fresnel: Marker::from(&outcome.worst_fresnel),
        indices,
    };

    log::debug!(
        "analyzed {} samples over {:.0} m at {} MHz: los_clear={} fresnel_clear={} quality={}",
        n,
        total_distance_m,
        frequency_mhz,
        los_clear,
        fresnel_clear,
        link_quality
    );

    Ok(AnalysisResult {
        total_distance_m,
        frequency_mhz,
        distances_m,
        elevation_m,
        display_elevation_m,
        near: near_site,
        far: far_site,
        elevation,
        worst_los: outcome.worst_los,
        worst_fresnel: outcome.worst_fresnel,
        los_clear,
        fresnel_clear,
        forward,
        reverse,
        link_quality,
        plot,
    })
}

fn site(ground_m: f64, height_agl_m: f64) -> AntennaSite {
    AntennaSite {
        ground_m,
        height_agl_m,
        asl_m: antenna_asl(ground_m, height_agl_m),
    }
}

/// Both ends normally share a channel; if not, the mean is used.
fn link_frequency(near_mhz: f64, far_mhz: f64) -> f64 {
    if near_mhz == far_mhz {
        near_mhz
    } else {
        (near_mhz + far_mhz) / 2.0
    }
}

fn pick(series: &[f64], indices: &[usize]) -> Vec<f64> {
    indices.iter().map(|&i| series[i]).collect()
}
