use serde::Deserialize;
use std::path::Path;

use crate::geodesy::GeoPoint;
use crate::terrain::fill_gaps;

use super::LinkError;

/// Point as reported by the elevation service; `elev_m` is null where the
/// tiles have no data.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicePoint {
    pub lat: f64,
    pub lon: f64,
    pub elev_m: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceProfile {
    pub points: Vec<ServicePoint>,
}

/// Accepted profile file layouts: a bare list of points or an elevation
/// service response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileDocument {
    Points(Vec<GeoPoint>),
    Service(ServiceProfile),
}

impl ProfileDocument {
    pub fn into_points(self) -> Result<Vec<GeoPoint>, LinkError> {
        match self {
            ProfileDocument::Points(points) => Ok(points),
            ProfileDocument::Service(service) => {
                let raw: Vec<Option<f64>> = service.points.iter().map(|p| p.elev_m).collect();
                let elevations = fill_gaps(&raw)?;
                Ok(service
                    .points
                    .iter()
                    .zip(elevations)
                    .map(|(p, e)| GeoPoint::new(p.lat, p.lon, e))
                    .collect())
            }
        }
    }
}

pub fn read_profile(path: &Path) -> Result<Vec<GeoPoint>, LinkError> {
    let content = std::fs::read_to_string(path)?;
    let document: ProfileDocument = serde_json::from_str(&content)?;
    document.into_points()
}
