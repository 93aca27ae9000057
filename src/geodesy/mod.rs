mod error;
mod sampling;
mod types;

pub use error::GeodesyError;
pub use sampling::{sample_path, PathSamples, MAX_SAMPLE_POINTS};
pub use types::{Coordinates, GeoPoint};

/// Mean Earth radius (IUGG), meters.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Great-circle distance between two coordinates using the haversine formula.
pub fn distance_meters(a: Coordinates, b: Coordinates) -> f64 {
    if a == b {
        return 0.0;
    }
    let lat1 = a.lat_rad();
    let lat2 = b.lat_rad();
    let dlat = lat2 - lat1;
    let dlon = b.lon_rad() - a.lon_rad();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h marginally past 1 for antipodal points.
    2.0 * MEAN_EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Along-path distance of every point from the first one.
pub fn cumulative_distances<I>(points: I) -> Vec<f64>
where
    I: IntoIterator<Item = Coordinates>,
{
    let mut out = Vec::new();
    let mut prev: Option<Coordinates> = None;
    let mut total = 0.0;

    for point in points {
        if let Some(p) = prev {
            total += distance_meters(p, point);
        }
        out.push(total);
        prev = Some(point);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_apart() {
        let p = Coordinates::new(42.36, -71.06);
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        let expected = MEAN_EARTH_RADIUS_M * 1f64.to_radians();
        assert!((distance_meters(a, b) - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(42.0, 45.0);
        let b = Coordinates::new(42.5, 45.3);
        assert_eq!(distance_meters(a, b), distance_meters(b, a));
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 180.0);
        let d = distance_meters(a, b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * MEAN_EARTH_RADIUS_M).abs() < 1e-3);
    }

    #[test]
    fn cumulative_starts_at_zero_and_accumulates() {
        let points = [
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0, 0.01),
            Coordinates::new(0.0, 0.01),
            Coordinates::new(0.0, 0.02),
        ];
        let d = cumulative_distances(points);
        assert_eq!(d.len(), 4);
        assert_eq!(d[0], 0.0);
        assert!(d[1] > 0.0);
        assert_eq!(d[1], d[2]);
        assert!((d[3] - 2.0 * d[1]).abs() < 1e-6);
    }

    #[test]
    fn cumulative_of_empty_input_is_empty() {
        assert!(cumulative_distances(Vec::new()).is_empty());
    }
}
