use crate::geodesy::MEAN_EARTH_RADIUS_M;

/// Effective Earth radius factor for a standard atmosphere.
pub const STANDARD_K_FACTOR: f64 = 4.0 / 3.0;

/// Apparent rise of the ground at a point `d1` meters from one end and `d2`
/// meters from the other, for an effective Earth radius of `k * R`.
pub fn earth_bulge(d1: f64, d2: f64, k_factor: f64) -> f64 {
    (d1 * d2) / (2.0 * k_factor * MEAN_EARTH_RADIUS_M)
}

/// Altitude of the straight antenna-to-antenna line at `fraction` of the path
/// (0 at the near end, 1 at the far end). Curvature is not applied here.
pub fn los_altitude(tx_asl_m: f64, rx_asl_m: f64, fraction: f64) -> f64 {
    tx_asl_m + (rx_asl_m - tx_asl_m) * fraction
}

pub fn antenna_asl(ground_m: f64, height_agl_m: f64) -> f64 {
    ground_m + height_agl_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulge_is_zero_at_endpoints() {
        assert_eq!(earth_bulge(0.0, 10_000.0, STANDARD_K_FACTOR), 0.0);
        assert_eq!(earth_bulge(10_000.0, 0.0, STANDARD_K_FACTOR), 0.0);
    }

    #[test]
    fn bulge_at_midpoint_of_10km() {
        // 5000 * 5000 / (2 * 4/3 * 6371008.8) ~= 1.4716 m
        let b = earth_bulge(5_000.0, 5_000.0, STANDARD_K_FACTOR);
        assert!((b - 1.4716).abs() < 1e-3, "bulge = {}", b);
    }

    #[test]
    fn larger_k_flattens_the_bulge() {
        let standard = earth_bulge(20_000.0, 30_000.0, STANDARD_K_FACTOR);
        let flatter = earth_bulge(20_000.0, 30_000.0, 2.0);
        let geometric = earth_bulge(20_000.0, 30_000.0, 1.0);
        assert!(flatter < standard);
        assert!(standard < geometric);
    }

    #[test]
    fn los_interpolates_linearly() {
        assert_eq!(los_altitude(100.0, 200.0, 0.0), 100.0);
        assert_eq!(los_altitude(100.0, 200.0, 1.0), 200.0);
        assert_eq!(los_altitude(100.0, 200.0, 0.25), 125.0);
    }

    #[test]
    fn antenna_sits_on_ground() {
        assert_eq!(antenna_asl(312.0, 18.0), 330.0);
    }
}
