use crate::geodesy::SPEED_OF_LIGHT_M_S;

pub fn wavelength_m(frequency_mhz: f64) -> f64 {
    SPEED_OF_LIGHT_M_S / (frequency_mhz * 1e6)
}

/// Radius of the first Fresnel zone scaled by `zone_fraction`, at a point
/// `d1`/`d2` meters from the two ends. Zero at either end.
pub fn fresnel_radius(d1: f64, d2: f64, frequency_mhz: f64, zone_fraction: f64) -> f64 {
    if d1 == 0.0 || d2 == 0.0 {
        return 0.0;
    }
    zone_fraction * (wavelength_m(frequency_mhz) * d1 * d2 / (d1 + d2)).sqrt()
}
