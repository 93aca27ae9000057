pub mod budget;
pub mod curvature;
mod error;
pub mod fresnel;

pub use budget::{LinkBudget, LinkQuality};
pub use curvature::{antenna_asl, earth_bulge, los_altitude, STANDARD_K_FACTOR};
pub use error::RfError;
pub use fresnel::{fresnel_radius, wavelength_m};
