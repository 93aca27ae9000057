use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rf::budget::Radio;
use crate::rf::STANDARD_K_FACTOR;
use crate::terrain::Smoothing;

use super::error::AnalysisError;

pub use crate::geodesy::GeoPoint;

pub const DEFAULT_DECIMATE_TARGET: usize = 800;
pub const DEFAULT_RX_SENSITIVITY_DBM: f64 = -100.0;

/// Which end of the link a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Station {
    Near,
    Far,
}

/// Radio and mast parameters of one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Antenna height above ground.
    pub height_agl_m: f64,
    pub frequency_mhz: f64,
    pub tx_power_w: f64,
    #[serde(default)]
    pub antenna_gain_dbi: f64,
    #[serde(default = "default_rx_sensitivity")]
    pub rx_sensitivity_dbm: f64,
    #[serde(default)]
    pub cable_loss_db: f64,
}

fn default_rx_sensitivity() -> f64 {
    DEFAULT_RX_SENSITIVITY_DBM
}

impl StationParameters {
    pub fn validate(&self, station: Station) -> Result<(), AnalysisError> {
        if !self.frequency_mhz.is_finite() || self.frequency_mhz <= 0.0 {
            return Err(AnalysisError::InvalidFrequency {
                station,
                value: self.frequency_mhz,
            });
        }
        if !self.height_agl_m.is_finite() || self.height_agl_m < 0.0 {
            return Err(AnalysisError::InvalidAntennaHeight {
                station,
                value: self.height_agl_m,
            });
        }
        if !self.tx_power_w.is_finite() || self.tx_power_w <= 0.0 {
            return Err(AnalysisError::InvalidTransmitPower {
                station,
                value: self.tx_power_w,
            });
        }
        Ok(())
    }

    pub fn radio(&self) -> Radio {
        Radio {
            tx_power_w: self.tx_power_w,
            antenna_gain_dbi: self.antenna_gain_dbi,
            rx_sensitivity_dbm: self.rx_sensitivity_dbm,
            cable_loss_db: self.cable_loss_db,
        }
    }
}

/// Portion of the first Fresnel zone that must stay clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum ZoneFraction {
    Full,
    #[default]
    Planning,
}

impl ZoneFraction {
    pub fn value(self) -> f64 {
        match self {
            ZoneFraction::Full => 1.0,
            ZoneFraction::Planning => 0.6,
        }
    }
}

impl TryFrom<f64> for ZoneFraction {
    type Error = AnalysisError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 1.0 {
            Ok(ZoneFraction::Full)
        } else if value == 0.6 {
            Ok(ZoneFraction::Planning)
        } else {
            Err(AnalysisError::InvalidZoneFraction(value))
        }
    }
}

impl From<ZoneFraction> for f64 {
    fn from(zone: ZoneFraction) -> f64 {
        zone.value()
    }
}

/// Tunables of a single analysis. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AnalysisOptions {
    #[schema(value_type = f64, example = 0.6)]
    pub fresnel_zone: ZoneFraction,
    pub k_factor: f64,
    pub smoothing: Smoothing,
    /// Point budget of the plotting payload; `None` keeps every sample.
    pub decimate_target: Option<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            fresnel_zone: ZoneFraction::default(),
            k_factor: STANDARD_K_FACTOR,
            smoothing: Smoothing::default(),
            decimate_target: Some(DEFAULT_DECIMATE_TARGET),
        }
    }
}

impl AnalysisOptions {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(AnalysisError::InvalidKFactor(self.k_factor));
        }
        if self.decimate_target == Some(0) {
            return Err(AnalysisError::InvalidDecimateTarget);
        }
        Ok(())
    }
}
