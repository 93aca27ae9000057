use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::RfError;

pub const EXCELLENT_MARGIN_DB: f64 = 20.0;
pub const GOOD_MARGIN_DB: f64 = 10.0;
pub const MARGINAL_MARGIN_DB: f64 = 5.0;

/// Categorical verdict on a radio link, ordered from worst to best.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LinkQuality {
    NoLink,
    Poor,
    Marginal,
    Good,
    Excellent,
}

impl LinkQuality {
    pub fn classify(los_clear: bool, margin_db: f64) -> Self {
        if !los_clear || margin_db < 0.0 {
            LinkQuality::NoLink
        } else if margin_db >= EXCELLENT_MARGIN_DB {
            LinkQuality::Excellent
        } else if margin_db >= GOOD_MARGIN_DB {
            LinkQuality::Good
        } else if margin_db >= MARGINAL_MARGIN_DB {
            LinkQuality::Marginal
        } else {
            LinkQuality::Poor
        }
    }
}

/// Free-space path loss (Friis) in dB.
pub fn free_space_path_loss_db(distance_m: f64, frequency_mhz: f64) -> Result<f64, RfError> {
    if distance_m.is_nan() || distance_m <= 0.0 {
        return Err(RfError::NonPositiveDistance(distance_m));
    }
    if frequency_mhz.is_nan() || frequency_mhz <= 0.0 {
        return Err(RfError::NonPositiveFrequency(frequency_mhz));
    }
    let distance_km = distance_m / 1000.0;
    Ok(20.0 * distance_km.log10() + 20.0 * frequency_mhz.log10() + 32.45)
}

pub fn watts_to_dbm(watts: f64) -> Result<f64, RfError> {
    if watts.is_nan() || watts <= 0.0 {
        return Err(RfError::NonPositivePower(watts));
    }
    Ok(10.0 * (watts * 1000.0).log10())
}

pub fn received_signal_dbm(
    tx_power_dbm: f64,
    tx_gain_dbi: f64,
    path_loss_db: f64,
    rx_gain_dbi: f64,
    cable_loss_db: f64,
) -> f64 {
    tx_power_dbm + tx_gain_dbi - path_loss_db + rx_gain_dbi - cable_loss_db
}

pub fn link_margin_db(received_dbm: f64, sensitivity_dbm: f64) -> f64 {
    received_dbm - sensitivity_dbm
}

/// Radio characteristics of one end of a link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radio {
    pub tx_power_w: f64,
    pub antenna_gain_dbi: f64,
    pub rx_sensitivity_dbm: f64,
    pub cable_loss_db: f64,
}

/// One-way budget from a transmitting radio to a receiving one.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LinkBudget {
    pub frequency_mhz: f64,
    pub distance_km: f64,
    pub path_loss_db: f64,
    pub tx_power_dbm: f64,
    pub eirp_dbm: f64,
    pub received_signal_dbm: f64,
    pub margin_db: f64,
    pub quality: LinkQuality,
}

impl LinkBudget {
    /// Cable loss at both ends is charged to the link.
    pub fn between(
        tx: &Radio,
        rx: &Radio,
        distance_m: f64,
        frequency_mhz: f64,
        los_clear: bool,
    ) -> Result<Self, RfError> {
        let path_loss_db = free_space_path_loss_db(distance_m, frequency_mhz)?;
        let tx_power_dbm = watts_to_dbm(tx.tx_power_w)?;
        let cable_loss_db = tx.cable_loss_db + rx.cable_loss_db;
        let received = received_signal_dbm(
            tx_power_dbm,
            tx.antenna_gain_dbi,
            path_loss_db,
            rx.antenna_gain_dbi,
            cable_loss_db,
        );
        let margin_db = link_margin_db(received, rx.rx_sensitivity_dbm);

        Ok(LinkBudget {
            frequency_mhz,
            distance_km: distance_m / 1000.0,
            path_loss_db,
            tx_power_dbm,
            eirp_dbm: tx_power_dbm + tx.antenna_gain_dbi - tx.cable_loss_db,
            received_signal_dbm: received,
            margin_db,
            quality: LinkQuality::classify(los_clear, margin_db),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radio(tx_power_w: f64, gain: f64, sensitivity: f64, cable: f64) -> Radio {
        Radio {
            tx_power_w,
            antenna_gain_dbi: gain,
            rx_sensitivity_dbm: sensitivity,
            cable_loss_db: cable,
        }
    }

    #[test]
    fn fspl_10km_at_915mhz() {
        let loss = free_space_path_loss_db(10_000.0, 915.0).unwrap();
        assert!((loss - 111.68).abs() < 0.1, "loss = {}", loss);
    }

    #[test]
    fn fspl_rejects_zero_distance() {
        assert_eq!(
            free_space_path_loss_db(0.0, 915.0),
            Err(RfError::NonPositiveDistance(0.0))
        );
        assert!(free_space_path_loss_db(-5.0, 915.0).is_err());
        assert!(free_space_path_loss_db(1_000.0, 0.0).is_err());
    }

    #[test]
    fn one_watt_is_30_dbm() {
        assert!((watts_to_dbm(1.0).unwrap() - 30.0).abs() < 1e-12);
        assert!((watts_to_dbm(0.1).unwrap() - 20.0).abs() < 1e-12);
        assert!(watts_to_dbm(0.0).is_err());
    }

    #[test]
    fn received_and_margin() {
        let rx = received_signal_dbm(30.0, 6.0, 110.0, 6.0, 2.0);
        assert_eq!(rx, -70.0);
        assert_eq!(link_margin_db(rx, -90.0), 20.0);
    }

    #[test]
    fn quality_thresholds_are_inclusive() {
        assert_eq!(LinkQuality::classify(true, 20.0), LinkQuality::Excellent);
        assert_eq!(LinkQuality::classify(true, 19.999), LinkQuality::Good);
        assert_eq!(LinkQuality::classify(true, 10.0), LinkQuality::Good);
        assert_eq!(LinkQuality::classify(true, 9.999), LinkQuality::Marginal);
        assert_eq!(LinkQuality::classify(true, 5.0), LinkQuality::Marginal);
        assert_eq!(LinkQuality::classify(true, 4.999), LinkQuality::Poor);
        assert_eq!(LinkQuality::classify(true, 0.0), LinkQuality::Poor);
        assert_eq!(LinkQuality::classify(true, -0.001), LinkQuality::NoLink);
    }

    #[test]
    fn blocked_los_means_no_link() {
        assert_eq!(LinkQuality::classify(false, 50.0), LinkQuality::NoLink);
    }

    #[test]
    fn quality_ordering_and_labels() {
        assert!(LinkQuality::NoLink < LinkQuality::Poor);
        assert!(LinkQuality::Good < LinkQuality::Excellent);
        assert_eq!(LinkQuality::NoLink.to_string(), "no-link");
        assert_eq!(
            serde_json::to_string(&LinkQuality::Marginal).unwrap(),
            "\"marginal\""
        );
    }

    #[test]
    fn budget_charges_both_cables() {
        let tx = radio(1.0, 10.0, -95.0, 1.5);
        let rx = radio(1.0, 12.0, -95.0, 0.5);
        let budget = LinkBudget::between(&tx, &rx, 10_000.0, 915.0, true).unwrap();
        let expected = 30.0 + 10.0 - budget.path_loss_db + 12.0 - 2.0;
        assert!((budget.received_signal_dbm - expected).abs() < 1e-9);
        assert!((budget.margin_db - (expected + 95.0)).abs() < 1e-9);
        assert_eq!(budget.eirp_dbm, 38.5);
        assert_eq!(budget.distance_km, 10.0);
    }
}
