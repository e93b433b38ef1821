//! Normalized mean orbital elements.
//!
//! Catalog TLE fields come in revolutions/day and degrees; the propagator
//! wants radians, radians/minute, and a Julian-date epoch. `Elements` is
//! that normalized form, validated on construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::epoch;
use crate::tle::Tle;

/// Element validation errors.
#[derive(Error, Debug)]
pub enum ElementsError {
    #[error("eccentricity {0} outside [0, 1)")]
    EccentricityOutOfRange(f64),

    #[error("inclination {0} deg outside [0, 180]")]
    InclinationOutOfRange(f64),
}

/// Mean orbital elements in propagator-native units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Elements {
    /// NORAD catalog number.
    pub norad_id: u32,
    /// Epoch as a Julian date (UT).
    pub epoch_jd: f64,
    /// First derivative of mean motion (rad/min²).
    pub ndot: f64,
    /// Second derivative of mean motion (rad/min³).
    pub nddot: f64,
    /// B* drag term (1/Earth radii).
    pub bstar: f64,
    /// Inclination (rad).
    pub inclination: f64,
    /// Right ascension of ascending node (rad).
    pub raan: f64,
    /// Eccentricity (dimensionless).
    pub eccentricity: f64,
    /// Argument of perigee (rad).
    pub arg_perigee: f64,
    /// Mean anomaly (rad).
    pub mean_anomaly: f64,
    /// Mean motion (rad/min), Kozai convention as published in the catalog.
    pub mean_motion: f64,
}

impl Elements {
    /// Normalize a parsed TLE into propagator units.
    ///
    /// Validates the physical range of eccentricity and inclination; unit
    /// conversion itself cannot fail.
    pub fn from_tle(tle: &Tle) -> Result<Self, ElementsError> {
        if !(0.0..1.0).contains(&tle.eccentricity) {
            return Err(ElementsError::EccentricityOutOfRange(tle.eccentricity));
        }
        if !(0.0..=180.0).contains(&tle.inclination_deg) {
            return Err(ElementsError::InclinationOutOfRange(tle.inclination_deg));
        }

        let epoch_jd = epoch::julian_day_from_epoch(tle.epoch_year as i32, tle.epoch_day);

        Ok(Elements {
            norad_id: tle.norad_id,
            epoch_jd,
            // rev/day² and rev/day³ carry one extra factor of 1440 per
            // derivative order on top of the rev/day → rad/min divisor.
            ndot: tle.mean_motion_dot / (XPDOTP * MINUTES_PER_DAY),
            nddot: tle.mean_motion_ddot / (XPDOTP * MINUTES_PER_DAY * MINUTES_PER_DAY),
            bstar: tle.bstar,
            inclination: tle.inclination_deg * DEG2RAD,
            raan: tle.raan_deg * DEG2RAD,
            eccentricity: tle.eccentricity,
            arg_perigee: tle.arg_perigee_deg * DEG2RAD,
            mean_anomaly: tle.mean_anomaly_deg * DEG2RAD,
            mean_motion: tle.mean_motion_rev_day / XPDOTP,
        })
    }

    /// Mean motion back in catalog units (revolutions per day).
    pub fn mean_motion_rev_per_day(&self) -> f64 {
        self.mean_motion * XPDOTP
    }

    /// Kozai orbital period (minutes).
    pub fn period_minutes(&self) -> f64 {
        TAU / self.mean_motion
    }

    /// Epoch in days since 1950 Jan 0.0 UT, the deep-space theory's time origin.
    pub(crate) fn epoch_days_1950(&self) -> f64 {
        self.epoch_jd - 2433281.5
    }
}
