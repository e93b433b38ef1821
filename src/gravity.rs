//! Earth gravity model constant sets.
//!
//! SGP4 element sets are fitted against a specific gravity model, so the
//! model is an explicit, per-satellite configuration value rather than a
//! process-wide default. Space-Track distributes elements fitted to WGS-72;
//! `Wgs72` is the right choice unless you know otherwise.

use serde::{Deserialize, Serialize};

/// Named gravity model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityModel {
    /// WGS-72 with the original transcribed xke value.
    Wgs72Old,
    /// WGS-72, the standard model for distributed TLEs.
    Wgs72,
    /// WGS-84.
    Wgs84,
}

impl Default for GravityModel {
    fn default() -> Self {
        GravityModel::Wgs72
    }
}

/// Derived constant tuple for a gravity model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GravityConstants {
    /// Minutes in one "time unit" (1/xke).
    pub tumin: f64,
    /// Earth gravitational parameter (km³/s²).
    pub mu: f64,
    /// Earth equatorial radius (km).
    pub radius_earth_km: f64,
    /// sqrt(mu) in Earth-radii^1.5 per minute.
    pub xke: f64,
    /// J2 zonal harmonic.
    pub j2: f64,
    /// J3 zonal harmonic.
    pub j3: f64,
    /// J4 zonal harmonic.
    pub j4: f64,
    /// J3 / J2.
    pub j3oj2: f64,
}

impl GravityModel {
    /// Constant set for this model.
    pub fn constants(self) -> GravityConstants {
        match self {
            GravityModel::Wgs72Old => {
                // Historical value of xke carried as-is rather than rederived.
                let mu = 398600.79964;
                let radius_earth_km = 6378.135;
                let xke = 0.0743669161;
                let j2 = 0.001082616;
                let j3 = -0.00000253881;
                let j4 = -0.00000165597;
                GravityConstants {
                    tumin: 1.0 / xke,
                    mu,
                    radius_earth_km,
                    xke,
                    j2,
                    j3,
                    j4,
                    j3oj2: j3 / j2,
                }
            }
            GravityModel::Wgs72 => {
                let mu: f64 = 398600.8;
                let radius_earth_km: f64 = 6378.135;
                let xke = 60.0 / (radius_earth_km * radius_earth_km * radius_earth_km / mu).sqrt();
                let j2 = 0.001082616;
                let j3 = -0.00000253881;
                let j4 = -0.00000165597;
                GravityConstants {
                    tumin: 1.0 / xke,
                    mu,
                    radius_earth_km,
                    xke,
                    j2,
                    j3,
                    j4,
                    j3oj2: j3 / j2,
                }
            }
            GravityModel::Wgs84 => {
                let mu: f64 = 398600.5;
                let radius_earth_km: f64 = 6378.137;
                let xke = 60.0 / (radius_earth_km * radius_earth_km * radius_earth_km / mu).sqrt();
                let j2 = 0.00108262998905;
                let j3 = -0.00000253215306;
                let j4 = -0.00000161098761;
                GravityConstants {
                    tumin: 1.0 / xke,
                    mu,
                    radius_earth_km,
                    xke,
                    j2,
                    j3,
                    j4,
                    j3oj2: j3 / j2,
                }
            }
        }
    }
}
