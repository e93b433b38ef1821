//! Shared numeric constants.

/// Two pi
pub const TAU: f64 = std::f64::consts::TAU;

/// Degrees to radians
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;

/// Minutes per solar day
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Revolutions/day → radians/minute divisor: 1440 / (2π)
pub const XPDOTP: f64 = MINUTES_PER_DAY / TAU;

/// Orbital period threshold separating near-Earth from deep-space (minutes)
pub const DEEP_SPACE_PERIOD_MIN: f64 = 225.0;
