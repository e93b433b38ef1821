//! Calendar and sidereal-time utilities.
//!
//! TLE epochs arrive as a two-digit year plus fractional day-of-year; the
//! propagator wants a Julian date, and the deep-space initializer needs
//! Greenwich mean sidereal time at that date. These are the small, pure
//! conversions backing both.

use crate::constants::{DEG2RAD, TAU};

/// Calendar breakdown of a fractional day-of-year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDate {
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// Seconds, fractional.
    pub second: f64,
}

/// Convert a fractional day-of-year to month/day/hour/minute/second.
///
/// Uses the catalog leap-year convention (every year divisible by 4),
/// valid for the 1957–2056 window two-digit TLE years can express.
pub fn day_of_year_to_calendar(year: i32, days: f64) -> CalendarDate {
    let mut month_lengths = [31u32, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if year % 4 == 0 {
        month_lengths[1] = 29;
    }

    let day_of_year = days.floor() as u32;
    let mut month = 1usize;
    let mut days_elapsed = 0u32;
    while month < 12 && day_of_year > days_elapsed + month_lengths[month - 1] {
        days_elapsed += month_lengths[month - 1];
        month += 1;
    }
    let day = day_of_year - days_elapsed;

    let mut temp = (days - day_of_year as f64) * 24.0;
    let hour = temp.floor();
    temp = (temp - hour) * 60.0;
    let minute = temp.floor();
    let second = (temp - minute) * 60.0;

    CalendarDate {
        month: month as u8,
        day: day as u8,
        hour: hour as u8,
        minute: minute as u8,
        second,
    }
}

/// Julian date from a calendar date and time (UT).
///
/// Standard astrodynamics formula, valid 1900–2100.
pub fn julian_day(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: f64) -> f64 {
    let year = year as f64;
    let month = month as f64;
    367.0 * year - ((7.0 * (year + ((month + 9.0) / 12.0).floor())) * 0.25).floor()
        + (275.0 * month / 9.0).floor()
        + day as f64
        + 1721013.5
        + ((second / 60.0 + minute as f64) / 60.0 + hour as f64) / 24.0
}

/// Julian date of a TLE epoch (four-digit year + fractional day-of-year).
pub fn julian_day_from_epoch(year: i32, day_of_year: f64) -> f64 {
    let cal = day_of_year_to_calendar(year, day_of_year);
    julian_day(year, cal.month, cal.day, cal.hour, cal.minute, cal.second)
}

/// Greenwich mean sidereal time (radians in [0, 2π)) at a UT1 Julian date.
///
/// IAU-82 GMST polynomial.
pub fn gstime(jdut1: f64) -> f64 {
    let tut1 = (jdut1 - 2451545.0) / 36525.0;
    let mut temp = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876600.0 * 3600.0 + 8640184.812866) * tut1
        + 67310.54841;
    // seconds of time to radians
    temp = (temp * DEG2RAD / 240.0) % TAU;
    if temp < 0.0 {
        temp += TAU;
    }
    temp
}

/// GMST via the historical AFSPC formulation.
///
/// Takes the epoch in days since 1950 Jan 0.0 UT (jd − 2433281.5).
/// Agrees with [`gstime`] to rounding; kept because the legacy ops mode
/// is defined in terms of it.
pub(crate) fn gstime_afspc(epoch_days_1950: f64) -> f64 {
    const THGR70: f64 = 1.7321343856509374;
    const C1: f64 = 1.72027916940703639e-2;
    const FK5R: f64 = 5.07551419432269442e-15;

    let ts70 = epoch_days_1950 - 7305.0;
    let ds70 = (ts70 + 1.0e-8).floor();
    let tfrac = ts70 - ds70;
    let c1p2p = C1 + TAU;
    let mut gsto = (THGR70 + C1 * ds70 + c1p2p * tfrac + ts70 * ts70 * FK5R) % TAU;
    if gsto < 0.0 {
        gsto += TAU;
    }
    gsto
}
