//! # Time and epoch utilities
//!
//! Julian Date and sidereal-time conversions shared by every calculator of the crate.
//!
//! Calendar instants are carried as [`hifitime::Epoch`] values and read back in **UTC**.
//! The Julian Date is computed from the Gregorian breakdown with the classic
//! calendar algorithm (January/February shifted to the previous year, century leap
//! correction), rather than through hifitime's own time-scale conversions, so that the
//! ephemeris formulas downstream see exactly the day count they were fitted against.
//!
//! ## Sidereal time
//!
//! The Greenwich Mean Sidereal Time uses the linear J2000.0 expression
//!
//! ```text
//! GMST = 18.697374558 + 24.06570982441908 · (JD − 2451545.0)   (mod 24 h)
//! ```
//!
//! and the local sidereal time adds the east-positive longitude divided by 15.
//!
//! All functions are pure. NaN inputs propagate to NaN outputs.

use hifitime::Epoch;

use crate::constants::{
    Degree, Hours, JulianCenturies, JulianDate, DAYS_PER_CENTURY, HOURS_PER_DAY, HOURS_TO_DEG,
    J2000_JD,
};

/// GMST at the J2000.0 epoch, in hours.
const GMST_AT_J2000: Hours = 18.697_374_558;

/// Sidereal hours elapsed per solar day.
const SIDEREAL_HOURS_PER_DAY: Hours = 24.065_709_824_419_08;

/// Wrap an hour angle into `[0, 24)`.
pub fn normalize_hours(hours: Hours) -> Hours {
    let h = hours.rem_euclid(HOURS_PER_DAY);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if h >= HOURS_PER_DAY {
        0.0
    } else {
        h
    }
}

/// Julian Date from Gregorian calendar components.
///
/// Arguments
/// ---------
/// * `year`, `month` (1–12), `day` (1–31): Gregorian calendar date.
/// * `hour_fraction`: hours elapsed since midnight, fractional part included.
///
/// Return
/// ------
/// * The Julian Date (days).
pub fn julian_date_from_calendar(year: i32, month: u8, day: u8, hour_fraction: f64) -> JulianDate {
    let (mut y, mut m) = (year, month as i32);
    if m <= 2 {
        y -= 1;
        m += 12;
    }

    let a = y / 100;
    let b = 2 - a + a / 4;

    (365.25 * (y + 4716) as f64).floor()
        + (30.6001 * (m + 1) as f64).floor()
        + day as f64
        + hour_fraction / 24.0
        + b as f64
        - 1524.5
}

/// Julian Date of a calendar instant (read in UTC).
pub fn julian_date(epoch: &Epoch) -> JulianDate {
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    let hour_fraction = hour as f64
        + minute as f64 / 60.0
        + (second as f64 + nanos as f64 * 1e-9) / 3600.0;
    julian_date_from_calendar(year, month, day, hour_fraction)
}

/// Days elapsed since J2000.0.
pub fn days_since_j2000(jd: JulianDate) -> f64 {
    jd - J2000_JD
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries(jd: JulianDate) -> JulianCenturies {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Greenwich Mean Sidereal Time in hours, normalized to `[0, 24)`.
pub fn greenwich_mean_sidereal_time(jd: JulianDate) -> Hours {
    normalize_hours(GMST_AT_J2000 + SIDEREAL_HOURS_PER_DAY * days_since_j2000(jd))
}

/// Local sidereal time in hours for an east-positive longitude, from a Julian Date.
pub fn local_sidereal_time_from_jd(jd: JulianDate, longitude: Degree) -> Hours {
    normalize_hours(greenwich_mean_sidereal_time(jd) + longitude / HOURS_TO_DEG)
}

/// Local sidereal time in hours `[0, 24)` for a calendar instant and an east-positive
/// longitude in degrees.
pub fn local_sidereal_time(epoch: &Epoch, longitude: Degree) -> Hours {
    local_sidereal_time_from_jd(julian_date(epoch), longitude)
}
