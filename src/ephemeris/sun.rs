//! # Sun position
//!
//! With `n` the days since J2000.0:
//!
//! ```text
//! L = 280.460 + 0.9856474·n            (mean longitude, mod 360)
//! g = 357.528 + 0.9856003·n            (mean anomaly)
//! λ = L + 1.915·sin g + 0.020·sin 2g   (ecliptic longitude, β = 0)
//! ε = 23.439 − 0.0000004·n
//! ```
//!
//! The ecliptic position is rotated to the equator by `ε`, then to the observer's horizon.
//!
//! [`sunrise`] and [`sunset`] search the geometric horizon crossing of a UTC date
//! iteratively, using the hour angle at which the current declination meets the horizon.

use hifitime::{Epoch, Unit};
use log::{debug, warn};

use crate::constants::{Degree, JulianDate, Radian, HOURS_PER_DAY, HOURS_TO_DEG, RADEG};
use crate::ephemeris::CelestialPosition;
use crate::ref_system::{ecliptic_to_equatorial, hour_angle, mean_obliquity_low_precision};
use crate::time::{days_since_j2000, julian_date, local_sidereal_time_from_jd};

/// Maximum number of refinements of a sunrise/sunset guess.
const MAX_EVENT_ITERATIONS: usize = 10;

/// Altitude (degrees) under which a guess is accepted as the horizon crossing.
const HORIZON_TOLERANCE: Degree = 0.1;

/// Ratio of sidereal to solar time rates.
const SIDEREAL_RATE: f64 = 1.002_737_909_35;

/// Ecliptic longitude of the Sun (radians) at `n` days from J2000.0.
///
/// Shared with the Moon calculator for the elongation.
pub fn sun_ecliptic_longitude(days_since_j2000: f64) -> Radian {
    let n = days_since_j2000;
    let mean_longitude = (280.460 + 0.985_647_4 * n).rem_euclid(360.0);
    let g = ((357.528 + 0.985_600_3 * n) % 360.0) * RADEG;
    (mean_longitude + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()) * RADEG
}

/// Sun position for a Julian Date and an observer (degrees, longitude east-positive).
pub fn sun_position_at_jd(jd: JulianDate, latitude: Degree, longitude: Degree) -> CelestialPosition {
    let n = days_since_j2000(jd);
    let lambda = sun_ecliptic_longitude(n);
    let (ra, dec) = ecliptic_to_equatorial(lambda, 0.0, mean_obliquity_low_precision(n));

    let lst = local_sidereal_time_from_jd(jd, longitude);
    CelestialPosition::from_equatorial(ra, dec, latitude, lst)
}

/// Sun position for a calendar instant (UTC) and an observer.
///
/// Arguments
/// ---------
/// * `epoch`: the instant, read in UTC.
/// * `latitude`: observer latitude (degrees).
/// * `longitude`: observer longitude, east-positive (degrees).
///
/// Return
/// ------
/// * RA/Dec, altitude/azimuth and `visible = altitude > 0`.
pub fn sun_position(epoch: &Epoch, latitude: Degree, longitude: Degree) -> CelestialPosition {
    sun_position_at_jd(julian_date(epoch), latitude, longitude)
}

/// Sunrise of the UTC date of `date`, `None` during polar day or night.
pub fn sunrise(date: &Epoch, latitude: Degree, longitude: Degree) -> Option<Epoch> {
    sun_event(date, latitude, longitude, true)
}

/// Sunset following the local noon of the UTC date of `date`, `None` during polar day or
/// night.
pub fn sunset(date: &Epoch, latitude: Degree, longitude: Degree) -> Option<Epoch> {
    sun_event(date, latitude, longitude, false)
}

fn sun_event(date: &Epoch, latitude: Degree, longitude: Degree, rising: bool) -> Option<Epoch> {
    let (year, month, day, _, _, _, _) = date.to_gregorian_utc();

    // first guess: local mean noon
    let noon = Epoch::from_gregorian_utc_hms(year, month, day, 12, 0, 0);
    let mut guess = noon + Unit::Second * (-longitude / HOURS_TO_DEG * 3600.0).round();

    for _ in 0..MAX_EVENT_ITERATIONS {
        let jd = julian_date(&guess);
        let sun = sun_position_at_jd(jd, latitude, longitude);

        if sun.altitude.abs() < HORIZON_TOLERANCE {
            return Some(guess);
        }

        // hour angle at which the current declination crosses the horizon
        let cos_h0 = -(latitude * RADEG).tan() * (sun.dec * RADEG).tan();
        if !(-1.0..=1.0).contains(&cos_h0) {
            debug!(
                "No sun {} at latitude {latitude}: polar {}",
                if rising { "rise" } else { "set" },
                if cos_h0 < -1.0 { "day" } else { "night" }
            );
            return None;
        }
        let h0 = cos_h0.acos().to_degrees() / HOURS_TO_DEG;

        let mut ha = hour_angle(local_sidereal_time_from_jd(jd, longitude), sun.ra);
        if ha > HOURS_PER_DAY / 2.0 {
            ha -= HOURS_PER_DAY;
        }

        let target = if rising { -h0 } else { h0 };
        let step_seconds = ((target - ha) / SIDEREAL_RATE * 3600.0).round();
        guess = guess + Unit::Second * step_seconds;
    }

    warn!(
        "Sun {} search did not converge after {MAX_EVENT_ITERATIONS} iterations (lat {latitude}, lon {longitude})",
        if rising { "rise" } else { "set" }
    );
    None
}
