//! # Ephemeris calculators
//!
//! Low-precision positions of the Sun, the Moon and the planetary bodies for a calendar
//! instant and an observer location.
//!
//! | Module | Body | Model |
//! |---|---|---|
//! | [`sun`] | Sun | mean longitude + two-term equation of center, sunrise/sunset search |
//! | [`moon`] | Moon | mean elements + five longitude / four latitude perturbation terms, phase |
//! | [`planets`] | planets, Pluto, asteroids | J2000 mean elements with secular rates, Kepler solver |
//! | [`bodies`] | – | element table, magnitude laws and display styles |
//!
//! Every calculator returns a fresh [`CelestialPosition`] (possibly wrapped in a richer
//! type). None of them is a precision ephemeris: light-time, aberration, nutation and
//! parallax are ignored.
//!
//! Time is always read in UTC and longitudes are east-positive.

pub mod bodies;
pub mod moon;
pub mod planets;
pub mod sun;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hours};
use crate::ref_system::horizontal_from_equatorial;

/// Equatorial and horizontal coordinates of a body for one observer and instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialPosition {
    /// Right ascension (hours, `[0, 24)`).
    pub ra: Hours,
    /// Declination (degrees).
    pub dec: Degree,
    /// Altitude above the geometric horizon (degrees).
    pub altitude: Degree,
    /// Azimuth clockwise from North (degrees, `[0, 360)`).
    pub azimuth: Degree,
    /// `altitude > 0`.
    pub visible: bool,
}

impl CelestialPosition {
    /// Complete an equatorial position with the horizontal coordinates seen by an observer
    /// at `latitude` under `local_sidereal_time`.
    pub fn from_equatorial(
        ra: Hours,
        dec: Degree,
        latitude: Degree,
        local_sidereal_time: Hours,
    ) -> Self {
        let (altitude, azimuth) = horizontal_from_equatorial(ra, dec, latitude, local_sidereal_time);
        CelestialPosition {
            ra,
            dec,
            altitude,
            azimuth,
            visible: altitude > 0.0,
        }
    }
}
