//! # Horizon visibility
//!
//! Spherical-trigonometry test of whether an equatorial position is above the observer's
//! horizon, plus the declination band each planisphere view can draw.
//!
//! With `l` the latitude, `d` the declination and `h = π·(LST − RA)/12` the hour angle,
//! a body is under the horizon when
//!
//! ```text
//! cos l · cos d · cos h < −sin l · sin d
//! ```
//!
//! which is `sin(altitude) < 0` rearranged. NaN inputs make the comparison false, so
//! NaN positions are never reported below the horizon; [`is_plottable`] rejects them
//! through the view band instead.

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hours, DEC_MAX, RADEG};

/// Which celestial hemisphere a planisphere view is centered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Horizon {
    #[default]
    North,
    South,
}

/// `true` when `(ra, dec)` is below the horizon of an observer at `latitude` under
/// `local_sidereal_time`.
///
/// Arguments
/// ---------
/// * `ra`: right ascension (hours).
/// * `dec`: declination (degrees).
/// * `latitude`: observer latitude (degrees).
/// * `local_sidereal_time`: local sidereal time (hours).
pub fn is_below_horizon(ra: Hours, dec: Degree, latitude: Degree, local_sidereal_time: Hours) -> bool {
    let l = latitude * RADEG;
    let d = dec * RADEG;
    let h = std::f64::consts::PI * (local_sidereal_time - ra) / 12.0;

    l.cos() * d.cos() * h.cos() < -l.sin() * d.sin()
}

/// `true` when `dec` lies outside the declination band drawn by `horizon` at `latitude`.
///
/// The northern view draws the northern celestial hemisphere only. The southern view
/// draws the band `[latitude − 90, latitude]`: everything that can clear the southern
/// horizon.
pub fn outside_view_band(dec: Degree, latitude: Degree, horizon: Horizon) -> bool {
    if dec.is_nan() {
        return true;
    }
    match horizon {
        Horizon::North => dec < 0.0,
        Horizon::South => dec > latitude || dec < latitude - DEC_MAX,
    }
}

/// Inside the view band and above the horizon.
pub fn is_plottable(
    ra: Hours,
    dec: Degree,
    latitude: Degree,
    local_sidereal_time: Hours,
    horizon: Horizon,
) -> bool {
    !outside_view_band(dec, latitude, horizon)
        && !ra.is_nan()
        && !is_below_horizon(ra, dec, latitude, local_sidereal_time)
}

#[cfg(test)]
mod visibility_test {
    use super::*;
    use crate::ref_system::horizontal_from_equatorial;

    #[test]
    fn test_meridian_and_anti_meridian() {
        // on the meridian at 40°N, δ = 10° culminates at 60°
        assert!(!is_below_horizon(5.0, 10.0, 40.0, 5.0));
        // twelve hours later it is 40° under the horizon
        assert!(is_below_horizon(5.0, 10.0, 40.0, 17.0));
    }

    #[test]
    fn test_circumpolar_and_never_rising() {
        for lst in [0.0, 3.0, 6.0, 12.0, 18.0, 23.9] {
            // Polaris-like declination never sets at 40°N
            assert!(!is_below_horizon(2.5, 89.0, 40.0, lst));
            // deep southern sky never rises at 40°N
            assert!(is_below_horizon(2.5, -60.0, 40.0, lst));
        }
    }

    #[test]
    fn test_agrees_with_altitude() {
        for k in 0..200 {
            let ra = (k as f64 * 0.37) % 24.0;
            let dec = -80.0 + (k as f64 * 7.3) % 160.0;
            let lat = -60.0 + (k as f64 * 3.1) % 120.0;
            let lst = (k as f64 * 1.13) % 24.0;

            let (alt, _) = horizontal_from_equatorial(ra, dec, lat, lst);
            if alt.abs() > 1e-9 {
                assert_eq!(is_below_horizon(ra, dec, lat, lst), alt < 0.0);
            }
        }
    }

    #[test]
    fn test_view_bands() {
        assert!(outside_view_band(-1.0, 40.0, Horizon::North));
        assert!(!outside_view_band(0.0, 40.0, Horizon::North));

        // southern view at 40°N covers [−50, 40]
        assert!(!outside_view_band(-50.0, 40.0, Horizon::South));
        assert!(!outside_view_band(40.0, 40.0, Horizon::South));
        assert!(outside_view_band(40.5, 40.0, Horizon::South));
        assert!(outside_view_band(-50.5, 40.0, Horizon::South));

        assert!(outside_view_band(f64::NAN, 40.0, Horizon::North));
    }

    #[test]
    fn test_plottable() {
        assert!(is_plottable(5.0, 10.0, 40.0, 5.0, Horizon::North));
        assert!(!is_plottable(5.0, 10.0, 40.0, 17.0, Horizon::North));
        assert!(!is_plottable(5.0, -10.0, 40.0, 5.0, Horizon::North));
        assert!(is_plottable(5.0, -10.0, 40.0, 5.0, Horizon::South));
        assert!(!is_plottable(f64::NAN, 10.0, 40.0, 5.0, Horizon::North));
    }
}
