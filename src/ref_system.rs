//! # Reference-frame helpers
//!
//! Elementary rotations and the three frame changes every calculator needs:
//!
//! ```text
//! orbital plane --(ω, i, Ω)--> ecliptic --(ε)--> equatorial --(LST, φ)--> horizontal
//! ```
//!
//! Two obliquity models coexist on purpose: the Sun and Moon calculators use the
//! low-precision per-day expression `23.439 − 0.0000004·n`, the planet calculator the
//! per-century expression `23.439291 − 0.0130102·T`.
//!
//! Azimuth is measured **clockwise from North** (N = 0°, E = 90°).

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Degree, Hours, JulianCenturies, Radian, HOURS_TO_DEG, RADEG};
use crate::time::normalize_hours;

/// Build the elementary rotation of angle `alpha` (radians) about axis `k`
/// (0 = X, 1 = Y, 2 = Z).
///
/// The rotation is active: `rotmt(alpha, k) * v` turns `v` by `+alpha` about the axis.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Low-precision mean obliquity of the ecliptic (radians) from days since J2000.0.
pub fn mean_obliquity_low_precision(days_since_j2000: f64) -> Radian {
    (23.439 - 0.000_000_4 * days_since_j2000) * RADEG
}

/// Mean obliquity of the ecliptic (radians) with its linear secular term, from Julian
/// centuries since J2000.0.
pub fn mean_obliquity_j2000(t: JulianCenturies) -> Radian {
    (23.439_291 - 0.013_010_2 * t) * RADEG
}

/// Convert ecliptic longitude/latitude (radians) to right ascension (hours, `[0, 24)`) and
/// declination (degrees).
///
/// Arguments
/// ---------
/// * `lambda`: ecliptic longitude (rad).
/// * `beta`: ecliptic latitude (rad).
/// * `obliquity`: obliquity of the ecliptic (rad).
pub fn ecliptic_to_equatorial(lambda: Radian, beta: Radian, obliquity: Radian) -> (Hours, Degree) {
    let (sin_eps, cos_eps) = obliquity.sin_cos();
    let (sin_lambda, cos_lambda) = lambda.sin_cos();

    let alpha = (sin_lambda * cos_eps - beta.tan() * sin_eps).atan2(cos_lambda);
    let delta = (beta.sin() * cos_eps + beta.cos() * sin_eps * sin_lambda).asin();

    (
        normalize_hours(alpha.to_degrees() / HOURS_TO_DEG),
        delta.to_degrees(),
    )
}

/// Rotate an ecliptic-frame cartesian vector into the equatorial frame.
pub fn ecliptic_vector_to_equatorial(ecliptic: &Vector3<f64>, obliquity: Radian) -> Vector3<f64> {
    rotmt(obliquity, 0) * ecliptic
}

/// Right ascension (hours, `[0, 24)`) and declination (degrees) of an equatorial vector.
///
/// The vector does not need to be normalized; a zero vector yields NaN.
pub fn equatorial_to_radec(equatorial: &Vector3<f64>) -> (Hours, Degree) {
    let norm = equatorial.norm();
    let ra = equatorial.y.atan2(equatorial.x).to_degrees() / HOURS_TO_DEG;
    let dec = (equatorial.z / norm).asin().to_degrees();
    (normalize_hours(ra), dec)
}

/// Hour angle in hours, normalized to `[0, 24)`.
pub fn hour_angle(local_sidereal_time: Hours, ra: Hours) -> Hours {
    normalize_hours(local_sidereal_time - ra)
}

/// Horizontal coordinates of an equatorial position.
///
/// Arguments
/// ---------
/// * `ra`: right ascension (hours).
/// * `dec`: declination (degrees).
/// * `latitude`: observer geodetic latitude (degrees).
/// * `local_sidereal_time`: local sidereal time (hours).
///
/// Return
/// ------
/// * `(altitude, azimuth)` in degrees, azimuth in `[0, 360)` clockwise from North.
pub fn horizontal_from_equatorial(
    ra: Hours,
    dec: Degree,
    latitude: Degree,
    local_sidereal_time: Hours,
) -> (Degree, Degree) {
    let h = hour_angle(local_sidereal_time, ra) * HOURS_TO_DEG * RADEG;
    let lat = latitude * RADEG;
    let dec = dec * RADEG;

    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_h, cos_h) = h.sin_cos();

    let altitude = (sin_lat * dec.sin() + cos_lat * dec.cos() * cos_h).asin();
    let azimuth = (-sin_h).atan2(dec.tan() * cos_lat - sin_lat * cos_h);

    let mut azimuth = azimuth.to_degrees();
    if azimuth < 0.0 {
        azimuth += 360.0;
    }
    (altitude.to_degrees(), azimuth)
}
