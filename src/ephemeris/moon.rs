//! # Moon position and phase
//!
//! With `d` the days since J2000.0, the Moon's mean longitude `L`, mean anomaly `M` and
//! argument of latitude `F` are linear in `d`. The ecliptic coordinates add the leading
//! periodic terms (degrees):
//!
//! ```text
//! λ = L + 6.289 sin M + 1.274 sin(2L − M) + 0.658 sin 2L + 0.214 sin 2M + 0.110 sin(M + 2L)
//! β =     5.128 sin F + 0.281 sin(M + F)  + 0.278 sin(M − F) + 0.173 sin(2L − F)
//! ```
//!
//! ## Phase
//!
//! The elongation `ψ = λ_moon − λ_sun` sets the phase angle `i = π − ψ` and the illuminated
//! fraction `k = (1 + cos i) / 2`: `k = 0` at conjunction (new moon), `k = 1` at opposition.
//! [`MoonPhase::classify`] buckets `(k, ψ)` into the eight traditional names.

use std::fmt;

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, JulianDate, DPI, RADEG};
use crate::ephemeris::sun::sun_ecliptic_longitude;
use crate::ephemeris::CelestialPosition;
use crate::ref_system::{ecliptic_to_equatorial, mean_obliquity_low_precision};
use crate::time::{days_since_j2000, julian_date, local_sidereal_time_from_jd};

/// The eight named lunar phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Bucket an illuminated fraction and an elongation into a named phase.
    ///
    /// The boundaries are piecewise and overlap. Rules are tried in order, and quarters are
    /// only reported within ±10° of quadrature with 40–60 % illumination.
    ///
    /// Arguments
    /// ---------
    /// * `illumination`: illuminated fraction in `[0, 1]`.
    /// * `elongation`: Moon − Sun ecliptic longitude (degrees, any range).
    pub fn classify(illumination: f64, elongation: Degree) -> MoonPhase {
        let pd = elongation.rem_euclid(360.0);
        let k = illumination;

        if k < 0.05 {
            MoonPhase::NewMoon
        } else if pd < 90.0 && k < 0.5 {
            MoonPhase::WaxingCrescent
        } else if (80.0..=100.0).contains(&pd) && (0.4..=0.6).contains(&k) {
            MoonPhase::FirstQuarter
        } else if pd < 180.0 && k < 0.95 {
            MoonPhase::WaxingGibbous
        } else if k >= 0.95 {
            MoonPhase::FullMoon
        } else if pd > 180.0 && pd < 270.0 && k > 0.5 {
            MoonPhase::WaningGibbous
        } else if (260.0..=280.0).contains(&pd) && (0.4..=0.6).contains(&k) {
            MoonPhase::LastQuarter
        } else {
            MoonPhase::WaningCrescent
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Moon position with its phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPosition {
    pub position: CelestialPosition,
    /// Illuminated fraction of the disk, `[0, 1]`.
    pub illumination: f64,
    pub phase: MoonPhase,
    /// Moon − Sun ecliptic longitude, degrees in `[0, 360)`.
    pub elongation: Degree,
    /// Ecliptic longitude (degrees, `[0, 360)`).
    pub ecliptic_longitude: Degree,
    /// Ecliptic latitude (degrees).
    pub ecliptic_latitude: Degree,
    /// Earth–Moon distance (km).
    pub distance_km: f64,
}

/// Moon position and phase for a Julian Date and an observer.
pub fn moon_position_at_jd(jd: JulianDate, latitude: Degree, longitude: Degree) -> MoonPosition {
    let d = days_since_j2000(jd);

    let l = ((218.316 + 13.176_396 * d) % 360.0) * RADEG;
    let m = ((134.963 + 13.064_993 * d) % 360.0) * RADEG;
    let f = ((93.272 + 13.229_350 * d) % 360.0) * RADEG;

    let lambda = l + (6.289 * m.sin()
        + 1.274 * (2.0 * l - m).sin()
        + 0.658 * (2.0 * l).sin()
        + 0.214 * (2.0 * m).sin()
        + 0.110 * (m + 2.0 * l).sin())
        * RADEG;

    let beta = (5.128 * f.sin()
        + 0.281 * (m + f).sin()
        + 0.278 * (m - f).sin()
        + 0.173 * (2.0 * l - f).sin())
        * RADEG;

    let distance_km = 385_000.56
        + 20_905.355 * m.cos()
        + 3_699.111 * (2.0 * l - m).cos()
        + 2_955.968 * (2.0 * l).cos()
        + 569.925 * (2.0 * m).cos();

    let (ra, dec) = ecliptic_to_equatorial(lambda, beta, mean_obliquity_low_precision(d));

    let elongation = lambda - sun_ecliptic_longitude(d);
    let illumination = (1.0 - elongation.cos()) / 2.0;
    let elongation_deg = elongation.rem_euclid(DPI).to_degrees();

    let lst = local_sidereal_time_from_jd(jd, longitude);

    MoonPosition {
        position: CelestialPosition::from_equatorial(ra, dec, latitude, lst),
        illumination,
        phase: MoonPhase::classify(illumination, elongation_deg),
        elongation: elongation_deg,
        ecliptic_longitude: lambda.rem_euclid(DPI).to_degrees(),
        ecliptic_latitude: beta.to_degrees(),
        distance_km,
    }
}

/// Moon position and phase for a calendar instant (UTC) and an observer
/// (degrees, longitude east-positive).
pub fn moon_position(epoch: &Epoch, latitude: Degree, longitude: Degree) -> MoonPosition {
    moon_position_at_jd(julian_date(epoch), latitude, longitude)
}

#[cfg(test)]
mod moon_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_new_moon_2024_01_11() {
        let t = Epoch::from_gregorian_utc_hms(2024, 1, 11, 11, 57, 0);
        let moon = moon_position(&t, 0.0, 0.0);

        assert!(moon.illumination < 0.01);
        assert_eq!(moon.phase, MoonPhase::NewMoon);
        assert_abs_diff_eq!(moon.position.ra, 19.3365, epsilon = 1e-3);
        assert_abs_diff_eq!(moon.position.dec, -27.475, epsilon = 1e-2);
    }

    #[test]
    fn test_full_moon_2024_01_25() {
        let t = Epoch::from_gregorian_utc_hms(2024, 1, 25, 17, 54, 0);
        let moon = moon_position(&t, 0.0, 0.0);

        assert!(moon.illumination > 0.99);
        assert_eq!(moon.phase, MoonPhase::FullMoon);
        assert_abs_diff_eq!(moon.elongation, 180.0, epsilon = 3.0);
        assert_abs_diff_eq!(moon.position.ra, 8.6932, epsilon = 1e-3);
        assert_abs_diff_eq!(moon.position.dec, 23.478, epsilon = 1e-2);
    }

    #[test]
    fn test_distance_range() {
        for k in 0..60 {
            let moon = moon_position_at_jd(2_460_310.5 + k as f64 * 0.5, 10.0, 20.0);
            assert!(
                (355_000.0..415_000.0).contains(&moon.distance_km),
                "distance {}",
                moon.distance_km
            );
            assert!(moon.ecliptic_latitude.abs() < 5.9);
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(MoonPhase::classify(0.0, 0.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(0.3, 60.0), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::classify(0.5, 90.0), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::classify(0.7, 120.0), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::classify(0.97, 185.0), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::classify(0.8, 220.0), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::classify(0.5, 270.0), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::classify(0.2, 310.0), MoonPhase::WaningCrescent);

        // elongation is wrapped before bucketing
        assert_eq!(MoonPhase::classify(0.3, 420.0), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::FirstQuarter.to_string(), "First Quarter");
    }
}
