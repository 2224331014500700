//! # Orbital element representations
//!
//! Bodies are described by **mean orbital elements at J2000.0** with linear secular
//! rates per Julian century:
//!
//! ```text
//! x(T) = x₀ + ẋ · T        T = (JD − 2451545.0) / 36525
//! ```
//!
//! - [`OrbitalElements`] holds the per-body constants (degrees and AU, as tabulated).
//! - [`keplerian_element::KeplerianElements`] is the snapshot `(a, e, i, Ω, ω, M)` at a
//!   given `T`, in radians, obtained with [`OrbitalElements::at`].
//!
//! The tabulated angular element is the **longitude of perihelion** `ϖ = Ω + ω`; the
//! snapshot carries the argument of perihelion `ω = ϖ − Ω` and the mean anomaly
//! `M = L − ϖ`.
//!
//! ## Example
//!
//! ```rust
//! use planisphere::orbit_type::{OrbitalElements, Secular};
//!
//! let elements = OrbitalElements {
//!     semi_major_axis: Secular::fixed(1.0),
//!     eccentricity: Secular::new(0.0167, -0.00004),
//!     inclination: Secular::fixed(0.0),
//!     ascending_node_longitude: Secular::fixed(0.0),
//!     perihelion_longitude: Secular::new(102.94, 0.32),
//!     mean_longitude: Secular::new(100.46, 35999.37),
//! };
//!
//! let snapshot = elements.at(0.24);
//! assert!(snapshot.mean_anomaly >= 0.0);
//! ```
use serde::{Deserialize, Serialize};

use crate::constants::{JulianCenturies, RADEG};
use crate::kepler::principal_angle;
use crate::orbit_type::keplerian_element::KeplerianElements;

/// Classical Keplerian elements snapshot and the heliocentric state derived from it.
pub mod keplerian_element;

/// One element with its linear secular rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Secular {
    /// Value at J2000.0.
    pub at_epoch: f64,
    /// Change per Julian century.
    pub per_century: f64,
}

impl Secular {
    pub const fn new(at_epoch: f64, per_century: f64) -> Self {
        Secular {
            at_epoch,
            per_century,
        }
    }

    /// An element without secular drift.
    pub const fn fixed(at_epoch: f64) -> Self {
        Secular::new(at_epoch, 0.0)
    }

    /// Value at `t` Julian centuries from J2000.0.
    pub fn at(&self, t: JulianCenturies) -> f64 {
        self.at_epoch + self.per_century * t
    }
}

/// Mean J2000.0 elements of a body with their secular rates.
///
/// Units
/// -----
/// * `semi_major_axis`: AU.
/// * `eccentricity`: unitless.
/// * `inclination`, `ascending_node_longitude`, `perihelion_longitude`,
///   `mean_longitude`: degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis: Secular,
    pub eccentricity: Secular,
    pub inclination: Secular,
    pub ascending_node_longitude: Secular,
    pub perihelion_longitude: Secular,
    pub mean_longitude: Secular,
}

impl OrbitalElements {
    /// Evaluate the elements at `t` Julian centuries from J2000.0.
    ///
    /// Angles are converted to radians and normalized to `[0, 2π)`, inclination excepted
    /// (kept signed, a negative tabulated inclination is a valid small tilt).
    pub fn at(&self, t: JulianCenturies) -> KeplerianElements {
        let node = self.ascending_node_longitude.at(t) * RADEG;
        let perihelion = self.perihelion_longitude.at(t) * RADEG;
        let mean_longitude = self.mean_longitude.at(t) * RADEG;

        KeplerianElements {
            reference_epoch: t,
            semi_major_axis: self.semi_major_axis.at(t),
            eccentricity: self.eccentricity.at(t),
            inclination: self.inclination.at(t) * RADEG,
            ascending_node_longitude: principal_angle(node),
            periapsis_argument: principal_angle(perihelion - node),
            mean_anomaly: principal_angle(mean_longitude - perihelion),
        }
    }
}
