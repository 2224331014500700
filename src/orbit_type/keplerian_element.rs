//! # Keplerian elements snapshot
//!
//! [`KeplerianElements`] is the classical element set `(a, e, i, Ω, ω, M)` of a body at one
//! instant, produced by [`OrbitalElements::at`](crate::orbit_type::OrbitalElements::at).
//! [`KeplerianElements::heliocentric_state`] runs the two-body chain
//!
//! ```text
//! M ──Kepler──▶ E ──half-angle──▶ v ──▶ r = a(1 − e cos E) ──R_z(Ω)R_x(i)R_z(ω)──▶ ecliptic xyz
//! ```
//!
//! The snapshot is also what a [`PlanetPosition`](crate::ephemeris::planets::PlanetPosition)
//! carries for display.

use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{AstronomicalUnit, JulianCenturies, Radian};
use crate::kepler::{
    orbital_plane_to_ecliptic, orbital_radius, solve_kepler_equation, true_anomaly, KeplerSolver,
};

/// Keplerian orbital elements at one instant.
///
/// Units
/// -----
/// * `reference_epoch`: Julian centuries since J2000.0.
/// * `semi_major_axis`: AU.
/// * `eccentricity`: unitless.
/// * `inclination`: radians.
/// * `ascending_node_longitude`: radians (Ω).
/// * `periapsis_argument`: radians (ω).
/// * `mean_anomaly`: radians (M).
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct KeplerianElements {
    pub reference_epoch: JulianCenturies,
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub mean_anomaly: Radian,
}

/// Position of a body on its orbit, heliocentric ecliptic frame.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct HeliocentricState {
    pub eccentric_anomaly: Radian,
    pub true_anomaly: Radian,
    /// Heliocentric distance (AU).
    pub radius: AstronomicalUnit,
    /// Cartesian ecliptic position (AU).
    pub position: Vector3<f64>,
}

impl KeplerianElements {
    /// Solve the orbit for the snapshot instant.
    ///
    /// Arguments
    /// ---------
    /// * `solver`: Kepler-equation strategy.
    ///
    /// Return
    /// ------
    /// * The heliocentric state. Every component is NaN when the eccentricity is outside
    ///   `[0, 1)` or the solver did not converge.
    pub fn heliocentric_state(&self, solver: KeplerSolver) -> HeliocentricState {
        let e = self.eccentricity;
        let eccentric_anomaly = solve_kepler_equation(self.mean_anomaly, e, solver);
        let v = true_anomaly(eccentric_anomaly, e);
        let radius = orbital_radius(self.semi_major_axis, e, eccentric_anomaly);

        let position = orbital_plane_to_ecliptic(
            radius,
            v,
            self.periapsis_argument,
            self.ascending_node_longitude,
            self.inclination,
        );

        HeliocentricState {
            eccentric_anomaly,
            true_anomaly: v,
            radius,
            position,
        }
    }
}

impl fmt::Display for KeplerianElements {
    /// One line, angles in degrees: `T=… a=… AU e=… i=…° Ω=…° ω=…° M=…°`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T={:+.6} a={:.6} AU e={:.6} i={:.4}° Ω={:.4}° ω={:.4}° M={:.4}°",
            self.reference_epoch,
            self.semi_major_axis,
            self.eccentricity,
            self.inclination.to_degrees(),
            self.ascending_node_longitude.to_degrees(),
            self.periapsis_argument.to_degrees(),
            self.mean_anomaly.to_degrees()
        )
    }
}
