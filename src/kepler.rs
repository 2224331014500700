//! # Kepler-equation solver and orbital-plane geometry
//!
//! Shared by the planet calculator. Given a mean anomaly `M` and an eccentricity `e`,
//! the solver returns the eccentric anomaly `E` of
//!
//! ```text
//! M = E − e·sin(E)
//! ```
//!
//! Two strategies are available through [`KeplerSolver`]:
//!
//! * [`KeplerSolver::FixedPoint`] – a single closed-form update
//!   `E = M + e·sin(M)·(1 + e·cos(M))`, accurate to `O(e³)`. This is the default and
//!   is adequate at planetary eccentricities for a visualization target of ~1°.
//! * [`KeplerSolver::NewtonRaphson`] – Newton iterations converged to a tolerance with
//!   [`roots::find_root_newton_raphson`].
//!
//! Only elliptic orbits (`0 ≤ e < 1`) are solved; any other eccentricity, or a NaN input,
//! yields NaN so that the caller silently omits the body.

use std::f64::consts::PI;

use nalgebra::Vector3;
use roots::{find_root_newton_raphson, SimpleConvergency};
use serde::{Deserialize, Serialize};

use crate::constants::{AstronomicalUnit, Radian, DPI};
use crate::planisphere_errors::PlanisphereError;
use crate::ref_system::rotmt;

/// Strategy used to obtain the eccentric anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum KeplerSolver {
    /// One fixed-point update, not iterated.
    #[default]
    FixedPoint,
    /// Newton–Raphson iterations until `|ΔE| < tolerance` or `max_iter` is reached.
    NewtonRaphson { tolerance: f64, max_iter: usize },
}

impl KeplerSolver {
    /// Newton–Raphson with a tolerance close to machine precision.
    pub fn converged() -> Self {
        KeplerSolver::NewtonRaphson {
            tolerance: 1e-13,
            max_iter: 50,
        }
    }
}

/// Principal value of an angle in radians, in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Principal difference between two angles, in `[-π, π]`.
pub fn angle_diff(a: Radian, b: Radian) -> Radian {
    let mut diff = principal_angle(a) - principal_angle(b);

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

fn fixed_point_eccentric_anomaly(mean_anomaly: Radian, eccentricity: f64) -> Radian {
    let (sin_m, cos_m) = mean_anomaly.sin_cos();
    mean_anomaly + eccentricity * sin_m * (1.0 + eccentricity * cos_m)
}

fn newton_eccentric_anomaly(
    mean_anomaly: Radian,
    eccentricity: f64,
    tolerance: f64,
    max_iter: usize,
) -> Result<Radian, PlanisphereError> {
    // R(E) = E − e·sin(E) − M
    let f = |e_anom: f64| -> f64 { e_anom - eccentricity * e_anom.sin() - mean_anomaly };

    // R'(E) = 1 − e·cos(E)
    let df = |e_anom: f64| -> f64 { 1.0 - eccentricity * e_anom.cos() };

    // high eccentricities converge more reliably from E = π
    let x0 = if eccentricity < 0.8 {
        fixed_point_eccentric_anomaly(mean_anomaly, eccentricity)
    } else {
        PI
    };

    let mut conv = SimpleConvergency {
        eps: tolerance,
        max_iter,
    };

    Ok(find_root_newton_raphson(x0, &f, &df, &mut conv)?)
}

/// Solve Kepler's equation for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` (radians, any range).
/// * `eccentricity`: orbital eccentricity `e`, elliptic orbits only.
/// * `solver`: strategy, see [`KeplerSolver`].
///
/// Return
/// ------
/// * The eccentric anomaly `E` (radians, same revolution as `M`), or NaN when
///   `e ∉ [0, 1)`, when an input is NaN, or when Newton iterations fail to converge.
pub fn solve_kepler_equation(mean_anomaly: Radian, eccentricity: f64, solver: KeplerSolver) -> Radian {
    if !(0.0..1.0).contains(&eccentricity) || !mean_anomaly.is_finite() {
        return f64::NAN;
    }

    match solver {
        KeplerSolver::FixedPoint => fixed_point_eccentric_anomaly(mean_anomaly, eccentricity),
        KeplerSolver::NewtonRaphson {
            tolerance,
            max_iter,
        } => newton_eccentric_anomaly(mean_anomaly, eccentricity, tolerance, max_iter)
            .unwrap_or(f64::NAN),
    }
}

/// True anomaly from the eccentric anomaly, through the half-angle tangent identity
/// `tan(v/2) = √((1+e)/(1−e)) · tan(E/2)`.
pub fn true_anomaly(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let (sin_half, cos_half) = (eccentric_anomaly / 2.0).sin_cos();
    2.0 * ((1.0 + eccentricity).sqrt() * sin_half).atan2((1.0 - eccentricity).sqrt() * cos_half)
}

/// Heliocentric distance `r = a·(1 − e·cos E)`.
pub fn orbital_radius(
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
    eccentric_anomaly: Radian,
) -> AstronomicalUnit {
    semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos())
}

/// Rotate an orbital-plane position `(r, v)` into the ecliptic frame.
///
/// The orbital plane has its X axis toward perihelion. The rotation sequence is
/// `R_z(Ω) · R_x(i) · R_z(ω)`.
///
/// Arguments
/// ---------
/// * `radius`: heliocentric distance (AU).
/// * `true_anomaly`: true anomaly `v` (rad).
/// * `perihelion_argument`: argument of perihelion `ω` (rad).
/// * `ascending_node`: longitude of the ascending node `Ω` (rad).
/// * `inclination`: inclination `i` (rad).
pub fn orbital_plane_to_ecliptic(
    radius: AstronomicalUnit,
    true_anomaly: Radian,
    perihelion_argument: Radian,
    ascending_node: Radian,
    inclination: Radian,
) -> Vector3<f64> {
    let in_plane = Vector3::new(radius * true_anomaly.cos(), radius * true_anomaly.sin(), 0.0);
    rotmt(ascending_node, 2) * rotmt(inclination, 0) * rotmt(perihelion_argument, 2) * in_plane
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_angle_helpers() {
        assert_abs_diff_eq!(principal_angle(-0.5), DPI - 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(principal_angle(7.0), 7.0 - DPI, epsilon = 1e-15);
        assert_abs_diff_eq!(angle_diff(0.1, DPI - 0.1), 0.2, epsilon = 1e-14);
        assert_abs_diff_eq!(angle_diff(DPI - 0.1, 0.1), -0.2, epsilon = 1e-14);
    }

    #[test]
    fn test_circular_orbit_is_identity() {
        for m in [0.0, 0.3, 2.0, 4.5] {
            assert_eq!(solve_kepler_equation(m, 0.0, KeplerSolver::FixedPoint), m);
            assert_abs_diff_eq!(
                solve_kepler_equation(m, 0.0, KeplerSolver::converged()),
                m,
                epsilon = 1e-14
            );
            assert_abs_diff_eq!(principal_angle(true_anomaly(m, 0.0)), m, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_newton_satisfies_kepler_equation() {
        for &e in &[0.0167, 0.2056, 0.25, 0.6, 0.9] {
            for k in 0..24 {
                let m = k as f64 * DPI / 24.0;
                let big_e = solve_kepler_equation(m, e, KeplerSolver::converged());
                assert_abs_diff_eq!(big_e - e * big_e.sin(), m, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_fixed_point_close_at_low_eccentricity() {
        let e = 0.0167;
        for k in 0..36 {
            let m = k as f64 * DPI / 36.0;
            let fixed = solve_kepler_equation(m, e, KeplerSolver::FixedPoint);
            let newton = solve_kepler_equation(m, e, KeplerSolver::converged());
            assert_abs_diff_eq!(fixed, newton, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_degenerate_eccentricity_is_nan() {
        assert!(solve_kepler_equation(1.0, 1.0, KeplerSolver::FixedPoint).is_nan());
        assert!(solve_kepler_equation(1.0, 1.5, KeplerSolver::converged()).is_nan());
        assert!(solve_kepler_equation(1.0, -0.1, KeplerSolver::FixedPoint).is_nan());
        assert!(solve_kepler_equation(f64::NAN, 0.1, KeplerSolver::FixedPoint).is_nan());
    }

    #[test]
    fn test_apsides() {
        let (a, e) = (2.0, 0.25);
        assert_abs_diff_eq!(orbital_radius(a, e, 0.0), 1.5, epsilon = 1e-15);
        assert_abs_diff_eq!(orbital_radius(a, e, PI), 2.5, epsilon = 1e-15);
        assert_abs_diff_eq!(true_anomaly(PI, e).abs(), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_orbital_plane_rotation() {
        // zero angles keep the vector in the ecliptic plane along +X
        let v = orbital_plane_to_ecliptic(1.0, 0.0, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(v, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-15);

        // at the ascending node (ω + v = 0) the body sits in the ecliptic, at longitude Ω
        let node = 1.2;
        let v = orbital_plane_to_ecliptic(3.0, 0.0, 0.0, node, 0.4);
        assert_abs_diff_eq!(v.z, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(v.y.atan2(v.x), node, epsilon = 1e-14);
        assert_abs_diff_eq!(v.norm(), 3.0, epsilon = 1e-14);

        // ninety degrees past the node the latitude equals the inclination
        let v = orbital_plane_to_ecliptic(1.0, PI / 2.0, 0.0, node, 0.4);
        assert_abs_diff_eq!(v.z.asin(), 0.4, epsilon = 1e-14);
    }
}
