//! # Planet, dwarf-planet and asteroid positions
//!
//! For each [`Body`] the J2000 mean elements are evaluated at `T` Julian centuries, the
//! orbit is solved with the configured [`KeplerSolver`], and the ecliptic position is
//! rotated to the equator with the obliquity `ε = 23.439291° − 0.0130102°·T`.
//!
//! ## Origin
//!
//! With [`PlanetOrigin::Heliocentric`] the heliocentric vector is reported as seen from
//! the Earth without moving the origin, the way planisphere charts place the planets.
//! [`PlanetOrigin::Geocentric`] subtracts the Earth's heliocentric position,
//! computed the same way from the Earth–Moon barycenter elements
//! ([`EARTH`](crate::ephemeris::bodies::EARTH)).
//!
//! ## Phase and magnitude
//!
//! The phase value is `0.5·(1 + cos v)` with `v` the heliocentric true anomaly; it is
//! bucketed into a [`PhaseDescriptor`] and feeds the per-body [`MagnitudeLaw`].
//!
//! [`MagnitudeLaw`]: crate::ephemeris::bodies::MagnitudeLaw

use std::fmt;

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::config::PlanetOrigin;
use crate::constants::{AstronomicalUnit, Degree, Hours, JulianDate, DEC_MAX, DEC_MIN, RA_MAX, RA_MIN};
use crate::ephemeris::bodies::{display_size, Body, EARTH};
use crate::ephemeris::CelestialPosition;
use crate::kepler::KeplerSolver;
use crate::orbit_type::keplerian_element::KeplerianElements;
use crate::ref_system::{ecliptic_vector_to_equatorial, equatorial_to_radec, mean_obliquity_j2000};
use crate::time::{julian_centuries, julian_date, local_sidereal_time_from_jd};

/// Coarse phase description of a planetary disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseDescriptor {
    Full,
    Gibbous,
    Quarter,
    Crescent,
    New,
}

impl PhaseDescriptor {
    /// Bucket a phase value in `[0, 1]`.
    pub fn from_phase_value(phase_value: f64) -> PhaseDescriptor {
        if phase_value > 0.9 {
            PhaseDescriptor::Full
        } else if phase_value > 0.6 {
            PhaseDescriptor::Gibbous
        } else if phase_value > 0.4 {
            PhaseDescriptor::Quarter
        } else if phase_value > 0.1 {
            PhaseDescriptor::Crescent
        } else {
            PhaseDescriptor::New
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhaseDescriptor::Full => "Full",
            PhaseDescriptor::Gibbous => "Gibbous",
            PhaseDescriptor::Quarter => "Quarter",
            PhaseDescriptor::Crescent => "Crescent",
            PhaseDescriptor::New => "New",
        }
    }
}

impl fmt::Display for PhaseDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numerical model of the planet calculator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanetModel {
    pub solver: KeplerSolver,
    pub origin: PlanetOrigin,
}

/// Position of one body for one observer and instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub body: Body,
    pub position: CelestialPosition,
    /// Distance from the reporting origin (AU).
    pub distance: AstronomicalUnit,
    /// Heliocentric distance (AU).
    pub heliocentric_distance: AstronomicalUnit,
    pub magnitude: f64,
    /// `0.5·(1 + cos v)`.
    pub phase_value: f64,
    pub phase: PhaseDescriptor,
    /// Elements of the body at the computation instant.
    pub elements: KeplerianElements,
}

impl PlanetPosition {
    pub fn ra(&self) -> Hours {
        self.position.ra
    }

    pub fn dec(&self) -> Degree {
        self.position.dec
    }

    /// Coordinates are finite and in range; NaN positions from a degenerate orbit fail.
    pub fn has_valid_coordinates(&self) -> bool {
        (RA_MIN..=RA_MAX).contains(&self.position.ra)
            && (DEC_MIN..=DEC_MAX).contains(&self.position.dec)
    }

    /// Marker size in pixels, see [`display_size`].
    pub fn display_size(&self) -> f64 {
        display_size(self.magnitude)
    }

    pub fn color(&self) -> &'static str {
        self.body.color()
    }

    pub fn symbol(&self) -> &'static str {
        self.body.symbol()
    }
}

/// Position of `body` at a Julian Date for an observer (degrees, longitude east-positive).
///
/// Arguments
/// ---------
/// * `body`: the body to compute.
/// * `jd`: Julian Date (UTC).
/// * `latitude`, `longitude`: observer location, used for the horizontal coordinates only.
/// * `model`: Kepler solver and reporting origin.
///
/// Return
/// ------
/// * The position; RA/Dec are NaN if the orbit is degenerate, see
///   [`PlanetPosition::has_valid_coordinates`].
pub fn planet_position_at_jd(
    body: Body,
    jd: JulianDate,
    latitude: Degree,
    longitude: Degree,
    model: PlanetModel,
) -> PlanetPosition {
    let t = julian_centuries(jd);
    let data = body.data();
    let elements = data.elements.at(t);
    let state = elements.heliocentric_state(model.solver);

    let ecliptic = match model.origin {
        PlanetOrigin::Heliocentric => state.position,
        PlanetOrigin::Geocentric => {
            state.position - EARTH.at(t).heliocentric_state(model.solver).position
        }
    };

    let equatorial = ecliptic_vector_to_equatorial(&ecliptic, mean_obliquity_j2000(t));
    let (ra, dec) = equatorial_to_radec(&equatorial);
    let distance = ecliptic.norm();

    let phase_value = 0.5 * (1.0 + state.true_anomaly.cos());
    let phase = if data.always_full {
        PhaseDescriptor::Full
    } else {
        PhaseDescriptor::from_phase_value(phase_value)
    };

    let lst = local_sidereal_time_from_jd(jd, longitude);

    PlanetPosition {
        body,
        position: CelestialPosition::from_equatorial(ra, dec, latitude, lst),
        distance,
        heliocentric_distance: state.radius,
        magnitude: data.magnitude.apparent_magnitude(distance, phase_value),
        phase_value,
        phase,
        elements,
    }
}

/// Position of `body` for a calendar instant (UTC).
pub fn planet_position(
    body: Body,
    epoch: &Epoch,
    latitude: Degree,
    longitude: Degree,
    model: PlanetModel,
) -> PlanetPosition {
    planet_position_at_jd(body, julian_date(epoch), latitude, longitude, model)
}

/// Positions of every body of [`Body::ALL`], in table order.
pub fn planet_positions(
    epoch: &Epoch,
    latitude: Degree,
    longitude: Degree,
    model: PlanetModel,
) -> Vec<PlanetPosition> {
    let jd = julian_date(epoch);
    Body::ALL
        .iter()
        .map(|&body| planet_position_at_jd(body, jd, latitude, longitude, model))
        .collect()
}
