//! Catalog star records and the great-circle distance used by the spatial index.
//!
//! Records deserialize from the catalog JSON layout
//! `{"name": .., "ra": .., "dec": .., "mag": .., "spectralType": ..}`.

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hours, Radian, DEC_MAX, DEC_MIN, RADEG, RADH, RA_MAX, RA_MIN};

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Right ascension (hours).
    pub ra: Hours,
    /// Declination (degrees).
    pub dec: Degree,
    /// Apparent visual magnitude.
    #[serde(rename = "mag")]
    pub magnitude: f64,
    #[serde(default)]
    pub name: String,
    #[serde(
        rename = "spectralType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub spectral_type: Option<String>,
}

impl Star {
    pub fn new(ra: Hours, dec: Degree, magnitude: f64, name: impl Into<String>) -> Self {
        Star {
            ra,
            dec,
            magnitude,
            name: name.into(),
            spectral_type: None,
        }
    }

    pub fn with_spectral_type(mut self, spectral_type: impl Into<String>) -> Self {
        self.spectral_type = Some(spectral_type.into());
        self
    }

    /// Finite RA in `[0, 24)` and Dec in `[-90, 90]`.
    pub fn has_valid_coordinates(&self) -> bool {
        (RA_MIN..RA_MAX).contains(&self.ra) && (DEC_MIN..=DEC_MAX).contains(&self.dec)
    }
}

/// Great-circle distance (radians) between two equatorial positions, haversine formula.
///
/// Arguments
/// ---------
/// * `ra1`, `ra2`: right ascensions (hours).
/// * `dec1`, `dec2`: declinations (degrees).
pub fn angular_distance(ra1: Hours, dec1: Degree, ra2: Hours, dec2: Degree) -> Radian {
    let ra1 = ra1 * RADH;
    let ra2 = ra2 * RADH;
    let dec1 = dec1 * RADEG;
    let dec2 = dec2 * RADEG;

    let half_dra = ((ra2 - ra1) / 2.0).sin();
    let half_ddec = ((dec2 - dec1) / 2.0).sin();

    let a = half_ddec * half_ddec + dec1.cos() * dec2.cos() * half_dra * half_dra;
    // rounding can push `a` just above 1 for antipodal points
    2.0 * a.sqrt().min(1.0).asin()
}
