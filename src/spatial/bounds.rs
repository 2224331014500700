use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hours, DEC_MAX, DEC_MIN, RA_MAX, RA_MIN};

/// Closed RA/Dec rectangle `[ra_min, ra_max] × [dec_min, dec_max]`.
///
/// RA in hours, Dec in degrees. The rectangle never wraps: a region across the 0h/24h
/// seam is expressed as two rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub ra_min: Hours,
    pub ra_max: Hours,
    pub dec_min: Degree,
    pub dec_max: Degree,
}

impl Bounds {
    pub const fn new(ra_min: Hours, ra_max: Hours, dec_min: Degree, dec_max: Degree) -> Self {
        Bounds {
            ra_min,
            ra_max,
            dec_min,
            dec_max,
        }
    }

    /// The whole celestial sphere, `[0, 24] × [-90, 90]`.
    pub const fn sky() -> Self {
        Bounds::new(RA_MIN, RA_MAX, DEC_MIN, DEC_MAX)
    }

    /// Inclusive on all four edges. NaN coordinates are never contained.
    pub fn contains(&self, ra: Hours, dec: Degree) -> bool {
        ra >= self.ra_min && ra <= self.ra_max && dec >= self.dec_min && dec <= self.dec_max
    }

    /// Rectangles sharing only an edge intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.ra_max < self.ra_min
            || other.ra_min > self.ra_max
            || other.dec_max < self.dec_min
            || other.dec_min > self.dec_max)
    }

    /// Quadrants at the RA/Dec midpoints, in NE, NW, SE, SW order.
    pub fn quadrants(&self) -> [Bounds; 4] {
        let ra_mid = (self.ra_min + self.ra_max) / 2.0;
        let dec_mid = (self.dec_min + self.dec_max) / 2.0;
        [
            Bounds::new(ra_mid, self.ra_max, dec_mid, self.dec_max),
            Bounds::new(self.ra_min, ra_mid, dec_mid, self.dec_max),
            Bounds::new(ra_mid, self.ra_max, self.dec_min, dec_mid),
            Bounds::new(self.ra_min, ra_mid, self.dec_min, dec_mid),
        ]
    }
}
