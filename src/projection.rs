//! # Sky projection
//!
//! Maps equatorial coordinates to canvas pixels. The canvas origin is the top-left corner
//! and `y` grows downward.
//!
//! | Mode | Projection | Rejects |
//! |---|---|---|
//! | [`SkyViewMode::SingleHemisphere`] | stereographic about the view center | far hemisphere, off-canvas |
//! | [`SkyViewMode::DualHemisphere`] | azimuthal-equidistant about each pole, North left / South right | beyond the panel radius |
//! | [`SkyViewMode::FullSkyMercator`] | cylindrical equirectangular, RA wrapped | `y` off-canvas |
//!
//! [`ProjectionState::project`] is pure: the same `(ra, dec, state)` always yields the
//! same pixel.

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hours, DEC_MAX, DEC_MIN, HOURS_TO_DEG, RADEG, RA_MAX, RA_MIN};
use crate::planisphere_errors::PlanisphereError;

/// Projection family used to draw the sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkyViewMode {
    /// Realistic local sky view.
    #[default]
    SingleHemisphere,
    /// North and South celestial hemispheres side by side.
    DualHemisphere,
    /// Complete celestial sphere in rectangular format.
    FullSkyMercator,
}

impl SkyViewMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            SkyViewMode::SingleHemisphere => "Single View",
            SkyViewMode::DualHemisphere => "Dual View",
            SkyViewMode::FullSkyMercator => "Full Sky",
        }
    }
}

/// Canvas pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Panel under a screen abscissa, see [`ProjectionState::hemisphere_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenHemisphere {
    North,
    South,
    Single,
}

/// Parameters of one projection.
///
/// Fields are public so that pan/zoom handlers can mutate them between frames; a state made
/// degenerate that way projects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionState {
    /// View center right ascension (hours).
    pub center_ra: Hours,
    /// View center declination (degrees).
    pub center_dec: Degree,
    /// Field of view (degrees).
    pub field_of_view: Degree,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub mode: SkyViewMode,
}

impl ProjectionState {
    /// Create a validated projection state.
    ///
    /// Arguments
    /// ---------
    /// * `center_ra`: hours in `[0, 24]`.
    /// * `center_dec`: degrees in `[-90, 90]`.
    /// * `field_of_view`: degrees in `(0, 360]`.
    /// * `canvas_width`, `canvas_height`: finite and strictly positive pixels.
    /// * `mode`: projection family.
    ///
    /// Return
    /// ------
    /// * The state, or [`PlanisphereError::InvalidProjection`] naming the first bad parameter.
    pub fn new(
        center_ra: Hours,
        center_dec: Degree,
        field_of_view: Degree,
        canvas_width: f64,
        canvas_height: f64,
        mode: SkyViewMode,
    ) -> Result<Self, PlanisphereError> {
        let state = ProjectionState {
            center_ra,
            center_dec,
            field_of_view,
            canvas_width,
            canvas_height,
            mode,
        };
        state.validate()?;
        Ok(state)
    }

    /// Check every parameter, see [`ProjectionState::new`].
    pub fn validate(&self) -> Result<(), PlanisphereError> {
        if !(RA_MIN..=RA_MAX).contains(&self.center_ra) {
            return Err(PlanisphereError::InvalidProjection(format!(
                "center RA must be in [0, 24] hours, got {}",
                self.center_ra
            )));
        }
        if !(DEC_MIN..=DEC_MAX).contains(&self.center_dec) {
            return Err(PlanisphereError::InvalidProjection(format!(
                "center Dec must be in [-90, 90] degrees, got {}",
                self.center_dec
            )));
        }
        if !(self.field_of_view > 0.0 && self.field_of_view <= 360.0) {
            return Err(PlanisphereError::InvalidProjection(format!(
                "field of view must be in (0, 360] degrees, got {}",
                self.field_of_view
            )));
        }
        for (name, size) in [("width", self.canvas_width), ("height", self.canvas_height)] {
            if !(size.is_finite() && size > 0.0) {
                return Err(PlanisphereError::InvalidProjection(format!(
                    "canvas {name} must be finite and positive, got {size}"
                )));
            }
        }
        Ok(())
    }

    /// Project `(ra, dec)` onto the canvas with the current mode.
    ///
    /// Return
    /// ------
    /// * The pixel, or `None` when the coordinates are NaN or out of range, when the
    ///   point is not drawable in this mode, or when the state itself is degenerate.
    pub fn project(&self, ra: Hours, dec: Degree) -> Option<ScreenPoint> {
        if !(RA_MIN..=RA_MAX).contains(&ra) || !(DEC_MIN..=DEC_MAX).contains(&dec) {
            return None;
        }
        if self.validate().is_err() {
            return None;
        }

        match self.mode {
            SkyViewMode::SingleHemisphere => self.project_stereographic(ra, dec),
            SkyViewMode::DualHemisphere => self.project_dual_hemisphere(ra, dec),
            SkyViewMode::FullSkyMercator => self.project_full_sky(ra, dec),
        }
    }

    /// Whether `(ra, dec)` lands on the canvas.
    pub fn is_in_viewport(&self, ra: Hours, dec: Degree) -> bool {
        self.project(ra, dec).is_some()
    }

    /// Panel under `screen_x`: the left half of a dual view is North, the right half South.
    pub fn hemisphere_at(&self, screen_x: f64) -> ScreenHemisphere {
        match self.mode {
            SkyViewMode::DualHemisphere if screen_x < self.canvas_width / 2.0 => {
                ScreenHemisphere::North
            }
            SkyViewMode::DualHemisphere => ScreenHemisphere::South,
            _ => ScreenHemisphere::Single,
        }
    }

    fn project_stereographic(&self, ra: Hours, dec: Degree) -> Option<ScreenPoint> {
        let ra_rad = ra * HOURS_TO_DEG * RADEG;
        let dec_rad = dec * RADEG;
        let center_ra_rad = self.center_ra * HOURS_TO_DEG * RADEG;
        let center_dec_rad = self.center_dec * RADEG;

        let (sin_d, cos_d) = dec_rad.sin_cos();
        let (sin_c, cos_c) = center_dec_rad.sin_cos();
        let (sin_dra, cos_dra) = (ra_rad - center_ra_rad).sin_cos();

        let cos_dist = sin_d * sin_c + cos_d * cos_c * cos_dra;
        if cos_dist < 0.0 {
            return None;
        }

        let k = 2.0 / (1.0 + cos_dist);
        let x = k * cos_d * sin_dra;
        let y = k * (cos_c * sin_d - sin_c * cos_d * cos_dra);

        let scale = self.canvas_width.min(self.canvas_height) / (self.field_of_view * RADEG);
        let screen_x = self.canvas_width / 2.0 + x * scale;
        let screen_y = self.canvas_height / 2.0 - y * scale;

        self.on_canvas(screen_x, screen_y, 0.0, self.canvas_width)
    }

    fn project_dual_hemisphere(&self, ra: Hours, dec: Degree) -> Option<ScreenPoint> {
        let ra_rad = ra * HOURS_TO_DEG * RADEG;
        let dec_rad = dec * RADEG;

        let northern = dec >= 0.0;
        let panel_width = self.canvas_width / 2.0;
        let panel_height = self.canvas_height;

        let pole = if northern { 90.0 * RADEG } else { -90.0 * RADEG };
        let cos_dist = dec_rad.sin() * pole.sin() + dec_rad.cos() * pole.cos();
        if cos_dist < 0.0 {
            return None;
        }

        let angular_dist = cos_dist.clamp(-1.0, 1.0).acos();
        let azimuth = (dec_rad.cos() * ra_rad.sin()).atan2(dec_rad.cos() * ra_rad.cos());

        let radius = angular_dist * panel_height / std::f64::consts::PI;
        if radius > panel_height / 2.0 {
            return None;
        }

        let x = radius * azimuth.sin();
        let y = radius * azimuth.cos();

        let offset = if northern { 0.0 } else { panel_width };
        let screen_x = offset + panel_width / 2.0 + x;
        let screen_y = panel_height / 2.0 - y;

        self.on_canvas(screen_x, screen_y, offset, offset + panel_width)
    }

    fn project_full_sky(&self, ra: Hours, dec: Degree) -> Option<ScreenPoint> {
        let x = (ra / 24.0 * self.canvas_width).rem_euclid(self.canvas_width);
        let y = self.canvas_height / 2.0 - (dec * RADEG / std::f64::consts::PI) * self.canvas_height;

        if y < 0.0 || y > self.canvas_height {
            return None;
        }
        Some(ScreenPoint { x, y })
    }

    fn on_canvas(&self, x: f64, y: f64, x_min: f64, x_max: f64) -> Option<ScreenPoint> {
        if x < x_min || x > x_max || y < 0.0 || y > self.canvas_height {
            return None;
        }
        Some(ScreenPoint { x, y })
    }
}
