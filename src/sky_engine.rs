//! # SkyEngine: ephemerides, star index and view assembly
//!
//! [`SkyEngine`] is the caller-owned façade of the crate. It holds:
//!
//! 1. **Configuration** ([`EngineConfig`]) – Kepler strategy, planet origin, index tuning,
//!    result cap.
//! 2. **Star index** ([`SharedStarIndex`]) – a copy-on-write [`QuadTree`] rebuilt wholesale
//!    by [`SkyEngine::load_catalog`] and read concurrently by the query methods.
//!
//! Ephemeris methods take an [`ObserverContext`] and need a calendar instant; they return
//! [`PlanisphereError::MissingEpoch`] for a sidereal-only observer. Star queries never fail:
//! malformed inputs produce empty results.
//!
//! ## Typical usage
//!
//! ```rust
//! use hifitime::Epoch;
//! use planisphere::config::EngineConfig;
//! use planisphere::observer::ObserverContext;
//! use planisphere::projection::{ProjectionState, SkyViewMode};
//! use planisphere::sky_engine::{SkyEngine, ViewQuery};
//! use planisphere::star::Star;
//!
//! let engine = SkyEngine::new(EngineConfig::default()).unwrap();
//! engine
//!     .load_catalog(vec![Star::new(2.5303, 89.2641, 1.98, "Polaris")])
//!     .unwrap();
//!
//! let observer = ObserverContext::at_instant(
//!     40.7608,
//!     -111.891,
//!     Epoch::from_gregorian_utc_hms(2024, 3, 1, 5, 0, 0),
//! )
//! .unwrap();
//!
//! let sun = engine.sun(&observer).unwrap();
//! assert!(!sun.visible);
//!
//! let view = ProjectionState::new(0.0, 90.0, 120.0, 800.0, 600.0, SkyViewMode::DualHemisphere).unwrap();
//! let plotted = engine.plot_stars(&view, &observer, &ViewQuery::new(0.0, 90.0, 90.0));
//! assert_eq!(plotted[0].star.name, "Polaris");
//! ```

use std::sync::Arc;

use hifitime::Epoch;
use log::debug;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::constants::{Degree, Hours};
use crate::ephemeris::bodies::Body;
use crate::ephemeris::moon::{moon_position, MoonPosition};
use crate::ephemeris::planets::{planet_position, planet_positions, PlanetPosition};
use crate::ephemeris::sun::{sun_position, sunrise, sunset};
use crate::ephemeris::CelestialPosition;
use crate::observer::ObserverContext;
use crate::planisphere_errors::PlanisphereError;
use crate::projection::{ProjectionState, ScreenPoint};
use crate::spatial::bounds::Bounds;
use crate::spatial::quadtree::QuadTree;
use crate::spatial::shared_index::SharedStarIndex;
use crate::star::Star;
use crate::visibility::is_plottable;

/// Star selection for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewQuery {
    pub center_ra: Hours,
    pub center_dec: Degree,
    /// Search radius around the center (degrees).
    pub radius: Degree,
    /// Keep stars with `magnitude <= limit`.
    pub magnitude_limit: Option<f64>,
    /// Overrides [`EngineConfig::default_max_results`].
    pub max_results: Option<usize>,
}

impl ViewQuery {
    pub fn new(center_ra: Hours, center_dec: Degree, radius: Degree) -> Self {
        ViewQuery {
            center_ra,
            center_dec,
            radius,
            magnitude_limit: None,
            max_results: None,
        }
    }

    pub fn with_magnitude_limit(mut self, limit: f64) -> Self {
        self.magnitude_limit = Some(limit);
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }
}

/// A star ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlottedStar {
    pub star: Star,
    pub point: ScreenPoint,
}

/// A planetary body ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlottedPlanet {
    pub planet: PlanetPosition,
    pub point: ScreenPoint,
}

#[derive(Debug)]
pub struct SkyEngine {
    config: EngineConfig,
    index: Arc<SharedStarIndex>,
}

impl SkyEngine {
    /// Create an engine with an empty star index.
    ///
    /// Errors
    /// ------
    /// * Any validation error of [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self, PlanisphereError> {
        config.validate()?;
        let index = Arc::new(SharedStarIndex::new(config.index)?);
        debug!("SkyEngine created with {config:?}");
        Ok(SkyEngine { config, index })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle on the shared index, for readers running on other threads.
    pub fn index(&self) -> Arc<SharedStarIndex> {
        Arc::clone(&self.index)
    }

    pub fn sun(&self, observer: &ObserverContext) -> Result<CelestialPosition, PlanisphereError> {
        let epoch = observer.epoch()?;
        Ok(sun_position(&epoch, observer.latitude(), observer.longitude()))
    }

    /// Sunrise on the UTC date of the observer's instant, `None` during polar day/night.
    pub fn sunrise(&self, observer: &ObserverContext) -> Result<Option<Epoch>, PlanisphereError> {
        let epoch = observer.epoch()?;
        Ok(sunrise(&epoch, observer.latitude(), observer.longitude()))
    }

    /// Sunset on the UTC date of the observer's instant, `None` during polar day/night.
    pub fn sunset(&self, observer: &ObserverContext) -> Result<Option<Epoch>, PlanisphereError> {
        let epoch = observer.epoch()?;
        Ok(sunset(&epoch, observer.latitude(), observer.longitude()))
    }

    pub fn moon(&self, observer: &ObserverContext) -> Result<MoonPosition, PlanisphereError> {
        let epoch = observer.epoch()?;
        Ok(moon_position(&epoch, observer.latitude(), observer.longitude()))
    }

    pub fn planet(&self, body: Body, observer: &ObserverContext) -> Result<PlanetPosition, PlanisphereError> {
        let epoch = observer.epoch()?;
        Ok(planet_position(
            body,
            &epoch,
            observer.latitude(),
            observer.longitude(),
            self.config.planet_model(),
        ))
    }

    /// Every body of [`Body::ALL`].
    pub fn planets(&self, observer: &ObserverContext) -> Result<Vec<PlanetPosition>, PlanisphereError> {
        let epoch = observer.epoch()?;
        Ok(planet_positions(
            &epoch,
            observer.latitude(),
            observer.longitude(),
            self.config.planet_model(),
        ))
    }

    /// Replace the star catalog. The previous index stays published if the build fails.
    pub fn load_catalog<I>(&self, catalog: I) -> Result<Arc<QuadTree>, PlanisphereError>
    where
        I: IntoIterator<Item = Star>,
    {
        self.index.rebuild(catalog, self.config.index)
    }

    pub fn star_count(&self) -> usize {
        self.index.load().size()
    }

    pub fn stars_in_region(&self, bounds: &Bounds) -> Vec<Star> {
        self.index.load().query_region(bounds).into_iter().cloned().collect()
    }

    pub fn stars_in_radius(&self, ra: Hours, dec: Degree, radius: Degree) -> Vec<Star> {
        self.index
            .load()
            .query_radius(ra, dec, radius)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn nearest_star(&self, ra: Hours, dec: Degree, max_radius: Degree) -> Option<Star> {
        self.index.load().find_nearest(ra, dec, max_radius).cloned()
    }

    /// Stars of one frame, brightest first.
    ///
    /// Pipeline: radius query, magnitude limit, horizon and view-band filter, projection,
    /// sort by magnitude, result cap.
    ///
    /// Arguments
    /// ---------
    /// * `view`: projection of the frame.
    /// * `observer`: location, sidereal time and horizon side.
    /// * `query`: selection cone and limits.
    pub fn plot_stars(
        &self,
        view: &ProjectionState,
        observer: &ObserverContext,
        query: &ViewQuery,
    ) -> Vec<PlottedStar> {
        let tree = self.index.load();
        let lst = observer.local_sidereal_time();
        let latitude = observer.latitude();
        let horizon = observer.horizon();

        let candidates = tree.query_radius(query.center_ra, query.center_dec, query.radius);
        let n_candidates = candidates.len();

        let mut plotted: Vec<PlottedStar> = candidates
            .into_iter()
            .filter(|s| query.magnitude_limit.map_or(true, |limit| s.magnitude <= limit))
            .filter(|s| is_plottable(s.ra, s.dec, latitude, lst, horizon))
            .filter_map(|s| {
                view.project(s.ra, s.dec).map(|point| PlottedStar {
                    star: s.clone(),
                    point,
                })
            })
            .collect();

        // NaN magnitudes sort after every finite one
        plotted.sort_by_key(|p| OrderedFloat(p.star.magnitude));

        if let Some(cap) = query.max_results.or(self.config.default_max_results) {
            plotted.truncate(cap);
        }

        debug!(
            "plot_stars: {} candidates, {} plotted (mode {:?}, lst {:.3} h)",
            n_candidates,
            plotted.len(),
            view.mode,
            lst
        );
        plotted
    }

    /// Planetary bodies of one frame that are above the horizon and on the canvas.
    pub fn plot_planets(
        &self,
        view: &ProjectionState,
        observer: &ObserverContext,
    ) -> Result<Vec<PlottedPlanet>, PlanisphereError> {
        let lst = observer.local_sidereal_time();
        let latitude = observer.latitude();
        let horizon = observer.horizon();

        Ok(self
            .planets(observer)?
            .into_iter()
            .filter(|p| p.has_valid_coordinates())
            .filter(|p| is_plottable(p.ra(), p.dec(), latitude, lst, horizon))
            .filter_map(|planet| {
                view.project(planet.ra(), planet.dec())
                    .map(|point| PlottedPlanet { planet, point })
            })
            .collect())
    }
}

#[cfg(test)]
mod sky_engine_test {
    use super::*;
    use crate::projection::SkyViewMode;
    use crate::visibility::Horizon;

    fn engine_with(stars: Vec<Star>) -> SkyEngine {
        let engine = SkyEngine::new(EngineConfig::default()).unwrap();
        engine.load_catalog(stars).unwrap();
        engine
    }

    fn sidereal_observer(lat: Degree, lst: Hours) -> ObserverContext {
        ObserverContext::builder()
            .latitude(lat)
            .sidereal_time(lst)
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_epoch() {
        let engine = SkyEngine::new(EngineConfig::default()).unwrap();
        let obs = sidereal_observer(40.0, 3.0);
        assert_eq!(engine.sun(&obs), Err(PlanisphereError::MissingEpoch));
        assert!(engine.planets(&obs).is_err());
        assert!(engine.moon(&obs).is_err());
    }

    #[test]
    fn test_plot_stars_filters_and_sorts() {
        let engine = engine_with(vec![
            Star::new(6.0, 40.0, 3.0, "dim"),
            Star::new(6.1, 41.0, 0.5, "bright"),
            Star::new(6.2, 39.0, 5.5, "faint"),
            Star::new(6.0, -30.0, 0.0, "southern"),
            Star::new(18.0, 10.0, 1.0, "set"),
        ]);

        // LST 6h at 40°N: the RA 6h stars are on the meridian
        let obs = sidereal_observer(40.0, 6.0);
        let view = ProjectionState::new(6.0, 40.0, 90.0, 800.0, 600.0, SkyViewMode::SingleHemisphere).unwrap();

        let query = ViewQuery::new(6.0, 40.0, 90.0).with_magnitude_limit(5.0);
        let plotted = engine.plot_stars(&view, &obs, &query);
        let names: Vec<&str> = plotted.iter().map(|p| p.star.name.as_str()).collect();
        assert_eq!(names, ["bright", "dim"]);

        let capped = engine.plot_stars(&view, &obs, &query.with_max_results(1));
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].star.name, "bright");
    }

    #[test]
    fn test_southern_view_band() {
        let engine = engine_with(vec![
            Star::new(6.0, -30.0, 1.0, "southern"),
            Star::new(6.0, 60.0, 1.0, "northern"),
        ]);
        let obs = ObserverContext::builder()
            .latitude(40.0)
            .sidereal_time(6.0)
            .horizon(Horizon::South)
            .build()
            .unwrap();
        let view = ProjectionState::new(0.0, 0.0, 360.0, 800.0, 600.0, SkyViewMode::FullSkyMercator).unwrap();

        let plotted = engine.plot_stars(&view, &obs, &ViewQuery::new(6.0, 0.0, 90.0));
        assert_eq!(plotted.len(), 1);
        assert_eq!(plotted[0].star.name, "southern");
    }

    #[test]
    fn test_catalog_queries() {
        let engine = engine_with(vec![
            Star::new(1.0, 1.0, 1.0, "a"),
            Star::new(1.05, 1.2, 2.0, "b"),
            Star::new(f64::NAN, 0.0, 2.0, "broken"),
        ]);

        assert_eq!(engine.star_count(), 2);
        assert_eq!(engine.stars_in_region(&Bounds::sky()).len(), 2);
        assert_eq!(engine.stars_in_radius(1.0, 1.0, 2.0).len(), 2);
        assert_eq!(engine.nearest_star(1.04, 1.15, 1.0).unwrap().name, "b");
        assert!(engine.nearest_star(12.0, -45.0, 1.0).is_none());
    }

    #[test]
    fn test_frame_results_serialize() {
        let engine = engine_with(vec![Star::new(6.1, 41.0, 0.5, "bright")]);
        let obs = sidereal_observer(40.0, 6.0);
        let view = ProjectionState::new(6.0, 40.0, 90.0, 800.0, 600.0, SkyViewMode::SingleHemisphere).unwrap();

        let plotted = engine.plot_stars(&view, &obs, &ViewQuery::new(6.0, 40.0, 10.0));
        let json = serde_json::to_string(&plotted).unwrap();
        assert!(json.contains("\"name\":\"bright\""));
        assert!(json.contains("\"point\""));
        let back: Vec<PlottedStar> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].star.name, "bright");

        let t = Epoch::from_gregorian_utc_hms(2024, 6, 21, 0, 0, 0);
        let observer = ObserverContext::at_instant(40.0, 0.0, t).unwrap();
        let jupiter = engine.planet(Body::Jupiter, &observer).unwrap();
        let json = serde_json::to_string(&jupiter).unwrap();
        assert!(json.contains("\"body\":\"Jupiter\""));
        let back: PlanetPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back.body, Body::Jupiter);
        assert_eq!(back.phase, jupiter.phase);
    }
}
