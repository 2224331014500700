//! # Engine configuration
//!
//! [`EngineConfig`] gathers the tunables of [`SkyEngine`](crate::sky_engine::SkyEngine):
//! the Kepler strategy, the origin used for planet positions, the spatial-index parameters
//! and an optional cap on view-query results.
//!
//! Construct it with [`EngineConfig::default`] or through [`EngineConfig::builder`], which
//! validates every field in [`EngineConfigBuilder::build`].
//!
//! ```rust
//! use planisphere::config::{EngineConfig, PlanetOrigin};
//! use planisphere::kepler::KeplerSolver;
//!
//! let config = EngineConfig::builder()
//!     .kepler_solver(KeplerSolver::converged())
//!     .planet_origin(PlanetOrigin::Geocentric)
//!     .default_max_results(Some(2_000))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.index.capacity, 50);
//! ```

use serde::{Deserialize, Serialize};

use crate::ephemeris::planets::PlanetModel;
use crate::kepler::KeplerSolver;
use crate::planisphere_errors::PlanisphereError;
use crate::spatial::quadtree::{QuadTreeParams, RaSeam};

/// Origin of the vectors turned into planet RA/Dec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlanetOrigin {
    /// Heliocentric vectors read as if seen from the Earth.
    #[default]
    Heliocentric,
    /// Earth's heliocentric position subtracted first.
    Geocentric,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub kepler_solver: KeplerSolver,
    pub planet_origin: PlanetOrigin,
    pub index: QuadTreeParams,
    /// Result cap applied by view queries that do not set their own.
    pub default_max_results: Option<usize>,
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    pub fn planet_model(&self) -> PlanetModel {
        PlanetModel {
            solver: self.kepler_solver,
            origin: self.planet_origin,
        }
    }

    pub fn validate(&self) -> Result<(), PlanisphereError> {
        if let KeplerSolver::NewtonRaphson { tolerance, max_iter } = self.kepler_solver {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(PlanisphereError::InvalidEngineConfig(format!(
                    "Newton tolerance must be finite and > 0, got {tolerance}"
                )));
            }
            if max_iter == 0 {
                return Err(PlanisphereError::InvalidEngineConfig(
                    "Newton max_iter must be >= 1".into(),
                ));
            }
        }

        if self.default_max_results == Some(0) {
            return Err(PlanisphereError::InvalidEngineConfig(
                "default_max_results must be >= 1 when set".into(),
            ));
        }

        self.index.validate()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn kepler_solver(mut self, v: KeplerSolver) -> Self {
        self.config.kepler_solver = v;
        self
    }

    pub fn planet_origin(mut self, v: PlanetOrigin) -> Self {
        self.config.planet_origin = v;
        self
    }

    pub fn index(mut self, v: QuadTreeParams) -> Self {
        self.config.index = v;
        self
    }

    pub fn index_capacity(mut self, v: usize) -> Self {
        self.config.index.capacity = v;
        self
    }

    pub fn index_max_depth(mut self, v: u8) -> Self {
        self.config.index.max_depth = v;
        self
    }

    pub fn ra_seam(mut self, v: RaSeam) -> Self {
        self.config.index.ra_seam = v;
        self
    }

    pub fn default_max_results(mut self, v: Option<usize>) -> Self {
        self.config.default_max_results = v;
        self
    }

    /// Validate and return the configuration.
    ///
    /// Errors
    /// ------
    /// * [`PlanisphereError::InvalidEngineConfig`] for a non-positive Newton tolerance, a
    ///   zero iteration count or a zero result cap.
    /// * [`PlanisphereError::InvalidIndexParameter`] for invalid index parameters.
    pub fn build(self) -> Result<EngineConfig, PlanisphereError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
