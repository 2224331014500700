//! Celestial positions, horizon visibility, sky projection and star-catalog indexing for
//! planisphere-style sky maps.

pub mod config;
pub mod constants;
pub mod conversion;
pub mod ephemeris;
pub mod kepler;
pub mod observer;
pub mod orbit_type;
pub mod planisphere_errors;
pub mod projection;
pub mod ref_system;
pub mod sky_engine;
pub mod spatial;
pub mod star;
pub mod time;
pub mod visibility;
