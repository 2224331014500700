//! # Constants and type definitions for Planisphere
//!
//! This module centralizes the **conversion factors**, **reference epochs** and **type
//! aliases** shared by the time utilities, the ephemeris calculators, the spatial index and
//! the sky projection.
//!
//! ## Conventions
//!
//! - Right ascension is carried in **hours** `[0, 24)`.
//! - Declination, latitude, longitude, altitude and azimuth are carried in **degrees**.
//! - Angles become **radians** only inside the numeric kernels.
//! - Distances are expressed in **astronomical units**.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Hours of right ascension → radians
pub const RADH: f64 = DPI / 24.0;

/// Hours of right ascension → degrees
pub const HOURS_TO_DEG: f64 = 15.0;

/// Number of hours in a day (and in a full turn of right ascension)
pub const HOURS_PER_DAY: f64 = 24.0;

// -------------------------------------------------------------------------------------------------
// Epochs
// -------------------------------------------------------------------------------------------------

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

// -------------------------------------------------------------------------------------------------
// Sky domain
// -------------------------------------------------------------------------------------------------

/// Smallest right ascension of the catalog domain (hours)
pub const RA_MIN: Hours = 0.0;
/// Largest right ascension of the catalog domain (hours)
pub const RA_MAX: Hours = 24.0;
/// Smallest declination of the catalog domain (degrees)
pub const DEC_MIN: Degree = -90.0;
/// Largest declination of the catalog domain (degrees)
pub const DEC_MAX: Degree = 90.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in hours of right ascension (or sidereal hours)
pub type Hours = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian Date (days)
pub type JulianDate = f64;
/// Julian centuries elapsed since J2000.0
pub type JulianCenturies = f64;
