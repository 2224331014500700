//! Observer parameter bundle.
//!
//! An [`ObserverContext`] carries a location and either a calendar instant or a bare local
//! sidereal time. Star visibility only needs the sidereal time; Sun, Moon and planet
//! positions need the instant and fail with [`PlanisphereError::MissingEpoch`] without one.

use hifitime::Epoch;

use crate::constants::{Degree, Hours};
use crate::conversion::parse_sidereal_time;
use crate::planisphere_errors::PlanisphereError;
use crate::time::local_sidereal_time;
use crate::visibility::Horizon;

/// Time reference of an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObserverTime {
    /// Calendar instant, read in UTC.
    Instant(Epoch),
    /// Local sidereal time in hours `[0, 24)`.
    Sidereal(Hours),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverContext {
    latitude: Degree,
    longitude: Degree,
    time: ObserverTime,
    horizon: Horizon,
}

impl ObserverContext {
    pub fn builder() -> ObserverContextBuilder {
        ObserverContextBuilder::default()
    }

    /// Shortcut for an observer at a calendar instant, looking north.
    pub fn at_instant(latitude: Degree, longitude: Degree, epoch: Epoch) -> Result<Self, PlanisphereError> {
        ObserverContext::builder()
            .latitude(latitude)
            .longitude(longitude)
            .instant(epoch)
            .build()
    }

    /// Degrees, north positive.
    pub fn latitude(&self) -> Degree {
        self.latitude
    }

    /// Degrees, east positive.
    pub fn longitude(&self) -> Degree {
        self.longitude
    }

    pub fn time(&self) -> ObserverTime {
        self.time
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Local sidereal time (hours), derived from the instant when there is one.
    pub fn local_sidereal_time(&self) -> Hours {
        match self.time {
            ObserverTime::Instant(epoch) => local_sidereal_time(&epoch, self.longitude),
            ObserverTime::Sidereal(lst) => lst,
        }
    }

    /// The calendar instant.
    ///
    /// Errors
    /// ------
    /// * [`PlanisphereError::MissingEpoch`] if the observer only carries a sidereal time.
    pub fn epoch(&self) -> Result<Epoch, PlanisphereError> {
        match self.time {
            ObserverTime::Instant(epoch) => Ok(epoch),
            ObserverTime::Sidereal(_) => Err(PlanisphereError::MissingEpoch),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObserverContextBuilder {
    latitude: Option<Degree>,
    longitude: Option<Degree>,
    time: Option<ObserverTime>,
    horizon: Horizon,
}

impl ObserverContextBuilder {
    pub fn latitude(mut self, v: Degree) -> Self {
        self.latitude = Some(v);
        self
    }

    pub fn longitude(mut self, v: Degree) -> Self {
        self.longitude = Some(v);
        self
    }

    pub fn instant(mut self, epoch: Epoch) -> Self {
        self.time = Some(ObserverTime::Instant(epoch));
        self
    }

    pub fn sidereal_time(mut self, lst: Hours) -> Self {
        self.time = Some(ObserverTime::Sidereal(lst));
        self
    }

    /// Sidereal time from an `HH:MM` or `HH:MM:SS` string.
    pub fn sidereal_time_str(mut self, lst: &str) -> Result<Self, PlanisphereError> {
        self.time = Some(ObserverTime::Sidereal(parse_sidereal_time(lst)?));
        Ok(self)
    }

    pub fn horizon(mut self, v: Horizon) -> Self {
        self.horizon = v;
        self
    }

    /// Validate and return the context.
    ///
    /// Errors
    /// ------
    /// * [`PlanisphereError::InvalidObserver`] if latitude is missing or outside
    ///   `[-90, 90]`, longitude outside `[-180, 180]` (0 when unset), no time was given, or
    ///   the sidereal time is outside `[0, 24)`.
    pub fn build(self) -> Result<ObserverContext, PlanisphereError> {
        let latitude = self
            .latitude
            .ok_or_else(|| PlanisphereError::InvalidObserver("latitude is required".into()))?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PlanisphereError::InvalidObserver(format!(
                "latitude must be in [-90, 90], got {latitude}"
            )));
        }

        let longitude = self.longitude.unwrap_or(0.0);
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PlanisphereError::InvalidObserver(format!(
                "longitude must be in [-180, 180], got {longitude}"
            )));
        }

        let time = self
            .time
            .ok_or_else(|| PlanisphereError::InvalidObserver("an instant or a sidereal time is required".into()))?;
        if let ObserverTime::Sidereal(lst) = time {
            if !(0.0..24.0).contains(&lst) {
                return Err(PlanisphereError::InvalidObserver(format!(
                    "sidereal time must be in [0, 24), got {lst}"
                )));
            }
        }

        Ok(ObserverContext {
            latitude,
            longitude,
            time,
            horizon: self.horizon,
        })
    }
}
