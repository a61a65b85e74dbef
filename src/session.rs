//! Per-session context resolved by the location lookup chain
//!
//! Written only by the location completion path (`set_location`,
//! `set_sun_times`), read by the classifier. Lives as long as the dashboard
//! process; nothing is persisted.

use tracing::debug;

use crate::daynight::{self, DayNight};
use crate::error::ClassificationDeferred;
use crate::parser::{GeoPoint, SunTimes, TimeOfDay};

#[derive(Debug, Default, Clone)]
pub struct SessionState {
    location: Option<GeoPoint>,
    sun: Option<SunTimes>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the resolved geolocation (last write wins)
    pub fn set_location(&mut self, location: GeoPoint) {
        debug!("Session location: {}", location.coordinates());
        self.location = Some(location);
    }

    /// Record sunrise/sunset for the current location (last write wins)
    pub fn set_sun_times(&mut self, sun: SunTimes) {
        debug!("Session sun times: {} - {}", sun.sunrise, sun.sunset);
        self.sun = Some(sun);
    }

    #[must_use]
    pub fn location(&self) -> Option<&GeoPoint> {
        self.location.as_ref()
    }

    #[must_use]
    pub fn sun_times(&self) -> Option<SunTimes> {
        self.sun
    }

    /// Classify `now` against the stored sun times
    ///
    /// # Errors
    /// Returns `ClassificationDeferred` until both the sun times and a current
    /// time are available.
    pub fn classify(&self, now: Option<TimeOfDay>) -> Result<DayNight, ClassificationDeferred> {
        match (now, self.sun) {
            (Some(now), Some(sun)) => Ok(daynight::classify(now, sun.sunrise, sun.sunset)),
            _ => Err(ClassificationDeferred),
        }
    }
}
