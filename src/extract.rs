//! Per-event field extractors.

use std::fmt;

use chrono::Datelike;
use serde::Serialize;

use crate::models::Feature;

/// Epicentre position in decimal degrees.
///
/// GeoJSON stores `[longitude, latitude]`; this type carries them the other
/// way round and prints as `(lat, lon)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Magnitude of an event, `None` when the service reported none.
#[must_use]
pub fn magnitude(feature: &Feature) -> Option<f64> {
    feature.properties.mag
}

/// Latitude and longitude of an event.
///
/// Parsed features always hold at least two coordinates; a shorter sequence
/// reads as zero.
#[must_use]
pub fn location(feature: &Feature) -> Location {
    let coords = &feature.geometry.coordinates;
    Location {
        latitude: coords.get(1).copied().unwrap_or(0.0),
        longitude: coords.first().copied().unwrap_or(0.0),
    }
}

/// Calendar year of the event time in UTC.
#[must_use]
pub fn year(feature: &Feature) -> Option<i32> {
    feature.time().map(|t| t.year())
}
