//! Data models for FDSN GeoJSON event responses.
//!
//! Only the fields the statistics read are modelled; everything else in the
//! response is ignored by serde.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::QuakeError;

/// Top-level GeoJSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    /// Earthquake events
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Validate every feature, reporting the first offender by index.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeError::DataShape`] naming the feature that failed.
    pub fn validate(&self) -> Result<(), QuakeError> {
        for (index, feature) in self.features.iter().enumerate() {
            feature
                .validate()
                .map_err(|reason| QuakeError::DataShape(format!("features[{index}]: {reason}")))?;
        }
        Ok(())
    }
}

/// A single earthquake event.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    /// Geographic location
    pub geometry: Geometry,

    /// Event properties
    pub properties: Properties,
}

impl Feature {
    fn validate(&self) -> Result<(), String> {
        let n = self.geometry.coordinates.len();
        if n < 2 {
            return Err(format!("expected at least 2 coordinates, got {n}"));
        }
        if self.time().is_none() {
            return Err(format!("time {} is out of range", self.properties.time));
        }
        Ok(())
    }

    /// Get the event time as a `DateTime<Utc>`.
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.properties.time).single()
    }
}

/// Geographic geometry for an event.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// Coordinates: [longitude, latitude, depth_km]
    pub coordinates: Vec<f64>,
}

/// Event properties read from the response.
#[derive(Debug, Clone, Deserialize)]
pub struct Properties {
    /// Magnitude value, null for some reviewed events
    #[serde(default)]
    pub mag: Option<f64>,

    /// Event time (ms since epoch)
    pub time: i64,

    /// Human-readable place description
    #[serde(default)]
    pub place: Option<String>,
}

/// Decode a response body into a validated [`FeatureCollection`].
///
/// Malformed text and well-formed JSON of the wrong shape are reported
/// separately so callers can tell a truncated download from an API change.
///
/// # Errors
///
/// Returns [`QuakeError::Parse`] for invalid JSON and
/// [`QuakeError::DataShape`] for missing or mistyped fields.
pub fn parse_collection(text: &str) -> Result<FeatureCollection, QuakeError> {
    let value: Value = serde_json::from_str(text)?;

    if value.get("features").is_none() {
        return Err(QuakeError::DataShape("missing top-level `features`".into()));
    }

    let collection: FeatureCollection =
        serde_json::from_value(value).map_err(|e| QuakeError::DataShape(e.to_string()))?;
    collection.validate()?;

    Ok(collection)
}

#[cfg(test)]
pub(crate) fn feature(mag: Option<f64>, time_ms: i64, lon: f64, lat: f64) -> Feature {
    Feature {
        geometry: Geometry {
            coordinates: vec![lon, lat, 10.0],
        },
        properties: Properties {
            mag,
            time: time_ms,
            place: None,
        },
    }
}
