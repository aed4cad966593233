//! FDSN event query parameters.
//!
//! A [`Query`] is built once (defaults or CLI overrides) and rendered into the
//! `query.geojson` parameter list by [`Query::params`].

use std::fmt;

use chrono::NaiveDate;

use crate::errors::QuakeError;

/// Date format accepted by the FDSN `starttime`/`endtime` parameters.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Geographic bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Default for BBox {
    /// The British Isles window.
    fn default() -> Self {
        Self {
            min_lat: 50.008,
            min_lon: -9.756,
            max_lat: 58.723,
            max_lon: 1.67,
        }
    }
}

impl std::str::FromStr for BBox {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(format!(
                "bbox requires 4 values (minlat,minlon,maxlat,maxlon), got {}",
                parts.len()
            ));
        }

        let vals: Result<Vec<f64>, _> = parts.iter().map(|p| p.trim().parse::<f64>()).collect();
        let vals = vals.map_err(|e| format!("invalid number in bbox: {e}"))?;

        let bbox = Self {
            min_lat: vals[0],
            min_lon: vals[1],
            max_lat: vals[2],
            max_lon: vals[3],
        };
        bbox.validate()?;
        Ok(bbox)
    }
}

impl BBox {
    /// Check coordinate ranges.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first out-of-range bound.
    pub fn validate(&self) -> Result<(), String> {
        for (name, lat) in [("min_lat", self.min_lat), ("max_lat", self.max_lat)] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(format!("{name} {lat} out of range [-90, 90]"));
            }
        }
        for (name, lon) in [("min_lon", self.min_lon), ("max_lon", self.max_lon)] {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(format!("{name} {lon} out of range [-180, 180]"));
            }
        }
        if self.min_lat > self.max_lat {
            return Err(format!(
                "min_lat {} must be <= max_lat {}",
                self.min_lat, self.max_lat
            ));
        }
        if self.min_lon > self.max_lon {
            return Err(format!(
                "min_lon {} must be <= max_lon {}",
                self.min_lon, self.max_lon
            ));
        }
        Ok(())
    }
}

/// Result ordering supported by the FDSN event service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// Newest first
    Time,
    /// Oldest first
    #[default]
    TimeAsc,
    /// Largest first
    Magnitude,
    /// Smallest first
    MagnitudeAsc,
}

impl OrderBy {
    /// Get the wire value for the `orderby` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::TimeAsc => "time-asc",
            Self::Magnitude => "magnitude",
            Self::MagnitudeAsc => "magnitude-asc",
        }
    }
}

impl std::str::FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "time" => Ok(Self::Time),
            "time-asc" => Ok(Self::TimeAsc),
            "magnitude" => Ok(Self::Magnitude),
            "magnitude-asc" => Ok(Self::MagnitudeAsc),
            _ => Err(format!(
                "unknown order: {s} (expected: time, time-asc, magnitude, magnitude-asc)"
            )),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable filter set for one event query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub bbox: BBox,
    pub min_magnitude: f64,
    pub order_by: OrderBy,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2018, 10, 11).unwrap_or_default(),
            bbox: BBox::default(),
            min_magnitude: 1.0,
            order_by: OrderBy::TimeAsc,
        }
    }
}

impl Query {
    /// Check that the query is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeError::InvalidQuery`] when the date range is inverted
    /// or the bounding box is out of range.
    pub fn validate(&self) -> Result<(), QuakeError> {
        if self.start > self.end {
            return Err(QuakeError::InvalidQuery(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }
        self.bbox.validate().map_err(QuakeError::InvalidQuery)
    }

    /// Render the FDSN query parameters in request order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("starttime", self.start.format(DATE_FORMAT).to_string()),
            ("endtime", self.end.format(DATE_FORMAT).to_string()),
            ("minlatitude", self.bbox.min_lat.to_string()),
            ("maxlatitude", self.bbox.max_lat.to_string()),
            ("minlongitude", self.bbox.min_lon.to_string()),
            ("maxlongitude", self.bbox.max_lon.to_string()),
            ("minmagnitude", self.min_magnitude.to_string()),
            ("orderby", self.order_by.as_str().to_string()),
        ]
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns a message when the string is not a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| format!("invalid date {s:?} (expected YYYY-MM-DD): {e}"))
}
