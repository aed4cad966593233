//! Aggregate statistics over a feature sequence.
//!
//! Events without a magnitude still count as events, but take no part in the
//! maximum or the averages.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::extract::{self, Location};
use crate::models::Feature;

/// Strongest event in a sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Maximum {
    pub magnitude: f64,
    pub location: Location,
    /// Place description, when the service gave one
    pub place: Option<String>,
}

impl Maximum {
    /// Fallback for "no event carried a magnitude". Not a real M0 event;
    /// use [`strongest`] to tell the two apart.
    pub const NO_DATA: Self = Self {
        magnitude: 0.0,
        location: Location {
            latitude: 0.0,
            longitude: 0.0,
        },
        place: None,
    };
}

/// Total number of events.
#[must_use]
pub fn count(features: &[Feature]) -> usize {
    features.len()
}

/// Event with the strictly greatest magnitude; the earliest wins a tie.
/// `None` when no event carries a magnitude.
#[must_use]
pub fn strongest(features: &[Feature]) -> Option<Maximum> {
    let mut best: Option<Maximum> = None;

    for feature in features {
        let Some(mag) = extract::magnitude(feature) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| mag > b.magnitude) {
            best = Some(Maximum {
                magnitude: mag,
                location: extract::location(feature),
                place: feature.properties.place.clone(),
            });
        }
    }

    best
}

/// Like [`strongest`], falling back to [`Maximum::NO_DATA`].
#[must_use]
pub fn maximum(features: &[Feature]) -> Maximum {
    strongest(features).unwrap_or(Maximum::NO_DATA)
}

/// Number of events per calendar year. Years without events are absent.
#[must_use]
pub fn yearly_counts(features: &[Feature]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for year in features.iter().filter_map(extract::year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}

/// Mean magnitude per calendar year.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn yearly_average_magnitude(features: &[Feature]) -> BTreeMap<i32, f64> {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for feature in features {
        let (Some(year), Some(mag)) = (extract::year(feature), extract::magnitude(feature)) else {
            continue;
        };
        let slot = sums.entry(year).or_insert((0.0, 0));
        slot.0 += mag;
        slot.1 += 1;
    }

    // Every bucket holds at least one magnitude, so n > 0.
    sums.into_iter()
        .map(|(year, (sum, n))| (year, sum / n as f64))
        .collect()
}

/// All aggregates for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub count: usize,
    /// `None` when no event carried a magnitude
    pub maximum: Option<Maximum>,
    pub yearly_counts: BTreeMap<i32, usize>,
    pub yearly_average_magnitude: BTreeMap<i32, f64>,
}

impl Summary {
    /// Compute every aggregate over `features`.
    #[must_use]
    pub fn from_features(features: &[Feature]) -> Self {
        Self {
            count: count(features),
            maximum: strongest(features),
            yearly_counts: yearly_counts(features),
            yearly_average_magnitude: yearly_average_magnitude(features),
        }
    }
}
