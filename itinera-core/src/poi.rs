//! Points of interest and the optional anchor location.
//!
//! POIs carry their coordinates as plain `lat`/`lng` fields so they match the
//! request payload; [`PointOfInterest::location`] exposes them as a
//! [`geo::Coord`] with `x = longitude` and `y = latitude`.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visit duration applied when a payload omits `duration_min`.
pub const DEFAULT_DURATION_MIN: u32 = 60;

#[cfg(feature = "serde")]
const fn default_duration_min() -> u32 {
    DEFAULT_DURATION_MIN
}

/// A place worth visiting.
///
/// POIs have no identity beyond their position in the request; clusters and
/// itinerary items refer back to them by index.
///
/// # Examples
/// ```
/// use itinera_core::PointOfInterest;
///
/// let poi = PointOfInterest::new("Louvre", 48.8606, 2.3376, 120).with_category("museum");
/// assert_eq!(poi.location().x, 2.3376);
/// assert_eq!(poi.category.as_deref(), Some("museum"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointOfInterest {
    /// Display title.
    pub title: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Time spent at the stop, in minutes.
    #[cfg_attr(feature = "serde", serde(default = "default_duration_min"))]
    pub duration_min: u32,
    /// Free-form category such as `museum` or `park`.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub category: Option<String>,
}

impl PointOfInterest {
    /// Construct an uncategorised POI.
    pub fn new(title: impl Into<String>, lat: f64, lng: f64, duration_min: u32) -> Self {
        Self {
            title: title.into(),
            lat,
            lng,
            duration_min,
            category: None,
        }
    }

    /// Attach a category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Position as a `geo` coordinate.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

/// A fixed starting location such as a hotel.
///
/// The anchor only decides where the first cluster's walk begins; it is never
/// scheduled as a stop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    /// Display name.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Anchor {
    /// Construct an anchor from a name and coordinates.
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    /// Position as a `geo` coordinate.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

/// Finite and inside `[-90, 90]`.
pub(crate) fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

/// Finite and inside `[-180, 180]`.
pub(crate) fn is_valid_longitude(lng: f64) -> bool {
    lng.is_finite() && (-180.0..=180.0).contains(&lng)
}
