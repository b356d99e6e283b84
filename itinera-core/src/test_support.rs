//! Deterministic estimators and small builders shared by unit tests and
//! downstream crates' tests.

use chrono::NaiveTime;
use geo::Coord;

use crate::schedule::CLOCK_FORMAT;
use crate::{DayWindow, Leg, TravelTimeEstimator, haversine_km};

/// `TravelTimeEstimator` charging the same number of minutes for every leg.
///
/// Distances are still measured so items report real kilometres.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedTravelTime {
    minutes: u32,
}

impl FixedTravelTime {
    /// Charge `minutes` per leg.
    #[must_use]
    pub const fn new(minutes: u32) -> Self {
        Self { minutes }
    }
}

impl TravelTimeEstimator for FixedTravelTime {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Leg {
        Leg {
            minutes: self.minutes,
            distance_km: haversine_km(from, to),
        }
    }
}

/// `TravelTimeEstimator` whose distances are always `NaN`.
#[derive(Debug, Default, Copy, Clone)]
pub struct UnmeasurableTravel;

impl TravelTimeEstimator for UnmeasurableTravel {
    fn estimate(&self, _from: Coord<f64>, _to: Coord<f64>) -> Leg {
        Leg {
            minutes: 0,
            distance_km: f64::NAN,
        }
    }
}

/// Parse an `HH:MM` literal.
///
/// # Panics
/// Panics when `value` is not a valid clock time.
#[must_use]
#[expect(clippy::expect_used, reason = "test helper with literal input")]
pub fn clock(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, CLOCK_FORMAT).expect("valid HH:MM literal")
}

/// Build a window from two `HH:MM` literals.
///
/// # Panics
/// Panics when either literal is invalid or the window is empty.
#[must_use]
#[expect(clippy::expect_used, reason = "test helper with literal input")]
pub fn window(start: &str, end: &str) -> DayWindow {
    DayWindow::new(clock(start), clock(end)).expect("window ends after it starts")
}
