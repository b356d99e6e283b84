//! Travel-time estimator trait and the speed-based estimate for each mode.

use geo::Coord;

use super::TransportMode;
use crate::haversine_km;

/// Flat overhead in minutes added to every leg for boarding, parking and
/// wayfinding. It is also the shortest possible leg.
pub const LEG_OVERHEAD_MIN: u32 = 5;

/// Estimated travel between two stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    /// Whole minutes of travel, overhead included.
    pub minutes: u32,
    /// Great-circle distance in kilometres, unrounded.
    pub distance_km: f64,
}

/// Estimate the travel leg between two coordinates.
///
/// Implementations must be deterministic: the day packer relies on identical
/// input producing identical itineraries.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::{TransportMode, TravelTimeEstimator};
///
/// let from = Coord { x: 0.0, y: 0.0 };
/// let leg = TransportMode::Walk.estimate(from, from);
/// assert_eq!(leg.minutes, 5);
/// assert_eq!(leg.distance_km, 0.0);
/// ```
pub trait TravelTimeEstimator {
    /// Return the leg from `from` to `to`.
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Leg;
}

impl TravelTimeEstimator for TransportMode {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Leg {
        let distance_km = haversine_km(from, to);
        Leg {
            minutes: leg_minutes(distance_km, self.speed_kmh()),
            distance_km,
        }
    }
}

/// Whole minutes needed to cover `distance_km` at `speed_kmh`, plus
/// [`LEG_OVERHEAD_MIN`].
///
/// Partial minutes are dropped before the overhead is added. The result is
/// never below the overhead; a `NaN` distance counts as zero minutes of
/// movement.
///
/// # Examples
/// ```
/// use itinera_core::travel_time::leg_minutes;
///
/// // 4.5 km at 4.5 km/h is one hour on foot.
/// assert_eq!(leg_minutes(4.5, 4.5), 65);
/// assert_eq!(leg_minutes(0.0, 35.0), 5);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "minutes are derived from a floating-point distance and saturate into u32"
)]
pub fn leg_minutes(distance_km: f64, speed_kmh: f64) -> u32 {
    let moving = (distance_km / speed_kmh * 60.0).floor() as u32;
    moving
        .saturating_add(LEG_OVERHEAD_MIN)
        .max(LEG_OVERHEAD_MIN)
}
