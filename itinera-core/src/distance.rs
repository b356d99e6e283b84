//! Great-circle distance between WGS84 coordinates.

use geo::Coord;

/// Earth radius in kilometres used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometres.
///
/// Coordinates follow the `geo` convention of `x = longitude` and
/// `y = latitude`, both in degrees. Non-finite input propagates as `NaN`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::haversine_km;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let north = Coord { x: 0.0, y: 1.0 };
/// assert_eq!(haversine_km(origin, origin), 0.0);
/// assert!((haversine_km(origin, north) - 111.19).abs() < 0.01);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lng = (to.x - from.x).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Round a distance to two decimal places for presentation.
///
/// Halfway values round to the even hundredth, so `0.125` becomes `0.12`.
///
/// # Examples
/// ```
/// use itinera_core::round_km;
///
/// assert_eq!(round_km(1.23456), 1.23);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "rounding to hundredths scales through floating point"
)]
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round_ties_even() / 100.0
}
