//! End-to-end itinerary planning.
//!
//! A [`PlanRequest`] mirrors the request payload, defaults included.
//! [`ClusterPlanner`] validates it, clusters the POIs by radius, orders each
//! cluster by nearest neighbour and packs the result into days.

use chrono::NaiveTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::poi::{is_valid_latitude, is_valid_longitude};
use crate::schedule::CLOCK_FORMAT;
use crate::{
    Anchor, DayPlan, DayWindow, DayWindowError, PointOfInterest, ScheduleError, TransportMode,
    TravelTimeEstimator, cluster_by_radius, order_cluster, pack_days,
};

/// Cluster radius applied when a payload omits `radius_km`.
pub const DEFAULT_RADIUS_KM: f64 = 1.2;
/// Day start applied when a payload omits `start_time`.
pub const DEFAULT_START_TIME: &str = "09:00";
/// Day end applied when a payload omits `end_time`.
pub const DEFAULT_END_TIME: &str = "19:00";

#[cfg(feature = "serde")]
const fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

#[cfg(feature = "serde")]
fn default_start_time() -> String {
    DEFAULT_START_TIME.to_owned()
}

#[cfg(feature = "serde")]
fn default_end_time() -> String {
    DEFAULT_END_TIME.to_owned()
}

/// Parameters for a planning request.
///
/// Times stay as the caller's `HH:MM` strings until validation so malformed
/// values can be reported back verbatim.
///
/// # Examples
/// ```
/// use itinera_core::{Anchor, PlanRequest, PointOfInterest, TransportMode};
///
/// let request = PlanRequest::new(vec![PointOfInterest::new("Louvre", 48.8606, 2.3376, 120)])
///     .with_hotel(Anchor::new("Hotel du Louvre", 48.8631, 2.3359))
///     .with_window("10:00", "18:00")
///     .with_transport_mode(TransportMode::Transit);
/// assert_eq!(request.radius_km, 1.2);
/// assert_eq!(request.validate_detailed()?.minutes(), 480);
/// # Ok::<(), itinera_core::PlanRequestValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanRequest {
    /// POIs to schedule, identified by position.
    pub pois: Vec<PointOfInterest>,
    /// Where the first cluster's walk begins.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hotel: Option<Anchor>,
    /// Seed-to-member clustering radius in kilometres.
    #[cfg_attr(feature = "serde", serde(default = "default_radius_km"))]
    pub radius_km: f64,
    /// Daily start time, `HH:MM`.
    #[cfg_attr(feature = "serde", serde(default = "default_start_time"))]
    pub start_time: String,
    /// Daily end time, `HH:MM`.
    #[cfg_attr(feature = "serde", serde(default = "default_end_time"))]
    pub end_time: String,
    /// How the visitor moves between stops.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transport_mode: TransportMode,
}

/// Reasons a [`PlanRequest`] is rejected before planning starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanRequestValidationError {
    /// The POI list is empty.
    #[error("No POIs provided.")]
    EmptyPois,
    /// A POI latitude is not a finite value in `[-90, 90]`.
    #[error("POI {index} has latitude {value} outside [-90, 90]")]
    InvalidLatitude {
        /// Position of the POI in the request.
        index: usize,
        /// Rejected latitude.
        value: f64,
    },
    /// A POI longitude is not a finite value in `[-180, 180]`.
    #[error("POI {index} has longitude {value} outside [-180, 180]")]
    InvalidLongitude {
        /// Position of the POI in the request.
        index: usize,
        /// Rejected longitude.
        value: f64,
    },
    /// A POI lasts zero minutes.
    #[error("POI {index} must last at least one minute")]
    ZeroDuration {
        /// Position of the POI in the request.
        index: usize,
    },
    /// The hotel coordinates are out of range or not finite.
    #[error("hotel coordinates ({lat}, {lng}) are out of range")]
    InvalidAnchor {
        /// Rejected latitude.
        lat: f64,
        /// Rejected longitude.
        lng: f64,
    },
    /// The radius is `NaN` or infinite.
    #[error("radius_km must be a finite number, got {0}")]
    InvalidRadius(f64),
    /// A time field is not `HH:MM`.
    #[error("{field} must be an HH:MM time, got {value:?}")]
    InvalidTime {
        /// Name of the payload field.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The day window is empty or inverted.
    #[error(transparent)]
    Window(#[from] DayWindowError),
}

impl PlanRequest {
    /// Construct a request with default radius, window and transport mode.
    #[must_use]
    pub fn new(pois: Vec<PointOfInterest>) -> Self {
        Self {
            pois,
            hotel: None,
            radius_km: DEFAULT_RADIUS_KM,
            start_time: DEFAULT_START_TIME.to_owned(),
            end_time: DEFAULT_END_TIME.to_owned(),
            transport_mode: TransportMode::default(),
        }
    }

    /// Set the anchor while returning `self` for chaining.
    #[must_use]
    pub fn with_hotel(mut self, hotel: Anchor) -> Self {
        self.hotel = Some(hotel);
        self
    }

    /// Set the clustering radius while returning `self` for chaining.
    #[must_use]
    pub const fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Set the daily window from `HH:MM` strings.
    #[must_use]
    pub fn with_window(
        mut self,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        self.start_time = start_time.into();
        self.end_time = end_time.into();
        self
    }

    /// Set the transport mode while returning `self` for chaining.
    #[must_use]
    pub const fn with_transport_mode(mut self, transport_mode: TransportMode) -> Self {
        self.transport_mode = transport_mode;
        self
    }

    /// Check the request and return its parsed day window.
    ///
    /// Rules are checked in payload order and the first failure is returned.
    pub fn validate_detailed(&self) -> Result<DayWindow, PlanRequestValidationError> {
        if self.pois.is_empty() {
            return Err(PlanRequestValidationError::EmptyPois);
        }
        for (index, poi) in self.pois.iter().enumerate() {
            if !is_valid_latitude(poi.lat) {
                return Err(PlanRequestValidationError::InvalidLatitude {
                    index,
                    value: poi.lat,
                });
            }
            if !is_valid_longitude(poi.lng) {
                return Err(PlanRequestValidationError::InvalidLongitude {
                    index,
                    value: poi.lng,
                });
            }
            if poi.duration_min == 0 {
                return Err(PlanRequestValidationError::ZeroDuration { index });
            }
        }
        if let Some(hotel) = &self.hotel
            && !(is_valid_latitude(hotel.lat) && is_valid_longitude(hotel.lng))
        {
            return Err(PlanRequestValidationError::InvalidAnchor {
                lat: hotel.lat,
                lng: hotel.lng,
            });
        }
        if !self.radius_km.is_finite() {
            return Err(PlanRequestValidationError::InvalidRadius(self.radius_km));
        }
        let start = parse_clock("start_time", &self.start_time)?;
        let end = parse_clock("end_time", &self.end_time)?;
        Ok(DayWindow::new(start, end)?)
    }

    /// Check the request, mapping failures into [`PlanError`].
    pub fn validate(&self) -> Result<DayWindow, PlanError> {
        self.validate_detailed().map_err(PlanError::from)
    }
}

fn parse_clock(field: &'static str, value: &str) -> Result<NaiveTime, PlanRequestValidationError> {
    NaiveTime::parse_from_str(value, CLOCK_FORMAT).map_err(|_| {
        PlanRequestValidationError::InvalidTime {
            field,
            value: value.to_owned(),
        }
    })
}

/// Response from a successful plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanResponse {
    /// Days in order, numbered from 1.
    pub days: Vec<DayPlan>,
    /// Radius the clusters were built with.
    pub radius_km: f64,
}

/// Errors returned by [`Planner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request was rejected before planning started.
    #[error(transparent)]
    InvalidRequest(#[from] PlanRequestValidationError),
    /// Planning failed part-way; no partial plan is returned.
    #[error("failed to build itinerary: {0}")]
    Schedule(#[from] ScheduleError),
}

impl PlanError {
    /// Whether the caller's input caused the failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

/// Turn a request into a day-by-day itinerary.
///
/// Planners must be `Send + Sync` so independent requests can run on separate
/// threads; a request never shares mutable state with another.
pub trait Planner: Send + Sync {
    /// Plan a request, producing an itinerary or an error.
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError>;
}

/// Radius clustering, nearest-neighbour ordering and window packing.
///
/// Travel legs are estimated from the request's [`TransportMode`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterPlanner;

impl ClusterPlanner {
    /// Plan `request` with a caller-supplied travel estimator instead of the
    /// request's transport mode.
    pub fn plan_with_estimator<E>(
        &self,
        request: &PlanRequest,
        estimator: &E,
    ) -> Result<PlanResponse, PlanError>
    where
        E: TravelTimeEstimator,
    {
        let window = request.validate()?;
        let clusters = cluster_by_radius(&request.pois, request.radius_km);

        let anchor = request.hotel.as_ref().map(Anchor::location);
        let ordered: Vec<Vec<usize>> = clusters
            .iter()
            .enumerate()
            .map(|(position, cluster)| {
                let start = if position == 0 { anchor } else { None };
                order_cluster(&request.pois, &cluster.members, start)
            })
            .collect();

        let days = pack_days(&request.pois, &ordered, window, estimator)?;
        log::info!(
            "planned {} POIs across {} days from {} clusters",
            request.pois.len(),
            days.len(),
            clusters.len()
        );
        Ok(PlanResponse {
            days,
            radius_km: request.radius_km,
        })
    }
}

impl Planner for ClusterPlanner {
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError> {
        self.plan_with_estimator(request, &request.transport_mode)
    }
}
