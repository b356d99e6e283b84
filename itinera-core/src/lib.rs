//! Core domain types and algorithms for the Itinera planner.
//!
//! Points of interest are grouped into radius clusters, each cluster is put
//! into a greedy nearest-neighbour visiting order, and the ordered clusters
//! are packed into fixed daily time windows. The [`ClusterPlanner`] wires the
//! three stages together behind the [`Planner`] trait.
//!
//! # Examples
//! ```
//! use itinera_core::{ClusterPlanner, PlanRequest, Planner, PointOfInterest};
//!
//! let request = PlanRequest::new(vec![
//!     PointOfInterest::new("Louvre", 48.8606, 2.3376, 120),
//!     PointOfInterest::new("Tuileries", 48.8635, 2.3275, 45),
//! ]);
//! let response = ClusterPlanner.plan(&request)?;
//! assert_eq!(response.days.len(), 1);
//! assert_eq!(response.days[0].summary.stops, 2);
//! # Ok::<(), itinera_core::PlanError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cluster;
pub mod distance;
pub mod planner;
pub mod poi;
pub mod route;
pub mod schedule;
pub mod travel_time;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cluster::{Cluster, cluster_by_radius, span_km};
pub use distance::{EARTH_RADIUS_KM, haversine_km, round_km};
pub use planner::{
    ClusterPlanner, PlanError, PlanRequest, PlanRequestValidationError, PlanResponse, Planner,
};
pub use poi::{Anchor, PointOfInterest};
pub use route::order_cluster;
pub use schedule::{
    DayCounter, DayPacker, DayPlan, DaySummary, DayWindow, DayWindowError, ItineraryItem,
    ScheduleError, pack_days,
};
pub use travel_time::{Leg, TransportMode, TravelTimeEstimator};
