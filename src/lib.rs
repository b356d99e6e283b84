//! Facade crate for the Itinera itinerary planner.
//!
//! This crate re-exports the core domain types and the default
//! cluster-then-pack planner.

#![forbid(unsafe_code)]

pub use itinera_core::{
    Anchor, Cluster, ClusterPlanner, DayCounter, DayPlan, DaySummary, DayWindow, ItineraryItem,
    Leg, PlanError, PlanRequest, PlanRequestValidationError, PlanResponse, Planner,
    PointOfInterest, TransportMode, TravelTimeEstimator, cluster_by_radius, haversine_km,
    order_cluster, pack_days,
};
