//! Property-based tests for the planning pipeline.
//!
//! # Invariants tested
//!
//! - **Determinism:** identical requests yield identical plans.
//! - **Partition:** every POI is scheduled exactly once.
//! - **Radius containment:** every member lies within the radius of its seed.
//! - **Window respect:** a day only overshoots its window when it holds a
//!   single stop that is longer than the window on its own.
//! - **Clock continuity:** each stop starts exactly its travel time after the
//!   previous stop ends.
//! - **Ordering:** the nearest-neighbour order is a permutation of the cluster.

use std::collections::HashSet;

use chrono::TimeDelta;
use itinera_core::{
    ClusterPlanner, PlanRequest, Planner, PointOfInterest, TransportMode, cluster_by_radius,
    haversine_km, order_cluster,
};
use proptest::prelude::*;

/// POIs scattered over a city-sized box around central Paris.
fn poi_strategy() -> impl Strategy<Value = PointOfInterest> {
    (48.80_f64..48.92, 2.25_f64..2.42, 15_u32..=240).prop_map(|(lat, lng, duration)| {
        PointOfInterest::new(format!("POI {lat:.4},{lng:.4}"), lat, lng, duration)
    })
}

fn mode_strategy() -> impl Strategy<Value = TransportMode> {
    prop_oneof![
        Just(TransportMode::Walk),
        Just(TransportMode::Transit),
        Just(TransportMode::Drive),
    ]
}

fn request_strategy() -> impl Strategy<Value = PlanRequest> {
    (
        prop::collection::vec(poi_strategy(), 1..25),
        0.0_f64..4.0,
        mode_strategy(),
    )
        .prop_map(|(pois, radius_km, mode)| {
            PlanRequest::new(pois)
                .with_radius_km(radius_km)
                .with_transport_mode(mode)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn planning_is_deterministic(request in request_strategy()) {
        let first = ClusterPlanner.plan(&request).expect("valid request");
        let second = ClusterPlanner.plan(&request).expect("valid request");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_poi_is_scheduled_exactly_once(request in request_strategy()) {
        let response = ClusterPlanner.plan(&request).expect("valid request");
        let mut seen = HashSet::new();
        for item in response.days.iter().flat_map(|day| day.items.iter()) {
            prop_assert!(seen.insert(item.poi_index), "POI {} scheduled twice", item.poi_index);
        }
        prop_assert_eq!(seen.len(), request.pois.len());
    }

    #[test]
    fn days_are_numbered_consecutively(request in request_strategy()) {
        let response = ClusterPlanner.plan(&request).expect("valid request");
        for (expected, day) in (1_u32..).zip(response.days.iter()) {
            prop_assert_eq!(day.day, expected);
            prop_assert_eq!(day.summary.stops, day.items.len());
        }
    }

    #[test]
    fn members_lie_within_radius_of_their_seed(request in request_strategy()) {
        let clusters = cluster_by_radius(&request.pois, request.radius_km);
        let mut members = HashSet::new();
        for cluster in &clusters {
            let seed = request.pois[cluster.seed].location();
            for &index in &cluster.members {
                prop_assert!(members.insert(index));
                if index != cluster.seed {
                    let distance = haversine_km(seed, request.pois[index].location());
                    prop_assert!(distance <= request.radius_km);
                }
            }
        }
        prop_assert_eq!(members.len(), request.pois.len());
    }

    #[test]
    fn days_respect_the_window(request in request_strategy()) {
        let window = request.validate_detailed().expect("valid request").minutes();
        let response = ClusterPlanner.plan(&request).expect("valid request");
        for day in &response.days {
            let used: u32 = day
                .items
                .iter()
                .map(|item| item.duration_min + item.travel_min)
                .sum();
            prop_assert!(
                used <= window || day.items.len() == 1,
                "day {} uses {used} of {window} minutes",
                day.day
            );
        }
    }

    #[test]
    fn stops_follow_their_travel_time(request in request_strategy()) {
        let response = ClusterPlanner.plan(&request).expect("valid request");
        for day in &response.days {
            for pair in day.items.windows(2) {
                let [previous, next] = pair else { continue };
                let gap = next.start - previous.end;
                prop_assert_eq!(gap, TimeDelta::minutes(i64::from(next.travel_min)));
            }
            for item in &day.items {
                prop_assert_eq!(
                    item.end - item.start,
                    TimeDelta::minutes(i64::from(item.duration_min))
                );
            }
        }
    }

    #[test]
    fn ordering_is_a_permutation(request in request_strategy()) {
        for cluster in cluster_by_radius(&request.pois, request.radius_km) {
            let mut ordered = order_cluster(&request.pois, &cluster.members, None);
            ordered.sort_unstable();
            prop_assert_eq!(ordered, cluster.members.clone());
        }
    }
}
