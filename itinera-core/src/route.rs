//! Greedy nearest-neighbour ordering of a cluster.
//!
//! The walk starts at the member nearest the anchor, or at the first member
//! when no anchor is given, then repeatedly steps to the nearest member not
//! yet visited. Ties go to the member listed first. This is a heuristic: it
//! does not look for the shortest overall tour.

use geo::Coord;

use crate::{PointOfInterest, haversine_km};

/// Order a cluster's members into a visiting sequence.
///
/// The result is a permutation of `members`. Indices that do not resolve to
/// a POI are dropped with a warning. Distances that evaluate to `NaN` never
/// win a comparison; if no candidate has a finite distance the next member in
/// list order is taken.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::{PointOfInterest, order_cluster};
///
/// let pois = vec![
///     PointOfInterest::new("West", 0.0, 0.00, 30),
///     PointOfInterest::new("East", 0.0, 0.02, 30),
///     PointOfInterest::new("Middle", 0.0, 0.01, 30),
/// ];
/// assert_eq!(order_cluster(&pois, &[0, 1, 2], None), vec![0, 2, 1]);
///
/// let hotel = Coord { x: 0.03, y: 0.0 };
/// assert_eq!(order_cluster(&pois, &[0, 1, 2], Some(hotel)), vec![1, 2, 0]);
/// ```
#[must_use]
pub fn order_cluster(
    pois: &[PointOfInterest],
    members: &[usize],
    anchor: Option<Coord<f64>>,
) -> Vec<usize> {
    let mut unvisited: Vec<(usize, Coord<f64>)> = members
        .iter()
        .filter_map(|&index| {
            let location = pois.get(index).map(PointOfInterest::location);
            if location.is_none() {
                log::warn!("cluster member {index} does not refer to a POI; skipping it");
            }
            location.map(|coord| (index, coord))
        })
        .collect();
    if unvisited.is_empty() {
        return Vec::new();
    }

    let first = anchor.map_or(0, |origin| nearest(origin, &unvisited));
    let (first_index, mut here) = unvisited.remove(first);
    let mut ordered = Vec::with_capacity(unvisited.len() + 1);
    ordered.push(first_index);

    while !unvisited.is_empty() {
        let (index, location) = unvisited.remove(nearest(here, &unvisited));
        ordered.push(index);
        here = location;
    }
    ordered
}

/// Position in `candidates` of the entry closest to `origin`.
///
/// Strict comparison keeps the earliest entry on ties and skips `NaN`.
fn nearest(origin: Coord<f64>, candidates: &[(usize, Coord<f64>)]) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (position, &(_, location)) in candidates.iter().enumerate() {
        let distance = haversine_km(origin, location);
        if best.is_none_or(|(_, closest)| distance < closest) && !distance.is_nan() {
            best = Some((position, distance));
        }
    }
    best.map_or(0, |(position, _)| position)
}
