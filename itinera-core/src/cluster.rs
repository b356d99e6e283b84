//! Seed-and-sweep radius clustering.
//!
//! Each pass takes the lowest remaining POI index as the seed and sweeps every
//! other remaining POI within `radius_km` of that seed into its cluster.
//! Membership is judged against the seed only, so two members may sit up to
//! twice the radius apart, and a POI just outside the seed's radius stays out
//! even when it is next to another member.

use std::collections::VecDeque;

use crate::{PointOfInterest, haversine_km};

/// A group of POI indices gathered around a seed.
///
/// # Examples
/// ```
/// use itinera_core::{PointOfInterest, cluster_by_radius};
///
/// let pois = vec![
///     PointOfInterest::new("Louvre", 48.8606, 2.3376, 120),
///     PointOfInterest::new("Tuileries", 48.8635, 2.3275, 45),
///     PointOfInterest::new("Sacre-Coeur", 48.8867, 2.3431, 60),
/// ];
/// let clusters = cluster_by_radius(&pois, 1.2);
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[0].members, vec![0, 1]);
/// assert_eq!(clusters[1].seed, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Index of the POI every member was measured against.
    pub seed: usize,
    /// Member indices in ascending order, seed first.
    pub members: Vec<usize>,
}

impl Cluster {
    /// Number of members, seed included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Widest great-circle distance between any two members.
    #[must_use]
    pub fn span_km(&self, pois: &[PointOfInterest]) -> f64 {
        span_km(pois, &self.members)
    }
}

/// Partition every POI index into disjoint radius clusters.
///
/// Seeds are taken in input order, which keeps the partition reproducible for
/// a fixed input. A radius of zero only groups POIs sharing a coordinate; a
/// negative radius yields one singleton cluster per POI.
#[must_use]
pub fn cluster_by_radius(pois: &[PointOfInterest], radius_km: f64) -> Vec<Cluster> {
    let mut remaining: VecDeque<usize> = (0..pois.len()).collect();
    let mut clusters = Vec::new();

    while let Some(seed) = remaining.pop_front() {
        let Some(origin) = pois.get(seed).map(PointOfInterest::location) else {
            continue;
        };
        let mut members = vec![seed];
        remaining.retain(|&index| {
            let within = pois
                .get(index)
                .is_some_and(|poi| haversine_km(origin, poi.location()) <= radius_km);
            if within {
                members.push(index);
            }
            !within
        });
        clusters.push(Cluster { seed, members });
    }

    log::debug!(
        "grouped {} POIs into {} clusters at radius {radius_km} km",
        pois.len(),
        clusters.len()
    );
    clusters
}

/// Widest great-circle distance between any two of the given POIs.
///
/// Returns `0.0` for fewer than two members. The value does not depend on
/// the order of `members`. Pairs whose distance is `NaN` are ignored.
#[must_use]
pub fn span_km(pois: &[PointOfInterest], members: &[usize]) -> f64 {
    let locations: Vec<_> = members
        .iter()
        .filter_map(|&index| pois.get(index).map(PointOfInterest::location))
        .collect();
    let mut widest = 0.0_f64;
    for (offset, &from) in locations.iter().enumerate() {
        for &to in locations.iter().skip(offset + 1) {
            widest = widest.max(haversine_km(from, to));
        }
    }
    widest
}
