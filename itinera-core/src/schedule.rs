//! Pack ordered clusters into fixed daily time windows.
//!
//! Each cluster is walked in visiting order. A day opens at the window start
//! with the next unscheduled member, placed whatever its duration, and keeps
//! taking members while elapsed time plus the next leg and visit still fits
//! the window. Members that do not fit roll into a fresh day for the same
//! cluster. Day numbers come from a single [`DayCounter`] threaded through
//! every cluster, so they increase across the whole plan.

use chrono::{NaiveTime, TimeDelta};
use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PointOfInterest, TravelTimeEstimator, round_km, span_km};

/// `strftime` pattern for clock times in payloads.
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Errors returned by [`DayWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DayWindowError {
    /// The window closes at or before it opens.
    #[error("day window must end after it starts (start {start}, end {end})")]
    NotAfterStart {
        /// Opening time.
        start: NaiveTime,
        /// Closing time.
        end: NaiveTime,
    },
}

/// The daily time budget for stops and travel.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use itinera_core::DayWindow;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time");
/// let end = NaiveTime::from_hms_opt(19, 0, 0).expect("valid time");
/// let window = DayWindow::new(start, end)?;
/// assert_eq!(window.minutes(), 600);
/// assert!(DayWindow::new(end, start).is_err());
/// # Ok::<(), itinera_core::DayWindowError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl DayWindow {
    /// Validate and construct a window. Both times fall on the same day.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, DayWindowError> {
        if end <= start {
            return Err(DayWindowError::NotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Opening time.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Closing time.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of the window in whole minutes; always positive.
    #[must_use]
    pub fn minutes(&self) -> u32 {
        let span = (self.end - self.start).num_minutes();
        u32::try_from(span).unwrap_or_default()
    }
}

/// Monotonic day numbering shared by every cluster of a plan.
///
/// # Examples
/// ```
/// use itinera_core::DayCounter;
///
/// let mut counter = DayCounter::new();
/// assert_eq!(counter.advance(), 1);
/// assert_eq!(counter.advance(), 2);
/// assert_eq!(counter.peek(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCounter {
    next: u32,
}

impl Default for DayCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl DayCounter {
    /// A counter whose first day is day 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// The number the next day will receive.
    #[must_use]
    pub const fn peek(&self) -> u32 {
        self.next
    }

    /// Claim the next day number.
    pub const fn advance(&mut self) -> u32 {
        let day = self.next;
        self.next = self.next.saturating_add(1);
        day
    }
}

/// A scheduled stop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItineraryItem {
    /// Index of the POI in the request.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub poi_index: usize,
    /// POI title.
    pub title: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Visit length in minutes.
    pub duration_min: u32,
    /// Arrival time.
    #[cfg_attr(feature = "serde", serde(with = "clock"))]
    pub start: NaiveTime,
    /// Departure time.
    #[cfg_attr(feature = "serde", serde(with = "clock"))]
    pub end: NaiveTime,
    /// Minutes travelled from the previous stop; zero for a day's first stop.
    pub travel_min: u32,
    /// Kilometres from the previous stop, rounded to two decimals.
    pub distance_km: f64,
}

/// Per-day summary.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DaySummary {
    /// Widest distance between any two members of the originating cluster,
    /// rounded to two decimals.
    pub within_km: f64,
    /// Number of stops scheduled on the day.
    pub stops: usize,
}

/// One day of the itinerary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayPlan {
    /// 1-based day number, unique across the plan.
    pub day: u32,
    /// Cluster span and stop count.
    pub summary: DaySummary,
    /// Stops in visiting order.
    pub items: Vec<ItineraryItem>,
}

/// Errors raised while packing days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A cluster refers to a POI index outside the request.
    #[error("cluster refers to unknown POI index {index}")]
    UnknownPoi {
        /// Offending index.
        index: usize,
    },
    /// The distance between two consecutive stops is not a finite number.
    #[error("distance between POI {from} and POI {to} is not a finite number")]
    NonFiniteDistance {
        /// Index of the stop being left.
        from: usize,
        /// Index of the stop being approached.
        to: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Stop<'a> {
    index: usize,
    poi: &'a PointOfInterest,
}

impl Stop<'_> {
    const fn location(&self) -> Coord<f64> {
        self.poi.location()
    }

    fn item(&self, start: NaiveTime, travel_min: u32, distance_km: f64) -> ItineraryItem {
        ItineraryItem {
            poi_index: self.index,
            title: self.poi.title.clone(),
            lat: self.poi.lat,
            lng: self.poi.lng,
            duration_min: self.poi.duration_min,
            start,
            end: advance(start, self.poi.duration_min),
            travel_min,
            distance_km,
        }
    }
}

/// Packs ordered clusters into days for one request.
#[derive(Debug)]
pub struct DayPacker<'a, E> {
    pois: &'a [PointOfInterest],
    window: DayWindow,
    estimator: &'a E,
}

impl<'a, E> DayPacker<'a, E>
where
    E: TravelTimeEstimator,
{
    /// Construct a packer over the request's POIs.
    pub const fn new(pois: &'a [PointOfInterest], window: DayWindow, estimator: &'a E) -> Self {
        Self {
            pois,
            window,
            estimator,
        }
    }

    /// Schedule one ordered cluster, numbering its days from `counter`.
    ///
    /// Every member lands in exactly one item. An empty cluster yields no
    /// days and leaves the counter untouched.
    pub fn pack_cluster(
        &self,
        ordered: &[usize],
        counter: &mut DayCounter,
    ) -> Result<Vec<DayPlan>, ScheduleError> {
        let stops = self.resolve(ordered)?;
        let within_km = round_km(span_km(self.pois, ordered));
        let window_minutes = self.window.minutes();

        let mut days = Vec::new();
        let mut remaining = stops.as_slice();
        while let Some((first, rest)) = remaining.split_first() {
            let mut clock = self.window.start();
            let mut items = vec![first.item(clock, 0, 0.0)];
            clock = advance(clock, first.poi.duration_min);
            let mut elapsed = first.poi.duration_min;
            let mut previous = first;
            let mut tail = rest;

            while let Some((next, after)) = tail.split_first() {
                let leg = self.estimator.estimate(previous.location(), next.location());
                if !leg.distance_km.is_finite() {
                    return Err(ScheduleError::NonFiniteDistance {
                        from: previous.index,
                        to: next.index,
                    });
                }
                let needed = elapsed
                    .saturating_add(leg.minutes)
                    .saturating_add(next.poi.duration_min);
                if needed > window_minutes {
                    break;
                }
                let arrival = advance(clock, leg.minutes);
                items.push(next.item(arrival, leg.minutes, round_km(leg.distance_km)));
                clock = advance(arrival, next.poi.duration_min);
                elapsed = needed;
                previous = next;
                tail = after;
            }

            remaining = tail;
            days.push(DayPlan {
                day: counter.advance(),
                summary: DaySummary {
                    within_km,
                    stops: items.len(),
                },
                items,
            });
        }
        Ok(days)
    }

    fn resolve(&self, ordered: &[usize]) -> Result<Vec<Stop<'a>>, ScheduleError> {
        ordered
            .iter()
            .map(|&index| {
                self.pois
                    .get(index)
                    .map(|poi| Stop { index, poi })
                    .ok_or(ScheduleError::UnknownPoi { index })
            })
            .collect()
    }
}

/// Schedule every ordered cluster in turn with one shared day counter.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use itinera_core::{DayWindow, PointOfInterest, TransportMode, pack_days};
///
/// let pois = vec![
///     PointOfInterest::new("Morning", 0.0, 0.0, 300),
///     PointOfInterest::new("Afternoon", 0.0, 0.001, 300),
/// ];
/// let window = DayWindow::new(
///     NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
///     NaiveTime::from_hms_opt(19, 0, 0).expect("valid time"),
/// )?;
/// let days = pack_days(&pois, &[vec![0, 1]], window, &TransportMode::Walk)?;
/// // 300 + 5 + 300 minutes overflows the 600-minute window.
/// assert_eq!(days.len(), 2);
/// assert_eq!(days[1].day, 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn pack_days<E>(
    pois: &[PointOfInterest],
    ordered_clusters: &[Vec<usize>],
    window: DayWindow,
    estimator: &E,
) -> Result<Vec<DayPlan>, ScheduleError>
where
    E: TravelTimeEstimator,
{
    let packer = DayPacker::new(pois, window, estimator);
    let mut counter = DayCounter::new();
    let mut days = Vec::new();
    for ordered in ordered_clusters {
        days.extend(packer.pack_cluster(ordered, &mut counter)?);
    }
    log::debug!(
        "packed {} clusters into {} days of {} minutes",
        ordered_clusters.len(),
        days.len(),
        window.minutes()
    );
    Ok(days)
}

/// Move a clock forward, wrapping at midnight.
fn advance(clock: NaiveTime, minutes: u32) -> NaiveTime {
    let (time, _) = clock.overflowing_add_signed(TimeDelta::minutes(i64::from(minutes)));
    time
}

#[cfg(feature = "serde")]
mod clock {
    //! Serde adapter rendering [`NaiveTime`] as `HH:MM`.

    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    use super::CLOCK_FORMAT;

    pub(super) fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(CLOCK_FORMAT))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, CLOCK_FORMAT).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransportMode;
    use crate::test_support::{FixedTravelTime, UnmeasurableTravel, clock, window};
    use rstest::{fixture, rstest};

    #[fixture]
    fn nine_to_seven() -> DayWindow {
        window("09:00", "19:00")
    }

    fn stops_along_equator(durations: &[u32]) -> Vec<PointOfInterest> {
        durations
            .iter()
            .zip(0_u32..)
            .map(|(&duration, step)| {
                PointOfInterest::new(
                    format!("Stop {step}"),
                    0.0,
                    f64::from(step) * 0.001,
                    duration,
                )
            })
            .collect()
    }

    #[rstest]
    fn window_rejects_empty_and_inverted_spans() {
        let nine = clock("09:00");
        let five = clock("17:00");
        assert!(DayWindow::new(nine, nine).is_err());
        assert!(matches!(
            DayWindow::new(five, nine),
            Err(DayWindowError::NotAfterStart { .. })
        ));
    }

    #[rstest]
    fn fitting_stops_share_a_day(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[60, 60, 60]);
        let estimator = FixedTravelTime::new(10);
        let packer = DayPacker::new(&pois, nine_to_seven, &estimator);
        let mut counter = DayCounter::new();

        let days = packer
            .pack_cluster(&[0, 1, 2], &mut counter)
            .expect("packing succeeds");

        assert_eq!(days.len(), 1);
        let times: Vec<_> = days[0]
            .items
            .iter()
            .map(|item| (item.start, item.end, item.travel_min))
            .collect();
        assert_eq!(
            times,
            vec![
                (clock("09:00"), clock("10:00"), 0),
                (clock("10:10"), clock("11:10"), 10),
                (clock("11:20"), clock("12:20"), 10),
            ]
        );
        assert_eq!(days[0].summary.stops, 3);
        assert_eq!(counter.peek(), 2);
    }

    #[rstest]
    fn first_item_carries_no_travel(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[30, 30]);
        let days = pack_days(&pois, &[vec![1, 0]], nine_to_seven, &TransportMode::Walk)
            .expect("packing succeeds");
        let first = &days[0].items[0];
        assert_eq!(first.poi_index, 1);
        assert_eq!(first.travel_min, 0);
        assert_eq!(first.distance_km, 0.0);
        let second = &days[0].items[1];
        assert_eq!(second.distance_km, 0.11);
        assert_eq!(second.travel_min, 6);
    }

    #[rstest]
    fn overflow_rolls_into_a_fresh_day(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[300, 300]);
        let days = pack_days(&pois, &[vec![0, 1]], nine_to_seven, &FixedTravelTime::new(5))
            .expect("packing succeeds");

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].items.len(), 1);
        assert_eq!(days[1].day, 2);
        assert_eq!(days[1].items[0].poi_index, 1);
        assert_eq!(days[1].items[0].start, clock("09:00"));
        assert_eq!(days[1].items[0].travel_min, 0);
    }

    #[rstest]
    fn exact_fit_is_accepted(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[295, 300]);
        let days = pack_days(&pois, &[vec![0, 1]], nine_to_seven, &FixedTravelTime::new(5))
            .expect("packing succeeds");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].items[1].end, clock("19:00"));
    }

    #[rstest]
    fn oversized_first_stop_is_placed_whole(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[720, 30]);
        let days = pack_days(&pois, &[vec![0, 1]], nine_to_seven, &FixedTravelTime::new(5))
            .expect("packing succeeds");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].items[0].duration_min, 720);
        assert_eq!(days[0].items[0].end, clock("21:00"));
    }

    #[rstest]
    fn day_numbers_continue_across_clusters(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[500, 500, 60]);
        let days = pack_days(
            &pois,
            &[vec![0, 1], vec![2]],
            nine_to_seven,
            &FixedTravelTime::new(5),
        )
        .expect("packing succeeds");
        let numbers: Vec<_> = days.iter().map(|day| day.day).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[rstest]
    fn summary_reports_cluster_span_on_every_day(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[500, 500]);
        let days = pack_days(&pois, &[vec![0, 1]], nine_to_seven, &FixedTravelTime::new(5))
            .expect("packing succeeds");
        assert!(days.iter().all(|day| day.summary.within_km == 0.11));
        assert!(days.iter().all(|day| day.summary.stops == 1));
    }

    #[rstest]
    fn single_member_cluster_spans_zero(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[600]);
        let days = pack_days(&pois, &[vec![0]], nine_to_seven, &TransportMode::Walk)
            .expect("packing succeeds");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].summary.within_km, 0.0);
        assert_eq!(days[0].items[0].end, clock("19:00"));
    }

    #[rstest]
    fn empty_cluster_produces_no_days(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[60]);
        let estimator = FixedTravelTime::new(5);
        let packer = DayPacker::new(&pois, nine_to_seven, &estimator);
        let mut counter = DayCounter::new();
        let days = packer
            .pack_cluster(&[], &mut counter)
            .expect("packing succeeds");
        assert!(days.is_empty());
        assert_eq!(counter.peek(), 1);
    }

    #[rstest]
    fn unknown_index_is_reported(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[60]);
        let err = pack_days(&pois, &[vec![0, 7]], nine_to_seven, &TransportMode::Walk)
            .expect_err("index 7 does not exist");
        assert_eq!(err, ScheduleError::UnknownPoi { index: 7 });
    }

    #[rstest]
    fn non_finite_distance_aborts(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[60, 60]);
        let err = pack_days(&pois, &[vec![0, 1]], nine_to_seven, &UnmeasurableTravel)
            .expect_err("NaN distance must abort");
        assert_eq!(err, ScheduleError::NonFiniteDistance { from: 0, to: 1 });
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn items_render_clock_times(nine_to_seven: DayWindow) {
        let pois = stops_along_equator(&[45]);
        let days = pack_days(&pois, &[vec![0]], nine_to_seven, &TransportMode::Walk)
            .expect("packing succeeds");
        let json = serde_json::to_value(&days[0]).expect("serialisable day");
        assert_eq!(json["items"][0]["start"], "09:00");
        assert_eq!(json["items"][0]["end"], "09:45");
        assert!(json["items"][0].get("poi_index").is_none());
        assert_eq!(json["summary"]["stops"], 1);
    }
}
