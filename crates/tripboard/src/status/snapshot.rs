//! The full derived board state for one instant.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Serialize, Serializer};

use super::leg::{countdown_text, is_urgent, leg_status, LegStatus};
use super::phase::{phase_label, trip_phase, TripPhase};
use super::route::{route_progress, RouteProgress};
use super::Thresholds;
use crate::clock::{Clock, ClockMode, ClockSource};
use crate::itinerary::{Itinerary, Place};

fn serialize_secs<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.num_seconds())
}

/// Everything the board shows about one leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegReport {
    /// Position of the leg in the itinerary.
    pub index: usize,
    /// Where the leg starts.
    pub origin: Place,
    /// Where the leg ends.
    pub destination: Place,
    /// Scheduled departure, in the itinerary's own offset.
    pub departure: DateTime<FixedOffset>,
    /// Scheduled arrival, in the itinerary's own offset.
    pub arrival: DateTime<FixedOffset>,
    /// Derived status.
    pub status: LegStatus,
    /// Time left until the next milestone.
    #[serde(rename = "remaining_secs", serialize_with = "serialize_secs")]
    pub remaining: Duration,
    /// Display countdown.
    pub countdown: String,
    /// Departure is close enough to highlight.
    pub urgent: bool,
}

/// Board state derived from one clock reading. Never stored; every tick
/// builds a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// The instant this snapshot describes.
    pub as_of: DateTime<Utc>,
    /// Whether `as_of` came from the wall clock or a demo override.
    pub clock_mode: ClockMode,
    /// One report per leg, in itinerary order.
    pub legs: Vec<LegReport>,
    /// Where the traveller is.
    pub phase: TripPhase,
    /// Narrative for `phase`.
    pub phase_label: String,
    /// Route bar state.
    pub route: RouteProgress,
}

/// Derive the whole board at `now`. The result reports a real clock; use
/// [`snapshot_from_clock`] to carry the clock mode through.
#[must_use]
pub fn derive_snapshot(
    now: DateTime<Utc>,
    itinerary: &Itinerary,
    thresholds: &Thresholds,
) -> Snapshot {
    let legs = itinerary
        .legs()
        .iter()
        .enumerate()
        .map(|(index, leg)| {
            let timing = leg_status(now, leg, thresholds);
            LegReport {
                index,
                origin: leg.origin.clone(),
                destination: leg.destination.clone(),
                departure: leg.departure,
                arrival: leg.arrival,
                status: timing.status,
                remaining: timing.remaining,
                countdown: countdown_text(&timing),
                urgent: is_urgent(now, leg, thresholds),
            }
        })
        .collect();

    let phase = trip_phase(now, itinerary);
    let route = route_progress(itinerary, &phase);
    let phase_label = phase_label(&phase, itinerary);

    Snapshot {
        as_of: now,
        clock_mode: ClockMode::Real,
        legs,
        phase,
        phase_label,
        route,
    }
}

/// Read `clock` once and derive the board for that reading.
#[must_use]
pub fn snapshot_from_clock<C: Clock>(
    clock: &ClockSource<C>,
    itinerary: &Itinerary,
    thresholds: &Thresholds,
) -> Snapshot {
    let (now, mode) = clock.reading();
    Snapshot {
        clock_mode: mode,
        ..derive_snapshot(now, itinerary, thresholds)
    }
}

impl Snapshot {
    /// Report for leg `index`.
    #[must_use]
    pub fn leg(&self, index: usize) -> Option<&LegReport> {
        self.legs.get(index)
    }

    /// Legs currently boarding.
    pub fn boarding(&self) -> impl Iterator<Item = &LegReport> {
        self.legs
            .iter()
            .filter(|leg| leg.status == LegStatus::Boarding)
    }
}
