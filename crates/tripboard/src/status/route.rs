//! Route progress: the trip phase projected onto waypoints and segments.

use serde::Serialize;

use super::phase::TripPhase;
use crate::itinerary::{Itinerary, Place};

/// State of a waypoint on the route bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointState {
    /// Not reached yet.
    Pending,
    /// Where the traveller is, or is flying to.
    Active,
    /// Left behind.
    Completed,
}

/// State of a segment (one leg) on the route bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentState {
    /// Not flown yet.
    Pending,
    /// Being flown or already flown.
    Active,
}

/// A waypoint and its state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaypointProgress {
    /// The place.
    pub place: Place,
    /// Its state.
    pub state: WaypointState,
}

/// A segment and its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentProgress {
    /// Index of the leg this segment draws.
    pub leg: usize,
    /// Its state.
    pub state: SegmentState,
}

/// Progress along the whole route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteProgress {
    /// One entry per waypoint: the first origin, then each destination.
    pub waypoints: Vec<WaypointProgress>,
    /// One entry per leg.
    pub segments: Vec<SegmentProgress>,
}

impl RouteProgress {
    /// The active waypoint, if any.
    #[must_use]
    pub fn active_waypoint(&self) -> Option<&WaypointProgress> {
        self.waypoints
            .iter()
            .find(|w| w.state == WaypointState::Active)
    }

    /// State of the waypoint with the given code. Codes may repeat on a round
    /// trip, so this reports the first occurrence.
    #[must_use]
    pub fn waypoint_state(&self, code: &str) -> Option<WaypointState> {
        self.waypoints
            .iter()
            .find(|w| w.place.code == code)
            .map(|w| w.state)
    }
}

/// Project `phase` onto the route of `itinerary`.
///
/// Waypoints before the current position are completed, the current one is
/// active and the rest are pending. Segments leading up to and including the
/// current position are active.
#[must_use]
pub fn route_progress(itinerary: &Itinerary, phase: &TripPhase) -> RouteProgress {
    let position = phase.position(itinerary.len());

    let waypoints = itinerary
        .waypoints()
        .into_iter()
        .enumerate()
        .map(|(index, place)| WaypointProgress {
            place: place.clone(),
            state: match index.cmp(&position) {
                std::cmp::Ordering::Less => WaypointState::Completed,
                std::cmp::Ordering::Equal => WaypointState::Active,
                std::cmp::Ordering::Greater => WaypointState::Pending,
            },
        })
        .collect();

    let segments = (0..itinerary.len())
        .map(|leg| SegmentProgress {
            leg,
            state: if leg < position {
                SegmentState::Active
            } else {
                SegmentState::Pending
            },
        })
        .collect();

    RouteProgress {
        waypoints,
        segments,
    }
}
