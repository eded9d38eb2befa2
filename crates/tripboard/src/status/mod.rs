//! Status derivation.
//!
//! Pure functions from (instant, itinerary) to everything the board shows:
//!
//! - **Leg status**: scheduled, boarding, in flight or arrived, with the time
//!   left to the next milestone and an urgency flag.
//! - **Countdown text**: `"3d 19h 30m"`, `"01:30:00"` or `"DEPARTED"`.
//! - **Trip phase**: before departure, in transit, at a stopover, or complete,
//!   with a narrative label.
//! - **Route progress**: the phase projected onto waypoints and segments.
//!
//! Nothing here reads the clock or keeps state between calls; every tick
//! recomputes the whole [`Snapshot`] from scratch.
//!
//! # Example
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use tripboard::itinerary::Itinerary;
//! use tripboard::status::{derive_snapshot, LegStatus, Thresholds};
//!
//! let trip = Itinerary::builtin().unwrap();
//! let now = DateTime::parse_from_rfc3339("2025-09-19T09:30:00+02:00")
//!     .unwrap()
//!     .with_timezone(&Utc);
//!
//! let snapshot = derive_snapshot(now, &trip, &Thresholds::default());
//! assert_eq!(snapshot.legs[0].status, LegStatus::Boarding);
//! assert_eq!(snapshot.legs[0].countdown, "01:30:00");
//! ```

mod countdown;
mod leg;
mod phase;
mod route;
mod snapshot;

use chrono::Duration;

pub use countdown::{format_countdown, CountdownParts, DEPARTED};
pub use leg::{countdown_text, is_urgent, leg_status, LegStatus, LegTiming};
pub use phase::{phase_label, trip_phase, TripPhase, COMPLETE_LABEL, PREPARING_LABEL};
pub use route::{
    route_progress, RouteProgress, SegmentProgress, SegmentState, WaypointProgress,
    WaypointState,
};
pub use snapshot::{derive_snapshot, snapshot_from_clock, LegReport, Snapshot};

/// Time windows that drive the boarding status and the urgency flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// A leg departing within this window (and not yet departed) is boarding.
    pub boarding_window: Duration,
    /// A departure countdown shorter than this is flagged urgent.
    pub urgent_window: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            boarding_window: Duration::hours(2),
            urgent_window: Duration::hours(6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.boarding_window, Duration::minutes(120));
        assert_eq!(thresholds.urgent_window, Duration::hours(6));
    }
}
