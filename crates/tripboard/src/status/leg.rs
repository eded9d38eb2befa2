//! Per-leg status.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::countdown::format_countdown;
use super::Thresholds;
use crate::itinerary::FlightLeg;

/// Where a single leg stands relative to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegStatus {
    /// More than the boarding window before departure.
    Scheduled,
    /// Within the boarding window before departure.
    Boarding,
    /// Between departure (inclusive) and arrival (exclusive).
    InFlight,
    /// At or after arrival.
    Arrived,
    /// Past departure without being in flight or arrived. The first four rules
    /// already cover every instant, so [`leg_status`] never produces this; it
    /// is kept so callers can match on the full set of board states.
    Departed,
}

impl std::fmt::Display for LegStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::Boarding => write!(f, "BOARDING"),
            Self::InFlight => write!(f, "IN FLIGHT"),
            Self::Arrived => write!(f, "ARRIVED"),
            Self::Departed => write!(f, "DEPARTED"),
        }
    }
}

/// A leg's status together with the time left until its next milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegTiming {
    /// The derived status.
    pub status: LegStatus,
    /// Time to arrival when in flight, to departure before it, zero otherwise.
    pub remaining: Duration,
}

/// Derive the status of `leg` at `now`. The first matching rule wins:
///
/// 1. `departure <= now < arrival`: in flight, counting down to arrival
/// 2. `now >= arrival`: arrived
/// 3. departure no more than the boarding window away: boarding
/// 4. departure further away: scheduled
/// 5. anything else: departed
#[must_use]
pub fn leg_status(now: DateTime<Utc>, leg: &FlightLeg, thresholds: &Thresholds) -> LegTiming {
    let departure = leg.departure_utc();
    let arrival = leg.arrival_utc();
    let to_departure = departure - now;

    let (status, remaining) = if now >= departure && now < arrival {
        (LegStatus::InFlight, arrival - now)
    } else if now >= arrival {
        (LegStatus::Arrived, Duration::zero())
    } else if to_departure > Duration::zero() && to_departure <= thresholds.boarding_window {
        (LegStatus::Boarding, to_departure)
    } else if to_departure > thresholds.boarding_window {
        (LegStatus::Scheduled, to_departure)
    } else {
        (LegStatus::Departed, Duration::zero())
    };

    LegTiming { status, remaining }
}

/// Whether the departure countdown should be highlighted: departure is in the
/// future and less than the urgent window away. Independent of the status.
#[must_use]
pub fn is_urgent(now: DateTime<Utc>, leg: &FlightLeg, thresholds: &Thresholds) -> bool {
    let to_departure = leg.departure_utc() - now;
    to_departure > Duration::zero() && to_departure < thresholds.urgent_window
}

/// The countdown line shown next to a leg.
#[must_use]
pub fn countdown_text(timing: &LegTiming) -> String {
    match timing.status {
        LegStatus::InFlight => format!("ARRIVING: {}", format_countdown(timing.remaining)),
        LegStatus::Arrived => "ARRIVED".to_string(),
        _ => format_countdown(timing.remaining),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::tests::{at, leg};

    fn t(s: &str) -> DateTime<Utc> {
        at(s).with_timezone(&Utc)
    }

    fn seoul_leg() -> FlightLeg {
        leg(
            "2025-09-19T11:00:00+02:00",
            "2025-09-19T22:30:00+02:00",
            "ARN",
            "ICN",
        )
    }

    fn status_at(s: &str) -> LegTiming {
        leg_status(t(s), &seoul_leg(), &Thresholds::default())
    }

    #[test]
    fn test_boarding_ninety_minutes_out() {
        let timing = status_at("2025-09-19T09:30:00+02:00");
        assert_eq!(timing.status, LegStatus::Boarding);
        assert_eq!(timing.remaining, Duration::minutes(90));
        assert_eq!(countdown_text(&timing), "01:30:00");
    }

    #[test]
    fn test_in_flight_counts_to_arrival() {
        let timing = status_at("2025-09-19T15:00:00+02:00");
        assert_eq!(timing.status, LegStatus::InFlight);
        assert_eq!(timing.remaining, Duration::minutes(7 * 60 + 30));
        assert_eq!(countdown_text(&timing), "ARRIVING: 07:30:00");
    }

    #[test]
    fn test_arrived_after_landing() {
        let timing = status_at("2025-09-19T23:00:00+02:00");
        assert_eq!(timing.status, LegStatus::Arrived);
        assert_eq!(timing.remaining, Duration::zero());
        assert_eq!(countdown_text(&timing), "ARRIVED");
    }

    #[test]
    fn test_scheduled_far_out() {
        let timing = status_at("2025-09-16T10:00:00+02:00");
        assert_eq!(timing.status, LegStatus::Scheduled);
        assert_eq!(countdown_text(&timing), "3d 1h 0m");
    }

    #[test]
    fn test_boundaries_are_lower_inclusive() {
        assert_eq!(status_at("2025-09-19T11:00:00+02:00").status, LegStatus::InFlight);
        assert_eq!(status_at("2025-09-19T22:30:00+02:00").status, LegStatus::Arrived);
        assert_eq!(
            status_at("2025-09-19T22:29:59+02:00").status,
            LegStatus::InFlight
        );
    }

    #[test]
    fn test_boarding_window_edge() {
        // Exactly two hours out is boarding, a second more is scheduled.
        assert_eq!(status_at("2025-09-19T09:00:00+02:00").status, LegStatus::Boarding);
        assert_eq!(
            status_at("2025-09-19T08:59:59+02:00").status,
            LegStatus::Scheduled
        );
        assert_eq!(
            status_at("2025-09-19T10:59:59+02:00").status,
            LegStatus::Boarding
        );
    }

    #[test]
    fn test_before_departure_is_scheduled_or_boarding() {
        let leg = seoul_leg();
        let thresholds = Thresholds::default();
        let departure = leg.departure_utc();
        // Every 7 minutes over the three days before departure.
        for step in 1..=(3 * 24 * 60 / 7) {
            let now = departure - Duration::minutes(step * 7);
            let timing = leg_status(now, &leg, &thresholds);
            let boarding = departure - now <= Duration::hours(2);
            let expected = if boarding {
                LegStatus::Boarding
            } else {
                LegStatus::Scheduled
            };
            assert_eq!(timing.status, expected, "at {now}");
        }
    }

    #[test]
    fn test_malformed_leg_statuses() {
        let backwards = leg(
            "2025-09-19T11:00:00+02:00",
            "2025-09-19T11:00:00+02:00",
            "ARN",
            "ICN",
        );
        // now == departure == arrival: not in flight (not < arrival), but
        // arrived wins as now >= arrival.
        let timing = leg_status(t("2025-09-19T11:00:00+02:00"), &backwards, &Thresholds::default());
        assert_eq!(timing.status, LegStatus::Arrived);

        let inverted = leg(
            "2025-09-19T11:00:00+02:00",
            "2025-09-19T10:00:00+02:00",
            "ARN",
            "ICN",
        );
        let timing = leg_status(t("2025-09-19T10:30:00+02:00"), &inverted, &Thresholds::default());
        assert_eq!(timing.status, LegStatus::Arrived);
        let timing = leg_status(t("2025-09-19T09:59:59+02:00"), &inverted, &Thresholds::default());
        assert_eq!(timing.status, LegStatus::Boarding);
    }

    #[test]
    fn test_urgent_flag() {
        let leg = seoul_leg();
        let thresholds = Thresholds::default();
        assert!(is_urgent(t("2025-09-19T09:30:00+02:00"), &leg, &thresholds));
        assert!(is_urgent(t("2025-09-19T05:00:01+02:00"), &leg, &thresholds));
        assert!(!is_urgent(t("2025-09-19T05:00:00+02:00"), &leg, &thresholds));
        assert!(!is_urgent(t("2025-09-19T11:00:00+02:00"), &leg, &thresholds));
        assert!(!is_urgent(t("2025-09-19T15:00:00+02:00"), &leg, &thresholds));
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = Thresholds {
            boarding_window: Duration::minutes(45),
            urgent_window: Duration::hours(1),
        };
        let leg = seoul_leg();
        let now = t("2025-09-19T10:00:00+02:00");
        assert_eq!(leg_status(now, &leg, &thresholds).status, LegStatus::Scheduled);
        assert!(!is_urgent(now, &leg, &thresholds));
        let now = t("2025-09-19T10:30:00+02:00");
        assert_eq!(leg_status(now, &leg, &thresholds).status, LegStatus::Boarding);
        assert!(is_urgent(now, &leg, &thresholds));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(LegStatus::InFlight.to_string(), "IN FLIGHT");
        assert_eq!(LegStatus::Scheduled.to_string(), "SCHEDULED");
    }

    #[test]
    fn test_status_serialize() {
        assert_eq!(
            serde_json::to_value(LegStatus::InFlight).unwrap(),
            "IN_FLIGHT"
        );
    }
}
