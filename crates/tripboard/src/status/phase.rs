//! Trip phase: where the traveller is along the whole itinerary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::itinerary::{Itinerary, Place};

/// Label for the phase before the first departure.
pub const PREPARING_LABEL: &str = "PREPARING FOR DEPARTURE";

/// Label for a finished trip when the itinerary has no home label.
pub const COMPLETE_LABEL: &str = "TRIP COMPLETE";

/// Exactly one of these holds for any instant over a valid itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TripPhase {
    /// Before the first leg departs.
    PreDeparture {
        /// Origin of the first leg.
        origin: Place,
    },
    /// Flying leg `leg`.
    InTransit {
        /// Index of the leg in the air.
        leg: usize,
    },
    /// On the ground between two legs.
    AtStopover {
        /// Destination of the leg that just landed.
        location: Place,
        /// Index of that leg.
        after_leg: usize,
    },
    /// After the last leg has arrived.
    Complete,
}

impl TripPhase {
    /// Index of the waypoint the traveller is at or heading to.
    ///
    /// Waypoint 0 is the first origin and waypoint `k + 1` is the destination
    /// of leg `k`.
    #[must_use]
    pub fn position(&self, leg_count: usize) -> usize {
        match self {
            Self::PreDeparture { .. } => 0,
            Self::InTransit { leg } => leg + 1,
            Self::AtStopover { after_leg, .. } => after_leg + 1,
            Self::Complete => leg_count,
        }
    }
}

/// Derive the trip phase at `now`.
///
/// The first leg that has not yet arrived decides: if it has departed we are
/// in transit on it, otherwise we are waiting at its origin (the trip origin
/// for the first leg, a stopover for later ones). No such leg means the trip
/// is over.
#[must_use]
pub fn trip_phase(now: DateTime<Utc>, itinerary: &Itinerary) -> TripPhase {
    let legs = itinerary.legs();
    let Some(index) = legs.iter().position(|leg| now < leg.arrival_utc()) else {
        return TripPhase::Complete;
    };

    if now >= legs[index].departure_utc() {
        TripPhase::InTransit { leg: index }
    } else if index == 0 {
        TripPhase::PreDeparture {
            origin: legs[0].origin.clone(),
        }
    } else {
        TripPhase::AtStopover {
            location: legs[index - 1].destination.clone(),
            after_leg: index - 1,
        }
    }
}

/// The trip status narrative for `phase`.
#[must_use]
pub fn phase_label(phase: &TripPhase, itinerary: &Itinerary) -> String {
    match phase {
        TripPhase::PreDeparture { .. } => PREPARING_LABEL.to_string(),
        TripPhase::InTransit { leg } => match itinerary.leg(*leg) {
            Some(leg) => format!("IN FLIGHT TO {}", leg.destination.label.to_uppercase()),
            None => "IN FLIGHT".to_string(),
        },
        TripPhase::AtStopover {
            location,
            after_leg,
        } => itinerary
            .leg(*after_leg)
            .and_then(|leg| leg.stopover_label.as_deref())
            .map_or_else(
                || format!("STOPOVER IN {}", location.label.to_uppercase()),
                str::to_uppercase,
            ),
        TripPhase::Complete => itinerary
            .home_label()
            .map_or_else(|| COMPLETE_LABEL.to_string(), str::to_uppercase),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::itinerary::tests::{asia_trip, at, leg};

    fn t(s: &str) -> DateTime<Utc> {
        at(s).with_timezone(&Utc)
    }

    fn code(place: &Place) -> &str {
        &place.code
    }

    #[test]
    fn test_pre_departure() {
        let trip = asia_trip();
        let phase = trip_phase(t("2025-09-18T12:00:00+02:00"), &trip);
        match &phase {
            TripPhase::PreDeparture { origin } => assert_eq!(code(origin), "ARN"),
            other => panic!("unexpected phase {other:?}"),
        }
        assert_eq!(phase_label(&phase, &trip), "PREPARING FOR DEPARTURE");
    }

    #[test]
    fn test_in_transit_each_leg() {
        let trip = asia_trip();
        let cases = [
            ("2025-09-19T11:00:00+02:00", 0, "IN FLIGHT TO SEOUL"),
            ("2025-09-26T08:00:00+02:00", 1, "IN FLIGHT TO TOKYO"),
            ("2025-10-05T07:44:59+02:00", 2, "IN FLIGHT TO STOCKHOLM"),
        ];
        for (instant, expected_leg, label) in cases {
            let phase = trip_phase(t(instant), &trip);
            assert_eq!(phase, TripPhase::InTransit { leg: expected_leg }, "at {instant}");
            assert_eq!(phase_label(&phase, &trip), label);
        }
    }

    #[test]
    fn test_stopovers_use_labels() {
        let trip = asia_trip();

        let phase = trip_phase(t("2025-09-22T12:00:00+02:00"), &trip);
        assert!(matches!(
            &phase,
            TripPhase::AtStopover { location, after_leg: 0 } if location.code == "ICN"
        ));
        assert_eq!(phase_label(&phase, &trip), "EXPLORING SOUTH KOREA");

        let phase = trip_phase(t("2025-09-26T09:45:00+02:00"), &trip);
        assert!(matches!(
            &phase,
            TripPhase::AtStopover { location, after_leg: 1 } if location.code == "NRT"
        ));
        assert_eq!(phase_label(&phase, &trip), "DISCOVERING JAPAN");
    }

    #[test]
    fn test_complete() {
        let trip = asia_trip();
        let phase = trip_phase(t("2025-10-05T07:45:00+02:00"), &trip);
        assert_eq!(phase, TripPhase::Complete);
        assert_eq!(phase_label(&phase, &trip), "BACK IN SWEDEN");
    }

    #[test]
    fn test_default_labels() {
        let trip = Itinerary::new(vec![
            leg(
                "2025-03-01T08:00:00+01:00",
                "2025-03-01T10:00:00+01:00",
                "Oslo",
                "Berlin",
            ),
            leg(
                "2025-03-03T08:00:00+01:00",
                "2025-03-03T10:00:00+01:00",
                "Berlin",
                "Oslo",
            ),
        ])
        .unwrap();

        let phase = trip_phase(t("2025-03-02T00:00:00+01:00"), &trip);
        assert_eq!(phase_label(&phase, &trip), "STOPOVER IN BERLIN");

        let phase = trip_phase(t("2025-03-04T00:00:00+01:00"), &trip);
        assert_eq!(phase_label(&phase, &trip), "TRIP COMPLETE");
    }

    fn back_to_back_trip() -> Itinerary {
        Itinerary::new(vec![
            leg(
                "2025-09-19T11:00:00+02:00",
                "2025-09-19T13:00:00+02:00",
                "ARN",
                "CPH",
            ),
            leg(
                "2025-09-19T13:00:00+02:00",
                "2025-09-19T15:00:00+02:00",
                "CPH",
                "LHR",
            ),
        ])
        .unwrap()
    }

    fn single_leg_trip() -> Itinerary {
        Itinerary::new(vec![leg(
            "2025-09-19T11:00:00+02:00",
            "2025-09-19T22:30:00+02:00",
            "ARN",
            "ICN",
        )])
        .unwrap()
    }

    #[test]
    fn test_zero_layover_goes_straight_to_next_leg() {
        let trip = back_to_back_trip();
        assert_eq!(
            trip_phase(t("2025-09-19T13:00:00+02:00"), &trip),
            TripPhase::InTransit { leg: 1 }
        );
    }

    #[test]
    fn test_single_leg_itinerary() {
        let trip = single_leg_trip();
        assert!(matches!(
            trip_phase(t("2025-09-19T10:00:00+02:00"), &trip),
            TripPhase::PreDeparture { .. }
        ));
        assert_eq!(
            trip_phase(t("2025-09-19T12:00:00+02:00"), &trip),
            TripPhase::InTransit { leg: 0 }
        );
        assert_eq!(trip_phase(t("2025-09-20T00:00:00+02:00"), &trip), TripPhase::Complete);
    }

    /// The phases whose interval definition holds at `now`, checked directly
    /// against the legs rather than through `trip_phase`.
    fn phases_holding(now: DateTime<Utc>, trip: &Itinerary) -> Vec<TripPhase> {
        let legs = trip.legs();
        let mut holding = Vec::new();
        if now < legs[0].departure_utc() {
            holding.push(TripPhase::PreDeparture {
                origin: legs[0].origin.clone(),
            });
        }
        for (i, leg) in legs.iter().enumerate() {
            if now >= leg.departure_utc() && now < leg.arrival_utc() {
                holding.push(TripPhase::InTransit { leg: i });
            }
        }
        for (i, pair) in legs.windows(2).enumerate() {
            if now >= pair[0].arrival_utc() && now < pair[1].departure_utc() {
                holding.push(TripPhase::AtStopover {
                    location: pair[0].destination.clone(),
                    after_leg: i,
                });
            }
        }
        if now >= trip.last().arrival_utc() {
            holding.push(TripPhase::Complete);
        }
        holding
    }

    /// Sweeps from a day before the trip to a day after it, and also hits
    /// every departure and arrival exactly.
    fn assert_one_phase_throughout(trip: &Itinerary) {
        let start = trip.first().departure_utc() - Duration::days(1);
        let end = trip.last().arrival_utc() + Duration::days(1);

        let mut instants = Vec::new();
        let mut now = start;
        while now <= end {
            instants.push(now);
            now += Duration::minutes(37);
        }
        for leg in trip.legs() {
            instants.extend([
                leg.departure_utc() - Duration::seconds(1),
                leg.departure_utc(),
                leg.arrival_utc() - Duration::seconds(1),
                leg.arrival_utc(),
            ]);
        }

        for now in instants {
            let holding = phases_holding(now, trip);
            assert_eq!(holding.len(), 1, "at {now}: {holding:?}");
            assert_eq!(trip_phase(now, trip), holding[0], "at {now}");
        }
    }

    #[test]
    fn test_exactly_one_phase_per_instant() {
        assert_one_phase_throughout(&asia_trip());
    }

    #[test]
    fn test_exactly_one_phase_single_leg() {
        assert_one_phase_throughout(&single_leg_trip());
    }

    #[test]
    fn test_exactly_one_phase_back_to_back() {
        assert_one_phase_throughout(&back_to_back_trip());
    }

    #[test]
    fn test_position() {
        let origin = Place::new("Stockholm", "ARN");
        assert_eq!(TripPhase::PreDeparture { origin: origin.clone() }.position(3), 0);
        assert_eq!(TripPhase::InTransit { leg: 1 }.position(3), 2);
        assert_eq!(
            TripPhase::AtStopover {
                location: origin,
                after_leg: 0
            }
            .position(3),
            1
        );
        assert_eq!(TripPhase::Complete.position(3), 3);
    }

    #[test]
    fn test_phase_serialize() {
        let json = serde_json::to_value(TripPhase::InTransit { leg: 2 }).unwrap();
        assert_eq!(json["phase"], "in_transit");
        assert_eq!(json["leg"], 2);
    }
}
