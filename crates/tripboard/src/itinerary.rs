//! Itinerary data model.
//!
//! An [`Itinerary`] is an ordered, validated sequence of [`FlightLeg`]s. It is
//! built once from static configuration (the compiled-in trip or a TOML file)
//! and never changes afterwards; the status deriver only ever borrows it.

use std::path::Path;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// The trip compiled into the binary, used when no itinerary file is configured.
const BUILTIN_ITINERARY: &str = include_str!("../assets/builtin_itinerary.toml");

/// A named location on the route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place {
    /// Display label, e.g. `Seoul`.
    pub label: String,
    /// Short code, e.g. `ICN`.
    pub code: String,
}

impl Place {
    /// Create a new place.
    #[must_use]
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
        }
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.code)
    }
}

/// One flight segment.
///
/// Instants carry the offset they were written with so that the board can show
/// them the way the itinerary's author intended. All comparisons go through UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLeg {
    /// Scheduled departure.
    pub departure: DateTime<FixedOffset>,
    /// Scheduled arrival.
    pub arrival: DateTime<FixedOffset>,
    /// Where the leg starts.
    pub origin: Place,
    /// Where the leg ends.
    pub destination: Place,
    /// Narrative shown while staying at `destination` before the next leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopover_label: Option<String>,
}

impl FlightLeg {
    /// Create a leg without a stopover label.
    ///
    /// The leg is not validated on its own; [`Itinerary::new`] rejects legs
    /// that do not arrive after they depart.
    #[must_use]
    pub fn new(
        departure: DateTime<FixedOffset>,
        arrival: DateTime<FixedOffset>,
        origin: Place,
        destination: Place,
    ) -> Self {
        Self {
            departure,
            arrival,
            origin,
            destination,
            stopover_label: None,
        }
    }

    /// Attach a stopover narrative.
    #[must_use]
    pub fn with_stopover_label(mut self, label: impl Into<String>) -> Self {
        self.stopover_label = Some(label.into());
        self
    }

    /// Departure as a UTC instant.
    #[must_use]
    pub fn departure_utc(&self) -> DateTime<Utc> {
        self.departure.with_timezone(&Utc)
    }

    /// Arrival as a UTC instant.
    #[must_use]
    pub fn arrival_utc(&self) -> DateTime<Utc> {
        self.arrival.with_timezone(&Utc)
    }

    /// Scheduled time in the air.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.arrival_utc() - self.departure_utc()
    }

    /// Short route description, e.g. `ARN-ICN`.
    #[must_use]
    pub fn route(&self) -> String {
        format!("{}-{}", self.origin.code, self.destination.code)
    }
}

/// On-disk shape of an itinerary file.
#[derive(Debug, Deserialize)]
struct ItineraryRecord {
    #[serde(default)]
    home_label: Option<String>,
    #[serde(default)]
    legs: Vec<FlightLeg>,
}

/// An ordered, non-empty, non-overlapping sequence of flight legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    #[serde(skip_serializing_if = "Option::is_none")]
    home_label: Option<String>,
    legs: Vec<FlightLeg>,
}

impl Itinerary {
    /// Build an itinerary, checking that it has at least one leg, that every
    /// leg arrives after it departs, and that no leg departs before the
    /// previous one has arrived.
    ///
    /// # Errors
    ///
    /// Returns an itinerary error describing the first violation found.
    pub fn new(legs: Vec<FlightLeg>) -> Result<Self> {
        if legs.is_empty() {
            return Err(Error::EmptyItinerary);
        }

        for (index, leg) in legs.iter().enumerate() {
            if leg.arrival_utc() <= leg.departure_utc() {
                return Err(Error::LegArrivalNotAfterDeparture {
                    index,
                    departure: leg.departure,
                    arrival: leg.arrival,
                });
            }
        }

        for (index, pair) in legs.windows(2).enumerate() {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.departure_utc() < previous.arrival_utc() {
                return Err(Error::LegOverlap {
                    index: index + 1,
                    previous: index,
                    departure: next.departure,
                    previous_arrival: previous.arrival,
                });
            }
        }

        Ok(Self {
            home_label: None,
            legs,
        })
    }

    /// Attach the narrative shown once the trip is over.
    #[must_use]
    pub fn with_home_label(mut self, label: impl Into<String>) -> Self {
        self.home_label = Some(label.into());
        self
    }

    /// The trip compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded file is broken, which the test suite guards.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_ITINERARY)
    }

    /// Parse an itinerary from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or the legs are invalid.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let record: ItineraryRecord = Figment::from(Toml::string(toml))
            .extract()
            .map_err(Error::itinerary_parse)?;
        Self::from_record(record)
    }

    /// Load an itinerary from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or the legs
    /// are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::ItineraryNotFound {
                path: path.to_path_buf(),
            });
        }

        let record: ItineraryRecord = Figment::from(Toml::file(path))
            .extract()
            .map_err(Error::itinerary_parse)?;
        let itinerary = Self::from_record(record)?;
        debug!(
            "Loaded itinerary with {} legs from {}",
            itinerary.len(),
            path.display()
        );
        Ok(itinerary)
    }

    fn from_record(record: ItineraryRecord) -> Result<Self> {
        let itinerary = Self::new(record.legs)?;
        Ok(match record.home_label {
            Some(label) => itinerary.with_home_label(label),
            None => itinerary,
        })
    }

    /// All legs in chronological order.
    #[must_use]
    pub fn legs(&self) -> &[FlightLeg] {
        &self.legs
    }

    /// The leg at `index`, if any.
    #[must_use]
    pub fn leg(&self, index: usize) -> Option<&FlightLeg> {
        self.legs.get(index)
    }

    /// Number of legs. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// The first leg.
    #[must_use]
    pub fn first(&self) -> &FlightLeg {
        &self.legs[0]
    }

    /// The last leg.
    #[must_use]
    pub fn last(&self) -> &FlightLeg {
        &self.legs[self.legs.len() - 1]
    }

    /// Narrative for the completed trip, if configured.
    #[must_use]
    pub fn home_label(&self) -> Option<&str> {
        self.home_label.as_deref()
    }

    /// Route waypoints: the first origin followed by every destination.
    #[must_use]
    pub fn waypoints(&self) -> Vec<&Place> {
        std::iter::once(&self.first().origin)
            .chain(self.legs.iter().map(|leg| &leg.destination))
            .collect()
    }

    /// Time on the ground between leg `index` and the next one.
    #[must_use]
    pub fn layover_after(&self, index: usize) -> Option<Duration> {
        let current = self.legs.get(index)?;
        let next = self.legs.get(index + 1)?;
        Some(next.departure_utc() - current.arrival_utc())
    }
}
