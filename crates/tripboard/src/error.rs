//! Error types for tripboard.
//!
//! This module defines all error types used throughout the tripboard crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// The main error type for tripboard operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Itinerary Errors ===
    /// The itinerary has no legs.
    #[error("itinerary must contain at least one leg")]
    EmptyItinerary,

    /// A leg does not arrive strictly after it departs.
    #[error("leg {index} arrives at {arrival} which is not after its departure at {departure}")]
    LegArrivalNotAfterDeparture {
        /// Zero-based position of the leg in the itinerary.
        index: usize,
        /// Scheduled departure.
        departure: DateTime<FixedOffset>,
        /// Scheduled arrival.
        arrival: DateTime<FixedOffset>,
    },

    /// A leg departs before the previous leg has arrived.
    #[error("leg {index} departs at {departure} before leg {previous} arrives at {previous_arrival}")]
    LegOverlap {
        /// Zero-based position of the offending leg.
        index: usize,
        /// Zero-based position of the leg it overlaps.
        previous: usize,
        /// Departure of the offending leg.
        departure: DateTime<FixedOffset>,
        /// Arrival of the previous leg.
        previous_arrival: DateTime<FixedOffset>,
    },

    /// The itinerary file does not exist.
    #[error("itinerary file not found: {path}")]
    ItineraryNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The itinerary file could not be parsed.
    #[error("failed to parse itinerary: {0}")]
    ItineraryParse(Box<figment::Error>),

    // === Clock Errors ===
    /// A demo date or time could not be parsed.
    #[error("invalid demo time '{input}': {reason}")]
    InvalidDemoTime {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A UTC offset string could not be parsed.
    #[error("invalid UTC offset '{0}', expected something like +02:00")]
    InvalidUtcOffset(String),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tripboard operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid demo time error.
    #[must_use]
    pub fn invalid_demo_time(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDemoTime {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an itinerary parse error.
    #[must_use]
    pub fn itinerary_parse(err: figment::Error) -> Self {
        Self::ItineraryParse(Box::new(err))
    }

    /// Check if this error describes a malformed or missing itinerary.
    #[must_use]
    pub fn is_itinerary_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyItinerary
                | Self::LegArrivalNotAfterDeparture { .. }
                | Self::LegOverlap { .. }
                | Self::ItineraryNotFound { .. }
                | Self::ItineraryParse(_)
        )
    }

    /// Check if this error was caused by bad demo clock input.
    #[must_use]
    pub fn is_clock_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDemoTime { .. } | Self::InvalidUtcOffset(_)
        )
    }
}
