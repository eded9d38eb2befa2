//! `tripboard` - A departure board for a personal multi-leg flight itinerary
//!
//! This library derives, for any instant, the status of every leg, a
//! countdown, the phase of the trip and progress along the route. The instant
//! comes from a [`ClockSource`] that can be pinned to a demo time.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod board;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod logging;
pub mod render;
pub mod status;

pub use board::{Board, BoardHandle};
pub use clock::{Clock, ClockMode, ClockSource, DemoZone, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use itinerary::{FlightLeg, Itinerary, Place};
pub use logging::init_logging;
pub use render::{JsonPresenter, Presenter, TextPresenter};
pub use status::{derive_snapshot, LegStatus, Snapshot, Thresholds, TripPhase};
