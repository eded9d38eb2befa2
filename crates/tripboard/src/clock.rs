//! Clock source for status derivation.
//!
//! Derivation never asks the system for the time on its own. Callers hold a
//! [`ClockSource`] and pass its reading in, which lets an operator pin the
//! board to a fixed "demo" instant and lets tests do the same.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};

/// Something that can tell the current instant.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Whether the clock source follows the wall clock or a pinned instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClockState {
    /// Pass through to the wall clock.
    Real,
    /// Always report `at`.
    Overridden {
        /// The pinned instant.
        at: DateTime<Utc>,
    },
}

/// The mode part of a [`ClockState`], without the instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    /// Following the wall clock.
    Real,
    /// Pinned by an operator.
    Overridden,
}

impl std::fmt::Display for ClockMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real => write!(f, "real"),
            Self::Overridden => write!(f, "demo"),
        }
    }
}

/// The zone a demo date and time-of-day are read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoZone {
    /// The operator's local zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl DemoZone {
    /// Parse a UTC offset such as `+02:00`, `-0530` or `Z`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUtcOffset`] if the string is not an offset.
    pub fn parse_offset(value: &str) -> Result<Self> {
        parse_utc_offset(value).map(Self::Fixed)
    }
}

fn parse_utc_offset(value: &str) -> Result<FixedOffset> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }
    trimmed
        .parse::<FixedOffset>()
        .map_err(|_| Error::InvalidUtcOffset(value.to_string()))
}

/// Turn a calendar date (`YYYY-MM-DD`) and time of day (`HH:MM` or
/// `HH:MM:SS`) read in `zone` into an absolute instant.
///
/// # Errors
///
/// Returns [`Error::InvalidDemoTime`] if either part does not parse or the
/// wall time does not exist in the zone (a daylight-saving gap).
pub fn parse_demo_instant(date: &str, time: &str, zone: DemoZone) -> Result<DateTime<Utc>> {
    let date_part = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| Error::invalid_demo_time(date, e.to_string()))?;
    let time_part = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .map_err(|e| Error::invalid_demo_time(time, e.to_string()))?;
    let naive = date_part.and_time(time_part);

    let resolved = match zone {
        DemoZone::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
        DemoZone::Fixed(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
    };

    resolved.ok_or_else(|| {
        Error::invalid_demo_time(
            format!("{date} {time}"),
            "time does not exist in the operator's zone",
        )
    })
}

/// A wall clock that an operator can pin to a fixed instant.
///
/// The override lives behind a single lock, so readers always see either the
/// old or the new mode, never a mix.
#[derive(Debug)]
pub struct ClockSource<C = SystemClock> {
    wall: C,
    state: RwLock<ClockState>,
}

impl Default for ClockSource<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource<SystemClock> {
    /// A clock source following the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_wall(SystemClock)
    }
}

impl<C: Clock> ClockSource<C> {
    /// A clock source following the given wall clock.
    #[must_use]
    pub fn with_wall(wall: C) -> Self {
        Self {
            wall,
            state: RwLock::new(ClockState::Real),
        }
    }

    /// The current instant, honouring any override.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.reading().0
    }

    /// The current instant together with the mode it was read in, taken from
    /// a single read of the state.
    #[must_use]
    pub fn reading(&self) -> (DateTime<Utc>, ClockMode) {
        match self.state() {
            ClockState::Real => (self.wall.now(), ClockMode::Real),
            ClockState::Overridden { at } => (at, ClockMode::Overridden),
        }
    }

    /// The current mode and pinned instant.
    #[must_use]
    pub fn state(&self) -> ClockState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current mode.
    #[must_use]
    pub fn mode(&self) -> ClockMode {
        match self.state() {
            ClockState::Real => ClockMode::Real,
            ClockState::Overridden { .. } => ClockMode::Overridden,
        }
    }

    /// Whether an override is active.
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.mode() == ClockMode::Overridden
    }

    /// Pin the clock to `at`.
    pub fn set_override(&self, at: DateTime<Utc>) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            ClockState::Overridden { at };
        info!("Demo time set to {}", at.to_rfc3339());
    }

    /// Follow the wall clock again.
    pub fn clear_override(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = ClockState::Real;
        info!("Reset to real time");
    }

    /// Pin the clock to a date and time of day read in `zone`.
    ///
    /// The input is parsed before anything changes; on error the previous mode
    /// is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDemoTime`] if the input cannot be resolved.
    pub fn set_override_from_input(
        &self,
        date: &str,
        time: &str,
        zone: DemoZone,
    ) -> Result<DateTime<Utc>> {
        let at = parse_demo_instant(date, time, zone)?;
        self.set_override(at);
        Ok(at)
    }
}

impl<C: Clock> Clock for ClockSource<C> {
    fn now(&self) -> DateTime<Utc> {
        ClockSource::now(self)
    }
}
