//! Countdown formatting.

use chrono::Duration;

/// Shown instead of a countdown once the target instant has passed.
pub const DEPARTED: &str = "DEPARTED";

/// A non-negative duration broken into whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct CountdownParts {
    /// Whole days.
    pub days: i64,
    /// Hours past the last whole day.
    pub hours: i64,
    /// Minutes past the last whole hour.
    pub minutes: i64,
    /// Seconds past the last whole minute.
    pub seconds: i64,
}

impl CountdownParts {
    /// Split `remaining` into units, clamping negative durations to zero.
    /// Sub-second precision is dropped.
    #[must_use]
    pub fn from_duration(remaining: Duration) -> Self {
        let total = remaining.num_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }
}

/// Render a countdown for display.
///
/// - zero or negative: [`DEPARTED`]
/// - a day or more: `"{days}d {hours}h {minutes}m"`
/// - otherwise: `"HH:MM:SS"`
#[must_use]
pub fn format_countdown(remaining: Duration) -> String {
    if remaining <= Duration::zero() {
        return DEPARTED.to_string();
    }

    let parts = CountdownParts::from_duration(remaining);
    if parts.days > 0 {
        format!("{}d {}h {}m", parts.days, parts.hours, parts.minutes)
    } else {
        format!(
            "{:02}:{:02}:{:02}",
            parts.hours, parts.minutes, parts.seconds
        )
    }
}
