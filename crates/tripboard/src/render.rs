//! Presentation adapters.
//!
//! A [`Presenter`] receives every freshly derived [`Snapshot`] and puts it
//! somewhere. The board ticker does not care where; the CLI picks a text or
//! JSON presenter over stdout.

use std::fmt::Write as _;
use std::io::Write;

use chrono::{FixedOffset, Offset, Utc};

use crate::clock::ClockMode;
use crate::error::Result;
use crate::itinerary::Itinerary;
use crate::status::{CountdownParts, SegmentState, Snapshot, WaypointState};

/// Clears the terminal and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Receives each derived snapshot.
pub trait Presenter {
    /// Show `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn present(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// Renders the board as plain text.
#[derive(Debug)]
pub struct TextPresenter<W> {
    out: W,
    clear_between_frames: bool,
}

impl<W: Write> TextPresenter<W> {
    /// Write boards to `out`, one after the other.
    pub fn new(out: W) -> Self {
        Self {
            out,
            clear_between_frames: false,
        }
    }

    /// Clear the terminal before each board, for live watching.
    #[must_use]
    pub fn clear_between_frames(mut self, clear: bool) -> Self {
        self.clear_between_frames = clear;
        self
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.clear_between_frames {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out.write_all(render_board(snapshot).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes each snapshot as one line of JSON.
#[derive(Debug)]
pub struct JsonPresenter<W> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonPresenter<W> {
    /// Write compact JSON lines to `out`.
    pub fn new(out: W) -> Self {
        Self { out, pretty: false }
    }

    /// Pretty-print each document instead.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, snapshot)?;
        } else {
            serde_json::to_writer(&mut self.out, snapshot)?;
        }
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Render the departure board for `snapshot`.
///
/// Legs inside the boarding window get a `NOW BOARDING` line under the table.
///
/// Times are shown in the offset of the first leg's departure, which is the
/// zone the itinerary was written in.
#[must_use]
pub fn render_board(snapshot: &Snapshot) -> String {
    let zone: FixedOffset = snapshot
        .legs
        .first()
        .map_or_else(|| Utc.fix(), |leg| *leg.departure.offset());
    let now = snapshot.as_of.with_timezone(&zone);

    let mut board = String::new();
    let mode = match snapshot.clock_mode {
        ClockMode::Real => String::new(),
        ClockMode::Overridden => format!("  [{}]", ClockMode::Overridden),
    };
    let _ = writeln!(
        board,
        "FLIGHT STATUS  {}{mode}",
        now.format("%A, %B %-d, %Y %H:%M UTC%:z")
    );
    let _ = writeln!(board, "{}", "-".repeat(64));
    let _ = writeln!(
        board,
        "{:<3}{:<10}{:<20}{:<12}{}",
        "#", "ROUTE", "DEPARTS", "STATUS", "COUNTDOWN"
    );

    for leg in &snapshot.legs {
        let departs = leg.departure.with_timezone(&zone).format("%Y-%m-%d %H:%M");
        let marker = if leg.urgent { " !" } else { "" };
        let _ = writeln!(
            board,
            "{:<3}{:<10}{:<20}{:<12}{}{marker}",
            leg.index + 1,
            format!("{}-{}", leg.origin.code, leg.destination.code),
            departs.to_string(),
            leg.status.to_string(),
            leg.countdown,
        );
    }

    let _ = writeln!(board, "{}", "-".repeat(64));
    for leg in snapshot.boarding() {
        let _ = writeln!(
            board,
            "NOW BOARDING: {}-{}  departs {}",
            leg.origin.code,
            leg.destination.code,
            leg.departure.with_timezone(&zone).format("%H:%M")
        );
    }
    let _ = writeln!(board, "TRIP STATUS: {}", snapshot.phase_label);
    let _ = writeln!(board, "ROUTE: {}", render_route(snapshot));
    board
}

/// Render the route bar, e.g. `(ARN)===[ICN]--- NRT --- ARN `.
///
/// Completed waypoints are in parentheses, the active one in brackets.
/// Flown segments are `===`, the rest `---`.
#[must_use]
pub fn render_route(snapshot: &Snapshot) -> String {
    let mut bar = String::new();
    for (index, waypoint) in snapshot.route.waypoints.iter().enumerate() {
        if index > 0 {
            let segment = snapshot
                .route
                .segments
                .get(index - 1)
                .map_or(SegmentState::Pending, |s| s.state);
            bar.push_str(match segment {
                SegmentState::Active => "===",
                SegmentState::Pending => "---",
            });
        }
        let code = &waypoint.place.code;
        let _ = match waypoint.state {
            WaypointState::Completed => write!(bar, "({code})"),
            WaypointState::Active => write!(bar, "[{code}]"),
            WaypointState::Pending => write!(bar, " {code} "),
        };
    }
    bar
}

/// Render the legs of `itinerary` with their durations and layovers.
#[must_use]
pub fn render_itinerary(itinerary: &Itinerary) -> String {
    let codes: Vec<&str> = itinerary
        .waypoints()
        .iter()
        .map(|place| place.code.as_str())
        .collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "TRIP  {}  ({} legs)",
        codes.join("-"),
        itinerary.len()
    );
    for (index, leg) in itinerary.legs().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<3}{:<10}{} -> {}",
            index + 1,
            leg.route(),
            leg.origin,
            leg.destination
        );
        let _ = writeln!(
            out,
            "   {} -> {}  ({})",
            leg.departure.format("%Y-%m-%d %H:%M %:z"),
            leg.arrival.format("%Y-%m-%d %H:%M %:z"),
            format_span(leg.duration())
        );
        if let Some(layover) = itinerary.layover_after(index) {
            let place = leg.stopover_label.as_deref().unwrap_or(&leg.destination.label);
            let _ = writeln!(out, "   layover {} ({place})", format_span(layover));
        }
    }
    if let Some(home) = itinerary.home_label() {
        let _ = writeln!(out, "then: {home}");
    }
    out
}

/// Render a span as `6d 9h 0m`, or `11h 30m` under a day.
fn format_span(span: chrono::Duration) -> String {
    let parts = CountdownParts::from_duration(span);
    if parts.days > 0 {
        format!("{}d {}h {}m", parts.days, parts.hours, parts.minutes)
    } else {
        format!("{}h {}m", parts.hours, parts.minutes)
    }
}
