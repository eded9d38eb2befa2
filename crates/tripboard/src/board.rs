//! The board ticker.
//!
//! Every tick reads the clock once, derives a fresh [`Snapshot`] and hands it
//! to a [`Presenter`]. Nothing carries over from one tick to the next except
//! the clock override, which lives in the shared [`ClockSource`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use crate::clock::{Clock, ClockSource, SystemClock};
use crate::error::Result;
use crate::itinerary::Itinerary;
use crate::render::Presenter;
use crate::status::{snapshot_from_clock, Snapshot, Thresholds};

/// Default interval between board refreshes.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest interval the board accepts.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// A handle to stop a running board.
///
/// This is a lightweight, cloneable handle; every clone shares one stop flag.
#[derive(Debug, Clone, Default)]
pub struct BoardHandle {
    stop_signal: Arc<AtomicBool>,
}

impl BoardHandle {
    /// Create a new board handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal the board to stop at its next tick.
    pub fn stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    /// Check if the stop signal has been sent.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.stop_signal.load(Ordering::SeqCst)
    }

    /// Reset the stop signal.
    pub fn reset(&self) {
        self.stop_signal.store(false, Ordering::SeqCst);
    }
}

/// A periodically refreshed view of one itinerary.
#[derive(Debug)]
pub struct Board<C = SystemClock> {
    clock: Arc<ClockSource<C>>,
    itinerary: Arc<Itinerary>,
    thresholds: Thresholds,
    tick_interval: Duration,
    max_ticks: Option<u64>,
    handle: BoardHandle,
}

impl<C: Clock> Board<C> {
    /// Create a board refreshing once a second until stopped.
    #[must_use]
    pub fn new(
        clock: Arc<ClockSource<C>>,
        itinerary: Arc<Itinerary>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            clock,
            itinerary,
            thresholds,
            tick_interval: DEFAULT_TICK_INTERVAL,
            max_ticks: None,
            handle: BoardHandle::new(),
        }
    }

    /// Set the interval between refreshes, at least [`MIN_TICK_INTERVAL`].
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(MIN_TICK_INTERVAL);
        self
    }

    /// Stop by itself after presenting `ticks` snapshots.
    #[must_use]
    pub fn with_max_ticks(mut self, ticks: Option<u64>) -> Self {
        self.max_ticks = ticks;
        self
    }

    /// A handle that stops this board.
    #[must_use]
    pub fn handle(&self) -> BoardHandle {
        self.handle.clone()
    }

    #[cfg(test)]
    fn clock(&self) -> &Arc<ClockSource<C>> {
        &self.clock
    }

    /// Derive the board for the current clock reading.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        snapshot_from_clock(&self.clock, &self.itinerary, &self.thresholds)
    }

    /// Refresh the board on every tick until stopped or the tick limit is
    /// reached. The first snapshot is presented immediately.
    ///
    /// Returns the number of snapshots presented.
    ///
    /// # Errors
    ///
    /// Returns the first presenter error; the board stops at that point.
    pub async fn run<P: Presenter + ?Sized>(&self, presenter: &mut P) -> Result<u64> {
        let mut interval = time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        debug!(
            "Board running every {:?} over {} legs",
            self.tick_interval,
            self.itinerary.len()
        );

        let mut presented = 0;
        loop {
            interval.tick().await;
            if self.handle.should_stop() {
                debug!("Board stopped after {presented} ticks");
                break;
            }

            let snapshot = self.snapshot();
            trace!(
                as_of = %snapshot.as_of,
                mode = %snapshot.clock_mode,
                phase = %snapshot.phase_label,
                "tick"
            );
            presenter.present(&snapshot)?;
            presented += 1;

            if self.max_ticks.is_some_and(|max| presented >= max) {
                debug!("Board reached its limit of {presented} ticks");
                break;
            }
        }

        Ok(presented)
    }
}
