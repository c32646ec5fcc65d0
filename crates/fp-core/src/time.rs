//! Simulation time model.
//!
//! # Design
//!
//! The planner's outer loop advances a monotonically increasing `Tick`
//! counter.  Each tick is `tick_duration_secs` simulated seconds:
//!
//!   elapsed_secs = tick * tick_duration_secs
//!
//! Machines keep their own fractional clocks (`f64` seconds) because travel
//! and work durations are not tick-aligned; a machine is offered new work on
//! the first tick whose start time has caught up with its clock.

use std::fmt;

/// Seconds per hour, used for reporting `total_time` in hours.
pub const SECS_PER_HOUR: f64 = 3_600.0;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute planner tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The planner's tick clock with a hard horizon.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug)]
pub struct SimClock {
    /// Simulated seconds per tick.
    pub tick_duration_secs: u32,
    /// Exclusive upper bound on elapsed seconds.  The loop stops at the
    /// first tick whose start is at or past this value.
    pub horizon_secs: u64,
    /// The current tick, advanced by [`advance`](Self::advance).
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: u32, horizon_secs: u64) -> Self {
        Self {
            tick_duration_secs,
            horizon_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds at the start of the current tick.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_secs as u64
    }

    /// `true` once the current tick starts at or past the horizon.
    #[inline]
    pub fn expired(&self) -> bool {
        self.elapsed_secs() >= self.horizon_secs
    }

    /// Break elapsed time into (hour, minute) components from plan start.
    pub fn elapsed_hm(&self) -> (u64, u32) {
        let secs = self.elapsed_secs();
        (secs / 3_600, ((secs % 3_600) / 60) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.elapsed_hm();
        write!(f, "{} ({:02}:{:02})", self.current_tick, h, m)
    }
}
