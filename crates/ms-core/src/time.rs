//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! core never reads a wall clock: "now" always comes from a
//! [`SchedulerPort`][crate::SchedulerPort].  The mapping to wall-clock time
//! is held in `SimClock` for reporting only:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs

use std::fmt;

use crate::{MsError, MsResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick `n` steps after `self`, or `None` past `u64::MAX`.
    #[inline]
    pub fn checked_add(self, n: u64) -> Option<Tick> {
        self.0.checked_add(n).map(Tick)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The reference runner's clock: current tick plus the tick ↔ Unix mapping.
///
/// Owned by the runner (`ms-sim`), never by agents or graphs.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many real seconds one tick represents.
    pub tick_duration_secs: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Unix timestamp corresponding to an arbitrary `tick`.
    #[inline]
    pub fn unix_secs_at(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Seconds into the simulated day at `current_tick`.  Handy for
    /// time-of-day eligibility predicates.
    pub fn seconds_of_day(&self) -> u32 {
        let elapsed = self.current_tick.0 * self.tick_duration_secs as u64;
        (elapsed % 86_400) as u32
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.seconds_of_day();
        write!(f, "{} ({:02}:{:02})", self.current_tick, secs / 3_600, (secs % 3_600) / 60)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration.
///
/// Constructed explicitly by the application (or deserialized with the
/// `serde` feature) and handed to the runner, which owns it for the run.
/// Components that need a value borrow it; nothing reads a global.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Seconds per tick.  Must be non-zero.
    pub tick_duration_secs: u32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed, graph and tick schedule always
    /// produce the same transition sequence.
    pub seed: u64,

    /// How many ticks after an advance a non-terminal agent is woken again.
    /// `0` disables automatic re-evaluation: agents are then only woken by
    /// events their transitions schedule.
    pub reevaluate_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:           0,
            tick_duration_secs:        60,
            total_ticks:               1_440,
            seed:                      0,
            reevaluate_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations the runner cannot work with.
    pub fn validate(&self) -> MsResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(MsError::Config("tick_duration_secs must be non-zero".into()));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_secs)
    }
}
