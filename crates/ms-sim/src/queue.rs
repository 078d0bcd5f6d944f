//! `EventQueue` — sparse per-tick event queue; the reference `SchedulerPort`.
//!
//! # Why this shape
//!
//! Most agents are idle most ticks.  Rather than polling all N agents every
//! tick, agents (and their transition effects) register the tick at which
//! something must happen next, and each tick the runner drains only what is
//! due: O(active) work instead of O(N).
//!
//! `BTreeMap` gives O(log W) insert and pop where W = number of distinct
//! future ticks with pending events.  Events for the same tick keep their
//! insertion order.

use std::collections::BTreeMap;

use ms_core::{SchedulerError, SchedulerPort, SchedulerResult, SimEvent, Tick};

/// Future events keyed by tick, plus the scheduler's notion of "now".
pub struct EventQueue<C> {
    inner: BTreeMap<Tick, Vec<SimEvent<C>>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
    now:   Tick,
}

impl<C> Default for EventQueue<C> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), total: 0, now: Tick::ZERO }
    }
}

impl<C> EventQueue<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the scheduler's clock forward.  Never moves backwards.
    pub fn advance_to(&mut self, tick: Tick) {
        self.now = self.now.max(tick);
    }

    /// Remove and return every event scheduled for exactly `tick`.
    ///
    /// Returns `None` if nothing is queued for that tick (the common case;
    /// avoids allocation).
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<SimEvent<C>>> {
        let events = self.inner.remove(&tick)?;
        self.total -= events.len();
        Some(events)
    }

    /// The earliest tick with at least one queued event, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Total number of queued events across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future ticks that have at least one queued event.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}

impl<C> SchedulerPort<C> for EventQueue<C> {
    fn now(&self) -> Tick {
        self.now
    }

    fn schedule_event(&mut self, at: Tick, event: SimEvent<C>) -> SchedulerResult<()> {
        if at < self.now {
            return Err(SchedulerError::InPast { at, now: self.now });
        }
        self.inner.entry(at).or_default().push(event);
        self.total += 1;
        Ok(())
    }
}
