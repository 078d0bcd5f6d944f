//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ms_core::{SimClock, SimConfig, Tick};
use ms_sim::{SimObserver, TransitionEvent};

use crate::row::{TickSummaryRow, TransitionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every transition and a per-tick summary to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_transition(&mut self, event: &TransitionEvent<'_>) {
        let row = TransitionRow {
            tick:       event.tick.0,
            agent_id:   event.agent.0,
            transition: event.label.to_owned(),
            from_state: event.from.to_owned(),
            to_state:   event.to.to_owned(),
        };
        let result = self.writer.write_transition(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, woken: usize, transitions: usize) {
        let row = TickSummaryRow {
            tick:           tick.0,
            unix_time_secs: self.clock.unix_secs_at(tick),
            woken_agents:   woken as u64,
            transitions:    transitions as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
