//! The boundary to the external event-driven scheduler.
//!
//! The core holds no clock.  Transition effects that need follow-up work
//! (re-evaluate this agent later, flip a flag at some future time, …) go
//! through a [`SchedulerPort`] handed to them by the driver.  `ms-sim`
//! provides a reference implementation; a host simulation can plug in its
//! own.

use std::fmt;

use thiserror::Error;

use crate::{AgentId, Tick};

/// A deferred application callback.  Receives the tick it fires at and
/// mutable access to the simulation context.
pub type EventCallback<C> = Box<dyn FnOnce(Tick, &mut C) + Send>;

/// Something to happen at a future tick.
pub enum SimEvent<C> {
    /// Run `agent`'s driver loop again.
    Wake(AgentId),
    /// Run an opaque callback against the context.
    Callback(EventCallback<C>),
}

impl<C> SimEvent<C> {
    /// Wrap a closure as a [`SimEvent::Callback`].
    pub fn callback<F>(f: F) -> Self
    where
        F: FnOnce(Tick, &mut C) + Send + 'static,
    {
        SimEvent::Callback(Box::new(f))
    }
}

impl<C> fmt::Debug for SimEvent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::Wake(agent) => f.debug_tuple("Wake").field(agent).finish(),
            SimEvent::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The event's tick is earlier than the scheduler's current tick.
    #[error("cannot schedule event at {at}: scheduler is already at {now}")]
    InPast { at: Tick, now: Tick },

    /// A wake-up was requested for an agent the scheduler does not manage.
    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Clock and event registration supplied by the host simulation.
///
/// # Contract
///
/// - `now` is the tick currently being processed; it never moves backwards.
/// - `schedule_event` either accepts the event for delivery at `at` or
///   returns an error.  The core propagates that error and never retries.
pub trait SchedulerPort<C> {
    /// The current simulation tick.
    fn now(&self) -> Tick;

    /// Register `event` for delivery at `at`.
    fn schedule_event(&mut self, at: Tick, event: SimEvent<C>) -> SchedulerResult<()>;

    /// Convenience: schedule a re-evaluation of `agent` at `at`.
    fn schedule_wake(&mut self, at: Tick, agent: AgentId) -> SchedulerResult<()> {
        self.schedule_event(at, SimEvent::Wake(agent))
    }
}

impl<C, S: SchedulerPort<C> + ?Sized> SchedulerPort<C> for &mut S {
    #[inline]
    fn now(&self) -> Tick {
        (**self).now()
    }

    #[inline]
    fn schedule_event(&mut self, at: Tick, event: SimEvent<C>) -> SchedulerResult<()> {
        (**self).schedule_event(at, event)
    }
}
