//! Per-agent scratch scheduler used during the advance phase.

use ms_core::{AgentId, SchedulerError, SchedulerPort, SchedulerResult, SimEvent, Tick};

/// Collects the events one agent's transition effect schedules during a
/// single advance.
///
/// Each woken agent gets its own buffer, so the advance phase never touches
/// the shared [`EventQueue`][crate::EventQueue] and can run in parallel.
/// The runner merges buffers into the queue afterwards in `AgentId` order.
///
/// Validation happens here, at scheduling time, so a rejected event surfaces
/// as an effect error of the agent that caused it.
pub struct EventBuffer<C> {
    now:         Tick,
    agent_count: usize,
    events:      Vec<(Tick, SimEvent<C>)>,
}

impl<C> EventBuffer<C> {
    pub fn new(now: Tick, agent_count: usize) -> Self {
        Self { now, agent_count, events: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<(Tick, SimEvent<C>)> {
        self.events
    }
}

impl<C> SchedulerPort<C> for EventBuffer<C> {
    fn now(&self) -> Tick {
        self.now
    }

    fn schedule_event(&mut self, at: Tick, event: SimEvent<C>) -> SchedulerResult<()> {
        if at < self.now {
            return Err(SchedulerError::InPast { at, now: self.now });
        }
        if let SimEvent::Wake(agent) = &event {
            if !known_agent(*agent, self.agent_count) {
                return Err(SchedulerError::UnknownAgent(*agent));
            }
        }
        self.events.push((at, event));
        Ok(())
    }
}

/// `true` if `agent` is a valid index for a population of `agent_count`.
#[inline]
pub(crate) fn known_agent(agent: AgentId, agent_count: usize) -> bool {
    agent.index() < agent_count
}
