//! Fluent builder for constructing a [`Sim`].

use ms_agent::{Agent, AgentRngs};
use ms_core::{AgentId, SchedulerError, SchedulerPort, SimConfig, SimEvent, Tick};

use crate::buffer::known_agent;
use crate::{EventQueue, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<C>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, tick duration, re-evaluation interval
/// - `C` — the shared context handed to eligibility predicates and effects
/// - `Vec<Agent<C>>` + [`AgentRngs`] — from [`ms_agent::PopulationBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                  |
/// |------------------------|------------------------------------------|
/// | `.first_wake(t)`       | Every agent woken at `Tick::ZERO`        |
/// | `.no_initial_wakes()`  | Disables the first wakes                 |
/// | `.schedule(t, event)`  | No pre-seeded events                     |
///
/// # Example
///
/// ```rust,ignore
/// let (agents, rngs) = PopulationBuilder::new(n, seed, graph, choice).build()?;
/// let mut sim = SimBuilder::new(config, ctx, agents, rngs)
///     .schedule(Tick(30), SimEvent::callback(|_, ctx: &mut World| ctx.rain = true))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<C> {
    config:     SimConfig,
    ctx:        C,
    agents:     Vec<Agent<C>>,
    rngs:       AgentRngs,
    first_wake: Option<Tick>,
    seeded:     Vec<(Tick, SimEvent<C>)>,
}

impl<C> SimBuilder<C> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, ctx: C, agents: Vec<Agent<C>>, rngs: AgentRngs) -> Self {
        Self {
            config,
            ctx,
            agents,
            rngs,
            first_wake: Some(Tick::ZERO),
            seeded:     Vec::new(),
        }
    }

    /// Tick at which every agent receives its first wake.
    pub fn first_wake(mut self, tick: Tick) -> Self {
        self.first_wake = Some(tick);
        self
    }

    /// Do not wake agents automatically; only seeded events drive the run.
    pub fn no_initial_wakes(mut self) -> Self {
        self.first_wake = None;
        self
    }

    /// Pre-seed an event.  Validated in [`build`][Self::build].
    pub fn schedule(mut self, at: Tick, event: SimEvent<C>) -> Self {
        self.seeded.push((at, event));
        self
    }

    /// Validate inputs, seed the event queue and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<C>> {
        self.config.validate()?;

        let agent_count = self.agents.len();
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        if let Some((i, agent)) = self
            .agents
            .iter()
            .enumerate()
            .find(|(i, a)| a.id() != AgentId(*i as u32))
        {
            return Err(SimError::Config(format!(
                "agent at index {i} has id {}; ids must be dense and start at 0",
                agent.id()
            )));
        }

        // ── Seed the event queue ──────────────────────────────────────────
        let mut queue = EventQueue::new();
        if let Some(tick) = self.first_wake {
            for agent in &self.agents {
                queue.schedule_event(tick, SimEvent::Wake(agent.id()))?;
            }
        }
        for (at, event) in self.seeded {
            if let SimEvent::Wake(agent) = &event {
                if !known_agent(*agent, agent_count) {
                    return Err(SchedulerError::UnknownAgent(*agent).into());
                }
            }
            queue.schedule_event(at, event)?;
        }

        let clock = self.config.make_clock();
        Ok(Sim {
            config:         self.config,
            clock,
            agents:         self.agents,
            rngs:           self.rngs,
            queue,
            ctx:            self.ctx,
            finished:       vec![false; agent_count],
            finished_count: 0,
        })
    }
}
