//! The `Sim` struct and its tick loop.

use std::fmt;

use ms_agent::{Agent, AgentResult, AgentRngs, Step};
use ms_core::{AgentId, SchedulerError, SchedulerPort, SimClock, SimConfig, SimEvent, Tick};
use tracing::{debug, info, warn};

use crate::buffer::known_agent;
use crate::{EventBuffer, EventQueue, SimError, SimObserver, SimResult, TransitionEvent};

// ── Context bound ─────────────────────────────────────────────────────────────

/// Bound on the simulation context `C`.
///
/// With the `parallel` feature the advance phase shares `&C` across Rayon
/// workers, so `C` must be `Sync`.  Without it any type works.
#[cfg(feature = "parallel")]
pub trait SharedContext: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync> SharedContext for T {}

#[cfg(not(feature = "parallel"))]
pub trait SharedContext {}
#[cfg(not(feature = "parallel"))]
impl<T> SharedContext for T {}

// ── Per-agent output of the advance phase ─────────────────────────────────────

struct Outcome<C> {
    agent:  AgentId,
    result: AgentResult<Step>,
    events: Vec<(Tick, SimEvent<C>)>,
}

#[derive(Default)]
struct TickStats {
    woken:       usize,
    transitions: usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The reference simulation runner.
///
/// `Sim<C>` owns the agents, their RNG streams, the event queue and the
/// shared context `C`, and drives the tick loop described in the crate docs.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<C> {
    /// Run configuration (total ticks, seed, re-evaluation interval, …).
    pub config: SimConfig,

    /// Simulation clock: current tick plus the tick to wall-time mapping.
    pub clock: SimClock,

    pub(crate) agents:         Vec<Agent<C>>,
    pub(crate) rngs:           AgentRngs,
    pub(crate) queue:          EventQueue<C>,
    pub(crate) ctx:            C,
    pub(crate) finished:       Vec<bool>,
    pub(crate) finished_count: usize,
}

impl<C> fmt::Debug for Sim<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sim")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("agents", &self.agents.len())
            .field("finished", &self.finished_count)
            .field("pending", &self.queue.len())
            .finish()
    }
}

impl<C: SharedContext> Sim<C> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Stops early once every agent has finished and no events remain.
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            if self.is_done() {
                debug!(tick = %self.clock.current_tick, "all agents finished, stopping early");
                break;
            }
            self.step(observer)?;
        }
        info!(
            tick     = %self.clock.current_tick,
            agents   = self.agents.len(),
            finished = self.finished_count,
            pending  = self.queue.len(),
            "simulation finished"
        );
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Queue an event from outside the tick loop (e.g. an external trigger
    /// between `run_ticks` calls).
    pub fn schedule(&mut self, at: Tick, event: SimEvent<C>) -> SimResult<()> {
        if let SimEvent::Wake(agent) = &event {
            if !known_agent(*agent, self.agents.len()) {
                return Err(SchedulerError::UnknownAgent(*agent).into());
            }
        }
        self.queue.advance_to(self.clock.current_tick);
        self.queue.schedule_event(at, event)?;
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn ctx(&self) -> &C {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn agents(&self) -> &[Agent<C>] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent<C>> {
        self.agents.get(id.index())
    }

    pub fn queue(&self) -> &EventQueue<C> {
        &self.queue
    }

    /// `true` once `agent` has reached a terminal state.
    pub fn is_finished(&self, agent: AgentId) -> bool {
        self.finished.get(agent.index()).copied().unwrap_or(false)
    }

    pub fn finished_count(&self) -> usize {
        self.finished_count
    }

    /// Every agent finished and nothing left to process.
    pub fn is_done(&self) -> bool {
        self.finished_count == self.agents.len() && self.queue.is_empty()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let stats = self.process_tick(now, observer)?;
        observer.on_tick_end(now, stats.woken, stats.transitions);
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickStats> {
        self.queue.advance_to(now);
        let mut stats = TickStats::default();

        // Agents already advanced this tick, kept sorted for binary search.
        let mut advanced: Vec<AgentId> = Vec::new();

        // Events scheduled for `now` while processing `now` land back in the
        // queue, so keep draining until the tick is quiet.
        while let Some(events) = self.queue.drain_tick(now) {
            // ── Events: callbacks first-come, wakes collected ─────────────
            let mut woken = Vec::new();
            let mut deferred = Vec::new();
            for event in events {
                match event {
                    SimEvent::Callback(f) => f(now, &mut self.ctx),
                    SimEvent::Wake(agent) => match self.finished.get(agent.index()) {
                        Some(false) if advanced.binary_search(&agent).is_ok() => deferred.push(agent),
                        Some(false) => woken.push(agent),
                        Some(true) => {}
                        None => warn!(%agent, "wake for unknown agent ignored"),
                    },
                }
            }
            // At most one advance per agent per tick.
            deferred.sort_unstable();
            deferred.dedup();
            for agent in deferred {
                self.queue.schedule_event(now + 1, SimEvent::Wake(agent))?;
            }

            woken.sort_unstable();
            woken.dedup();
            if woken.is_empty() {
                continue;
            }
            debug!(tick = %now, woken = woken.len(), "advancing agents");
            stats.woken += woken.len();

            // ── Advance (produce) ─────────────────────────────────────────
            let outcomes = self.advance_agents(now, &woken);

            advanced.extend_from_slice(&woken);
            advanced.sort_unstable();

            // ── Apply (consume) ───────────────────────────────────────────
            //
            // Outcomes arrive in ascending AgentId order.  Sequential
            // application in this order makes results deterministic even
            // when the advance phase ran in parallel.  A failing agent does
            // not stop the rest of the round from being applied.
            let mut first_err = None;
            for outcome in outcomes {
                if let Err(e) = self.apply_outcome(now, outcome, observer, &mut stats) {
                    first_err.get_or_insert(e);
                }
            }
            if let Some(e) = first_err {
                return Err(e);
            }
        }
        Ok(stats)
    }

    /// Advance every woken agent into its own [`EventBuffer`].
    ///
    /// `woken` must be sorted and free of duplicates.  With the `parallel`
    /// Cargo feature, agents advance on Rayon's thread pool.
    fn advance_agents(&mut self, now: Tick, woken: &[AgentId]) -> Vec<Outcome<C>> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx         = &self.ctx;
        let agent_count = self.agents.len();

        #[cfg(not(feature = "parallel"))]
        {
            let agents = &mut self.agents;
            let rngs   = &mut self.rngs;
            woken
                .iter()
                .map(|&agent| {
                    let mut buffer = EventBuffer::new(now, agent_count);
                    let result = agents[agent.index()].advance(ctx, &mut buffer, rngs.get_mut(agent));
                    Outcome { agent, result, events: buffer.into_events() }
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.agents
                .par_iter_mut()
                .zip(self.rngs.inner.par_iter_mut())
                .filter(|(agent, _)| woken.binary_search(&agent.id()).is_ok())
                .map(|(agent, rng)| {
                    let mut buffer = EventBuffer::new(now, agent_count);
                    let result = agent.advance(ctx, &mut buffer, rng);
                    Outcome { agent: agent.id(), result, events: buffer.into_events() }
                })
                .collect()
        }
    }

    /// Apply a single agent's outcome during the sequential write phase.
    ///
    /// A failed advance leaves the agent in its state: its buffered events
    /// are dropped, it is re-woken like any other non-terminal agent, and
    /// the error is returned after that bookkeeping.
    fn apply_outcome<O: SimObserver>(
        &mut self,
        now:      Tick,
        outcome:  Outcome<C>,
        observer: &mut O,
        stats:    &mut TickStats,
    ) -> SimResult<()> {
        let Outcome { agent, result, events } = outcome;
        let failure = match result {
            Ok(Step::Transitioned { transition, from, to }) => {
                stats.transitions += 1;
                let graph = self.agents[agent.index()].graph();
                observer.on_transition(&TransitionEvent {
                    tick: now,
                    agent,
                    transition,
                    label: graph.transition(transition).map_or("?", |t| t.label()),
                    from: graph.state_name(from),
                    to: graph.state_name(to),
                });
                None
            }
            Ok(_) => None,
            Err(source) => {
                warn!(tick = %now, %agent, error = %source, "agent advance failed");
                Some(SimError::Agent { agent, source })
            }
        };

        if self.agents[agent.index()].is_terminal() {
            self.finished[agent.index()] = true;
            self.finished_count += 1;
            info!(tick = %now, %agent, "agent finished");
            observer.on_agent_finished(now, agent);
        } else if self.config.reevaluate_interval_ticks > 0 {
            // Past u64::MAX the wake could never fire.
            match now.checked_add(self.config.reevaluate_interval_ticks) {
                Some(at) => self.queue.schedule_event(at, SimEvent::Wake(agent))?,
                None => debug!(tick = %now, %agent, "re-evaluation past end of time skipped"),
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }
        for (at, event) in events {
            self.queue.schedule_event(at, event)?;
        }
        Ok(())
    }
}
