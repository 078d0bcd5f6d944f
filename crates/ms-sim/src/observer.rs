//! Simulation observer trait for progress reporting and data collection.

use ms_core::{AgentId, Tick, TransitionId};

/// One transition that fired, with names resolved against the agent's graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEvent<'a> {
    pub tick:       Tick,
    pub agent:      AgentId,
    pub transition: TransitionId,
    pub label:      &'a str,
    pub from:       &'a str,
    pub to:         &'a str,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, woken: usize, transitions: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: woke {woken} agents, {transitions} transitions");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every transition, in ascending `AgentId` order within a
    /// processing round.
    fn on_transition(&mut self, _event: &TransitionEvent<'_>) {}

    /// Called once when an agent reaches a terminal state.
    fn on_agent_finished(&mut self, _tick: Tick, _agent: AgentId) {}

    /// Called at the end of each tick.
    ///
    /// `woken` is the number of agent advances this tick, `transitions` the
    /// number of those that fired a transition.
    fn on_tick_end(&mut self, _tick: Tick, _woken: usize, _transitions: usize) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
