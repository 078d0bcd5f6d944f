//! Read-only agent snapshot handed to predicates, effects and choice models.

use ms_core::{AgentId, StateId, Tick};

/// What a transition may know about the agent it is evaluated for.
///
/// Built by the driver loop once per advance.  It carries no `&mut`, so
/// eligibility predicates cannot mutate the agent or the graph.
pub struct AgentView<'a, C> {
    /// The agent being advanced.
    pub agent: AgentId,

    /// The agent's current state.
    pub state: StateId,

    /// The tick at which the agent is being advanced.
    pub tick: Tick,

    /// Injected read-only context (services, attributes, configuration).
    pub ctx: &'a C,
}

impl<'a, C> AgentView<'a, C> {
    #[inline]
    pub fn new(agent: AgentId, state: StateId, tick: Tick, ctx: &'a C) -> Self {
        Self { agent, state, tick, ctx }
    }
}

impl<C> Clone for AgentView<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for AgentView<'_, C> {}
