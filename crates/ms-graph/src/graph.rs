//! The validated, immutable transition graph.

use ms_core::{StateId, TransitionId};

use crate::{GraphError, GraphResult, State, Transition};

#[cfg(feature = "fx-hash")]
pub(crate) type NameMap = rustc_hash::FxHashMap<String, StateId>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type NameMap = std::collections::HashMap<String, StateId>;

/// The behavior graph of one agent type.
///
/// Only obtainable from [`GraphBuilder::validate`][crate::GraphBuilder::validate],
/// so every instance satisfies:
///
/// - at least one state, and a designated initial state;
/// - every transition's endpoints are states of this graph;
/// - every state not marked terminal has at least one outgoing transition.
///
/// There are no mutators.  Wrap it in an `Arc` and share it between every
/// agent of the type; concurrent reads need no synchronisation.
///
/// The read-only traversal API ([`states`][Self::states],
/// [`transitions`][Self::transitions], …) is all an external exporter needs.
pub struct TransitionGraph<C> {
    states:      Vec<State>,
    names:       NameMap,
    transitions: Vec<Transition<C>>,
    initial:     StateId,
}

impl<C> TransitionGraph<C> {
    pub(crate) fn from_parts(
        states:      Vec<State>,
        names:       NameMap,
        transitions: Vec<Transition<C>>,
        initial:     StateId,
    ) -> Self {
        Self { states, names, transitions, initial }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// The state new agents start in.
    #[inline]
    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, state: StateId) -> bool {
        state.index() < self.states.len()
    }

    pub fn state(&self, id: StateId) -> GraphResult<&State> {
        self.states.get(id.index()).ok_or(GraphError::UnknownState(id))
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Name of `id`, or `"?"` for a foreign id.  Intended for log output.
    pub fn state_name(&self, id: StateId) -> &str {
        self.states.get(id.index()).map_or("?", |s| s.name())
    }

    pub fn transition(&self, id: TransitionId) -> Option<&Transition<C>> {
        self.transitions.get(id.index())
    }

    /// `true` if `state` has no outgoing transitions.
    ///
    /// Unknown ids are reported as non-terminal.
    pub fn is_terminal(&self, state: StateId) -> bool {
        self.states
            .get(state.index())
            .is_some_and(|s| s.outgoing.is_empty())
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Outgoing transitions of `state` in registration order.
    ///
    /// Registration order is stable, so "first eligible" choice models are
    /// deterministic.
    pub fn outgoing_transitions(
        &self,
        state: StateId,
    ) -> GraphResult<impl ExactSizeIterator<Item = &Transition<C>> + '_> {
        let state = self.state(state)?;
        Ok(state.outgoing.iter().map(move |t| &self.transitions[t.index()]))
    }

    /// All states in `StateId` order.
    pub fn states(&self) -> impl ExactSizeIterator<Item = &State> + '_ {
        self.states.iter()
    }

    /// All transitions in `TransitionId` (registration) order.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &Transition<C>> + '_ {
        self.transitions.iter()
    }
}

impl<C> std::fmt::Debug for TransitionGraph<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionGraph")
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .field("initial", &self.initial)
            .finish()
    }
}
