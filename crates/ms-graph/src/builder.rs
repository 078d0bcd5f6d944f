//! Mutable graph assembly.

use ms_core::{StateId, TransitionId};

use crate::graph::NameMap;
use crate::{GraphError, GraphResult, State, Transition, TransitionGraph, TransitionSpec};

/// Incrementally assembles states and transitions, then hands over an
/// immutable [`TransitionGraph`] via [`validate`][Self::validate].
///
/// # Example
///
/// ```rust
/// use ms_graph::{GraphBuilder, TransitionSpec};
///
/// let mut b = GraphBuilder::<()>::new();
/// let choosing = b.add_state("ChoosingMode").unwrap();
/// let active   = b.add_terminal_state("InActivity").unwrap();
/// b.add_transition(choosing, active, TransitionSpec::always()).unwrap();
///
/// let graph = b.validate().unwrap();
/// assert_eq!(graph.initial_state(), choosing);
/// assert!(graph.is_terminal(active));
/// ```
pub struct GraphBuilder<C> {
    states:      Vec<State>,
    names:       NameMap,
    transitions: Vec<Transition<C>>,
    initial:     Option<StateId>,
}

impl<C> Default for GraphBuilder<C> {
    fn default() -> Self {
        Self {
            states:      Vec::new(),
            names:       NameMap::default(),
            transitions: Vec::new(),
            initial:     None,
        }
    }
}

impl<C> GraphBuilder<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a regular state.  It must receive at least one outgoing
    /// transition before [`validate`][Self::validate].
    pub fn add_state(&mut self, name: impl Into<String>) -> GraphResult<StateId> {
        self.insert_state(name.into(), false)
    }

    /// Register a terminal state (no outgoing transitions; reaching it ends
    /// the agent's participation).
    pub fn add_terminal_state(&mut self, name: impl Into<String>) -> GraphResult<StateId> {
        self.insert_state(name.into(), true)
    }

    fn insert_state(&mut self, name: String, terminal: bool) -> GraphResult<StateId> {
        if self.names.contains_key(&name) {
            return Err(GraphError::DuplicateState(name));
        }
        let id = StateId(self.states.len() as u32);
        self.names.insert(name.clone(), id);
        self.states.push(State::new(id, name, terminal));
        Ok(id)
    }

    /// Look up a state registered earlier.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Register a transition `from → to`.
    ///
    /// Both endpoints must already be registered.  Transitions keep their
    /// registration order in the source state's outgoing list.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to:   StateId,
        spec: TransitionSpec<C>,
    ) -> GraphResult<TransitionId> {
        self.check_known(from)?;
        self.check_known(to)?;

        let source = &self.states[from.index()];
        if source.terminal {
            return Err(GraphError::TerminalSource(source.name.clone()));
        }

        let id = TransitionId(self.transitions.len() as u32);
        let label = spec
            .label
            .unwrap_or_else(|| format!("{}->{}", source.name, self.states[to.index()].name));

        self.transitions.push(Transition {
            id,
            from,
            to,
            label,
            eligibility: spec.eligibility,
            effect:      spec.effect,
            weight:      spec.weight,
        });
        self.states[from.index()].outgoing.push(id);
        Ok(id)
    }

    /// Designate the state new agents start in.  Defaults to the first
    /// registered state.
    pub fn set_initial(&mut self, state: StateId) -> GraphResult<()> {
        self.check_known(state)?;
        self.initial = Some(state);
        Ok(())
    }

    fn check_known(&self, state: StateId) -> GraphResult<()> {
        if state.index() < self.states.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownState(state))
        }
    }

    /// Check the structural invariants and freeze the graph.
    ///
    /// # Errors
    ///
    /// - [`GraphError::Empty`] — no states were registered.
    /// - [`GraphError::DanglingTransition`] — an endpoint lies outside the
    ///   state map.
    /// - [`GraphError::UnreachableState`] — a non-terminal state has no
    ///   outgoing transitions.
    pub fn validate(self) -> GraphResult<TransitionGraph<C>> {
        if self.states.is_empty() {
            return Err(GraphError::Empty);
        }

        let n = self.states.len();
        for t in &self.transitions {
            if t.from.index() >= n || t.to.index() >= n {
                return Err(GraphError::DanglingTransition {
                    transition: t.id,
                    from:       t.from,
                    to:         t.to,
                });
            }
        }

        for state in &self.states {
            if !state.terminal && state.outgoing.is_empty() {
                return Err(GraphError::UnreachableState(state.name.clone()));
            }
            debug_assert!(
                state.outgoing.iter().all(|t| self.transitions[t.index()].from == state.id),
                "outgoing list of {} holds a foreign transition",
                state.name,
            );
        }

        let initial = self.initial.unwrap_or(StateId(0));
        Ok(TransitionGraph::from_parts(self.states, self.names, self.transitions, initial))
    }
}
