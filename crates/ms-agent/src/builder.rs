//! Fluent builder for a population of same-typed agents plus their RNGs.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ms_agent::PopulationBuilder;
//! use ms_choice::UniformRandom;
//! use ms_graph::{GraphBuilder, TransitionSpec};
//!
//! let mut b = GraphBuilder::<()>::new();
//! let idle = b.add_state("Idle").unwrap();
//! let done = b.add_terminal_state("Done").unwrap();
//! b.add_transition(idle, done, TransitionSpec::always()).unwrap();
//! let graph = Arc::new(b.validate().unwrap());
//!
//! let (agents, rngs) = PopulationBuilder::new(100, /*seed=*/ 42, graph, Arc::new(UniformRandom))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(agents.len(), 100);
//! assert_eq!(rngs.len(), 100);
//! assert!(agents.iter().all(|a| a.current_state() == idle));
//! ```

use std::sync::Arc;

use ms_choice::ChoiceModel;
use ms_core::{AgentId, StateId};
use ms_graph::TransitionGraph;

use crate::{Agent, AgentResult, AgentRngs};

/// Fluent builder for `Vec<Agent<C>>` + [`AgentRngs`].
///
/// Every agent shares the same graph and choice model.  To mix agent types
/// in one run, build one population per type with
/// [`first_id`][Self::first_id] set to the running total, then concatenate.
pub struct PopulationBuilder<C> {
    count:    usize,
    seed:     u64,
    first_id: u32,
    start:    Option<StateId>,
    graph:    Arc<TransitionGraph<C>>,
    choice:   Arc<dyn ChoiceModel<C>>,
}

impl<C> PopulationBuilder<C> {
    pub fn new(
        count:  usize,
        seed:   u64,
        graph:  Arc<TransitionGraph<C>>,
        choice: Arc<dyn ChoiceModel<C>>,
    ) -> Self {
        Self { count, seed, first_id: 0, start: None, graph, choice }
    }

    /// Number the agents from `first` instead of 0.
    pub fn first_id(mut self, first: u32) -> Self {
        self.first_id = first;
        self
    }

    /// Start every agent in `state` instead of the graph's initial state.
    pub fn start_in(mut self, state: StateId) -> Self {
        self.start = Some(state);
        self
    }

    /// Construct the agents and their RNG streams.
    ///
    /// Fails only if a custom start state does not belong to the graph.
    pub fn build(self) -> AgentResult<(Vec<Agent<C>>, AgentRngs)> {
        let start = self.start.unwrap_or_else(|| self.graph.initial_state());
        let agents = (self.first_id..self.first_id + self.count as u32)
            .map(|i| {
                Agent::with_state(AgentId(i), Arc::clone(&self.graph), Arc::clone(&self.choice), start)
            })
            .collect::<AgentResult<Vec<_>>>()?;
        let rngs = AgentRngs::for_ids(self.first_id, self.count, self.seed);
        Ok((agents, rngs))
    }
}
