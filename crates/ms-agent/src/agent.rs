//! The `Agent` and its per-tick driver loop.

use std::fmt;
use std::sync::Arc;

use ms_choice::{ChoiceError, ChoiceModel};
use ms_core::{AgentId, RandomSource, SchedulerPort, StateId, TransitionId};
use ms_graph::{AgentView, Transition, TransitionGraph};
use tracing::{debug, trace, warn};

use crate::{AgentError, AgentResult};

/// Outcome of one [`Agent::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A transition fired; the agent is now in `to`.
    Transitioned {
        transition: TransitionId,
        from:       StateId,
        to:         StateId,
    },

    /// Nothing fired this tick: either no transition was eligible or the
    /// choice model declined.  Not an error.
    Stayed {
        /// How many transitions were eligible.
        eligible: usize,
    },

    /// The current state has no outgoing transitions.  The driver should
    /// stop scheduling this agent.
    Terminal,
}

/// A simulated entity progressing through the states of its type's graph.
///
/// The graph and choice model are shared (`Arc`), the current state is
/// owned exclusively by the agent.  The current state is private: the only
/// code that writes it is [`Transition::perform`], called from
/// [`advance`][Self::advance].
pub struct Agent<C> {
    id:      AgentId,
    current: StateId,
    graph:   Arc<TransitionGraph<C>>,
    choice:  Arc<dyn ChoiceModel<C>>,
}

impl<C> Agent<C> {
    /// Create an agent in the graph's initial state.
    pub fn new(id: AgentId, graph: Arc<TransitionGraph<C>>, choice: Arc<dyn ChoiceModel<C>>) -> Self {
        let current = graph.initial_state();
        Self { id, current, graph, choice }
    }

    /// Create an agent in an explicit start state.
    ///
    /// Fails with [`AgentError::InvalidArgument`] if `state` does not belong
    /// to `graph`.
    pub fn with_state(
        id:     AgentId,
        graph:  Arc<TransitionGraph<C>>,
        choice: Arc<dyn ChoiceModel<C>>,
        state:  StateId,
    ) -> AgentResult<Self> {
        if !graph.contains(state) {
            return Err(AgentError::InvalidArgument(format!(
                "start state {state} is not part of the agent's graph"
            )));
        }
        Ok(Self { id, current: state, graph, choice })
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Name of the current state.
    pub fn current_state_name(&self) -> &str {
        self.graph.state_name(self.current)
    }

    #[inline]
    pub fn graph(&self) -> &Arc<TransitionGraph<C>> {
        &self.graph
    }

    #[inline]
    pub fn choice_model(&self) -> &Arc<dyn ChoiceModel<C>> {
        &self.choice
    }

    /// `true` once the agent sits in a state with no outgoing transitions.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.graph.is_terminal(self.current)
    }

    /// Run the driver loop once.
    ///
    /// The tick is `scheduler.now()`.  At most one transition is performed
    /// per call.  Effect failures propagate unchanged and leave the agent in
    /// its previous state.
    pub fn advance(
        &mut self,
        ctx:       &C,
        scheduler: &mut dyn SchedulerPort<C>,
        rng:       &mut dyn RandomSource,
    ) -> AgentResult<Step> {
        let graph = &self.graph;
        let from = self.current;
        let view = AgentView::new(self.id, from, scheduler.now(), ctx);

        let outgoing = graph.outgoing_transitions(from)?;
        if outgoing.len() == 0 {
            return Ok(Step::Terminal);
        }

        let eligible: Vec<&Transition<C>> =
            outgoing.filter(|t| t.is_available_to(&view)).collect();

        let Some(chosen) = self.choice.select_transition(&view, &eligible, rng)? else {
            trace!(agent = %self.id, state = graph.state_name(from), eligible = eligible.len(), "stayed");
            return Ok(Step::Stayed { eligible: eligible.len() });
        };

        if !eligible.iter().any(|t| t.id() == chosen.id()) {
            return Err(ChoiceError::InvalidArgument(format!(
                "{} returned transition {} which is not eligible",
                self.choice.name(),
                chosen.id(),
            ))
            .into());
        }

        if let Err(e) = chosen.perform(&mut self.current, &view, scheduler) {
            warn!(agent = %self.id, transition = chosen.label(), error = %e, "transition effect failed");
            return Err(e.into());
        }

        debug!(
            agent = %self.id,
            tick = %view.tick,
            transition = chosen.label(),
            from = graph.state_name(from),
            to = graph.state_name(chosen.to()),
            "transitioned"
        );
        Ok(Step::Transitioned { transition: chosen.id(), from, to: chosen.to() })
    }
}

impl<C> fmt::Debug for Agent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("state", &self.current_state_name())
            .field("choice", &self.choice.name())
            .finish()
    }
}
