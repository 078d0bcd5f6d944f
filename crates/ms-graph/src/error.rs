//! Graph construction and transition-execution errors.

use thiserror::Error;

use ms_core::{SchedulerError, StateId, TransitionId};

/// Errors produced while assembling, validating or executing a graph.
///
/// Everything except [`GraphError::Effect`] and [`GraphError::NotApplicable`]
/// is a construction-time error: fatal to startup, never retried.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("state {0:?} is already registered")]
    DuplicateState(String),

    #[error("state {0} is not registered in this graph")]
    UnknownState(StateId),

    #[error("non-terminal state {0:?} has no outgoing transitions")]
    UnreachableState(String),

    #[error("transition {transition} references a state outside the graph ({from} -> {to})")]
    DanglingTransition {
        transition: TransitionId,
        from:       StateId,
        to:         StateId,
    },

    #[error("state {0:?} is marked terminal and cannot have outgoing transitions")]
    TerminalSource(String),

    #[error("graph has no states")]
    Empty,

    #[error("transition {transition} does not start at the agent's current state {state}")]
    NotApplicable {
        transition: TransitionId,
        state:      StateId,
    },

    #[error("effect of transition {transition} failed: {source}")]
    Effect {
        transition: TransitionId,
        #[source]
        source:     EffectError,
    },
}

/// Failure reported by a transition's effect procedure.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("scheduler rejected event: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("{0}")]
    Failed(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
