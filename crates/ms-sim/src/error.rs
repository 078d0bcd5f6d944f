use ms_agent::AgentError;
use ms_core::{AgentId, MsError, SchedulerError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] MsError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    /// An agent's driver loop failed (effect error, misbehaving choice model).
    #[error("agent {agent} failed: {source}")]
    Agent {
        agent:  AgentId,
        #[source]
        source: AgentError,
    },

    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),
}

pub type SimResult<T> = Result<T, SimError>;
