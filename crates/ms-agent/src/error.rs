use ms_choice::ChoiceError;
use ms_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// Graph lookup failed or a transition's effect failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("choice model error: {0}")]
    Choice(#[from] ChoiceError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
