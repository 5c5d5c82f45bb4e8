use qn_agent::AgentError;
use qn_core::{CoreError, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("server {0} has no task in service")]
    NotInService(NodeId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("feedback rejected by scheduling agent: {0}")]
    Agent(#[from] AgentError),
}

pub type NodeResult<T> = Result<T, NodeError>;
