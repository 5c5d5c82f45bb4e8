use qn_core::{CoreError, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("cannot select from an empty server list")]
    NoServers,

    #[error("experience reported for unknown node {0}")]
    UnknownNode(NodeId),

    #[error("scheduling agent configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AgentResult<T> = Result<T, AgentError>;
