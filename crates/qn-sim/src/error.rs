use qn_agent::AgentError;
use qn_core::{CoreError, NodeId};
use qn_node::NodeError;
use thiserror::Error;

use crate::SimState;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("simulator is {0}; build a new one for another run")]
    NotIdle(SimState),

    #[error("scheduling agent chose {0}, which is not a server")]
    UnknownServer(NodeId),

    #[error("event queue ran dry after {received} of {target} tasks reached the sink")]
    Stalled { received: u64, target: u64 },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("scheduling agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("node error: {0}")]
    Node(#[from] NodeError),
}

/// Result alias for simulator operations.  (`SimResult` is the response-time
/// summary in `qn-core`.)
pub type RunResult<T> = Result<T, SimError>;
