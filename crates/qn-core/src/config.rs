//! Top-level run configuration.

use crate::{CoreError, CoreResult, NodeId};

/// Scalar settings for one simulation run.
///
/// Distributions and the scheduling-agent factory are not plain data, so they
/// are handed to the simulation builder separately.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of parallel servers.  Must be ≥ 1.
    pub num_servers: usize,

    /// The run ends when the sink has received this many tasks.  Must be ≥ 1.
    pub num_tasks_to_recv: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Stop generating after this many tasks.  `None` keeps the source
    /// running until the sink target is reached.
    pub max_tasks_to_generate: Option<u64>,
}

impl SimConfig {
    pub fn new(num_servers: usize, num_tasks_to_recv: u64, seed: u64) -> Self {
        Self { num_servers, num_tasks_to_recv, seed, max_tasks_to_generate: None }
    }

    /// Reject configurations that could never complete.
    pub fn validate(&self) -> CoreResult<()> {
        if self.num_servers == 0 {
            return Err(CoreError::Config("num_servers must be at least 1".into()));
        }
        if NodeId::try_from(self.num_servers + 1).is_err() {
            return Err(CoreError::Config(format!(
                "num_servers {} does not fit the node id space",
                self.num_servers,
            )));
        }
        if self.num_tasks_to_recv == 0 {
            return Err(CoreError::Config("num_tasks_to_recv must be at least 1".into()));
        }
        if let Some(cap) = self.max_tasks_to_generate {
            if cap < self.num_tasks_to_recv {
                return Err(CoreError::Config(format!(
                    "max_tasks_to_generate ({cap}) is below num_tasks_to_recv ({}); \
                     the run could never complete",
                    self.num_tasks_to_recv,
                )));
            }
        }
        Ok(())
    }

    /// Ids of the servers, in order.
    pub fn server_ids(&self) -> Vec<NodeId> {
        (0..self.num_servers as u32).map(NodeId).collect()
    }

    /// Id of the task source (first id after the servers).
    pub fn source_id(&self) -> NodeId {
        NodeId(self.num_servers as u32)
    }

    /// Id of the sink.
    pub fn sink_id(&self) -> NodeId {
        NodeId(self.num_servers as u32 + 1)
    }
}
