//! Independent replicate runs of one configuration.

use std::sync::Arc;

use qn_agent::{AgentResult, SchedulingAgent};
use qn_core::{NodeId, RandomVariable, SimConfig, SimResult};
use tracing::info;

use crate::{NoopObserver, RunResult, SimBuilder, SimError};

/// Per-run summaries and their average.
#[derive(Debug, Clone, PartialEq)]
pub struct Replicates {
    /// Indexed by run index.
    pub runs: Vec<SimResult>,
    pub mean: SimResult,
}

/// Run `count` replicates of `config`, each with a fresh agent from
/// `agent_factory` and RNG streams derived from `(config.seed, run_index)`.
///
/// With the `parallel` feature the runs execute on Rayon's thread pool; the
/// results do not depend on scheduling.
pub fn run_replicates<A, F>(
    config:        &SimConfig,
    inter_arrival: Arc<dyn RandomVariable>,
    service:       Arc<dyn RandomVariable>,
    count:         u64,
    agent_factory: F,
) -> RunResult<Replicates>
where
    A: SchedulingAgent,
    F: Fn(&[NodeId]) -> AgentResult<A> + Sync,
{
    if count == 0 {
        return Err(SimError::Config("replicate count must be at least 1".into()));
    }

    let run_one = |run_index: u64| -> RunResult<SimResult> {
        let mut sim = SimBuilder::new(
            config.clone(),
            Arc::clone(&inter_arrival),
            Arc::clone(&service),
            &agent_factory,
        )
        .run_index(run_index)
        .build()?;
        sim.run(&mut NoopObserver)
    };

    #[cfg(not(feature = "parallel"))]
    let runs = (0..count).map(run_one).collect::<RunResult<Vec<_>>>()?;

    #[cfg(feature = "parallel")]
    let runs = {
        use rayon::prelude::*;
        (0..count).into_par_iter().map(run_one).collect::<RunResult<Vec<_>>>()?
    };

    let mean = SimResult::average(&runs)
        .ok_or_else(|| SimError::Config("no replicate produced a result".into()))?;
    info!(replicates = count, %mean, "replicates complete");
    Ok(Replicates { runs, mean })
}
