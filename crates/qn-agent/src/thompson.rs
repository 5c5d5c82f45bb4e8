//! Thompson sampling over servers, minimising response time.
//!
//! # Belief model
//!
//! Each server (arm) has a belief over its expected response time built from
//! the observations its window currently holds:
//!
//! ```text
//! n == 0   → Normal(m, max(m², s²))    (m, s² pooled over every arm)
//!            or Uniform(0, 1) while no arm has observations
//! n == 1   → Normal(x, x²)              (one sample: scale taken from itself)
//! n >= 2   → Normal(mean, var / n)      (var = unbiased sample variance)
//! var == 0 → point mass at the mean
//! ```
//!
//! Draws are clamped at zero, since response times cannot be negative.
//!
//! `select` draws one value per arm and scales it by `tasks_left + 1`, the
//! number of tasks the new one would share the server with.  Tasks that were
//! routed but have not completed yet count against an arm before their
//! response times reach its window.  The smallest scaled draw wins.  Arms
//! with few or noisy observations have wide beliefs and occasionally win,
//! which is the exploration half of the trade-off.
//!
//! Ties go to the lowest server id.

use qn_core::{Experience, NodeId, SimRng};
use rand_distr::{Distribution, Normal};

use crate::topology::{ExperienceWindow, PerNodeWindows, ResetOnRareEvent, SharedWindow};
use crate::window::WindowStats;
use crate::{AgentError, AgentResult, OnlineLearning, SchedulingAgent, ServerLoad};

/// Thompson-sampling router over a window topology `W`.
#[derive(Debug, Clone)]
pub struct ThompsonSampling<W: ExperienceWindow> {
    window: W,
    name:   &'static str,
}

/// One window shared by all servers.
pub type TsSlidingWin = ThompsonSampling<SharedWindow>;
/// One window per server.
pub type TsSlidingWinForEachNode = ThompsonSampling<PerNodeWindows>;
/// Per-server windows cleared on rare observations.
pub type TsResetWinOnRareEvent = ThompsonSampling<ResetOnRareEvent>;

impl ThompsonSampling<SharedWindow> {
    pub fn sliding_win(node_ids: &[NodeId], win_len: usize) -> AgentResult<Self> {
        Ok(Self::with_window(SharedWindow::new(node_ids, win_len)?, "ts-sliding-win"))
    }
}

impl ThompsonSampling<PerNodeWindows> {
    pub fn sliding_win_for_each_node(node_ids: &[NodeId], win_len: usize) -> AgentResult<Self> {
        Ok(Self::with_window(
            PerNodeWindows::new(node_ids, win_len)?,
            "ts-sliding-win-for-each-node",
        ))
    }
}

impl ThompsonSampling<ResetOnRareEvent> {
    pub fn reset_win_on_rare_event(
        node_ids:            &[NodeId],
        win_len:             usize,
        threshold_prob_rare: f64,
    ) -> AgentResult<Self> {
        Ok(Self::with_window(
            ResetOnRareEvent::new(node_ids, win_len, threshold_prob_rare)?,
            "ts-reset-win-on-rare-event",
        ))
    }
}

impl<W: ExperienceWindow> ThompsonSampling<W> {
    /// Wrap an already-built window topology.
    pub fn with_window(window: W, name: &'static str) -> Self {
        Self { window, name }
    }

    /// Read access to the window, e.g. to inspect what an arm has seen.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Draw one value from `stats`' belief.  An arm without observations
    /// draws from `prior`, the pooled statistics of all arms.
    pub fn sample_belief(stats: &WindowStats, prior: &WindowStats, rng: &mut SimRng) -> f64 {
        let (mean, std_dev) = match stats.count {
            0 if prior.count == 0 => return rng.random::<f64>(),
            0 => (prior.mean, prior.mean.abs().max(prior.var.sqrt())),
            1 => (stats.mean, stats.mean.abs()),
            n => (stats.mean, (stats.var / n as f64).sqrt()),
        };
        let draw = match Normal::new(mean, std_dev) {
            Ok(dist) if std_dev > 0.0 => dist.sample(rng.inner()),
            _ => mean,
        };
        draw.max(0.0)
    }
}

impl<W: ExperienceWindow> SchedulingAgent for ThompsonSampling<W> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn select(&mut self, servers: &[ServerLoad], rng: &mut SimRng) -> AgentResult<NodeId> {
        if servers.is_empty() {
            return Err(AgentError::NoServers);
        }

        let prior = self.window.pooled();
        let mut best: Option<(f64, NodeId)> = None;
        for s in servers {
            let stats = self.window.stats(s.id)?;
            let draw = Self::sample_belief(&stats, &prior, rng) * (s.tasks_left + 1) as f64;
            let better = match best {
                None => true,
                Some((b, id)) => draw < b || (draw == b && s.id < id),
            };
            if better {
                best = Some((draw, s.id));
            }
        }
        best.map(|(_, id)| id).ok_or(AgentError::NoServers)
    }

    fn learner(&mut self) -> Option<&mut dyn OnlineLearning> {
        Some(self)
    }
}

impl<W: ExperienceWindow> OnlineLearning for ThompsonSampling<W> {
    fn ingest(&mut self, experience: Experience) -> AgentResult<()> {
        self.window.record(&experience)
    }
}
