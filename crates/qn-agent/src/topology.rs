//! Window topologies for Thompson-sampling agents.
//!
//! The topology decides which past experiences inform each server's belief.
//! It is a type parameter of [`ThompsonSampling`][crate::ThompsonSampling],
//! fixed when the agent is built:
//!
//! | Type               | Storage                                   | Reset rule              |
//! |--------------------|-------------------------------------------|-------------------------|
//! | [`SharedWindow`]   | one window of `win_len` for all servers   | none                    |
//! | [`PerNodeWindows`] | one window of `win_len` per server        | none                    |
//! | [`ResetOnRareEvent`] | per-server windows                      | clear on a rare value   |
//!
//! Each topology recomputes the affected [`WindowStats`] on every `record`,
//! so `stats` is a lookup.

use std::collections::BTreeMap;

use qn_core::{Experience, NodeId};
use tracing::debug;

use crate::window::{BoundedWindow, WindowStats, empirical_quantile};
use crate::{AgentError, AgentResult};

/// Storage of recent experiences, queried per server.
pub trait ExperienceWindow: Send {
    /// Record one observation.  Unknown nodes are an error.
    fn record(&mut self, experience: &Experience) -> AgentResult<()>;

    /// Current statistics for `node`'s observations.
    fn stats(&self, node: NodeId) -> AgentResult<WindowStats>;

    /// The observed values currently held for `node`, oldest first.
    fn values(&self, node: NodeId) -> AgentResult<Vec<f64>>;

    /// Statistics over every observation held, whichever server it came from.
    fn pooled(&self) -> WindowStats;
}

// ── SharedWindow ──────────────────────────────────────────────────────────────

/// A single window of the most recent `win_len` experiences system-wide.
///
/// A server's belief only uses the entries it handled.  A server with no
/// entries left in the window falls back to the pooled statistics.
#[derive(Debug, Clone)]
pub struct SharedWindow {
    window: BoundedWindow<Experience>,
    stats:  BTreeMap<NodeId, WindowStats>,
    pooled: WindowStats,
}

impl SharedWindow {
    pub fn new(node_ids: &[NodeId], win_len: usize) -> AgentResult<Self> {
        Ok(Self {
            window: BoundedWindow::new(win_len)?,
            stats:  node_ids.iter().map(|&id| (id, WindowStats::default())).collect(),
            pooled: WindowStats::default(),
        })
    }

    /// Total entries across all servers.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    fn refresh(&mut self, node: NodeId) {
        let window = &self.window;
        let stats = WindowStats::from_values(
            window.iter().filter(|e| e.node_id == node).map(|e| e.observed_value),
        );
        self.stats.insert(node, stats);
    }
}

impl ExperienceWindow for SharedWindow {
    fn record(&mut self, experience: &Experience) -> AgentResult<()> {
        if !self.stats.contains_key(&experience.node_id) {
            return Err(AgentError::UnknownNode(experience.node_id));
        }
        let evicted = self.window.push(*experience);
        self.refresh(experience.node_id);
        if let Some(old) = evicted {
            if old.node_id != experience.node_id {
                self.refresh(old.node_id);
            }
        }
        self.pooled = WindowStats::from_values(self.window.iter().map(|e| e.observed_value));
        Ok(())
    }

    fn stats(&self, node: NodeId) -> AgentResult<WindowStats> {
        self.stats.get(&node).copied().ok_or(AgentError::UnknownNode(node))
    }

    fn values(&self, node: NodeId) -> AgentResult<Vec<f64>> {
        if !self.stats.contains_key(&node) {
            return Err(AgentError::UnknownNode(node));
        }
        Ok(self
            .window
            .iter()
            .filter(|e| e.node_id == node)
            .map(|e| e.observed_value)
            .collect())
    }

    fn pooled(&self) -> WindowStats {
        self.pooled
    }
}

// ── PerNodeWindows ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Arm {
    window: BoundedWindow<f64>,
    stats:  WindowStats,
}

impl Arm {
    fn refresh(&mut self) {
        self.stats = WindowStats::from_values(self.window.iter().copied());
    }
}

/// An independent window of `win_len` observations per server.
#[derive(Debug, Clone)]
pub struct PerNodeWindows {
    arms: BTreeMap<NodeId, Arm>,
}

impl PerNodeWindows {
    pub fn new(node_ids: &[NodeId], win_len: usize) -> AgentResult<Self> {
        let mut arms = BTreeMap::new();
        for &id in node_ids {
            let arm = Arm { window: BoundedWindow::new(win_len)?, stats: WindowStats::default() };
            arms.insert(id, arm);
        }
        Ok(Self { arms })
    }

    fn arm(&self, node: NodeId) -> AgentResult<&Arm> {
        self.arms.get(&node).ok_or(AgentError::UnknownNode(node))
    }

    fn arm_mut(&mut self, node: NodeId) -> AgentResult<&mut Arm> {
        self.arms.get_mut(&node).ok_or(AgentError::UnknownNode(node))
    }
}

impl ExperienceWindow for PerNodeWindows {
    fn record(&mut self, experience: &Experience) -> AgentResult<()> {
        let arm = self.arm_mut(experience.node_id)?;
        arm.window.push(experience.observed_value);
        arm.refresh();
        Ok(())
    }

    fn stats(&self, node: NodeId) -> AgentResult<WindowStats> {
        Ok(self.arm(node)?.stats)
    }

    fn values(&self, node: NodeId) -> AgentResult<Vec<f64>> {
        Ok(self.arm(node)?.window.iter().copied().collect())
    }

    fn pooled(&self) -> WindowStats {
        WindowStats::from_values(self.arms.values().flat_map(|arm| arm.window.iter().copied()))
    }
}

// ── ResetOnRareEvent ──────────────────────────────────────────────────────────

/// Per-server windows that are wiped when a rare observation arrives.
///
/// Before an observation is stored, it is compared with the
/// `threshold_prob_rare` empirical quantile of its server's window.  A value
/// strictly above that quantile is treated as a regime change: the window is
/// cleared and the new value becomes its only entry.
#[derive(Debug, Clone)]
pub struct ResetOnRareEvent {
    windows:             PerNodeWindows,
    threshold_prob_rare: f64,
    resets:              BTreeMap<NodeId, u64>,
}

impl ResetOnRareEvent {
    /// `threshold_prob_rare` must lie in `(0, 1]`.
    pub fn new(node_ids: &[NodeId], win_len: usize, threshold_prob_rare: f64) -> AgentResult<Self> {
        if !(threshold_prob_rare > 0.0 && threshold_prob_rare <= 1.0) {
            return Err(AgentError::Config(format!(
                "threshold_prob_rare must be in (0, 1], got {threshold_prob_rare}"
            )));
        }
        Ok(Self {
            windows: PerNodeWindows::new(node_ids, win_len)?,
            threshold_prob_rare,
            resets: node_ids.iter().map(|&id| (id, 0)).collect(),
        })
    }

    /// How many times `node`'s window has been cleared.
    pub fn resets(&self, node: NodeId) -> AgentResult<u64> {
        self.resets.get(&node).copied().ok_or(AgentError::UnknownNode(node))
    }
}

impl ExperienceWindow for ResetOnRareEvent {
    fn record(&mut self, experience: &Experience) -> AgentResult<()> {
        let node = experience.node_id;
        let value = experience.observed_value;
        let p = self.threshold_prob_rare;

        let arm = self.windows.arm_mut(node)?;
        if let Some(q) = empirical_quantile(arm.window.iter().copied(), p) {
            if value > q {
                debug!(%node, value, quantile = q, dropped = arm.window.len(), "rare event, window reset");
                arm.window.clear();
                *self.resets.entry(node).or_insert(0) += 1;
            }
        }
        arm.window.push(value);
        arm.refresh();
        Ok(())
    }

    fn stats(&self, node: NodeId) -> AgentResult<WindowStats> {
        self.windows.stats(node)
    }

    fn values(&self, node: NodeId) -> AgentResult<Vec<f64>> {
        self.windows.values(node)
    }

    fn pooled(&self) -> WindowStats {
        self.windows.pooled()
    }
}
