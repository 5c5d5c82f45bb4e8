//! The routing policies the sweep compares.

use clap::ValueEnum;

use qn_agent::{
    AgentResult, AssignToFewestTasksLeft, AssignToLeastWorkLeft, AssignToNoisyLeastWorkLeft,
    AssignToRandom, SchedulingAgent, TsResetWinOnRareEvent, TsSlidingWin, TsSlidingWinForEachNode,
};
use qn_core::{CustomDiscrete, NodeId};

/// Multiplicative noise on work left: ±50 %.
const NOISY: [f64; 5] = [0.5, 0.75, 1.0, 1.25, 1.5];
/// Multiplicative noise on work left: ×0.25 … ×2.
const VERY_NOISY: [f64; 8] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    Random,
    TsSlidingWin,
    TsSlidingWinForEachNode,
    TsResetWinOnRareEvent,
    LeastWorkLeft,
    NoisyLeastWorkLeft,
    VeryNoisyLeastWorkLeft,
    FewestTasksLeft,
}

/// Knobs shared by the Thompson-sampling policies.
#[derive(Debug, Clone, Copy)]
pub struct TsParams {
    pub win_len:             usize,
    pub threshold_prob_rare: f64,
}

impl Policy {
    pub const ALL: [Policy; 8] = [
        Policy::Random,
        Policy::TsSlidingWin,
        Policy::TsSlidingWinForEachNode,
        Policy::TsResetWinOnRareEvent,
        Policy::LeastWorkLeft,
        Policy::NoisyLeastWorkLeft,
        Policy::VeryNoisyLeastWorkLeft,
        Policy::FewestTasksLeft,
    ];

    /// Label used in the results table and `summaries.csv`.
    pub fn label(self) -> &'static str {
        match self {
            Policy::Random => "random",
            Policy::TsSlidingWin => "ts-sliding-win",
            Policy::TsSlidingWinForEachNode => "ts-sliding-win-for-each-node",
            Policy::TsResetWinOnRareEvent => "ts-reset-win-on-rare-event",
            Policy::LeastWorkLeft => "least-work-left",
            Policy::NoisyLeastWorkLeft => "noisy-least-work-left",
            Policy::VeryNoisyLeastWorkLeft => "very-noisy-least-work-left",
            Policy::FewestTasksLeft => "fewest-tasks-left",
        }
    }

    /// Build a fresh agent for one run over `servers`.
    pub fn build(self, servers: &[NodeId], ts: TsParams) -> AgentResult<Box<dyn SchedulingAgent>> {
        let agent: Box<dyn SchedulingAgent> = match self {
            Policy::Random => Box::new(AssignToRandom),
            Policy::TsSlidingWin => Box::new(TsSlidingWin::sliding_win(servers, ts.win_len)?),
            Policy::TsSlidingWinForEachNode => Box::new(
                TsSlidingWinForEachNode::sliding_win_for_each_node(servers, ts.win_len)?,
            ),
            Policy::TsResetWinOnRareEvent => Box::new(TsResetWinOnRareEvent::reset_win_on_rare_event(
                servers,
                ts.win_len,
                ts.threshold_prob_rare,
            )?),
            Policy::LeastWorkLeft => Box::new(AssignToLeastWorkLeft),
            Policy::NoisyLeastWorkLeft => Box::new(AssignToNoisyLeastWorkLeft::new(Box::new(
                CustomDiscrete::uniform(NOISY.to_vec())?,
            ))),
            Policy::VeryNoisyLeastWorkLeft => Box::new(AssignToNoisyLeastWorkLeft::new(Box::new(
                CustomDiscrete::uniform(VERY_NOISY.to_vec())?,
            ))),
            Policy::FewestTasksLeft => Box::new(AssignToFewestTasksLeft),
        };
        Ok(agent)
    }
}
