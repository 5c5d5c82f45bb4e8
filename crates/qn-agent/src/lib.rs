//! `qn-agent` — scheduling agents that route tasks to servers.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`model`]    | `SchedulingAgent`, `OnlineLearning` traits                    |
//! | [`load`]     | `ServerLoad`, the per-server snapshot passed to `select`      |
//! | [`policies`] | Random, least-work-left, noisy least-work-left, fewest-tasks  |
//! | [`window`]   | `BoundedWindow`, `WindowStats`, `empirical_quantile`          |
//! | [`topology`] | `ExperienceWindow`: shared, per-node, reset-on-rare-event     |
//! | [`thompson`] | `ThompsonSampling<W>` and its three aliases                   |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                                |
//!
//! # Design notes
//!
//! Agents never see servers directly.  At every arrival the simulator builds
//! a `&[ServerLoad]` snapshot and calls `select`; adaptive agents additionally
//! receive one `Experience` per completed task through `OnlineLearning`.
//! Every agent owns its statistics outright, and the window topology of a
//! Thompson-sampling agent is part of its type.

pub mod error;
pub mod load;
pub mod model;
pub mod policies;
pub mod thompson;
pub mod topology;
pub mod window;


pub use error::{AgentError, AgentResult};
pub use load::ServerLoad;
pub use model::{OnlineLearning, SchedulingAgent};
pub use policies::{
    AssignToFewestTasksLeft, AssignToLeastWorkLeft, AssignToNoisyLeastWorkLeft, AssignToRandom,
};
pub use thompson::{ThompsonSampling, TsResetWinOnRareEvent, TsSlidingWin, TsSlidingWinForEachNode};
pub use topology::{ExperienceWindow, PerNodeWindows, ResetOnRareEvent, SharedWindow};
pub use window::{BoundedWindow, WindowStats, empirical_quantile};
