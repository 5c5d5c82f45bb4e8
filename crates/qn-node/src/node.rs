//! Identity shared by every node of the network.

use std::fmt;

use qn_core::NodeId;

/// The three roles a node can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Source,
    Server,
    Sink,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Source => "source",
            NodeKind::Server => "server",
            NodeKind::Sink => "sink",
        };
        f.write_str(s)
    }
}

/// Implemented by [`Source`][crate::Source], [`Server`][crate::Server], and
/// [`Sink`][crate::Sink].
pub trait Node {
    fn id(&self) -> NodeId;
    fn kind(&self) -> NodeKind;
}
