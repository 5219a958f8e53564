use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A node label that is not part of the fixed vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node label `{0}` (expected one of: cut, carve, polish, assemble)")]
pub struct InvalidEdgeEndpoint(pub String);

/// One of the process steps the player can connect
/// The vocabulary is closed: every level uses the same four nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLabel {
    Cut,
    Carve,
    Polish,
    Assemble,
}

impl NodeLabel {
    pub const COUNT: usize = 4;

    /// All labels in vocabulary order
    pub const ALL: [NodeLabel; Self::COUNT] = [
        NodeLabel::Cut,
        NodeLabel::Carve,
        NodeLabel::Polish,
        NodeLabel::Assemble,
    ];

    /// Position in vocabulary order, used to index per-label tables
    pub const fn index(&self) -> usize {
        match self {
            NodeLabel::Cut => 0,
            NodeLabel::Carve => 1,
            NodeLabel::Polish => 2,
            NodeLabel::Assemble => 3,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeLabel::Cut => "cut",
            NodeLabel::Carve => "carve",
            NodeLabel::Polish => "polish",
            NodeLabel::Assemble => "assemble",
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeLabel {
    type Err = InvalidEdgeEndpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NodeLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InvalidEdgeEndpoint(trimmed.to_string()))
    }
}

/// Format a sequence the way the HUD shows it: "cut → carve → polish"
pub fn format_sequence(sequence: &[NodeLabel]) -> String {
    sequence
        .iter()
        .map(NodeLabel::as_str)
        .collect::<Vec<_>>()
        .join(" → ")
}
