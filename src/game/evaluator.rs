use crate::game::catalog::LevelSpec;
use crate::graph::{ConnectionGraph, NodeLabel, extract_sequence};

/// Outcome of checking a drawing against a level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub won: bool,
    /// The sequence recovered from the drawing
    pub extracted: Vec<NodeLabel>,
}

/// Check whether the drawn connections encode the level's sequence
pub fn evaluate(graph: &ConnectionGraph, spec: &LevelSpec) -> Evaluation {
    let extracted = extract_sequence(graph);
    let won = sequences_match(&extracted, &spec.sequence);

    Evaluation { won, extracted }
}

/// Exact match: same length, same label at every position
/// A prefix or subsequence of the required sequence does not count
pub fn sequences_match(extracted: &[NodeLabel], required: &[NodeLabel]) -> bool {
    extracted.len() == required.len()
        && extracted
            .iter()
            .zip(required)
            .all(|(drawn, wanted)| drawn == wanted)
}
