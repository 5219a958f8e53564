mod adjacency;
mod edge;
mod node;
mod sequence;

pub use adjacency::Adjacency;
pub use edge::{Connection, ConnectionGraph};
pub use node::{InvalidEdgeEndpoint, NodeLabel, format_sequence};
pub use sequence::extract_sequence;
