use super::adjacency::Adjacency;
use super::node::NodeLabel;

use serde::Serialize;

/// A directed connection drawn by the player
/// Unlike an undirected grid edge, direction matters: (cut, carve) != (carve, cut)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Connection {
    pub from: NodeLabel,
    pub to: NodeLabel,
}

impl Connection {
    pub const fn new(from: NodeLabel, to: NodeLabel) -> Self {
        Connection { from, to }
    }
}

/// All connections of the current attempt, in the order they were drawn
///
/// Append-only while an attempt is running. Duplicates and self-loops are
/// kept as-is: the player may draw the same connection twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionGraph {
    draw_order: Vec<Connection>,
}

impl ConnectionGraph {
    pub fn new() -> Self {
        ConnectionGraph {
            draw_order: Vec::new(),
        }
    }

    /// Append a connection
    pub fn add_edge(&mut self, from: NodeLabel, to: NodeLabel) -> Connection {
        let connection = Connection::new(from, to);
        self.draw_order.push(connection);
        connection
    }

    /// Get connections in draw order
    pub fn edges_in_order(&self) -> &[Connection] {
        &self.draw_order
    }

    /// The first connection drawn in this attempt, if any
    pub fn first(&self) -> Option<Connection> {
        self.draw_order.first().copied()
    }

    pub fn len(&self) -> usize {
        self.draw_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw_order.is_empty()
    }

    /// Clear all connections
    pub fn clear(&mut self) {
        self.draw_order.clear();
    }

    /// Build the adjacency view of the current connections
    /// Recomputed on every call; attempts only hold a handful of edges
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::from_connections(&self.draw_order)
    }
}
