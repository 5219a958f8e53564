use super::edge::Connection;
use super::node::NodeLabel;

/// Adjacency multi-map over the closed node vocabulary
///
/// Every label is present, with no destinations when no connection leaves
/// it. Copies of the same connection are folded into one destination with a
/// multiplicity, so a walk branches once per distinct destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    /// Distinct destinations per source, in order of first draw
    destinations: [Vec<NodeLabel>; NodeLabel::COUNT],
    /// Copies drawn of each (from, to) pair
    multiplicity: [[usize; NodeLabel::COUNT]; NodeLabel::COUNT],
    in_degree: [usize; NodeLabel::COUNT],
    edge_count: usize,
}

impl Adjacency {
    pub fn from_connections(connections: &[Connection]) -> Self {
        let mut adjacency = Adjacency::default();

        for connection in connections {
            let (from, to) = (connection.from.index(), connection.to.index());
            if adjacency.multiplicity[from][to] == 0 {
                adjacency.destinations[from].push(connection.to);
            }
            adjacency.multiplicity[from][to] += 1;
            adjacency.in_degree[to] += 1;
        }
        adjacency.edge_count = connections.len();

        adjacency
    }

    /// Distinct labels following a node, in order of first draw
    pub fn destinations(&self, label: NodeLabel) -> &[NodeLabel] {
        &self.destinations[label.index()]
    }

    /// How many times (from, to) was drawn
    pub fn multiplicity(&self, from: NodeLabel, to: NodeLabel) -> usize {
        self.multiplicity[from.index()][to.index()]
    }

    /// Multiplicity table indexed by `NodeLabel::index`
    pub fn multiplicities(&self) -> [[usize; NodeLabel::COUNT]; NodeLabel::COUNT] {
        self.multiplicity
    }

    pub fn in_degree(&self, label: NodeLabel) -> usize {
        self.in_degree[label.index()]
    }

    pub fn out_degree(&self, label: NodeLabel) -> usize {
        self.multiplicity[label.index()].iter().sum()
    }

    /// Total number of connections the map was built from
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Nodes where a drawing can clearly begin: nothing points at them,
    /// but at least one connection leaves them (vocabulary order)
    pub fn sources(&self) -> Vec<NodeLabel> {
        NodeLabel::ALL
            .into_iter()
            .filter(|&label| self.in_degree(label) == 0 && self.out_degree(label) > 0)
            .collect()
    }
}
