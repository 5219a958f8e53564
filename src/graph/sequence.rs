use super::adjacency::Adjacency;
use super::edge::ConnectionGraph;
use super::node::NodeLabel;

/// Recover the ordered sequence a drawing encodes
///
/// Starts from every node with no incoming connection (or, when the drawing
/// loops back onto every node, from the source of the first connection drawn),
/// walks all branches depth-first and keeps the longest walk. Ties go to the
/// walk found first.
///
/// Labels may repeat inside a walk, which is how levels such as
/// cut → carve → cut → polish → assemble are drawn. Each drawn connection is
/// used at most once per walk, so a walk never holds more than
/// `graph.len() + 1` labels and cycles cannot recurse forever.
///
/// Copies of the same connection are interchangeable: the walk branches once
/// per distinct destination and spends one copy. Enumeration stops as soon as
/// a walk uses every connection.
///
/// A lone self-loop (x, x) yields [x, x]; every extra copy of it adds one more x.
pub fn extract_sequence(graph: &ConnectionGraph) -> Vec<NodeLabel> {
    let Some(first) = graph.first() else {
        return Vec::new();
    };

    let adjacency = graph.adjacency();
    let mut starts = adjacency.sources();
    if starts.is_empty() {
        starts.push(first.from);
    }

    let mut walker = Walker::new(&adjacency);
    for start in starts {
        if walker.is_exhaustive() {
            break;
        }
        walker.walk(start);
    }

    log::trace!(
        "Extracted {} labels from {} connections",
        walker.longest.len(),
        graph.len()
    );
    walker.longest
}

/// Depth-first enumeration state shared by every branch
struct Walker<'a> {
    adjacency: &'a Adjacency,
    /// Unused copies of each (from, to) pair for the walk under construction
    remaining: [[usize; NodeLabel::COUNT]; NodeLabel::COUNT],
    path: Vec<NodeLabel>,
    longest: Vec<NodeLabel>,
}

impl<'a> Walker<'a> {
    fn new(adjacency: &'a Adjacency) -> Self {
        Walker {
            adjacency,
            remaining: adjacency.multiplicities(),
            path: Vec::with_capacity(adjacency.edge_count() + 1),
            longest: Vec::new(),
        }
    }

    /// The best walk already uses every connection
    fn is_exhaustive(&self) -> bool {
        self.longest.len() == self.adjacency.edge_count() + 1
    }

    fn walk(&mut self, at: NodeLabel) {
        self.path.push(at);

        let adjacency = self.adjacency;
        let mut extended = false;
        for &to in adjacency.destinations(at) {
            if self.is_exhaustive() {
                break;
            }
            let copies = &mut self.remaining[at.index()][to.index()];
            if *copies == 0 {
                continue;
            }
            *copies -= 1;
            extended = true;
            self.walk(to);
            self.remaining[at.index()][to.index()] += 1;
        }

        // Dead end: strictly longer walks replace the best one
        if !extended && self.path.len() > self.longest.len() {
            self.longest.clone_from(&self.path);
        }

        self.path.pop();
    }
}
