use tracing::trace;

use crate::alphabet::Alphabet;
use crate::graph::{Edge, Graph, Node};
use crate::math::Set;

/// Generator for the periodic de Bruijn graph over fixed-length windows.
///
/// Every word of exactly `word_length` symbols exists once per phase; reading a
/// symbol shifts the window by one and advances the phase. Forbidden nodes and
/// every edge touching them are removed from the result.
#[derive(Debug, Clone)]
pub struct DeBruijn {
    alphabet: Alphabet,
    word_length: usize,
    period: u32,
}

impl DeBruijn {
    /// Creates a generator over an alphabet of the given size, with windows of
    /// `word_length` symbols and the given period. Expects `alphabet_size >= 2`
    /// and `period >= 1`; inputs are assumed to be validated by the
    /// configuration layer.
    pub fn new(alphabet_size: usize, word_length: usize, period: u32) -> Self {
        Self {
            alphabet: Alphabet::new(alphabet_size),
            word_length,
            period,
        }
    }

    /// Builds the de Bruijn graph, leaving out `forbidden` nodes and all edges
    /// whose source or target is forbidden.
    pub fn generate(&self, forbidden: &[Node]) -> Graph {
        let mut nodes = Vec::new();
        for word in self.alphabet.words_of_length(self.word_length) {
            for phase in 0..self.period {
                nodes.push(Node::new(word.clone(), phase));
            }
        }
        let node_set: Set<Node> = nodes.iter().cloned().collect();
        let forbidden_set: Set<&Node> = forbidden.iter().collect();

        let mut graph = Graph::new();
        for node in &nodes {
            if !forbidden_set.contains(node) {
                graph.add_node(node.clone());
            }
        }

        for node in &nodes {
            if forbidden_set.contains(node) {
                continue;
            }
            // the canonical shift: drop the first symbol, append the one read
            let stem = node.label().get(1..).unwrap_or("");
            for sym in self.alphabet.symbols() {
                let mut label = String::with_capacity(self.word_length);
                label.push_str(stem);
                label.push(sym);

                let target = Node::new(label, (node.phase() + 1) % self.period);
                if node_set.contains(&target) && !forbidden_set.contains(&target) {
                    graph.add_edge(Edge::new(node.clone(), target, sym));
                }
            }
        }

        trace!(
            "de bruijn construction produced {} nodes and {} edges from {} forbidden nodes",
            graph.node_count(),
            graph.edge_count(),
            forbidden.len()
        );
        graph
    }
}
