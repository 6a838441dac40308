use tracing::trace;

use crate::alphabet::Alphabet;
use crate::graph::{Edge, Graph, Node};
use crate::math::Set;

/// Generator for the prefix-closure automaton of a set of forbidden nodes.
///
/// The states are all non-empty prefixes of the forbidden words (at their
/// respective phases) plus one empty-word sentinel per phase. A transition on a
/// symbol leads to the node carrying the longest suffix of the extended word
/// that is itself a state, which is exactly the failure-function walk of an
/// Aho-Corasick style matcher. Forbidden nodes appear in the output but never
/// have outgoing edges.
#[derive(Debug, Clone)]
pub struct Beal {
    alphabet: Alphabet,
    period: u32,
}

impl Beal {
    /// Creates a generator over an alphabet of the given size and the given period.
    /// Expects `alphabet_size >= 2` and `period >= 1`; inputs are assumed to be
    /// validated by the configuration layer.
    pub fn new(alphabet_size: usize, period: u32) -> Self {
        Self {
            alphabet: Alphabet::new(alphabet_size),
            period,
        }
    }

    /// Builds the prefix-closure automaton avoiding `forbidden`.
    ///
    /// Every node that is not itself forbidden has exactly one outgoing edge per
    /// alphabet symbol. Each forbidden node must name a phase below the period;
    /// anything else is a caller error.
    pub fn generate(&self, forbidden: &[Node]) -> Graph {
        let nodes = self.closure_nodes(forbidden);
        let node_set: Set<Node> = nodes.iter().cloned().collect();
        let forbidden_set: Set<&Node> = forbidden.iter().collect();

        let mut graph = Graph::new();
        for node in &nodes {
            graph.add_node(node.clone());
        }

        for node in &nodes {
            // forbidden nodes are terminal, they keep no outgoing edges
            if forbidden_set.contains(node) {
                continue;
            }

            let stem = if node.is_sentinel() { "" } else { node.label() };
            for sym in self.alphabet.symbols() {
                let mut candidate = String::with_capacity(stem.len() + 1);
                candidate.push_str(stem);
                candidate.push(sym);

                let target = self.longest_suffix_target(&candidate, node.phase(), &node_set);
                graph.add_edge(Edge::new(node.clone(), target, sym));
            }
        }

        trace!(
            "beal construction produced {} nodes and {} edges from {} forbidden nodes",
            graph.node_count(),
            graph.edge_count(),
            forbidden.len()
        );
        graph
    }

    /// The node set of the construction: every non-empty prefix of every
    /// forbidden word at its phase, plus a sentinel for every phase. Duplicates
    /// collapse, insertion order is kept for deterministic output.
    fn closure_nodes(&self, forbidden: &[Node]) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut seen = Set::default();

        let mut push = |node: Node, nodes: &mut Vec<Node>| {
            if seen.insert(node.clone()) {
                nodes.push(node);
            }
        };

        for node in forbidden {
            for len in 1..=node.label().len() {
                push(Node::new(&node.label()[..len], node.phase()), &mut nodes);
            }
        }
        for phase in 0..self.period {
            push(Node::sentinel(phase), &mut nodes);
        }

        nodes
    }

    /// Finds the transition target for the extended word `candidate` read from a
    /// node at `phase`: the longest suffix of `candidate` that is a state, where
    /// dropping `offset` characters from the front advances the phase by
    /// `offset`. Falls back to the sentinel at the phase past the candidate.
    fn longest_suffix_target(&self, candidate: &str, phase: u32, node_set: &Set<Node>) -> Node {
        for offset in 0..candidate.len() {
            let probe = Node::new(
                &candidate[offset..],
                (phase + offset as u32) % self.period,
            );
            if node_set.contains(&probe) {
                return probe;
            }
        }

        let fallback = Node::sentinel((phase + candidate.len() as u32) % self.period);
        assert!(
            node_set.contains(&fallback),
            "no suffix of {candidate:?} is a state and the sentinel at phase {} is missing",
            fallback.phase()
        );
        fallback
    }
}
