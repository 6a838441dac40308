//! Generation and simplification of finite directed labelled graphs that
//! represent subshifts of finite type.
//!
//! A subshift of finite type is the set of bi-infinite symbol sequences that
//! avoid a finite collection of forbidden words; here the forbidden words are
//! additionally pinned to *phases*, i.e. positions modulo a fixed period, so
//! the constraints may vary periodically along the sequence. The crate turns
//! one concrete combination of forbidden `(word, phase)` nodes into a labelled
//! transition graph and offers two reduction passes over the result.
//!
//! Two generators are provided, selected through the closed
//! [`generate::GraphGenerator`] enum:
//! - [`generate::Beal`] builds the prefix-closure automaton of the forbidden
//!   words, with longest-suffix fallback transitions in the manner of a
//!   failure-function matcher. Forbidden nodes appear as terminal states.
//! - [`generate::DeBruijn`] builds the full periodic sliding-window graph over
//!   fixed-length words and removes the forbidden nodes afterwards.
//!
//! The reduction passes are pure `Graph -> Graph` functions:
//! - [`prune::prune`] repeatedly deletes nodes with no incoming or no outgoing
//!   edge, so only states on bi-infinite paths survive.
//! - [`minimization::minimize`] merges behaviorally equivalent states by Moore
//!   partition refinement and rebuilds the quotient graph.
//!
//! ```
//! use subshift::prelude::*;
//!
//! let generator = GraphGenerator::beal(3, 2);
//! let graph = generator.generate(&[Node::new("012", 0)]);
//! let reduced = minimize(&prune(&graph));
//! assert!(reduced.node_count() <= graph.node_count());
//! ```
//!
//! Everything is single-threaded and deterministic: identical inputs produce
//! identical graphs, node for node and edge for edge.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including
/// everything, i.e. `use subshift::prelude::*;` should be enough to use the
/// package.
pub mod prelude {
    pub use super::{
        alphabet::Alphabet,
        config::{Algorithm, Config, Mode, OutputFormat},
        forbidden,
        generate::{Beal, DeBruijn, GraphGenerator},
        graph::{Adjacency, Edge, Graph, Node},
        math,
        minimization::{minimize, moore_partition},
        prune::prune,
    };
}

/// Small mathematical helpers used throughout the crate: hashing aliases and
/// partitions.
pub mod math;

/// Alphabets over the fixed symbol universe and word enumeration.
pub mod alphabet;

/// The node/edge/graph data model every other component reads and writes.
pub mod graph;

/// The two graph generators.
pub mod generate;

/// Sink-less reduction.
pub mod prune;

/// Moore partition refinement and quotient construction.
pub mod minimization;

/// Enumeration of forbidden-node combinations.
pub mod forbidden;

/// JSON run configuration and validation.
pub mod config;

/// CSV export and import.
pub mod csv;

/// Graphviz DOT output and rendering.
pub mod dot;

#[cfg(test)]
mod tests {
    use crate::math::Map;
    use crate::prelude::*;

    #[test_log::test]
    fn full_pipeline_on_a_beal_graph() {
        let graph = GraphGenerator::beal(3, 2).generate(&[Node::new("012", 0)]);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 12);

        // the forbidden node is terminal, so pruning drops it and its one
        // incoming edge while the rest of the automaton keeps cycling
        let pruned = prune(&graph);
        assert!(!pruned.contains_node(&Node::new("012", 0)));
        assert_eq!(pruned.node_count(), 4);
        assert_eq!(pruned.edge_count(), 11);
        let mut in_degree: Map<&Node, usize> = Map::default();
        let mut out_degree: Map<&Node, usize> = Map::default();
        for edge in pruned.edges() {
            *out_degree.entry(edge.source()).or_default() += 1;
            *in_degree.entry(edge.target()).or_default() += 1;
        }
        for node in pruned.nodes() {
            assert!(out_degree.get(node).copied().unwrap_or(0) >= 1);
            assert!(in_degree.get(node).copied().unwrap_or(0) >= 1);
        }

        let minimized = minimize(&pruned);
        assert!(minimized.node_count() <= pruned.node_count());
        let again = minimize(&minimized);
        assert_eq!(minimized.node_count(), again.node_count());
        assert_eq!(minimized.edge_count(), again.edge_count());
    }

    #[test]
    fn de_bruijn_pipeline_respects_forbidden_nodes() {
        let forbidden = [Node::new("00", 0)];
        let graph = GraphGenerator::de_bruijn(2, 2, 2).generate(&forbidden);
        let reduced = minimize(&prune(&graph));

        for node in reduced.nodes() {
            assert_ne!(node, &forbidden[0]);
        }
        for edge in reduced.edges() {
            assert_ne!(edge.source(), &forbidden[0]);
            assert_ne!(edge.target(), &forbidden[0]);
        }
        assert!(!reduced.is_empty());
    }
}
