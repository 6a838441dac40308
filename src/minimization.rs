//! Moore-style partition refinement for edge-labelled graphs.
//!
//! Nodes are grouped by a signature derived from their outgoing edges; the
//! signature is refined with the target classes until the partition stabilizes,
//! after which the graph is collapsed to one representative per class.

use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::trace;

use crate::graph::{Adjacency, Edge, Graph, Node};
use crate::math::{Map, Partition};

/// Collapses `graph` to its coarsest signature-equivalent quotient.
///
/// The node count never increases, and re-minimizing the result is a no-op up
/// to isomorphism. Each class is represented by its least node under the
/// `(label, phase)` order, so the output is deterministic.
pub fn minimize(graph: &Graph) -> Graph {
    let adjacency = graph.adjacency();
    let partition = refine(graph, &adjacency);
    quotient(&adjacency, &partition)
}

/// Computes the stable Moore partition of `graph` without building the
/// quotient. Exposed separately so callers can inspect which nodes were
/// identified.
pub fn moore_partition(graph: &Graph) -> Partition<Node> {
    refine(graph, &graph.adjacency())
}

/// The signature a node starts out with: its outgoing edge labels, sorted and
/// concatenated. Targets are ignored at this stage.
fn initial_signature(node: &Node, adjacency: &Adjacency) -> String {
    adjacency
        .get(node)
        .map(|out| out.keys().sorted().collect())
        .unwrap_or_default()
}

fn refine(graph: &Graph, adjacency: &Adjacency) -> Partition<Node> {
    let mut classes: Map<String, BTreeSet<Node>> = Map::default();
    let mut signatures: Map<Node, String> = Map::default();
    for node in graph.nodes() {
        let signature = initial_signature(node, adjacency);
        classes
            .entry(signature.clone())
            .or_default()
            .insert(node.clone());
        signatures.insert(node.clone(), signature);
    }

    let mut round = 0usize;
    loop {
        let mut refined: Map<String, BTreeSet<Node>> = Map::default();
        let mut refined_signatures: Map<Node, String> = Map::default();

        for (signature, members) in &classes {
            // a singleton class cannot split any further
            if members.len() == 1 {
                refined
                    .entry(signature.clone())
                    .or_default()
                    .extend(members.iter().cloned());
                for node in members {
                    refined_signatures.insert(node.clone(), signature.clone());
                }
                continue;
            }

            for node in members {
                let parts = adjacency
                    .get(node)
                    .into_iter()
                    .flat_map(|out| {
                        out.iter()
                            .map(|(sym, target)| format!("{sym}{}", signatures[target]))
                    })
                    .sorted()
                    .join("");
                let extended = format!("{signature}{parts}");

                refined
                    .entry(extended.clone())
                    .or_default()
                    .insert(node.clone());
                refined_signatures.insert(node.clone(), extended);
            }
        }

        round += 1;
        let stable = refined.len() == classes.len();
        classes = refined;
        signatures = refined_signatures;
        if stable {
            trace!(
                "partition stabilized at {} classes after {round} rounds",
                classes.len()
            );
            return Partition::new(classes.into_values());
        }
    }
}

/// Builds the quotient graph of the stable partition: one node per class (its
/// least element) and the representative's outgoing edges redirected to the
/// representatives of their targets.
fn quotient(adjacency: &Adjacency, partition: &Partition<Node>) -> Graph {
    let mut representatives: Map<&Node, &Node> = Map::default();
    for class in partition {
        let representative = class.first().expect("partition classes are non-empty");
        for node in class {
            representatives.insert(node, representative);
        }
    }

    let mut graph = Graph::new();
    for class in partition {
        let representative = class.first().expect("partition classes are non-empty");
        graph.add_node(representative.clone());
        if let Some(out) = adjacency.get(representative) {
            for (sym, target) in out.iter().sorted_by_key(|(sym, _)| **sym) {
                graph.add_edge(Edge::new(
                    representative.clone(),
                    representatives[target].clone(),
                    *sym,
                ));
            }
        }
    }
    graph
}
