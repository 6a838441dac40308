//! Sink-less reduction: iterated removal of nodes that cannot lie on any
//! bi-infinite path.

use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::trace;

use crate::graph::Graph;
use crate::math::Map;

/// Removes every node with zero out-degree or zero in-degree, repeating until a
/// fixpoint is reached, and returns the reduced graph. Such nodes can never be
/// part of an infinite orbit, so dropping them preserves the represented
/// subshift.
///
/// The pass is idempotent: pruning an already pruned graph changes nothing.
/// Pruning a graph without any cycle yields the empty graph, which is a valid
/// outcome downstream consumers have to handle.
pub fn prune(graph: &Graph) -> Graph {
    let nodes = graph.nodes();
    let edges = graph.edges();

    let index: Map<_, usize> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node, idx))
        .collect();

    let mut out_degree = vec![0usize; nodes.len()];
    let mut in_degree = vec![0usize; nodes.len()];
    let mut out_edges = vec![Vec::new(); nodes.len()];
    let mut in_edges = vec![Vec::new(); nodes.len()];

    for (edge_idx, edge) in edges.iter().enumerate() {
        let source = index[edge.source()];
        let target = index[edge.target()];
        out_degree[source] += 1;
        in_degree[target] += 1;
        out_edges[source].push(edge_idx);
        in_edges[target].push(edge_idx);
    }

    let mut removed = BitSet::with_capacity(nodes.len());
    let mut worklist = VecDeque::new();
    for idx in 0..nodes.len() {
        if out_degree[idx] == 0 || in_degree[idx] == 0 {
            removed.insert(idx);
            worklist.push_back(idx);
        }
    }

    // peel: removing a node may strand its neighbors
    while let Some(current) = worklist.pop_front() {
        for &edge_idx in &out_edges[current] {
            let target = index[edges[edge_idx].target()];
            if removed.contains(target) {
                continue;
            }
            in_degree[target] -= 1;
            if in_degree[target] == 0 {
                removed.insert(target);
                worklist.push_back(target);
            }
        }
        for &edge_idx in &in_edges[current] {
            let source = index[edges[edge_idx].source()];
            if removed.contains(source) {
                continue;
            }
            out_degree[source] -= 1;
            if out_degree[source] == 0 {
                removed.insert(source);
                worklist.push_back(source);
            }
        }
    }

    trace!("pruning removed {} of {} nodes", removed.len(), nodes.len());

    let mut pruned = Graph::new();
    for (idx, node) in nodes.iter().enumerate() {
        if !removed.contains(idx) {
            pruned.add_node(node.clone());
        }
    }
    for edge in edges {
        if !removed.contains(index[edge.source()]) && !removed.contains(index[edge.target()]) {
            pruned.add_edge(edge.clone());
        }
    }
    pruned
}
