//! CSV serialization of graphs: edge lists, adjacency matrices, and the edge
//! list import used to re-analyze previously exported graphs.

use itertools::Itertools;
use thiserror::Error;

use crate::graph::{Edge, Graph, Node};

/// Serializes the edge list, one `source,target,symbol` line per edge. Nodes
/// are referred to by their insertion-order index (see
/// [`Graph::node_indices`]).
pub fn edges_csv(graph: &Graph) -> String {
    let indices = graph.node_indices();
    graph
        .edges()
        .iter()
        .map(|edge| {
            format!(
                "{},{},{}\n",
                indices.get_by_left(edge.source()).expect("edge endpoints are nodes"),
                indices.get_by_left(edge.target()).expect("edge endpoints are nodes"),
                edge.symbol()
            )
        })
        .join("")
}

/// Serializes the adjacency matrix: an `n x n` grid of comma-separated counts
/// of parallel edges, one row per source node in insertion order.
pub fn adjacency_matrix_csv(graph: &Graph) -> String {
    let indices = graph.node_indices();
    let n = graph.node_count();
    let mut matrix = vec![vec![0usize; n]; n];
    for edge in graph.edges() {
        let source = *indices.get_by_left(edge.source()).expect("edge endpoints are nodes");
        let target = *indices.get_by_left(edge.target()).expect("edge endpoints are nodes");
        matrix[source][target] += 1;
    }

    matrix
        .iter()
        .map(|row| format!("{}\n", row.iter().join(",")))
        .join("")
}

/// Everything that can go wrong when reading an exported edge list back in.
#[derive(Debug, Error)]
pub enum CsvError {
    /// A line does not consist of exactly three comma-separated fields.
    #[error("line {line}: expected 'source,target,symbol', got {content:?}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },
    /// A node reference is not a number.
    #[error("line {line}: invalid node index {index:?}")]
    InvalidIndex {
        /// 1-based line number.
        line: usize,
        /// The offending field.
        index: String,
    },
    /// An edge label is not a single symbol.
    #[error("line {line}: edge label {label:?} is not a single symbol")]
    InvalidSymbol {
        /// 1-based line number.
        line: usize,
        /// The offending field.
        label: String,
    },
}

/// Parses an edge list previously written by [`edges_csv`]. The resulting graph
/// names its nodes by their index (phase 0); blank lines are skipped.
pub fn parse_edges_csv(input: &str) -> Result<Graph, CsvError> {
    let mut edges = Vec::new();
    let mut max_index = None::<usize>;

    for (line_no, line) in input.lines().enumerate() {
        let line_no = line_no + 1;
        if line.trim().is_empty() {
            continue;
        }
        let (source, target, label) =
            line.split(',')
                .collect_tuple()
                .ok_or_else(|| CsvError::MalformedLine {
                    line: line_no,
                    content: line.to_string(),
                })?;

        let parse_index = |field: &str| {
            field
                .trim()
                .parse::<usize>()
                .map_err(|_| CsvError::InvalidIndex {
                    line: line_no,
                    index: field.to_string(),
                })
        };
        let source = parse_index(source)?;
        let target = parse_index(target)?;
        let symbol = label
            .chars()
            .exactly_one()
            .map_err(|_| CsvError::InvalidSymbol {
                line: line_no,
                label: label.to_string(),
            })?;

        max_index = Some(max_index.map_or(source.max(target), |m| m.max(source).max(target)));
        edges.push((source, target, symbol));
    }

    let mut graph = Graph::new();
    if let Some(max_index) = max_index {
        for index in 0..=max_index {
            graph.add_node(Node::new(index.to_string(), 0));
        }
    }
    for (source, target, symbol) in edges {
        graph.add_edge(Edge::new(
            Node::new(source.to_string(), 0),
            Node::new(target.to_string(), 0),
            symbol,
        ));
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::{adjacency_matrix_csv, edges_csv, parse_edges_csv, CsvError};
    use crate::graph::{Edge, Graph, Node};

    fn two_cycle() -> Graph {
        let mut graph = Graph::new();
        let a = Node::new("0", 0);
        let b = Node::new("1", 1);
        graph.add_node(a.clone());
        graph.add_node(b.clone());
        graph.add_edge(Edge::new(a.clone(), b.clone(), '1'));
        graph.add_edge(Edge::new(b.clone(), a.clone(), '0'));
        graph.add_edge(Edge::new(a.clone(), a.clone(), '0'));
        graph
    }

    #[test]
    fn edge_list_format() {
        assert_eq!(edges_csv(&two_cycle()), "0,1,1\n1,0,0\n0,0,0\n");
    }

    #[test]
    fn matrix_counts_parallel_edges() {
        let mut graph = two_cycle();
        graph.add_edge(Edge::new(Node::new("0", 0), Node::new("1", 1), '0'));
        assert_eq!(adjacency_matrix_csv(&graph), "1,2\n1,0\n");
    }

    #[test]
    fn empty_graph_serializes_to_nothing() {
        let graph = Graph::new();
        assert_eq!(edges_csv(&graph), "");
        assert_eq!(adjacency_matrix_csv(&graph), "");
    }

    #[test]
    fn edge_list_round_trip() {
        let exported = edges_csv(&two_cycle());
        let imported = parse_edges_csv(&exported).expect("parses");
        assert_eq!(imported.node_count(), 2);
        assert_eq!(imported.edge_count(), 3);
        assert_eq!(edges_csv(&imported), exported);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            parse_edges_csv("0,1\n"),
            Err(CsvError::MalformedLine { line: 1, .. })
        ));
        assert!(matches!(
            parse_edges_csv("0,x,1\n"),
            Err(CsvError::InvalidIndex { line: 1, .. })
        ));
        assert!(matches!(
            parse_edges_csv("0,1,ab\n"),
            Err(CsvError::InvalidSymbol { line: 1, .. })
        ));
    }
}
