//! Graphviz output. For details on the DOT format, see the
//! [graphviz documentation](https://graphviz.org/doc/info/lang.html).

use itertools::Itertools;

use crate::graph::Graph;

/// Computes the DOT representation of `graph`. Vertices are named by their
/// insertion-order index and labelled `word@phase`, edges carry their symbol.
pub fn dot_representation(graph: &Graph) -> String {
    let indices = graph.node_indices();

    let header = std::iter::once("digraph subshift {".to_string());
    let vertices = graph.nodes().iter().map(|node| {
        format!(
            "  {} [label=\"{}@{}\"]",
            indices.get_by_left(node).expect("every node is indexed"),
            node.label(),
            node.phase()
        )
    });
    let edges = graph.edges().iter().map(|edge| {
        format!(
            "  {} -> {} [label=\"{}\"]",
            indices.get_by_left(edge.source()).expect("edge endpoints are nodes"),
            indices.get_by_left(edge.target()).expect("edge endpoints are nodes"),
            edge.symbol()
        )
    });

    header
        .chain(vertices)
        .chain(edges)
        .chain(std::iter::once("}".to_string()))
        .join("\n")
}

/// Renders `graph` to PNG bytes by piping its DOT representation through the
/// external `dot` binary. Only available on the `graphviz` crate feature.
#[cfg(feature = "graphviz")]
pub fn render(graph: &Graph) -> Result<Vec<u8>, std::io::Error> {
    use std::io::{Read, Write};

    use tracing::trace;

    let dot = dot_representation(graph);
    trace!("writing dot representation\n{}", dot);

    let mut child = std::process::Command::new("dot")
        .arg("-Tpng")
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(dot.as_bytes())?;
    }

    let mut output = Vec::new();
    if let Some(mut stdout) = child.stdout.take() {
        stdout.read_to_end(&mut output)?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("dot process exited with status: {}", status),
        ));
    }

    Ok(output)
}

/// Renders `graph` as PNG into the file at `filename`, going through a
/// temporary file for the DOT text. Only available on the `graphviz` crate
/// feature.
#[cfg(feature = "graphviz")]
pub fn render_to_file(graph: &Graph, filename: impl AsRef<std::path::Path>) -> Result<(), std::io::Error> {
    use std::io::Write;

    use tracing::trace;

    trace!("outputting dot and rendering to png");
    let dot = dot_representation(graph);
    let mut tempfile = tempfile::NamedTempFile::new()?;
    tempfile.write_all(dot.as_bytes())?;

    let mut child = std::process::Command::new("dot")
        .arg("-Tpng")
        .arg("-o")
        .arg(filename.as_ref())
        .arg(tempfile.path())
        .spawn()?;
    if !child.wait()?.success() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "dot exited with an error",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::dot_representation;
    use crate::graph::{Edge, Graph, Node};

    #[test]
    fn dot_output_shape() {
        let mut graph = Graph::new();
        let a = Node::new("01", 0);
        let b = Node::new("10", 1);
        graph.add_node(a.clone());
        graph.add_node(b.clone());
        graph.add_edge(Edge::new(a.clone(), b.clone(), '0'));

        let dot = dot_representation(&graph);
        assert!(dot.starts_with("digraph subshift {"));
        assert!(dot.ends_with('}'));
        assert!(dot.contains("0 [label=\"01@0\"]"));
        assert!(dot.contains("1 [label=\"10@1\"]"));
        assert!(dot.contains("0 -> 1 [label=\"0\"]"));
    }

    #[test]
    fn empty_graph_is_still_valid_dot() {
        let dot = dot_representation(&Graph::new());
        assert_eq!(dot, "digraph subshift {\n}");
    }
}
