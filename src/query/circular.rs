use petgraph::algo::kosaraju_scc;
use serde::Serialize;

use crate::graph::ImportGraph;

/// A set of files forming a circular import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircularImport {
    /// Locations forming the cycle, sorted. The first location is repeated at the end to
    /// close the visual cycle.
    pub files: Vec<String>,
}

/// Detect circular imports among project files.
///
/// Uses Kosaraju's SCC algorithm on the file-only subgraph (third-party leaves cannot be
/// part of a cycle). SCCs with more than one member are cycles.
///
/// Returns cycles sorted by their first location.
pub fn find_circular(graph: &ImportGraph) -> Vec<CircularImport> {
    let mut file_graph = graph.to_digraph();
    file_graph.retain_nodes(|g, idx| g[idx].is_file());

    let mut cycles: Vec<CircularImport> = kosaraju_scc(&file_graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut files: Vec<String> = scc
                .iter()
                .map(|&idx| file_graph[idx].location.clone())
                .collect();
            files.sort();
            files.dedup();
            let first = files[0].clone();
            files.push(first);
            CircularImport { files }
        })
        .filter(|c| c.files.len() > 2)
        .collect();

    cycles.sort_by(|a, b| a.files[0].cmp(&b.files[0]));
    cycles
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::Node;

    #[test]
    fn test_two_file_mutual_cycle_detected() {
        let mut graph = ImportGraph::new();
        graph.add_edge(Node::root("a.py"), Node::local("b.py"));
        graph.add_edge(Node::local("b.py"), Node::root("a.py"));

        let cycles = find_circular(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].files, vec!["a.py", "b.py", "a.py"]);
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let mut graph = ImportGraph::new();
        graph.add_edge(Node::root("a.py"), Node::local("b.py"));
        graph.add_edge(Node::local("b.py"), Node::local("c.py"));
        graph.add_edge(Node::local("c.py"), Node::external("os"));
        assert!(find_circular(&graph).is_empty());
    }

    #[test]
    fn test_separate_cycles_sorted() {
        let mut graph = ImportGraph::new();
        graph.add_edge(Node::root("main.py"), Node::local("x.py"));
        graph.add_edge(Node::local("x.py"), Node::local("y.py"));
        graph.add_edge(Node::local("y.py"), Node::local("x.py"));
        graph.add_edge(Node::root("main.py"), Node::local("b.py"));
        graph.add_edge(Node::local("b.py"), Node::local("c.py"));
        graph.add_edge(Node::local("c.py"), Node::local("d.py"));
        graph.add_edge(Node::local("d.py"), Node::local("b.py"));

        let cycles = find_circular(&graph);
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].files, vec!["b.py", "c.py", "d.py", "b.py"]);
        assert_eq!(cycles[1].files, vec!["x.py", "y.py", "x.py"]);
    }
}
