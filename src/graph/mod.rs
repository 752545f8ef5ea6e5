pub mod edge;
pub mod node;

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};

use edge::Edge;
use node::{Node, NodeKind};

/// The accumulated result of one trace: every node seen as a parent, every node seen as a
/// child, and the deduplicated edge set.
///
/// Built by the resolver and read-only afterwards. Every node referenced by an edge is in
/// `parents ∪ children`, and that union is exactly the node list handed to renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportGraph {
    parents: HashSet<Node>,
    children: HashSet<Node>,
    edges: HashSet<Edge>,
}

impl ImportGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `parent -> child`. Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, parent: Node, child: Node) -> bool {
        self.parents.insert(parent.clone());
        self.children.insert(child.clone());
        self.edges.insert(Edge::new(parent, child))
    }

    /// All nodes: the union of parent and child nodes. Order is unspecified.
    pub fn nodes(&self) -> HashSet<&Node> {
        self.parents.iter().chain(self.children.iter()).collect()
    }

    /// All nodes, sorted by kind then location, for deterministic rendering.
    pub fn sorted_nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes().into_iter().collect();
        nodes.sort_by(|a, b| (a.kind, &a.location).cmp(&(b.kind, &b.location)));
        nodes
    }

    /// The edge set. Order is unspecified.
    pub fn edges(&self) -> &HashSet<Edge> {
        &self.edges
    }

    /// Edges sorted by parent location then child location.
    pub fn sorted_edges(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.edges.iter().collect();
        edges.sort_by(|a, b| {
            (&a.parent.location, &a.child.location).cmp(&(&b.parent.location, &b.child.location))
        });
        edges
    }

    pub fn parents(&self) -> &HashSet<Node> {
        &self.parents
    }

    pub fn children(&self) -> &HashSet<Node> {
        &self.children
    }

    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether some node at `location` has recorded an outgoing edge.
    pub fn is_parent(&self, location: &str) -> bool {
        self.parents.iter().any(|n| n.location == location)
    }

    /// Find a node by location. Prefers the root node if several kinds share a location.
    pub fn find(&self, location: &str) -> Option<&Node> {
        self.nodes()
            .into_iter()
            .filter(|n| n.location == location)
            .min_by_key(|n| n.kind)
    }

    /// Whether an edge exists between the nodes at the two locations (any kinds).
    pub fn has_edge(&self, parent_location: &str, child_location: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.parent.location == parent_location && e.child.location == child_location)
    }

    /// Number of nodes of the given kind.
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes().into_iter().filter(|n| n.kind == kind).count()
    }

    /// Build a petgraph view of the graph for algorithms (cycle detection, ordering).
    ///
    /// Node weights borrow from `self`; indices follow [`ImportGraph::sorted_nodes`].
    pub fn to_digraph(&self) -> DiGraph<&Node, ()> {
        let mut graph: DiGraph<&Node, ()> = DiGraph::new();
        let mut index: HashMap<&Node, NodeIndex> = HashMap::new();

        for node in self.sorted_nodes() {
            index.insert(node, graph.add_node(node));
        }
        for edge in self.sorted_edges() {
            if let (Some(&from), Some(&to)) = (index.get(&edge.parent), index.get(&edge.child)) {
                graph.add_edge(from, to, ());
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut graph = ImportGraph::new();
        assert!(graph.add_edge(Node::root("main.py"), Node::external("numpy")));
        assert!(!graph.add_edge(Node::root("main.py"), Node::external("numpy")));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_external_leaf_shared_across_parents() {
        let mut graph = ImportGraph::new();
        graph.add_edge(Node::root("main.py"), Node::external("requests"));
        graph.add_edge(Node::local("util.py"), Node::external("requests"));
        assert_eq!(graph.count_kind(NodeKind::External), 1);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_nodes_are_union_of_parents_and_children() {
        let mut graph = ImportGraph::new();
        graph.add_edge(Node::root("a.py"), Node::local("b.py"));
        graph.add_edge(Node::local("b.py"), Node::external("os"));
        let locations: Vec<&str> = graph
            .sorted_nodes()
            .into_iter()
            .map(|n| n.location.as_str())
            .collect();
        assert_eq!(locations, vec!["a.py", "b.py", "os"]);
        assert!(graph.is_parent("b.py"));
        assert!(!graph.is_parent("os"));
    }

    #[test]
    fn test_find_prefers_root() {
        let mut graph = ImportGraph::new();
        graph.add_edge(Node::local("b.py"), Node::local("a.py"));
        graph.add_edge(Node::root("a.py"), Node::local("b.py"));
        assert_eq!(graph.find("a.py").map(|n| n.kind), Some(NodeKind::Root));
        assert!(graph.find("missing.py").is_none());
    }

    #[test]
    fn test_to_digraph_preserves_counts() {
        let mut graph = ImportGraph::new();
        graph.add_edge(Node::root("a.py"), Node::local("b.py"));
        graph.add_edge(Node::local("b.py"), Node::root("a.py"));
        let dg = graph.to_digraph();
        assert_eq!(dg.node_count(), 2);
        assert_eq!(dg.edge_count(), 2);
    }
}
