use super::node::Node;

/// Directed "imports" relationship: `parent`'s source imports `child`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub parent: Node,
    pub child: Node,
}

impl Edge {
    pub fn new(parent: Node, child: Node) -> Self {
        Self { parent, child }
    }
}
