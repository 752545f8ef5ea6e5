use serde::{Deserialize, Serialize};

/// The role a node plays in an import trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The file the trace started from.
    Root,
    /// A project file that was parsed (or is a speculative leaf that does not exist).
    Local,
    /// A top-level package outside the project. Terminal; never parsed.
    #[serde(rename = "third_party")]
    External,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Local => "local",
            NodeKind::External => "third_party",
        }
    }
}

/// A vertex of the import graph.
///
/// Identity is structural: two nodes with equal `(name, location, kind)` are the same node
/// no matter where they were constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Node {
    /// Display label: the file path for root/local nodes, the package name for external ones.
    pub name: String,
    /// Unique key: a `/`-separated path relative to the project root, or the package name.
    pub location: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn root(location: impl Into<String>) -> Self {
        Self::file(location, NodeKind::Root)
    }

    pub fn local(location: impl Into<String>) -> Self {
        Self::file(location, NodeKind::Local)
    }

    pub fn external(package: impl Into<String>) -> Self {
        let package = package.into();
        Self {
            name: package.clone(),
            location: package,
            kind: NodeKind::External,
        }
    }

    fn file(location: impl Into<String>, kind: NodeKind) -> Self {
        let location = location.into();
        Self {
            name: location.clone(),
            location,
            kind,
        }
    }

    /// Root and local nodes are project files; external nodes are not.
    pub fn is_file(&self) -> bool {
        self.kind != NodeKind::External
    }
}
