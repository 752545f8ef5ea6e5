use serde::{Deserialize, Serialize};

use crate::graph::node::NodeKind;

/// Output format for graph export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
pub enum ExportFormat {
    /// `{"nodes": [...], "links": [...]}` JSON consumed by the force-graph page (default).
    #[default]
    Json,
    /// Graphviz DOT format.
    Dot,
    /// Mermaid flowchart format. Best for small-to-medium graphs in markdown.
    Mermaid,
    /// Standalone HTML page drawing the graph with d3.
    Html,
}

/// One node of the exported graph. `id` is unique and is what links refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// One "imports" link, by node id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLink {
    pub source: String,
    pub target: String,
}

/// The node/link document handed to renderers and external tooling.
///
/// Ordering is deterministic but not part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub links: Vec<ExportLink>,
}
