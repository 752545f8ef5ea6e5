pub mod dot;
pub mod html;
pub mod mermaid;
pub mod model;

use std::collections::HashSet;

use crate::graph::ImportGraph;

use model::{ExportFormat, ExportLink, ExportNode, GraphExport};

/// Result of a graph export operation.
pub struct ExportResult {
    /// The rendered graph content.
    pub content: String,
    /// Number of nodes in the exported graph.
    pub node_count: usize,
    /// Number of links in the exported graph.
    pub edge_count: usize,
}

/// Build the node/link document for a finished trace.
///
/// Nodes are the union of every parent and child node; ids are node locations. If two
/// nodes share a location the one with the lowest kind (root before local before
/// third-party) keeps the id.
pub fn to_export(graph: &ImportGraph) -> GraphExport {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut nodes = Vec::new();
    for node in graph.sorted_nodes() {
        if seen.insert(node.location.as_str()) {
            nodes.push(ExportNode {
                id: node.location.clone(),
                name: node.name.clone(),
                kind: node.kind,
            });
        }
    }

    let mut seen_links: HashSet<(&str, &str)> = HashSet::new();
    let mut links = Vec::new();
    for edge in graph.sorted_edges() {
        if seen_links.insert((edge.parent.location.as_str(), edge.child.location.as_str())) {
            links.push(ExportLink {
                source: edge.parent.location.clone(),
                target: edge.child.location.clone(),
            });
        }
    }

    GraphExport { nodes, links }
}

/// Render the graph in the requested format.
pub fn export_graph(graph: &ImportGraph, format: ExportFormat) -> anyhow::Result<ExportResult> {
    let export = to_export(graph);

    let content = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&export)?,
        ExportFormat::Dot => dot::render_dot(&export),
        ExportFormat::Mermaid => mermaid::render_mermaid(&export),
        ExportFormat::Html => html::render_html(&export)?,
    };

    Ok(ExportResult {
        content,
        node_count: export.nodes.len(),
        edge_count: export.links.len(),
    })
}
