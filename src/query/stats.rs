use serde::Serialize;

use crate::graph::ImportGraph;
use crate::graph::node::NodeKind;
use crate::resolver::ResolveStats;

/// Summary of one trace.
#[derive(Debug, Clone, Serialize)]
pub struct TraceSummary {
    /// The location the trace started from.
    pub root: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub local_files: usize,
    pub third_party_packages: usize,
    /// Third-party package names, sorted.
    pub packages: Vec<String>,
    pub circular_imports: usize,
    pub resolve: ResolveStats,
}

/// Compute summary counts for a finished trace.
pub fn trace_summary(root: &str, graph: &ImportGraph, resolve: ResolveStats) -> TraceSummary {
    let mut packages: Vec<String> = graph
        .nodes()
        .into_iter()
        .filter(|n| n.kind == NodeKind::External)
        .map(|n| n.location.clone())
        .collect();
    packages.sort();

    TraceSummary {
        root: root.to_owned(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        local_files: graph.count_kind(NodeKind::Local),
        third_party_packages: packages.len(),
        packages,
        circular_imports: super::circular::find_circular(graph).len(),
        resolve,
    }
}
