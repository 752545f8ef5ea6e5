use std::collections::HashMap;
use std::fmt::Write;

use crate::export::model::GraphExport;
use crate::graph::node::NodeKind;

/// Escape a string for safe use in Mermaid node labels (quotes inside labels break the syntax).
fn escape_mermaid_label(s: &str) -> String {
    s.replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

/// Mermaid node shape by kind: root is a stadium, local files are boxes, packages circles.
fn shaped(id: &str, label: &str, kind: NodeKind) -> String {
    match kind {
        NodeKind::Root => format!("{}([\"{}\"])", id, label),
        NodeKind::Local => format!("{}[\"{}\"]", id, label),
        NodeKind::External => format!("{}((\"{}\"))", id, label),
    }
}

/// Render the exported graph as a Mermaid flowchart.
///
/// Nodes get positional IDs (`n0`, `n1`, ...) because locations contain characters
/// Mermaid does not accept in identifiers.
pub fn render_mermaid(export: &GraphExport) -> String {
    let mut out = String::new();
    let mut ids: HashMap<&str, String> = HashMap::new();

    writeln!(out, "flowchart LR").unwrap();

    for (i, node) in export.nodes.iter().enumerate() {
        let id = format!("n{}", i);
        writeln!(out, "  {}", shaped(&id, &escape_mermaid_label(&node.name), node.kind)).unwrap();
        ids.insert(node.id.as_str(), id);
    }

    for link in &export.links {
        if let (Some(source), Some(target)) =
            (ids.get(link.source.as_str()), ids.get(link.target.as_str()))
        {
            writeln!(out, "  {} --> {}", source, target).unwrap();
        }
    }

    out
}
