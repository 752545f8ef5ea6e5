use std::collections::HashMap;
use std::fmt::Write;

use crate::export::model::GraphExport;
use crate::graph::node::NodeKind;

/// Sanitize a string for use as a DOT node ID.
///
/// Replaces non-alphanumeric characters with `_`. Prepends `n` if the result
/// starts with a digit (DOT IDs must not start with a digit).
pub fn sanitize_dot_id(s: &str) -> String {
    let mut result: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, 'n');
    }
    if result.is_empty() {
        result = "node".to_string();
    }
    result
}

/// Fill color for a node kind.
fn kind_fillcolor(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Root => "#F1948A",
        NodeKind::Local => "#AED6F1",
        NodeKind::External => "#EAECEE",
    }
}

fn kind_shape(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Root => "doubleoctagon",
        NodeKind::Local => "box",
        NodeKind::External => "ellipse",
    }
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the exported graph as DOT.
///
/// Node IDs are sanitized locations; two locations that sanitize to the same ID get a
/// numeric suffix so they stay distinct.
pub fn render_dot(export: &GraphExport) -> String {
    let mut out = String::new();
    let mut ids: HashMap<&str, String> = HashMap::new();
    let mut taken: HashMap<String, usize> = HashMap::new();

    writeln!(out, "digraph imports {{").unwrap();
    writeln!(out, "  rankdir=LR;").unwrap();
    writeln!(out, "  node [style=filled fontname=\"Helvetica\"];").unwrap();

    for node in &export.nodes {
        let base = sanitize_dot_id(&node.id);
        let count = taken.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{}_{}", base, count)
        };
        *count += 1;

        writeln!(
            out,
            "  {} [label=\"{}\" shape={} fillcolor=\"{}\"];",
            id,
            escape_label(&node.name),
            kind_shape(node.kind),
            kind_fillcolor(node.kind)
        )
        .unwrap();
        ids.insert(node.id.as_str(), id);
    }

    for link in &export.links {
        if let (Some(source), Some(target)) =
            (ids.get(link.source.as_str()), ids.get(link.target.as_str()))
        {
            writeln!(out, "  {} -> {};", source, target).unwrap();
        }
    }

    writeln!(out, "}}").unwrap();
    out
}
