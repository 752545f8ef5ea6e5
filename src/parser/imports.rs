use std::fmt;

use tree_sitter::{Node, Tree};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Which syntactic form produced a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportForm {
    /// `import a.b.c`
    Plain,
    /// `from a.b import c`: the imported member is the last segment of the specifier.
    From,
}

/// One dotted import specifier extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    /// Dotted path without leading dots, e.g. `"pkg.sub.name"`.
    /// For `from m import n` this is `m.n`; for `from . import n` it is just `n`.
    pub path: String,
    /// Number of leading dots of a relative import (0 for absolute imports).
    pub level: usize,
    pub form: ImportForm,
    /// True when the statement sits under an `if`, `try` or `match` statement.
    pub conditional: bool,
    /// 1-based line of the import statement.
    pub line: usize,
}

impl ImportSpecifier {
    pub fn is_relative(&self) -> bool {
        self.level > 0
    }

    /// The dot-separated segments of `path`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for ImportSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.level {
            f.write_str(".")?;
        }
        f.write_str(&self.path)
    }
}

/// Statement kinds whose bodies only run on some branch.
const CONDITIONAL_KINDS: &[&str] = &["if_statement", "try_statement", "match_statement"];

// ---------------------------------------------------------------------------
// Helper utilities
// ---------------------------------------------------------------------------

fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Normalise a `dotted_name` node to `a.b.c`, dropping any whitespace or comments the
/// source may contain between segments.
fn dotted_name_text(node: Node, source: &[u8]) -> String {
    if node.kind() != "dotted_name" {
        return node_text(node, source).trim().to_owned();
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() == "identifier")
        .map(|c| node_text(c, source))
        .collect::<Vec<_>>()
        .join(".")
}

/// The imported name of a `dotted_name` or `aliased_import` node (aliases are ignored).
fn imported_name(node: Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "dotted_name" => Some(dotted_name_text(node, source)),
        "aliased_import" => node
            .child_by_field_name("name")
            .map(|name| dotted_name_text(name, source)),
        _ => None,
    }
}

fn is_conditional(node: Node) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if CONDITIONAL_KINDS.contains(&ancestor.kind()) {
            return true;
        }
        current = ancestor.parent();
    }
    false
}

fn join_member(module: &str, member: &str) -> String {
    if module.is_empty() {
        member.to_owned()
    } else {
        format!("{}.{}", module, member)
    }
}

// ---------------------------------------------------------------------------
// Import extraction
// ---------------------------------------------------------------------------

/// Walk the whole tree in document order and collect every import specifier.
///
/// Imports nested in functions, classes and branches are included.
pub fn extract_specifiers(tree: &Tree, source: &[u8]) -> Vec<ImportSpecifier> {
    let mut specifiers = Vec::new();
    let mut cursor = tree.walk();

    loop {
        let node = cursor.node();
        let descend = match node.kind() {
            "import_statement" => {
                extract_plain_import(node, source, &mut specifiers);
                false
            }
            "import_from_statement" => {
                extract_from_import(node, source, &mut specifiers);
                false
            }
            "future_import_statement" => {
                extract_future_import(node, source, &mut specifiers);
                false
            }
            _ => true,
        };

        if descend && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return specifiers;
            }
        }
    }
}

/// `import a.b, c as d` -> `a.b`, `c`
fn extract_plain_import(node: Node, source: &[u8], out: &mut Vec<ImportSpecifier>) {
    let conditional = is_conditional(node);
    let line = node.start_position().row + 1;
    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        if let Some(path) = imported_name(name_node, source) {
            out.push(ImportSpecifier {
                path,
                level: 0,
                form: ImportForm::Plain,
                conditional,
                line,
            });
        }
    }
}

/// `from m import x, y as z` -> `m.x`, `m.y`; `from ..m import *` -> `m.*` at level 2.
fn extract_from_import(node: Node, source: &[u8], out: &mut Vec<ImportSpecifier>) {
    let Some(module_node) = node.child_by_field_name("module_name") else {
        return;
    };

    let (module, level) = match module_node.kind() {
        "relative_import" => {
            let mut level = 0;
            let mut module = String::new();
            let mut cursor = module_node.walk();
            for child in module_node.named_children(&mut cursor) {
                match child.kind() {
                    "import_prefix" => {
                        level = node_text(child, source).chars().filter(|&c| c == '.').count();
                    }
                    "dotted_name" => module = dotted_name_text(child, source),
                    _ => {}
                }
            }
            (module, level)
        }
        _ => (dotted_name_text(module_node, source), 0),
    };

    let conditional = is_conditional(node);
    let line = node.start_position().row + 1;
    let mut push = |member: &str| {
        out.push(ImportSpecifier {
            path: join_member(&module, member),
            level,
            form: ImportForm::From,
            conditional,
            line,
        });
    };

    let mut cursor = node.walk();
    if node
        .named_children(&mut cursor)
        .any(|c| c.kind() == "wildcard_import")
    {
        push("*");
        return;
    }

    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        if let Some(member) = imported_name(name_node, source) {
            push(&member);
        }
    }
}

/// `from __future__ import annotations` -> `__future__.annotations`
fn extract_future_import(node: Node, source: &[u8], out: &mut Vec<ImportSpecifier>) {
    let conditional = is_conditional(node);
    let line = node.start_position().row + 1;
    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        if let Some(member) = imported_name(name_node, source) {
            out.push(ImportSpecifier {
                path: join_member("__future__", &member),
                level: 0,
                form: ImportForm::From,
                conditional,
                line,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
