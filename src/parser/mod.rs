pub mod imports;

use std::cell::RefCell;
use std::path::Path;

use tree_sitter::{Node, Parser, Point, Tree};

use crate::error::{ParseError, TraceError};

pub use imports::{ImportForm, ImportSpecifier};

// One Parser per thread, initialised lazily with the Python grammar.
thread_local! {
    static PARSER_PY: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_python::LANGUAGE.into()).unwrap();
        p
    });
}

/// Read a Python file and extract its import specifiers in document order.
///
/// The file is only parsed, never executed.
///
/// # Errors
/// - [`TraceError::Io`] if the file cannot be read
/// - [`TraceError::Parse`] if the file is not syntactically valid Python
pub fn extract_imports(path: &Path) -> Result<Vec<ImportSpecifier>, TraceError> {
    let source = std::fs::read(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_imports_from_source(path, &source)?)
}

/// Extract import specifiers from in-memory Python source.
///
/// `path` is only used to label a [`ParseError`].
pub fn extract_imports_from_source(
    path: &Path,
    source: &[u8],
) -> Result<Vec<ImportSpecifier>, ParseError> {
    let tree = parse_python(path, source)?;
    Ok(imports::extract_specifiers(&tree, source))
}

/// Parse `source` into a syntax tree, rejecting trees that contain error or missing nodes.
///
/// tree-sitter recovers from syntax errors instead of failing, so validity is decided by
/// inspecting the tree afterwards.
fn parse_python(path: &Path, source: &[u8]) -> Result<Tree, ParseError> {
    let tree = PARSER_PY.with(|p| p.borrow_mut().parse(source, None));

    let Some(tree) = tree else {
        return Err(ParseError {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
        });
    };

    if let Some(point) = first_error_position(tree.root_node()) {
        return Err(ParseError {
            path: path.to_path_buf(),
            line: point.row + 1,
            column: point.column + 1,
        });
    }

    Ok(tree)
}

/// Python 2 statement forms the grammar still accepts but Python 3 rejects.
const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Locate the first ERROR or MISSING node, or Python 2 only statement, in document order.
fn first_error_position(root: Node) -> Option<Point> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() || PYTHON2_STATEMENTS.contains(&node.kind()) {
            return Some(node.start_position());
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
