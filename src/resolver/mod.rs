pub mod module_path;

pub use module_path::{ProjectFs, anchor_relative, is_within, location_of};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::TraceError;
use crate::graph::ImportGraph;
use crate::graph::node::Node;
use crate::parser::{self, ImportForm, ImportSpecifier};

/// Switches that narrow what a trace records.
///
/// The default records everything: conditional imports and third-party packages included,
/// nothing excluded.
#[derive(Debug, Clone)]
pub struct TraceOptions {
    /// Follow imports nested under `if` / `try` / `match` statements.
    pub include_conditional: bool,
    /// Record third-party packages as external leaves.
    pub include_third_party: bool,
    /// Local files whose location matches one of these patterns are recorded but not parsed.
    pub exclude: Vec<glob::Pattern>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            include_conditional: true,
            include_third_party: true,
            exclude: Vec::new(),
        }
    }
}

/// Counters collected during one trace.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Local files read and parsed (each at most once).
    pub files_parsed: usize,
    /// Import specifiers extracted across all parsed files.
    pub specifiers: usize,
    /// Edges recorded towards third-party packages (duplicates included).
    pub external_imports: usize,
    /// Candidate local files that do not exist on disk and were kept as leaves.
    pub missing_leaves: usize,
    /// Conditional specifiers dropped because conditional imports were disabled.
    pub skipped_conditional: usize,
    /// Third-party specifiers dropped because third-party packages were disabled.
    pub skipped_third_party: usize,
    /// Relative specifiers that climb above the project root.
    pub unanchored_relative: usize,
    /// Local files matched by an exclude pattern and therefore not parsed.
    pub excluded_files: usize,
}

/// Builds the import graph of a Python file by walking its imports depth-first.
#[derive(Debug, Clone)]
pub struct Resolver {
    project: ProjectFs,
    options: TraceOptions,
}

/// Mutable state of a single trace.
struct Walk {
    graph: ImportGraph,
    stats: ResolveStats,
    root: Node,
    /// Locations already scheduled for parsing. Guards cycles and repeat parses.
    visited: HashSet<String>,
    stack: Vec<Node>,
}

impl Walk {
    fn new(root: Node) -> Self {
        let mut walk = Self {
            graph: ImportGraph::new(),
            stats: ResolveStats::default(),
            visited: HashSet::new(),
            stack: Vec::new(),
            root: root.clone(),
        };
        walk.visited.insert(root.location.clone());
        walk.stack.push(root);
        walk
    }

    /// A project-file node for `location`. The start file keeps its root identity.
    fn file_node(&self, location: String) -> Node {
        if location == self.root.location {
            self.root.clone()
        } else {
            Node::local(location)
        }
    }

    /// Record `parent -> child` unless it would be a self-loop.
    fn link(&mut self, parent: &Node, child: &Node) {
        if parent.location == child.location {
            return;
        }
        if self.graph.add_edge(parent.clone(), child.clone()) {
            debug!(parent = %parent.location, child = %child.location, kind = child.kind.as_str(), "import edge");
        }
    }
}

impl Resolver {
    /// Create a resolver for the project rooted at `project_root`.
    ///
    /// Top-level import names are classified as local or third-party relative to this root.
    pub fn new(project_root: impl Into<PathBuf>, options: TraceOptions) -> Self {
        Self {
            project: ProjectFs::new(project_root),
            options,
        }
    }

    pub fn project_root(&self) -> &Path {
        self.project.root()
    }

    pub fn options(&self) -> &TraceOptions {
        &self.options
    }

    /// Trace every file transitively imported by `start`.
    ///
    /// `start` may be absolute or relative to the project root.
    ///
    /// # Errors
    /// - [`TraceError::MissingStart`] if `start` is not a file
    /// - [`TraceError::Parse`] if any reached local file is not valid Python
    /// - [`TraceError::Io`] if an existing file cannot be read
    pub fn resolve(&self, start: &Path) -> Result<ImportGraph, TraceError> {
        self.resolve_with_stats(start).map(|(graph, _)| graph)
    }

    /// Same as [`Resolver::resolve`], also returning walk counters.
    pub fn resolve_with_stats(&self, start: &Path) -> Result<(ImportGraph, ResolveStats), TraceError> {
        let start_path = self.project.root().join(start);
        if !start_path.is_file() {
            return Err(TraceError::MissingStart(start.to_path_buf()));
        }

        let root = Node::root(location_of(&start_path, self.project.root()));
        debug!(root = %root.location, project = %self.project.root().display(), "starting trace");

        let mut walk = Walk::new(root);

        while let Some(current) = walk.stack.pop() {
            let path = self.project.path_of(&current.location);
            if !path.is_file() {
                // Speculative candidate (typically `from module import name` probing
                // `module/name`). It simply has no imports of its own.
                debug!(location = %current.location, "candidate does not exist, leaf");
                walk.stats.missing_leaves += 1;
                continue;
            }

            let specifiers = parser::extract_imports(&path)?;
            walk.stats.files_parsed += 1;
            walk.stats.specifiers += specifiers.len();

            for spec in &specifiers {
                self.resolve_specifier(&mut walk, &current, spec);
            }
        }

        debug!(
            nodes = walk.graph.node_count(),
            edges = walk.graph.edge_count(),
            files = walk.stats.files_parsed,
            "trace complete"
        );
        Ok((walk.graph, walk.stats))
    }

    /// Schedule `node` for parsing unless it was already scheduled or is excluded.
    fn enqueue(&self, walk: &mut Walk, node: Node) {
        if !walk.visited.insert(node.location.clone()) {
            return;
        }
        if self.is_excluded(&node.location) {
            debug!(location = %node.location, "excluded, not traversed");
            walk.stats.excluded_files += 1;
            return;
        }
        walk.stack.push(node);
    }

    fn is_excluded(&self, location: &str) -> bool {
        self.options.exclude.iter().any(|p| p.matches(location))
    }

    /// Resolve one specifier of `current`, recording edges and scheduling new local files.
    fn resolve_specifier(&self, walk: &mut Walk, current: &Node, spec: &ImportSpecifier) {
        if spec.conditional && !self.options.include_conditional {
            walk.stats.skipped_conditional += 1;
            return;
        }

        let segments: Vec<String> = if spec.is_relative() {
            match anchor_relative(spec, &current.location) {
                Some(segments) => segments,
                None => {
                    warn!(file = %current.location, line = spec.line, import = %spec, "relative import reaches above the project root, skipped");
                    walk.stats.unanchored_relative += 1;
                    return;
                }
            }
        } else {
            spec.segments().map(str::to_owned).collect()
        };

        let Some(top) = segments.first() else {
            return;
        };
        if top == "*" {
            // `from . import *` in a root-level file names no module.
            debug!(file = %current.location, line = spec.line, "wildcard import without a module, skipped");
            return;
        }

        // Third-party: the top-level name is neither a directory nor a module at the root.
        if !spec.is_relative() && !self.project.is_project_name(top) {
            if !self.options.include_third_party {
                walk.stats.skipped_third_party += 1;
                return;
            }
            walk.stats.external_imports += 1;
            walk.link(current, &Node::external(top.as_str()));
            return;
        }

        let module_len = self.module_len(&segments, spec.form);

        // Package markers for every enclosing package of the module.
        for i in 1..module_len {
            let base = segments[..i].join("/");
            if is_within(&current.location, &base) {
                // The importer already lives in this package.
                continue;
            }
            let marker = format!("{}/__init__.py", base);
            if self.project.is_file(&marker) {
                let node = walk.file_node(marker);
                walk.link(current, &node);
                self.enqueue(walk, node);
            }
        }

        let target = walk.file_node(self.project.module_file(&segments[..module_len]));
        walk.link(current, &target);
        self.enqueue(walk, target);
    }

    /// How many leading segments name the module to link to.
    ///
    /// For `from a.b import c`, `c` is a member of `a.b` unless `a/b/c` is itself a module
    /// or package.
    fn module_len(&self, segments: &[String], form: ImportForm) -> usize {
        match form {
            ImportForm::Plain => segments.len(),
            ImportForm::From if segments.len() < 2 => segments.len(),
            ImportForm::From => {
                if self.project.module_exists(segments) {
                    segments.len()
                } else {
                    segments.len() - 1
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
