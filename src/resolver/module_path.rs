use std::path::{Component, Path, PathBuf};

use crate::parser::ImportSpecifier;

/// Convert a file path into a graph location: `/`-separated and relative to `root` when the
/// file lies under it. Files outside the root keep their full path. `..` components are
/// resolved lexically.
pub fn location_of(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    if relative.is_absolute() {
        return relative.to_string_lossy().into_owned();
    }
    let mut segments: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(s) => segments.push(s.to_string_lossy().into_owned()),
            Component::ParentDir => {
                segments.pop();
            }
            _ => {}
        }
    }
    segments.join("/")
}

/// Whether `location` is `base` itself or lies underneath it, compared by whole segments
/// (`pkg/a.py` is within `pkg`, `pkgx/a.py` is not).
pub fn is_within(location: &str, base: &str) -> bool {
    match location.strip_prefix(base) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// Turn a relative import into absolute module segments, anchored at the importing file.
///
/// `level = 1` stays in the file's own directory, each further level climbs one package.
/// Returns `None` when the climb would leave the project root or the importing file has
/// no root-relative location.
pub fn anchor_relative(spec: &ImportSpecifier, current_location: &str) -> Option<Vec<String>> {
    if Path::new(current_location).is_absolute() {
        return None;
    }

    let mut segments: Vec<String> = current_location.split('/').map(str::to_owned).collect();
    // Drop the file name, leaving the containing package.
    segments.pop();

    for _ in 1..spec.level {
        segments.pop()?;
    }

    segments.extend(spec.segments().map(str::to_owned));
    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

/// Filesystem probes relative to the project root.
#[derive(Debug, Clone)]
pub struct ProjectFs {
    root: PathBuf,
}

impl ProjectFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a graph location.
    pub fn path_of(&self, location: &str) -> PathBuf {
        self.root.join(location)
    }

    pub fn is_file(&self, location: &str) -> bool {
        self.path_of(location).is_file()
    }

    pub fn is_dir(&self, location: &str) -> bool {
        self.path_of(location).is_dir()
    }

    /// A top-level name is part of the project when it is a directory or a module file at
    /// the root.
    pub fn is_project_name(&self, top: &str) -> bool {
        self.is_dir(top) || self.is_file(&format!("{}.py", top))
    }

    /// Whether `segments` name an existing module or package.
    pub fn module_exists(&self, segments: &[String]) -> bool {
        let base = segments.join("/");
        self.is_file(&format!("{}.py", base)) || self.is_file(&format!("{}/__init__.py", base))
    }

    /// The file a module path maps to: `a/b.py`, else `a/b/__init__.py`, else the
    /// (possibly nonexistent) `a/b.py`.
    pub fn module_file(&self, segments: &[String]) -> String {
        let base = segments.join("/");
        let file = format!("{}.py", base);
        if self.is_file(&file) {
            return file;
        }
        let init = format!("{}/__init__.py", base);
        if self.is_file(&init) {
            return init;
        }
        file
    }
}
