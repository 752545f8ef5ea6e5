use std::path::PathBuf;

/// A source file that tree-sitter could not parse cleanly.
///
/// `line` and `column` are 1-based and point at the first error or missing node in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error in {}:{}:{}", .path.display(), .line, .column)]
pub struct ParseError {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
}

/// Fatal failures of a trace. Any of these aborts the walk and no graph is produced.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// A reachable local file is not valid Python.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A file that exists on disk could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file the trace was asked to start from does not exist.
    #[error("start file {} does not exist", .0.display())]
    MissingStart(PathBuf),
}
