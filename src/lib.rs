//! Static import tracing for Python projects.
//!
//! Starting from one file, [`resolver::Resolver`] parses its imports with tree-sitter, maps
//! each dotted specifier onto a project file or a third-party package, and follows every
//! newly reached project file once. The result is an [`graph::ImportGraph`] that the
//! [`export`] module renders as JSON, DOT, Mermaid or a standalone HTML page.

pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod output;
pub mod parser;
pub mod query;
pub mod resolver;
#[cfg(feature = "web")]
pub mod web;

pub use error::{ParseError, TraceError};
pub use graph::ImportGraph;
pub use resolver::{ResolveStats, Resolver, TraceOptions};
