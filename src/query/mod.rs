pub mod circular;
pub mod stats;

pub use circular::{CircularImport, find_circular};
pub use stats::{TraceSummary, trace_summary};
