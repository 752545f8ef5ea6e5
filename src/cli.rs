use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use py_import_trace::export::model::ExportFormat;

/// Trace the imports of a Python file.
///
/// import-trace follows every import of a starting file through the project, classifying
/// each dependency as a local file or a third-party package, and emits the resulting graph.
#[derive(Parser, Debug)]
#[command(
    name = "import-trace",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every command that runs a trace.
#[derive(Args, Debug, Clone)]
pub struct TraceArgs {
    /// Python file to start tracing from.
    pub file: PathBuf,

    /// Project root that top-level import names are resolved against (default: current directory).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Ignore imports nested under if / try / match statements.
    #[arg(long)]
    pub skip_conditional: bool,

    /// Leave third-party packages out of the graph.
    #[arg(long)]
    pub skip_third_party: bool,

    /// Log each resolved edge and skipped import to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trace a file and write the import graph.
    Trace {
        #[command(flatten)]
        args: TraceArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect circular imports among the files reached from a starting file.
    Circular {
        #[command(flatten)]
        args: TraceArgs,

        /// Output results as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,
    },

    /// Summary statistics of a trace: node, edge, file and package counts.
    Stats {
        #[command(flatten)]
        args: TraceArgs,

        /// Output results as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,
    },

    /// Serve the graph as an interactive page over HTTP.
    #[cfg(feature = "web")]
    Serve {
        #[command(flatten)]
        args: TraceArgs,

        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind.
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

impl Commands {
    pub fn trace_args(&self) -> &TraceArgs {
        match self {
            Commands::Trace { args, .. }
            | Commands::Circular { args, .. }
            | Commands::Stats { args, .. } => args,
            #[cfg(feature = "web")]
            Commands::Serve { args, .. } => args,
        }
    }
}
