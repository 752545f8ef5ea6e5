mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, TraceArgs};
use py_import_trace::config::TraceConfig;
use py_import_trace::export::export_graph;
use py_import_trace::output::{format_cycles, format_summary};
use py_import_trace::query::{find_circular, trace_summary};
use py_import_trace::resolver::location_of;
use py_import_trace::{ImportGraph, ResolveStats, Resolver};

/// A finished trace plus the root location it started from.
struct Traced {
    root: String,
    graph: ImportGraph,
    stats: ResolveStats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.trace_args().verbose);

    match cli.command {
        Commands::Trace {
            args,
            format,
            output,
        } => {
            let traced = run_trace(&args)?;
            let result = export_graph(&traced.graph, format)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &result.content)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!(
                        "Wrote {} nodes, {} links to {}",
                        result.node_count,
                        result.edge_count,
                        path.display()
                    );
                }
                None => {
                    print!("{}", result.content);
                    if !result.content.ends_with('\n') {
                        println!();
                    }
                }
            }
        }

        Commands::Circular { args, json } => {
            let traced = run_trace(&args)?;
            let cycles = find_circular(&traced.graph);
            print!("{}", format_cycles(&cycles, json)?);
            if json {
                println!();
            }
        }

        Commands::Stats { args, json } => {
            let traced = run_trace(&args)?;
            let summary = trace_summary(&traced.root, &traced.graph, traced.stats);
            print!("{}", format_summary(&summary, json)?);
            if json {
                println!();
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { args, host, port } => {
            let traced = run_trace(&args)?;
            let export = py_import_trace::export::to_export(&traced.graph);
            let addr: std::net::SocketAddr = format!("{}:{}", host, port)
                .parse()
                .with_context(|| format!("invalid bind address {}:{}", host, port))?;

            println!("Serving import graph of {} on http://{}", traced.root, addr);
            tokio::runtime::Runtime::new()?.block_on(py_import_trace::web::serve(export, addr))?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for JSON consumers.
///
/// `--verbose` enables debug output for this crate; otherwise `RUST_LOG` is honoured,
/// defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,py_import_trace=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve paths, load `import-trace.toml`, and run the trace.
///
/// The start file is taken relative to the current directory; the project root defaults
/// to the current directory.
fn run_trace(args: &TraceArgs) -> Result<Traced> {
    let root: PathBuf = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("project root {} does not exist", root.display()))?;
    let start = args
        .file
        .canonicalize()
        .with_context(|| format!("start file {} does not exist", args.file.display()))?;

    let config = TraceConfig::load(&root);
    let options = config.trace_options(args.skip_conditional, args.skip_third_party);

    let resolver = Resolver::new(&root, options);
    let (graph, stats) = resolver
        .resolve_with_stats(&start)
        .with_context(|| format!("failed to trace {}", args.file.display()))?;

    Ok(Traced {
        root: location_of(&start, &root),
        graph,
        stats,
    })
}
