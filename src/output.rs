use std::fmt::Write;

use crate::query::{CircularImport, TraceSummary};

/// Format a trace summary.
///
/// - `json = true`: a pretty-printed JSON object.
/// - `json = false`: a cargo-style human-readable summary.
pub fn format_summary(summary: &TraceSummary, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(summary)?);
    }

    let stats = &summary.resolve;
    let mut out = String::new();
    writeln!(out, "Traced {}", summary.root)?;
    writeln!(
        out,
        "  {} nodes, {} edges",
        summary.node_count, summary.edge_count
    )?;
    writeln!(
        out,
        "  {} local files ({} parsed, {} missing), {} third-party packages",
        summary.local_files, stats.files_parsed, stats.missing_leaves, summary.third_party_packages
    )?;
    if !summary.packages.is_empty() {
        writeln!(out, "  packages: {}", summary.packages.join(", "))?;
    }
    writeln!(out, "  {} circular imports", summary.circular_imports)?;

    let skipped = stats.skipped_conditional + stats.skipped_third_party + stats.unanchored_relative;
    if skipped > 0 || stats.excluded_files > 0 {
        writeln!(
            out,
            "  skipped: {} conditional, {} third-party, {} relative above root; {} excluded files",
            stats.skipped_conditional,
            stats.skipped_third_party,
            stats.unanchored_relative,
            stats.excluded_files
        )?;
    }
    Ok(out)
}

/// Format detected cycles, one `a -> b -> a` chain per line, or as a JSON array.
pub fn format_cycles(cycles: &[CircularImport], json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(cycles)?);
    }
    if cycles.is_empty() {
        return Ok("No circular imports found.\n".to_owned());
    }

    let mut out = String::new();
    for cycle in cycles {
        writeln!(out, "cycle {}", cycle.files.join(" -> "))?;
    }
    writeln!(out, "{} circular import(s)", cycles.len())?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolveStats;

    fn summary() -> TraceSummary {
        TraceSummary {
            root: "main.py".into(),
            node_count: 3,
            edge_count: 2,
            local_files: 1,
            third_party_packages: 1,
            packages: vec!["numpy".into()],
            circular_imports: 0,
            resolve: ResolveStats {
                files_parsed: 2,
                ..ResolveStats::default()
            },
        }
    }

    #[test]
    fn test_human_summary() {
        let text = format_summary(&summary(), false).unwrap();
        assert!(text.starts_with("Traced main.py\n"));
        assert!(text.contains("3 nodes, 2 edges"));
        assert!(text.contains("packages: numpy"));
        assert!(!text.contains("skipped"));
    }

    #[test]
    fn test_json_summary() {
        let text = format_summary(&summary(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["node_count"], 3);
        assert_eq!(value["resolve"]["files_parsed"], 2);
    }

    #[test]
    fn test_cycles_output() {
        let cycles = vec![CircularImport {
            files: vec!["a.py".into(), "b.py".into(), "a.py".into()],
        }];
        let text = format_cycles(&cycles, false).unwrap();
        assert!(text.contains("cycle a.py -> b.py -> a.py"));
        assert_eq!(format_cycles(&[], false).unwrap(), "No circular imports found.\n");
    }
}
