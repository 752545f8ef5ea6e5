/// Integration test suite: runs the compiled `import-trace` binary against small Python
/// project trees written to temp directories.
///
/// The `CARGO_BIN_EXE_import-trace` environment variable is set by Cargo during
/// `cargo test` to point to the compiled binary for the current profile.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_import-trace"))
}

/// Write `files` (path, contents) under a fresh temp dir.
fn project(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (path, contents) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, contents).unwrap();
    }
    dir
}

/// Run import-trace from inside `cwd` and assert it exits successfully.
/// Returns stdout as a String.
fn run_success(cwd: &Path, args: &[&str]) -> String {
    let out = Command::new(binary())
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to invoke import-trace binary");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(
        out.status.success(),
        "command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
        args,
        out.status,
        stdout,
        stderr
    );
    stdout
}

/// Run import-trace and assert it exits with a non-zero status.
/// Returns (stdout, stderr) as Strings.
fn run_failure(cwd: &Path, args: &[&str]) -> (String, String) {
    let out = Command::new(binary())
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("failed to invoke import-trace binary");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(
        !out.status.success(),
        "command {:?} expected to fail but exited successfully\nstdout: {}\nstderr: {}",
        args,
        stdout,
        stderr
    );
    (stdout, stderr)
}

fn trace_json(cwd: &Path, args: &[&str]) -> Value {
    let stdout = run_success(cwd, args);
    serde_json::from_str(&stdout).expect("trace output is not valid JSON")
}

fn node<'a>(graph: &'a Value, id: &str) -> Option<&'a Value> {
    graph["nodes"].as_array().unwrap().iter().find(|n| n["id"] == id)
}

fn has_link(graph: &Value, source: &str, target: &str) -> bool {
    graph["links"]
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["source"] == source && l["target"] == target)
}

fn link_count(graph: &Value) -> usize {
    graph["links"].as_array().unwrap().len()
}

// ---------------------------------------------------------------------------
// trace
// ---------------------------------------------------------------------------

/// A small application exercising packages, third-party imports and a cycle.
fn sample_app() -> tempfile::TempDir {
    project(&[
        ("main.py", "import numpy\nfrom app.models import User\nimport helpers\n"),
        ("helpers.py", "import os\nimport main\n"),
        ("app/__init__.py", ""),
        ("app/models.py", "from app.db import session\nimport requests\n"),
        ("app/db.py", "import sqlalchemy\n"),
    ])
}

#[test]
fn test_trace_json_shape() {
    let dir = sample_app();
    let graph = trace_json(dir.path(), &["trace", "main.py"]);

    assert_eq!(node(&graph, "main.py").unwrap()["type"], "root");
    assert_eq!(node(&graph, "app/models.py").unwrap()["type"], "local");
    assert_eq!(node(&graph, "numpy").unwrap()["type"], "third_party");
    assert_eq!(node(&graph, "numpy").unwrap()["name"], "numpy");

    // Every link endpoint is a node id.
    for link in graph["links"].as_array().unwrap() {
        assert!(node(&graph, link["source"].as_str().unwrap()).is_some());
        assert!(node(&graph, link["target"].as_str().unwrap()).is_some());
    }
}

#[test]
fn test_trace_edges() {
    let dir = sample_app();
    let graph = trace_json(dir.path(), &["trace", "main.py"]);

    assert!(has_link(&graph, "main.py", "numpy"));
    assert!(has_link(&graph, "main.py", "app/__init__.py"));
    assert!(has_link(&graph, "main.py", "app/models.py"));
    assert!(has_link(&graph, "main.py", "helpers.py"));
    assert!(has_link(&graph, "helpers.py", "os"));
    assert!(has_link(&graph, "helpers.py", "main.py"));
    assert!(has_link(&graph, "app/models.py", "app/db.py"));
    assert!(has_link(&graph, "app/models.py", "requests"));
    assert!(has_link(&graph, "app/db.py", "sqlalchemy"));
    assert!(
        !has_link(&graph, "app/models.py", "app/__init__.py"),
        "a module must not link to its own package entry point"
    );
    assert_eq!(link_count(&graph), 9);
}

#[test]
fn test_trace_is_deterministic() {
    let dir = sample_app();
    let first = run_success(dir.path(), &["trace", "main.py"]);
    let second = run_success(dir.path(), &["trace", "main.py"]);
    assert_eq!(first, second);
}

#[test]
fn test_trace_with_explicit_root() {
    let dir = sample_app();
    let root = dir.path().to_str().unwrap();
    let start = dir.path().join("app/models.py");
    let graph = trace_json(
        Path::new("/"),
        &["trace", start.to_str().unwrap(), "--root", root],
    );

    assert_eq!(node(&graph, "app/models.py").unwrap()["type"], "root");
    assert!(has_link(&graph, "app/models.py", "app/db.py"));
}

#[test]
fn test_skip_third_party() {
    let dir = sample_app();
    let graph = trace_json(dir.path(), &["trace", "main.py", "--skip-third-party"]);

    let nodes = graph["nodes"].as_array().unwrap();
    assert!(nodes.iter().all(|n| n["type"] != "third_party"));
    assert!(has_link(&graph, "main.py", "app/models.py"));
}

#[test]
fn test_skip_conditional() {
    let dir = project(&[
        ("main.py", "import a\nif FAST:\n    import b\n"),
        ("a.py", ""),
        ("b.py", ""),
    ]);
    let all = trace_json(dir.path(), &["trace", "main.py"]);
    assert!(has_link(&all, "main.py", "b.py"));

    let unconditional = trace_json(dir.path(), &["trace", "main.py", "--skip-conditional"]);
    assert!(has_link(&unconditional, "main.py", "a.py"));
    assert!(!has_link(&unconditional, "main.py", "b.py"));
}

#[test]
fn test_config_file_applies() {
    let dir = project(&[
        ("main.py", "import numpy\nimport a\n"),
        ("a.py", "import b\n"),
        ("b.py", ""),
        ("import-trace.toml", "include_third_party = false\nexclude = [\"a.py\"]\n"),
    ]);
    let graph = trace_json(dir.path(), &["trace", "main.py"]);

    assert!(node(&graph, "numpy").is_none());
    assert!(has_link(&graph, "main.py", "a.py"));
    assert!(!has_link(&graph, "a.py", "b.py"), "excluded files are not parsed");
}

#[test]
fn test_trace_writes_output_file() {
    let dir = sample_app();
    let out = dir.path().join("graph.html");
    run_success(
        dir.path(),
        &["trace", "main.py", "--format", "html", "-o", out.to_str().unwrap()],
    );
    let page = fs::read_to_string(&out).unwrap();
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains(r#""id":"main.py""#));
}

#[test]
fn test_trace_dot_and_mermaid() {
    let dir = sample_app();
    let dot = run_success(dir.path(), &["trace", "main.py", "--format", "dot"]);
    assert!(dot.starts_with("digraph imports {"));
    assert!(dot.contains("main_py -> numpy;"));

    let mermaid = run_success(dir.path(), &["trace", "main.py", "--format", "mermaid"]);
    assert!(mermaid.starts_with("flowchart LR"));
    assert!(mermaid.contains("-->"));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_parse_error_is_fatal() {
    let dir = project(&[("main.py", "import broken\n"), ("broken.py", "def f(:\n")]);
    let (stdout, stderr) = run_failure(dir.path(), &["trace", "main.py"]);
    assert!(stdout.is_empty(), "no partial graph may be printed: {}", stdout);
    assert!(stderr.contains("syntax error"), "stderr: {}", stderr);
    assert!(stderr.contains("broken.py"), "stderr: {}", stderr);
}

#[test]
fn test_missing_start_file() {
    let dir = project(&[]);
    let (_, stderr) = run_failure(dir.path(), &["trace", "nope.py"]);
    assert!(stderr.contains("nope.py"), "stderr: {}", stderr);
}

// ---------------------------------------------------------------------------
// circular / stats
// ---------------------------------------------------------------------------

#[test]
fn test_circular_detects_cycle() {
    let dir = project(&[("a.py", "import b\n"), ("b.py", "import a\n")]);
    let stdout = run_success(dir.path(), &["circular", "a.py"]);
    assert!(stdout.contains("cycle a.py -> b.py -> a.py"), "stdout: {}", stdout);

    let json: Value = serde_json::from_str(&run_success(dir.path(), &["circular", "a.py", "--json"]))
        .expect("circular --json output is not valid JSON");
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[test]
fn test_circular_none() {
    let dir = project(&[("a.py", "import b\n"), ("b.py", "")]);
    let stdout = run_success(dir.path(), &["circular", "a.py"]);
    assert!(stdout.contains("No circular imports found."));
}

#[test]
fn test_stats_json() {
    let dir = sample_app();
    let stdout = run_success(dir.path(), &["stats", "main.py", "--json"]);
    let json: Value = serde_json::from_str(&stdout).expect("stats --json output is not valid JSON");

    assert_eq!(json["root"], "main.py");
    assert_eq!(json["third_party_packages"], 4);
    assert_eq!(json["circular_imports"], 1);
    assert_eq!(json["resolve"]["files_parsed"], 5);
}

#[test]
fn test_stats_human() {
    let dir = sample_app();
    let stdout = run_success(dir.path(), &["stats", "main.py"]);
    assert!(stdout.starts_with("Traced main.py"));
    assert!(stdout.contains("packages: numpy, os, requests, sqlalchemy"));
}
