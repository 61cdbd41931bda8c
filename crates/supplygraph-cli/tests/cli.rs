use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Node IDs follow ingestion order: package name 1, package version 2,
// source 3, then links from 4.
const GRAPH: &str = r#"{
    "packages": [
        {"type": "golang", "namespace": "github.com/guacsec", "name": "guac", "version": "v0.1.0"}
    ],
    "sources": [
        {"type": "git", "namespace": "github.com/guacsec", "name": "guac", "tag": "v0.1.0"}
    ],
    "hasSourceAt": [
        {
            "package": {"type": "golang", "namespace": "github.com/guacsec", "name": "guac", "version": "v0.1.0"},
            "source": {"type": "git", "namespace": "github.com/guacsec", "name": "guac", "tag": "v0.1.0"},
            "knownSince": "2023-05-01T12:00:00Z",
            "justification": "built from tag v1",
            "origin": "o1",
            "collector": "c1"
        },
        {
            "package": {"type": "golang", "namespace": "github.com/guacsec", "name": "guac", "version": "v0.1.0"},
            "source": {"type": "git", "namespace": "github.com/guacsec", "name": "guac", "tag": "v0.1.0"},
            "knownSince": "2023-05-01T14:00:00+02:00",
            "justification": "built from tag v1",
            "origin": "o1",
            "collector": "c1"
        },
        {
            "package": {"type": "golang", "namespace": "github.com/guacsec", "name": "guac"},
            "matchFlags": {"pkg": "ALL_VERSIONS"},
            "source": {"type": "git", "namespace": "github.com/guacsec", "name": "guac", "tag": "v0.1.0"},
            "knownSince": "2023-06-01T00:00:00Z",
            "justification": "repository url",
            "origin": "o2",
            "collector": "c1"
        }
    ]
}"#;

struct Fixture {
    dir: TempDir,
    graph: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let graph = dir.path().join("graph.json");
        std::fs::write(&graph, GRAPH).unwrap();
        Self { dir, graph }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("supplygraph").unwrap();
        cmd.env_remove("RUST_LOG").arg("--config").arg(self.config());
        cmd
    }
}

fn json_ids(stdout: &[u8]) -> Vec<String> {
    let links: Vec<serde_json::Value> = serde_json::from_slice(stdout).unwrap();
    links
        .iter()
        .map(|l| l["id"].as_str().unwrap().to_string())
        .collect()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_ingest_dedupes_identical_links() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["--format", "json", "ingest", path_arg(&fx.graph)])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_ids(&output.stdout), vec!["4", "4", "5"]);
}

#[test]
fn test_ingest_text_summary() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["ingest", path_arg(&fx.graph)])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Ingested 1 packages, 1 sources and 3 hasSourceAt links (2 stored)",
        ))
        .stdout(predicate::str::contains(
            "pkg:golang/github.com/guacsec/guac@v0.1.0 -> git+github.com/guacsec/guac@v0.1.0",
        ));
}

#[test]
fn test_query_by_justification() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["-f", "json", "query", path_arg(&fx.graph), "--justification", "built from tag v1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_ids(&output.stdout), vec!["4"]);
}

#[test]
fn test_query_scan_order_and_nested_filter() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["-f", "json", "query", path_arg(&fx.graph)])
        .output()
        .unwrap();
    assert_eq!(json_ids(&output.stdout), vec!["4", "5"]);

    // The name-level link has no version, so a version filter drops it
    let output = fx
        .cmd()
        .args(["-f", "json", "query", path_arg(&fx.graph), "--package-version", "v0.1.0"])
        .output()
        .unwrap();
    assert_eq!(json_ids(&output.stdout), vec!["4"]);
}

#[test]
fn test_query_by_id() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["-f", "json", "query", path_arg(&fx.graph), "--id", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_ids(&output.stdout), vec!["5"]);
}

#[test]
fn test_query_by_id_strict_errors() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["query", path_arg(&fx.graph), "--id", "999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ID does not match existing node"));

    fx.cmd()
        .args(["query", path_arg(&fx.graph), "--id", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected hasSourceAt"));

    fx.cmd()
        .args(["query", path_arg(&fx.graph), "--id", "four"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid node ID"));

    fx.cmd()
        .args(["query", path_arg(&fx.graph), "--id", "5", "--package-version", "v0.1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to retrieve package"));
}

#[test]
fn test_query_text_no_results() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["query", path_arg(&fx.graph), "--origin", "nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hasSourceAt links found"));
}

#[test]
fn test_config_init_and_show() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));
    assert!(fx.config().exists());

    fx.cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fx.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("format = text"));
}

#[test]
fn test_config_format_is_default() {
    let fx = Fixture::new();
    std::fs::write(fx.config(), "format = \"json\"\n").unwrap();

    let output = fx
        .cmd()
        .args(["query", path_arg(&fx.graph), "--collector", "c1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_ids(&output.stdout), vec!["4", "5"]);
}

#[test]
fn test_missing_graph_file() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["ingest", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_completions_bash() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("supplygraph"));
}

#[test]
fn test_completions_unknown_shell() {
    let fx = Fixture::new();
    fx.cmd().args(["completions", "tcsh"]).assert().failure();
}
