//! Integration tests for the `gantt` CLI.
//!
//! Each test runs `gantt` as a subprocess against the fixture schedule with
//! an isolated config and state directory, and checks stdout and exit status.

use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `gantt` binary.
fn gantt_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("gantt");
    path
}

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/gantt.json")
}

/// Run `gantt --file <fixture> ARGS` with XDG dirs pointing into `home`.
fn run_gantt(home: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(gantt_bin())
        .arg("--file")
        .arg(fixture())
        .args(args)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_STATE_HOME", home.join("state"))
        .env_remove("GANTT_LOG")
        .output()
        .expect("failed to run gantt");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `gantt` expecting success, return stdout.
fn run_gantt_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_gantt(home, args);
    if !success {
        panic!(
            "gantt {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn listed_ids(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn test_list_flattens_and_drops_undated() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_gantt_ok(tmp.path(), &["list"]);
    assert_eq!(listed_ids(&out), vec!["P1", "P1-C1", "P1-C3", "42"]);
    // P3 is undated, so its dated child is dropped along with it
    assert!(!out.contains("P3-C1"));
    // Ordinal keeps the original position; dates of P1-C3 are swapped
    assert!(out.contains("P1-C3 S3"));
    assert!(out.contains("2024-01-06 2024-01-09"));
    assert!(out.contains("[Reopened]"));
}

#[test]
fn test_list_search_matches_owning_project() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_gantt_ok(tmp.path(), &["list", "--search", "p1"]);
    assert_eq!(listed_ids(&out), vec!["P1", "P1-C1", "P1-C3"]);

    let out = run_gantt_ok(tmp.path(), &["list", "--search", "p1-c1"]);
    assert_eq!(listed_ids(&out), vec!["P1-C1"]);
}

#[test]
fn test_list_date_bounds() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_gantt_ok(tmp.path(), &["list", "--from", "2024-01-06", "--to", "2024-04-01"]);
    assert_eq!(listed_ids(&out), vec!["P1", "P1-C3"]);
}

#[test]
fn test_list_invalid_date_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_gantt(tmp.path(), &["list", "--from", "01/06/2024"]);
    assert!(!success);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_list_nothing_matches() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_gantt_ok(tmp.path(), &["list", "--search", "zzz"]);
    assert_eq!(out.trim(), "No valid tasks to display...");
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_gantt_ok(tmp.path(), &["list", "--json", "--search", "p1-c1"]);
    let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "P1-C1");
    assert_eq!(rows[0]["kind"], "child-task");
    assert_eq!(rows[0]["project"], "P1");
    assert_eq!(rows[0]["ordinal"], 1);
    assert_eq!(rows[0]["colors"]["progress"], "#188918");
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn test_show_project() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_gantt_ok(tmp.path(), &["show", "P1"]);
    assert!(out.starts_with("P1 Water Plant"));
    assert!(out.contains("Very Urgent"));
    assert!(out.contains("Receivable Details"));
    assert!(out.contains("$1500"));
    assert!(out.contains("$750"));
    assert!(out.contains("Ready to be Invoiced"));
}

#[test]
fn test_show_subproject_inherits_from_parent() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_gantt_ok(tmp.path(), &["show", "P1-C1", "--json"]);
    let detail: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(detail["parent_name"], "Water Plant");
    assert_eq!(detail["team"], "Team A");
    assert_eq!(detail["manager"], "Alice Smith");
    assert_eq!(detail["status_label"], "In Progress");
}

#[test]
fn test_show_child_of_undated_project() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_gantt_ok(tmp.path(), &["show", "P3-C1"]);
    assert!(out.contains("Parent Project:  Undated Parent"));
}

#[test]
fn test_show_missing_id_exits_1() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (stdout, stderr, success) = run_gantt(tmp.path(), &["show", "NOPE"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error: record not found: NOPE"));
}

// ---------------------------------------------------------------------------
// config and sources
// ---------------------------------------------------------------------------

#[test]
fn test_finance_can_be_disabled_in_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = tmp.path().join("custom.toml");
    std::fs::write(&config, "[features]\nfinance = false\n").unwrap();
    let out = run_gantt_ok(
        tmp.path(),
        &["show", "P1", "--config", config.to_str().unwrap()],
    );
    assert!(!out.contains("Receivable Details"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_gantt(tmp.path(), &["list", "--config", "/nonexistent/gantt.toml"]);
    assert!(!success);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_unreadable_file_source_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = Command::new(gantt_bin())
        .args(["list", "--file", "/nonexistent/data.json"])
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env("XDG_STATE_HOME", tmp.path().join("state"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not read /nonexistent/data.json"));
}
