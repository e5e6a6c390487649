//! Integration tests for the `subcal` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the render and
//! expand subcommands through the actual binary, including stdin input,
//! config files, output formats and the load-failure path.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn submissions_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/submissions.json")
}

fn cms_config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cms_config.json")
}

fn submissions_json() -> String {
    std::fs::read_to_string(submissions_path()).expect("submissions.json fixture must exist")
}

fn subcal() -> Command {
    Command::cargo_bin("subcal").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Render subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn render_file_to_json_grid() {
    subcal()
        .args(["render", "-i", submissions_path(), "--today", "2024-01-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"grid\""))
        .stdout(predicate::str::contains("\"label\": \"January 2024\""))
        .stdout(predicate::str::contains("10:00 AM Team Sync"))
        .stdout(predicate::str::contains("2:00 PM Budget Review"));
}

#[test]
fn render_stdin_matches_file_input() {
    let from_file = subcal()
        .args(["render", "-i", submissions_path(), "--today", "2024-01-10"])
        .output()
        .unwrap();
    let from_stdin = subcal()
        .args(["render", "--today", "2024-01-10"])
        .write_stdin(submissions_json())
        .output()
        .unwrap();

    assert!(from_stdin.status.success());
    assert_eq!(from_file.stdout, from_stdin.stdout);
}

#[test]
fn render_json_is_parseable() {
    let output = subcal()
        .args(["render", "-i", submissions_path(), "--today", "2024-01-10"])
        .output()
        .unwrap();

    let grid: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(grid["leading_padding"], 1);
    assert_eq!(grid["days"].as_array().unwrap().len(), 31);
    assert_eq!(grid["days"][9]["is_today"], true);
}

#[test]
fn render_text_shows_banners_with_spans() {
    subcal()
        .args([
            "render",
            "-i",
            submissions_path(),
            "--today",
            "2024-01-10",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("January 2024\n"))
        .stdout(predicate::str::contains("Wed 10 (today)\n"))
        .stdout(predicate::str::contains(
            "Wed 17\n    [0] 9:00 AM Offsite (4d)\n",
        ))
        .stdout(predicate::str::contains(
            "Mon 29\n    [0] 10:00 AM Team Sync (1d)\n",
        ));
}

#[test]
fn render_offset_moves_the_month() {
    subcal()
        .args([
            "render",
            "-i",
            submissions_path(),
            "--today",
            "2024-01-10",
            "--offset",
            "1",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("February 2024\n"))
        .stdout(predicate::str::contains(
            "Mon 26\n    [0] 10:00 AM Team Sync (1d)\n",
        ))
        .stdout(predicate::str::contains("(today)").not());
}

#[test]
fn render_negative_offset_before_any_event() {
    subcal()
        .args([
            "render",
            "-i",
            submissions_path(),
            "--today",
            "2024-01-10",
            "--offset",
            "-1",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("December 2023\n"))
        .stdout(predicate::str::contains("[0]").not());
}

#[test]
fn render_search_filters_events() {
    subcal()
        .args([
            "render",
            "-i",
            submissions_path(),
            "--today",
            "2024-01-10",
            "--search",
            "FINANCE",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Review"))
        .stdout(predicate::str::contains("Team Sync").not())
        .stdout(predicate::str::contains("Offsite").not());
}

#[test]
fn render_label_limit_truncates() {
    subcal()
        .args([
            "render",
            "-i",
            submissions_path(),
            "--today",
            "2024-01-10",
            "--label-limit",
            "12",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] 9:00 AM Offs... (4d)"))
        .stdout(predicate::str::contains("[0] 10:00 AM Tea... (1d)"));
}

#[test]
fn render_with_config_file() {
    subcal()
        .args([
            "render",
            "-i",
            submissions_path(),
            "--today",
            "2024-01-10",
            "--config",
            cms_config_path(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"2:00 PM Budg...\""));
}

#[test]
fn render_cms_preset_keeps_short_labels() {
    subcal()
        .args([
            "render",
            "-i",
            submissions_path(),
            "--today",
            "2024-01-10",
            "--preset",
            "cms",
            "--form-id",
            "42",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("10:00 AM Team Sync"));
}

#[test]
fn config_and_preset_conflict() {
    subcal()
        .args([
            "render",
            "-i",
            submissions_path(),
            "--config",
            cms_config_path(),
            "--preset",
            "cms",
        ])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Expand subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expand_lists_occurrences_only() {
    let output = subcal()
        .args(["expand", "-i", submissions_path(), "--today", "2024-01-10"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let events: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let starts: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["start"].as_str().unwrap())
        .collect();
    assert_eq!(
        starts,
        vec![
            "2024-01-08T10:00:00",
            "2024-01-15T10:00:00",
            "2024-01-22T10:00:00",
            "2024-01-29T10:00:00",
        ]
    );
    assert!(events
        .as_array()
        .unwrap()
        .iter()
        .all(|e| e["kind"] == "occurrence" && e["name"] == "Team Sync"));
}

#[test]
fn expand_stops_at_recurrence_end() {
    let output = subcal()
        .args([
            "expand",
            "-i",
            submissions_path(),
            "--today",
            "2024-01-10",
            "--offset",
            "2",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let events: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(events, serde_json::json!([]));
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn unreadable_input_renders_load_error() {
    subcal()
        .args([
            "render",
            "-i",
            "/nonexistent/submissions.json",
            "--today",
            "2024-01-10",
            "--format",
            "text",
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Error loading data..."));
}

#[test]
fn malformed_input_renders_load_error() {
    subcal()
        .args(["render", "--today", "2024-01-10"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"status\": \"error\""))
        .stdout(predicate::str::contains("Error loading data..."));
}

#[test]
fn expand_fails_when_data_cannot_load() {
    subcal()
        .args(["expand", "-i", "/nonexistent/submissions.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading data..."));
}

#[test]
fn invalid_timezone_fails() {
    subcal()
        .args([
            "render",
            "-i",
            submissions_path(),
            "--today",
            "2024-01-10",
            "--timezone",
            "Mars/Olympus_Mons",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to mount calendar"));
}

#[test]
fn invalid_today_fails() {
    subcal()
        .args(["render", "-i", submissions_path(), "--today", "10/01/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --today date"));
}
