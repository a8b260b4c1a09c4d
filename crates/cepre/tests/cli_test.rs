//! Integration tests for the `cepre` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live admissions service.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `cepre` binary with env isolation.
///
/// Clears all `CEPRE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn cepre_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("cepre");
    cmd.env("HOME", "/tmp/cepre-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/cepre-cli-test-nonexistent")
        .env_remove("CEPRE_BASE_URL")
        .env_remove("CEPRE_OUTPUT")
        .env_remove("CEPRE_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = cepre_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    cepre_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("CEPREUNA")
            .and(predicate::str::contains("stats"))
            .and(predicate::str::contains("ficha"))
            .and(predicate::str::contains("status")),
    );
}

#[test]
fn test_version_flag() {
    cepre_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cepre"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    cepre_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    cepre_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    cepre_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = cepre_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = cepre_cmd()
        .args(["--output", "invalid", "stats"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_base_url() {
    let output = cepre_cmd()
        .args(["--base-url", "not a url", "stats"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("base-url") || text.contains("invalid URL"),
        "Expected error about the base URL:\n{text}"
    );
}

// ── Ficha validation (no service required) ──────────────────────────

#[test]
fn test_ficha_short_dni_is_rejected_locally() {
    // Validation fails before any request, so no service is needed.
    let output = cepre_cmd().args(["ficha", "1234"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("8 digits"),
        "Expected DNI validation message:\n{text}"
    );
}

#[test]
fn test_ficha_non_numeric_dni_is_rejected_locally() {
    let output = cepre_cmd().args(["ficha", "abcdefgh"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("8 digits"),
        "Expected DNI validation message:\n{text}"
    );
}

// ── Unreachable service ─────────────────────────────────────────────

#[test]
fn test_stats_unreachable_service() {
    // Port 9 (discard) refuses connections immediately.
    cepre_cmd()
        .args(["--base-url", "http://127.0.0.1:9", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("network").or(predicate::str::contains("error")));
}

#[test]
fn test_status_unreachable_service() {
    cepre_cmd()
        .args(["--base-url", "http://127.0.0.1:9", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reach").or(predicate::str::contains("error")));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_stats_flags_exist() {
    cepre_cmd().args(["stats", "--help"]).assert().success().stdout(
        predicate::str::contains("--sede")
            .and(predicate::str::contains("--turnos"))
            .and(predicate::str::contains("--vacantes"))
            .and(predicate::str::contains("--fresh")),
    );
}

#[test]
fn test_ficha_help_names_dni() {
    cepre_cmd()
        .args(["ficha", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DNI"));
}
