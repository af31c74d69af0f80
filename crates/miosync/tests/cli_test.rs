//! Integration tests for the `miosync` CLI binary.
//!
//! These tests validate argument parsing, help output, shell
//! completions, and config/validation errors -- all without a live
//! MinIO server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `miosync` binary with env isolation.
///
/// Clears all `MIOSYNC_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn miosync_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("miosync");
    cmd.env("HOME", "/tmp/miosync-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/miosync-test-nonexistent")
        .env_remove("MIOSYNC_PROFILE")
        .env_remove("MIOSYNC_ENDPOINT")
        .env_remove("MIOSYNC_ACCESS_KEY")
        .env_remove("MIOSYNC_SECRET_KEY")
        .env_remove("MIOSYNC_USER_SECRET_KEY")
        .env_remove("MIOSYNC_OUTPUT")
        .env_remove("MIOSYNC_INSECURE")
        .env_remove("MIOSYNC_TIMEOUT");
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
    let output = miosync_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    miosync_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("group")
            .and(predicate::str::contains("policy"))
            .and(predicate::str::contains("user"))
            .and(predicate::str::contains("retention")),
    );
}

#[test]
fn test_version_flag() {
    miosync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("miosync"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    miosync_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    miosync_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = miosync_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_group_without_config() {
    miosync_cmd()
        .args(["group", "ops"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("endpoint"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_unknown_profile_is_reported() {
    miosync_cmd()
        .args(["--profile", "nope", "group", "ops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_endpoint_with_path_fails_before_any_network_io() {
    // Validation rejects the endpoint without touching the network, so
    // the error must mention the endpoint, not a connection failure.
    let output = miosync_cmd()
        .args([
            "--endpoint",
            "https://minio.example.com/console",
            "--access-key",
            "minio",
            "--secret-key",
            "minio123",
            "group",
            "ops",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(text.contains("endpoint"), "Expected endpoint error:\n{text}");
}

#[test]
fn test_missing_credentials_fail_before_any_network_io() {
    let output = miosync_cmd()
        .args(["--endpoint", "minio.example.com:9000", "group", "ops"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("secret key") || text.contains("credentials"),
        "Expected credentials error:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = miosync_cmd()
        .args(["--output", "invalid", "group", "ops"])
        .output()
        .unwrap();
    assert!(!output.status.success(), "Expected failure for invalid output format");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_state_value() {
    let output = miosync_cmd()
        .args(["group", "ops", "--state", "maybe"])
        .output()
        .unwrap();
    assert!(!output.status.success(), "Expected failure for invalid state");
    let text = combined_output(&output);
    assert!(
        text.contains("possible values") || text.contains("invalid"),
        "Expected error about valid states:\n{text}"
    );
}

#[test]
fn test_retention_days_must_be_positive() {
    let output = miosync_cmd()
        .args(["retention", "archive", "--mode", "governance", "--days", "0"])
        .output()
        .unwrap();
    assert!(!output.status.success(), "Expected failure for zero days");
}

// ── Config subcommands ──────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` renders the default config when no file exists.
    miosync_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_subcommands_exist() {
    miosync_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles")),
        );
}

#[test]
fn test_check_flag_parses() {
    // --check parsing succeeds; the failure must be about missing
    // config, not the flag.
    miosync_cmd()
        .args(["--check", "group", "ops", "--users", "alice,bob"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("endpoint"))
                .or(predicate::str::contains("profile")),
        );
}
