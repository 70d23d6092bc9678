//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. They use
//! the dev data directory so a real installation is never touched.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "remindful-cli", "--"])
        .args(args)
        .env("REMINDFUL_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help_lists_subcommands() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "--help failed");
    for subcommand in ["auth", "reminder", "water", "stats", "export", "watch"] {
        assert!(
            stdout.contains(subcommand),
            "help output missing '{subcommand}'"
        );
    }
}

#[test]
fn test_unknown_subcommand_fails() {
    let (_, stderr, code) = run_cli(&["frobnicate"]);
    assert_ne!(code, 0, "unknown subcommand unexpectedly succeeded");
    assert!(!stderr.is_empty());
}

#[test]
fn test_whoami_requires_login() {
    let (_, _, logout_code) = run_cli(&["auth", "logout"]);
    assert_eq!(logout_code, 0, "logout failed");

    let (_, stderr, code) = run_cli(&["auth", "whoami"]);
    assert_ne!(code, 0, "whoami succeeded with no session");
    assert!(stderr.contains("error"));
}
