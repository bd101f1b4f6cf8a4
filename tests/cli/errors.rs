//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("sops-run") || out.contains("Usage"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_command_fails() {
    let t = Test::new();

    let output = t.cmd().output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_key_rejected_in_run_mode() {
    let t = Test::with_default_key();
    t.seed_manifest("psql");

    t.cmd()
        .args(["--key", "/tmp/other.key", "psql"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--create"));

    assert!(t.calls().is_empty());
}

#[test]
fn test_key_rejected_with_list() {
    let t = Test::new();

    let output = t.cmd().args(["--list", "--key", "/tmp/other.key"]).output().unwrap();
    assert_failure(&output);
    assert_stdout_excludes(&output, "no manifests");
}

#[test]
fn test_missing_sops() {
    let t = Test::bare();
    t.install_stub("age-keygen", AGE_KEYGEN_STUB);
    t.seed_manifest("db");

    let output = t.run(&["db"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "sops not found in PATH");
}

#[test]
fn test_missing_age_keygen() {
    let t = Test::bare();
    t.install_stub("sops", SOPS_STUB);
    t.add_default_key("k1", ALICE_PUBLIC_KEY);

    let output = t.create("db");
    assert_failure(&output);
    assert_stderr_contains(&output, "age-keygen not found in PATH");
    assert!(t.calls().is_empty());
}

#[test]
fn test_completions() {
    let t = Test::bare();

    t.cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sops-run"));
}
