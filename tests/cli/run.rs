//! Tests for run mode: `sops-run <command...>`.

use crate::support::*;
use std::fs;

#[test]
fn test_run_injects_manifest_env() {
    let t = Test::new();
    t.seed_manifest("sh");

    let output = t.run(&["sh", "-c", "echo secret=$STUB_SECRET"]);
    assert_success(&output);
    assert_stdout_contains(&output, "secret=from-manifest");
}

#[test]
fn test_run_passes_manifest_and_command_string() {
    let t = Test::new();
    let manifest = t.seed_manifest("echo");

    let output = t.run(&["echo", "hello", "world"]);
    assert_success(&output);
    assert_stdout_contains(&output, "hello world");

    assert_eq!(
        t.calls(),
        vec![format!("sops|exec-env|{}|echo hello world", manifest.display())]
    );
}

#[test]
fn test_run_preserves_argument_boundaries() {
    let t = Test::new();
    t.seed_manifest("printf");

    let output = t.run(&["printf", "[%s]", "two words", "it's"]);
    assert_success(&output);
    assert_stdout_contains(&output, "[two words][it's]");
}

#[test]
fn test_run_exit_code_passthrough() {
    let t = Test::new();
    t.seed_manifest("sh");

    let output = t.run(&["sh", "-c", "exit 42"]);
    assert_exit_code(&output, 42);
}

#[test]
fn test_run_does_not_need_keys() {
    let t = Test::new();
    t.seed_manifest("true");

    let output = t.run(&["true"]);
    assert_success(&output);
    assert!(t.calls_to("age-keygen").is_empty());
}

#[test]
fn test_run_without_store_fails_without_invoking_tools() {
    let t = Test::with_default_key();

    let output = t.run(&["psql", "-h", "localhost"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no store directory exists");

    assert!(t.calls().is_empty());
}

#[test]
fn test_run_without_manifest_fails() {
    let t = Test::new();
    t.seed_manifest("other");

    let output = t.run(&["psql"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no manifest for psql exists");
    assert_stderr_contains(&output, "sops-run --create psql");

    assert!(t.calls().is_empty());
}

#[test]
fn test_run_passes_dotenv_to_sops() {
    let t = Test::new();
    t.seed_manifest("sh");
    fs::write(t.dir.path().join(".env"), "SOPS_AGE_KEY_FILE=/keys/k.txt\n").unwrap();

    let output = t.run(&["sh", "-c", "echo keyfile=[$SOPS_AGE_KEY_FILE]"]);
    assert_success(&output);
    assert_stdout_contains(&output, "keyfile=[/keys/k.txt]");
}

#[test]
fn test_run_process_env_beats_dotenv() {
    let t = Test::new();
    t.seed_manifest("sh");
    fs::write(t.dir.path().join(".env"), "SOPS_AGE_KEY_FILE=/keys/k.txt\n").unwrap();

    let output = t
        .cmd()
        .env("SOPS_AGE_KEY_FILE", "/keys/mine.txt")
        .args(["sh", "-c", "echo keyfile=[$SOPS_AGE_KEY_FILE]"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "keyfile=[/keys/mine.txt]");
}
