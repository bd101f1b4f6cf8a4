//! Tests for `sops-run --edit`.

use crate::support::*;

#[test]
fn test_edit_existing_manifest() {
    let t = Test::with_default_key();
    let manifest = t.seed_manifest("db");

    let output = t.edit("db");
    assert_success(&output);
    assert_stdout_contains(&output, "updated manifest");

    assert_eq!(
        t.calls_to("sops"),
        vec![format!("sops|--age|{}|{}", ALICE_PUBLIC_KEY, manifest.display())]
    );
}

#[test]
fn test_edit_surfaces_sops_failure() {
    let t = Test::with_default_key();
    let manifest = t.seed_manifest("db");
    let before = std::fs::read_to_string(&manifest).unwrap();

    let output = t
        .cmd()
        .env("STUB_SOPS_FAIL", "Error decrypting key: no identity matched")
        .args(["--edit", "db"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "sops failed to edit manifest");
    assert_stderr_contains(&output, "no identity matched");
    assert_stdout_excludes(&output, "updated manifest");

    assert_eq!(std::fs::read_to_string(&manifest).unwrap(), before);
}

#[test]
fn test_edit_missing_manifest_fails() {
    let t = Test::with_default_key();

    let output = t.edit("db");
    assert_failure(&output);
    assert_stderr_contains(&output, "no manifest for db exists");
    assert_stderr_contains(&output, "sops-run --create db");

    assert!(t.calls_to("sops").is_empty());
    assert!(!t.manifest("db").exists());
    assert!(!t.store_dir().exists());
}

#[test]
fn test_edit_rejects_multiple_names() {
    let t = Test::with_default_key();
    t.seed_manifest("db");

    let output = t.cmd().args(["--edit", "db", "extra"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "only one command name accepted");
}

#[test]
fn test_create_and_edit_conflict() {
    let t = Test::with_default_key();

    let output = t.cmd().args(["--create", "--edit", "db"]).output().unwrap();
    assert_failure(&output);
    assert!(t.calls().is_empty());
}
