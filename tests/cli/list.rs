//! Tests for `sops-run --list`.

use crate::support::*;

#[test]
fn test_list_empty_store() {
    let t = Test::new();

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "no manifests");
}

#[test]
fn test_list_manifests() {
    let t = Test::new();
    t.seed_manifest("psql");
    t.seed_manifest("aws");

    let output = t.list();
    assert_success(&output);

    let out = stdout(&output);
    let aws = out.find("aws").expect("aws listed");
    let psql = out.find("psql").expect("psql listed");
    assert!(aws < psql, "manifests should be sorted: {}", out);
}

#[test]
fn test_list_does_not_need_tools() {
    let t = Test::bare();

    let output = t.list();
    assert_success(&output);
}
