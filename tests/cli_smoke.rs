//! Smoke tests for the `kitlabel` binary
//!
//! Each test runs the real binary inside a fixture workspace and checks exit
//! codes and the parts of stdout/stderr scripts rely on.

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

use kitlabel_utils::test_support::write_fixture_workspace;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_fixture_workspace(dir.path());
    dir
}

fn kitlabel(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kitlabel"));
    cmd.current_dir(dir.path()).env_remove("KITLABEL_HOME");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = workspace();
    kitlabel(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_search_prints_matches() {
    let dir = workspace();
    kitlabel(&dir)
        .args(["search", "hd14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COMBIKIT SP-HD14-SSE001REV"))
        .stdout(predicate::str::contains("HARLEY DAVIDSON"));
}

#[test]
fn test_lookup_json_is_canonical() {
    let dir = workspace();
    kitlabel(&dir)
        .args(["lookup", "DUP-1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"fields":{"#))
        .stdout(predicate::str::contains(r#""brand_name":"YAMAHA""#))
        .stdout(predicate::str::contains(r#""kit_type":"fork""#));
}

#[test]
fn test_lookup_unknown_code_exits_not_found() {
    let dir = workspace();
    kitlabel(&dir)
        .args(["lookup", "NOPE-404"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("NOPE-404"));
}

#[test]
fn test_cart_add_list_and_generate() {
    let dir = workspace();

    kitlabel(&dir)
        .args(["cart", "add", "SP-HD14-SSE001REV", "--qty", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Added"));

    kitlabel(&dir)
        .args(["cart", "add", "DUP-1", "--kit", "shock"])
        .assert()
        .success();

    kitlabel(&dir)
        .args(["cart", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""counts":{"big":3,"grand_total":10,"small_fork":4,"small_shock":3,"total_small":7}"#));

    kitlabel(&dir)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cart cleared"));

    let jobs: Vec<String> = fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().any(|name| name.ends_with("_BIG.zpl")));
    assert!(jobs.iter().any(|name| name.ends_with("_SMALL.zpl")));

    kitlabel(&dir)
        .args(["cart", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cart is empty"));
}

#[test]
fn test_cart_add_rejects_unknown_kit_type() {
    let dir = workspace();
    kitlabel(&dir)
        .args(["cart", "add", "DUP-1", "--kit", "wheel"])
        .assert()
        .code(4);
}

#[test]
fn test_templates_check() {
    let dir = workspace();
    kitlabel(&dir)
        .args(["templates", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kit_info"));
}

#[test]
fn test_templates_check_reports_unknown_placeholder() {
    let dir = workspace();
    fs::write(
        dir.path().join("templates").join("small_fork.zpl"),
        "^XA^FD{{wheel_size}}^FS^XZ",
    )
    .unwrap();

    kitlabel(&dir)
        .args(["templates", "check"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("wheel_size"));
}

#[test]
fn test_config_show_reports_sources() {
    let dir = workspace();
    kitlabel(&dir)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""catalog_path":{"source":"config""#));
}

#[test]
fn test_missing_catalog_exits_config_error() {
    let dir = TempDir::new().unwrap();
    kitlabel(&dir)
        .args(["search", "hd14"])
        .assert()
        .code(2);
}
