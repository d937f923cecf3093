//! Binary-level tests for syncledger.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn syncledger(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("syncledger").unwrap();
    cmd.arg("--config")
        .arg(dir.join("absent.toml"))
        .arg("--data-dir")
        .arg(dir.join("data"))
        .arg("--account")
        .arg("alice")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn status_of_fresh_account() {
    let dir = tempdir().unwrap();

    syncledger(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Library version: 0"))
        .stdout(predicate::str::contains("No tracked entities"));
}

#[test]
fn add_set_and_show_across_runs() {
    let dir = tempdir().unwrap();

    syncledger(dir.path())
        .args(["add", "exp1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added exp1"));

    syncledger(dir.path())
        .args(["set", "exp1", "--archived", "true", "--version", "7"])
        .assert()
        .success();

    syncledger(dir.path())
        .args(["library-version", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("42"));

    syncledger(dir.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"entity_id\": \"exp1\""))
        .stdout(predicate::str::contains("\"server_archived\": true"))
        .stdout(predicate::str::contains("\"last_synced_version\": 7"))
        .stdout(predicate::str::contains("\"last_synced_library_version\": 42"));
}

#[test]
fn negative_library_version_is_accepted() {
    let dir = tempdir().unwrap();

    syncledger(dir.path())
        .args(["library-version", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("full resync pending"));
}

#[test]
fn unknown_entity_is_reported() {
    let dir = tempdir().unwrap();

    syncledger(dir.path())
        .args(["set", "ghost", "--dirty", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("entity not found: ghost"));
}

#[test]
fn accounts_do_not_share_state() {
    let dir = tempdir().unwrap();

    syncledger(dir.path()).args(["add", "exp1"]).assert().success();

    let mut bob = Command::cargo_bin("syncledger").unwrap();
    bob.arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .args(["--account", "bob", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tracked entities"));
}

#[test]
fn config_file_supplies_data_dir() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("from-config");
    let config = dir.path().join("ledger.toml");
    std::fs::write(
        &config,
        format!("[storage]\ndata_dir = {:?}\n", data_dir.to_string_lossy()),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("syncledger").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .args(["--account", "alice", "add", "exp1"])
        .assert()
        .success();

    assert!(data_dir.is_dir());
}
