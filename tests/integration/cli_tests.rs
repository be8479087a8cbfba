//! Integration tests for the CLI binary.
//!
//! This test is registered as a [[test]] in the import-trust-cli crate
//! so that CARGO_BIN_EXE_itrust is available.

use std::path::Path;
use std::process::{Command, Output};

/// Get a Command pointing to the `itrust` binary.
fn itrust_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_itrust"));
    cmd.env("ITRUST_PASSPHRASE", "cli-test-passphrase");
    cmd
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn keygen(path: &Path) -> String {
    let output = itrust_binary()
        .args(["keygen", "--out"])
        .arg(path)
        .output()
        .expect("failed to execute itrust keygen");
    assert!(
        output.status.success(),
        "keygen failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let account = stdout_of(&output);
    assert!(account.starts_with("acct_"), "unexpected account: {account}");
    account
}

#[test]
fn cli_responds_to_help() {
    let output = itrust_binary()
        .arg("--help")
        .output()
        .expect("failed to execute itrust --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("itrust") || stdout.contains("Usage"),
        "help output should contain usage information, got: {stdout}"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = itrust_binary()
        .arg("--version")
        .output()
        .expect("failed to execute itrust --version");

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("itrust"));
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = itrust_binary()
        .arg("--nonexistent-flag")
        .output()
        .expect("failed to execute itrust");
    assert!(!output.status.success());
}

#[test]
fn cli_covers() {
    let output = itrust_binary()
        .args(["covers", "orders.>", "orders.eu.created"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "true");

    let output = itrust_binary()
        .args(["covers", "orders.*", "orders.>"])
        .output()
        .unwrap();
    assert_eq!(stdout_of(&output), "false");
}

#[test]
fn cli_keygen_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exporter.akey");
    let account = keygen(&path);

    let output = itrust_binary()
        .args(["keygen", "--out"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());

    let output = itrust_binary().arg("show").arg(&path).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), account);
}

#[test]
fn cli_activate_inspect_validate() {
    let dir = tempfile::tempdir().unwrap();
    let exporter_key = dir.path().join("exporter.akey");
    let importer_key = dir.path().join("importer.akey");
    let exporter = keygen(&exporter_key);
    let importer = keygen(&importer_key);

    let output = itrust_binary()
        .arg("activate")
        .arg("--key")
        .arg(&exporter_key)
        .args(["--recipient", &importer])
        .args(["--subject", "orders.>", "--type", "stream", "--expires", "1d"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "activate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let token = stdout_of(&output);
    assert_eq!(token.split('.').count(), 3);

    let output = itrust_binary()
        .args(["inspect", &token])
        .output()
        .unwrap();
    assert!(output.status.success());
    let claims: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(claims["iss"], exporter.as_str());
    assert_eq!(claims["sub"], importer.as_str());
    assert_eq!(claims["import_subject"], "orders.>");

    let account_file = dir.path().join("importer.json");
    let write_account = |subject: &str| {
        let account = serde_json::json!({
            "account": importer,
            "imports": [{
                "subject": subject,
                "account": exporter,
                "type": "stream",
                "token": token,
            }]
        });
        std::fs::write(&account_file, account.to_string()).unwrap();
    };

    write_account("orders.eu");
    let output = itrust_binary()
        .arg("validate")
        .arg(&account_file)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "validate failed: {}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    write_account("invoices.eu");
    let output = itrust_binary()
        .args(["validate", "--json"])
        .arg(&account_file)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let issues: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(issues[0]["severity"], "blocking");
}

#[test]
fn cli_activate_rejects_unknown_type() {
    let dir = tempfile::tempdir().unwrap();
    let key = dir.path().join("k.akey");
    let account = keygen(&key);

    let output = itrust_binary()
        .arg("activate")
        .arg("--key")
        .arg(&key)
        .args(["--recipient", &account, "--subject", "a.b", "--type", "feed"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_inspect_rejects_garbage() {
    let output = itrust_binary()
        .args(["inspect", "not-a-token"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
