use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn test_cli_help_lists_every_command() {
    let mut cmd = Command::cargo_bin("siteops").unwrap();

    cmd.arg("--help");
    let result = cmd.output().unwrap();

    let output_str = String::from_utf8(result.stdout).unwrap();

    assert!(output_str.contains("backup"), "Should list backup command");
    assert!(output_str.contains("drush"), "Should list drush command");
    assert!(output_str.contains("get"), "Should list get command");
    assert!(output_str.contains("import"), "Should list import command");
    assert!(output_str.contains("set"), "Should list set command");
    assert!(
        output_str.contains("sequelace"),
        "Should list sequelace command"
    );
    assert!(
        output_str.contains("sync-db"),
        "Should list sync-db command"
    );

    assert!(result.status.success(), "Help should succeed");
}

#[test]
fn test_cli_version_command() {
    let mut cmd = Command::cargo_bin("siteops").unwrap();

    cmd.arg("--version");
    let result = cmd.output().unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("siteops"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_arguments_prints_help_and_fails() {
    let mut cmd = Command::cargo_bin("siteops").unwrap();

    let result = cmd.output().unwrap();

    let error_str = String::from_utf8(result.stderr).unwrap();
    assert!(
        error_str.contains("Usage"),
        "Bare invocation should show usage"
    );
    assert!(!result.status.success(), "Bare invocation should fail");
}

#[test]
fn test_import_db_requires_a_file() {
    let mut cmd = Command::cargo_bin("siteops").unwrap();

    cmd.args(["import", "db"]);
    let result = cmd.output().unwrap();

    let error_str = String::from_utf8(result.stderr).unwrap();
    assert!(
        error_str.contains("--file"),
        "Missing file error should name the flag"
    );
    assert!(!result.status.success(), "import db without a file should fail");
}

#[test]
fn test_sync_db_requires_both_environments() {
    let mut cmd = Command::cargo_bin("siteops").unwrap();

    cmd.args(["sync-db", "--source", "production"]);
    let result = cmd.output().unwrap();

    let error_str = String::from_utf8(result.stderr).unwrap();
    assert!(
        error_str.contains("--target"),
        "Missing target error should name the flag"
    );
    assert!(!result.status.success(), "sync-db with one environment should fail");
}

#[test]
fn test_error_messages_are_helpful() {
    let mut cmd = Command::cargo_bin("siteops").unwrap();

    // Test with invalid command
    cmd.arg("invalid-command");
    let result = cmd.output().unwrap();

    let error_str = String::from_utf8(result.stderr).unwrap();

    assert!(
        error_str.contains("error") || error_str.contains("unrecognized"),
        "Should have error indicator"
    );
    assert!(!result.status.success(), "Invalid command should fail");
}
