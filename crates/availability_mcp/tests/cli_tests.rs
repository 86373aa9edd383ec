use assert_cmd::Command;
use predicates::prelude::*;

/// Test CLI help output
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("mcp-server-availability").unwrap();
    let assert = cmd.arg("--help").assert();

    assert
        .success()
        .stdout(predicate::str::contains("--api-key"))
        .stdout(predicate::str::contains("--debug"));
}

/// Test CLI version output
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("mcp-server-availability").unwrap();
    let assert = cmd.arg("--version").assert();

    assert
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test unknown arguments are rejected before the server starts
#[test]
fn test_unknown_argument() {
    let mut cmd = Command::cargo_bin("mcp-server-availability").unwrap();
    let assert = cmd.arg("--no-such-flag").assert();

    assert
        .failure()
        .stderr(predicate::str::contains("--no-such-flag"));
}
