//! CLI surface tests: argument parsing, configuration loading and return codes

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Configuration pointing at a port nobody listens on
const UNREACHABLE_CONFIG: &str = r#"
Suman:
  Server: http://127.0.0.1:1
  User: admin
  Password: secret
  Timeout: 2
  RetryCount: 0
Log:
  Level: warn
"#;

fn suman() -> Command {
    let mut cmd = Command::cargo_bin("suman").unwrap();
    cmd.env_remove("SUMAN_CONFIG")
        .env_remove("SUMAN_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, UNREACHABLE_CONFIG).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    suman()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-project"))
        .stdout(predicate::str::contains("sync-stage"));
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();

    suman()
        .current_dir(temp_dir.path())
        .args(["sync-stage", "-p", "p1", "-e", "dev"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config.yaml"));
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(&path, "Suman:\n  Server: suma\n  User: ''\n  Password: x\n").unwrap();

    suman()
        .arg("--config")
        .arg(&path)
        .args(["sync-stage", "-p", "p1", "-e", "dev"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_project_is_rejected_before_login() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir);

    suman()
        .arg("--config")
        .arg(&path)
        .args(["create-project", "-b", "bc", "-e", "dev"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Project is mandatory"));
}

#[test]
fn test_missing_environment_for_sync() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir);

    suman()
        .arg("--config")
        .arg(&path)
        .args(["sync-stage", "-p", "p1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Environment is mandatory"));
}

/// Run the command and return its exit code and stderr
fn run_with_stderr(cmd: &mut Command) -> (Option<i32>, String) {
    let output = cmd.output().unwrap();
    (
        output.status.code(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn test_unreachable_server_fails_login() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir);

    let (code, stderr) = run_with_stderr(
        suman()
            .env("SUMAN_CONFIG", &path)
            .args(["sync-stage", "-p", "p1", "-e", "dev"]),
    );

    assert_eq!(code, Some(3));
    assert_eq!(stderr.matches("ErrLoginSuseManager").count(), 1);
}

#[test]
fn test_failure_goes_to_log_file_and_stderr_once() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("suman.log");
    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        format!("{}  File: {}\n", UNREACHABLE_CONFIG, log_path.display()),
    )
    .unwrap();

    let (code, stderr) = run_with_stderr(
        suman()
            .arg("--config")
            .arg(&config_path)
            .args(["create-project", "-p", "p1", "-b", "bc", "-e", "dev"]),
    );

    assert_eq!(code, Some(3));
    assert_eq!(stderr.matches("ErrLoginSuseManager").count(), 1);

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("ERROR"));
    assert_eq!(log.matches("ErrLoginSuseManager").count(), 1);
}

#[test]
fn test_zero_poll_interval_is_usage_error() {
    suman()
        .args(["sync-stage", "-p", "p1", "-e", "dev", "--poll-interval", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--poll-interval"));
}
