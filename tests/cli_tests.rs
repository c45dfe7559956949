//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn gateway_bin() -> Command {
    let mut cmd = Command::cargo_bin("whisper-gateway").unwrap();
    cmd.env_remove("WHISPER_GATEWAY_CONFIG");
    cmd
}

#[test]
fn help_output() {
    gateway_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("transcribe"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--log-format"));
}

#[test]
fn serve_help_lists_flags() {
    gateway_bin()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--cache-dir"))
        .stdout(predicate::str::contains("--whisper-model"))
        .stdout(predicate::str::contains("--max-upload-mb"));
}

#[test]
fn version_output() {
    gateway_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("whisper-gateway"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    gateway_bin()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("whisper-gateway"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_path_honours_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gateway.toml");

    gateway_bin()
        .env("WHISPER_GATEWAY_CONFIG", &path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gateway.toml"));
}

#[test]
fn config_init_set_get_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let config_arg = path.to_string_lossy().to_string();

    gateway_bin()
        .args(["--config", &config_arg, "config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Config file created"));

    gateway_bin()
        .args(["--config", &config_arg, "config", "set", "port", "9100"])
        .assert()
        .success();

    gateway_bin()
        .args(["--config", &config_arg, "config", "get", "port"])
        .assert()
        .success()
        .stdout(predicate::str::diff("9100\n"));

    gateway_bin()
        .args(["--config", &config_arg, "config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("whisper_model"))
        .stdout(predicate::str::contains("tool_timeout_secs"));
}

#[test]
fn config_help() {
    gateway_bin()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}
