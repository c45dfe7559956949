//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary pointed at a throwaway config file
fn gateway_bin(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("whisper-gateway").unwrap();
    cmd.env("WHISPER_GATEWAY_CONFIG", dir.path().join("config.toml"));
    for key in ["PORT", "HOST", "CACHE_DIR", "TEMP_DIR", "LOG_FORMAT"] {
        cmd.env_remove(format!("WHISPER_GATEWAY_{}", key));
    }
    cmd
}

#[test]
fn config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    gateway_bin(&dir)
        .args(["config", "get", "unknown_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    gateway_bin(&dir)
        .args(["config", "set", "language", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn config_set_invalid_port() {
    let dir = tempfile::tempdir().unwrap();
    gateway_bin(&dir)
        .args(["config", "set", "port", "eighty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("port"));
}

#[test]
fn config_set_invalid_log_format() {
    let dir = tempfile::tempdir().unwrap();
    gateway_bin(&dir)
        .args(["config", "set", "log_format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log format"));
}

#[test]
fn config_init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    gateway_bin(&dir).args(["config", "init"]).assert().success();
    gateway_bin(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_list_with_no_file() {
    let dir = tempfile::tempdir().unwrap();
    gateway_bin(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn malformed_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "port = \"eighty\"").unwrap();

    gateway_bin(&dir)
        .args(["transcribe", "missing.mp4"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("parse"));
}

#[test]
fn invalid_env_override_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    gateway_bin(&dir)
        .env("WHISPER_GATEWAY_PORT", "eighty")
        .args(["transcribe", "missing.mp4"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("WHISPER_GATEWAY_PORT"));
}

#[test]
fn invalid_log_format_flag() {
    let dir = tempfile::tempdir().unwrap();
    gateway_bin(&dir)
        .args(["--log-format", "yaml", "transcribe", "missing.mp4"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid log format"));
}

#[test]
fn transcribe_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    gateway_bin(&dir)
        .arg("transcribe")
        .arg(dir.path().join("nope.mp4"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn transcribe_without_engine_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let media = dir.path().join("clip.wav");
    std::fs::write(&media, b"RIFF").unwrap();

    gateway_bin(&dir)
        .arg("transcribe")
        .arg(&media)
        .arg("--cache-dir")
        .arg(dir.path().join("cache"))
        .arg("--temp-dir")
        .arg(dir.path().join("temp"))
        .arg("--whisper-executable")
        .arg(dir.path().join("no-such-whisper-cli"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration_error"));

    assert!(dir.path().join("temp").read_dir().unwrap().next().is_none());
}

#[cfg(unix)]
#[test]
fn interrupted_transcribe_leaves_no_partial_audio() {
    use assert_cmd::cargo::CommandCargoExt;
    use std::os::unix::fs::PermissionsExt;
    use std::process::{Command as StdCommand, Stdio};
    use std::time::{Duration, Instant};

    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("cache");
    let temp = dir.path().join("temp");
    let media = dir.path().join("clip.mp4");
    std::fs::write(&media, b"\x00\x00\x00\x18ftypmp42 clip").unwrap();
    std::fs::write(dir.path().join("whisper-cli"), b"").unwrap();
    std::fs::write(dir.path().join("model.bin"), b"").unwrap();

    // Starts writing the WAV header, then stalls
    let ffmpeg = dir.path().join("slow-ffmpeg");
    std::fs::write(
        &ffmpeg,
        "#!/bin/sh\nfor last; do :; done\nprintf RI > \"$last\"\nexec sleep 30\n",
    )
    .unwrap();
    std::fs::set_permissions(&ffmpeg, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut child = StdCommand::cargo_bin("whisper-gateway")
        .unwrap()
        .env("WHISPER_GATEWAY_CONFIG", dir.path().join("config.toml"))
        .arg("transcribe")
        .arg(&media)
        .arg("--cache-dir")
        .arg(&cache)
        .arg("--temp-dir")
        .arg(&temp)
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .arg("--whisper-executable")
        .arg(dir.path().join("whisper-cli"))
        .arg("--whisper-model")
        .arg(dir.path().join("model.bin"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let has_wav = |dir: &std::path::Path| {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .any(|e| e.file_name().to_string_lossy().ends_with(".wav"))
            })
            .unwrap_or(false)
    };

    let deadline = Instant::now() + Duration::from_secs(20);
    while !has_wav(&cache) {
        assert!(Instant::now() < deadline, "conversion never started");
        std::thread::sleep(Duration::from_millis(50));
    }

    let killed = StdCommand::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    let deadline = Instant::now() + Duration::from_secs(20);
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() > deadline {
            child.kill().unwrap();
            panic!("transcribe did not exit after SIGINT");
        }
        std::thread::sleep(Duration::from_millis(50));
    };

    assert_eq!(status.code(), Some(130));
    assert!(!has_wav(&cache));
    assert!(temp.read_dir().unwrap().next().is_none());
}
