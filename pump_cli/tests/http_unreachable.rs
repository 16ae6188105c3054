use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use assert_cmd::Command;
use std::time::Duration;
use tempfile::tempdir;

// Port 9 (discard) is closed on test hosts, so connects fail fast
const CONFIG: &str = r#"
[api]
backend = "http"
base_url = "http://127.0.0.1:9/"
request_timeout_ms = 500
"#;

fn pump(dir: &tempfile::TempDir) -> Command {
    let path = dir.path().join("http.toml");
    fs::write(&path, CONFIG).unwrap();
    let mut cmd = Command::cargo_bin("pump").unwrap();
    cmd.arg("--config").arg(path).env_remove("RUST_LOG");
    cmd.timeout(Duration::from_secs(20));
    cmd
}

#[rstest]
fn status_is_not_connected() {
    let dir = tempdir().unwrap();
    pump(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not connected"));
}

#[rstest]
#[case("start", "Error starting water pump: ")]
#[case("stop", "Error stopping water pump: ")]
fn command_failure_bubbles_up(#[case] command: &str, #[case] prefix: &str) {
    let dir = tempdir().unwrap();
    pump(&dir)
        .arg(command)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(prefix));
}
