use serde_json::Value;
use std::process::{Command, Output};

fn run_predict(rust_log: Option<&str>) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_predict"));
    cmd.args(["--granularity", "hourly", "--season", "winter", "--temp", "20"])
        .arg("--model-dir")
        .arg(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    if let Some(filter) = rust_log {
        cmd.env("RUST_LOG", filter);
    }
    cmd.output().unwrap()
}

#[test]
fn test_prints_fallback_prediction_without_models() {
    let output = run_predict(None);
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["source"], "fallback");
    assert!(body["count"].is_i64());
}

#[test]
fn test_default_log_level_is_warn() {
    let output = run_predict(None);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("Using fallback predictions"), "stderr: {stderr}");
    assert!(!stderr.contains("day model: none"), "stderr: {stderr}");
}

#[test]
fn test_rust_log_raises_verbosity() {
    let output = run_predict(Some("info"));
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("day model: none"), "stderr: {stderr}");
}
