use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;

fn setup_test_env(rc: &str) -> (TempDir, std::sync::MutexGuard<'static, ()>) {
    let guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join(".studiogrid");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("rc"), rc).unwrap();
    (temp_dir, guard)
}

fn get_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studiogrid").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd
}

#[test]
fn test_colors_lists_builtins() {
    let (temp_dir, _guard) = setup_test_env("");

    get_cmd(&temp_dir)
        .args(["colors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ballet"))
        .stdout(predicate::str::contains("magenta"))
        .stdout(predicate::str::contains("(other)"));
}

#[test]
fn test_colors_from_config() {
    let (temp_dir, _guard) = setup_test_env("color.  Heels Class = bright_red\ncolor.ballet=blue\n");

    let output = get_cmd(&temp_dir).args(["colors", "--json"]).output().unwrap();
    assert!(output.status.success());
    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listing["default"], "neutral");
    let colors = listing["colors"].as_array().unwrap();
    let lookup = |class: &str| {
        colors
            .iter()
            .find(|c| c["class"] == class)
            .map(|c| c["color"].as_str().unwrap().to_string())
    };
    assert_eq!(lookup("heels class").as_deref(), Some("bright_red"));
    assert_eq!(lookup("ballet").as_deref(), Some("blue"));
}

#[test]
fn test_invalid_config_is_internal_error() {
    let (temp_dir, _guard) = setup_test_env("this line has no equals\n");

    get_cmd(&temp_dir)
        .args(["colors"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid config file"));
}
