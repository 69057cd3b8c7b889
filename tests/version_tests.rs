use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn get_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studiogrid").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd
}

#[test]
fn test_version_command() {
    let _guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();

    get_cmd(&temp_dir)
        .args(["--version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    get_cmd(&temp_dir)
        .args(["-V"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studiogrid"));
}

#[test]
fn test_help_lists_commands() {
    let _guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();

    get_cmd(&temp_dir)
        .args(["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("contact"));
}
