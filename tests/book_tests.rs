use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;

const SCHEDULE: &str = "\
Time,Monday,Tuesday
9:00,Ballet,
9:30,Ballet,
10:00,,Jazz
10:30,,Jazz
evening,,
";

fn setup_test_env() -> (TempDir, std::sync::MutexGuard<'static, ()>) {
    let guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("schedule.csv");
    fs::write(&csv_path, SCHEDULE).unwrap();

    let config_dir = temp_dir.path().join(".studiogrid");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("rc"),
        format!("schedule.source={}\ncontact.route=/contact\n", csv_path.display()),
    )
    .unwrap();
    (temp_dir, guard)
}

fn get_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studiogrid").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd
}

#[test]
fn test_book_open_slot_by_row() {
    let (temp_dir, _guard) = setup_test_env();

    let output = get_cmd(&temp_dir)
        .args(["book", "Tuesday", "--row", "0", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let inquiry: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let route = inquiry["route"].as_str().unwrap();
    let encoded = route.strip_prefix("/contact?message=").unwrap();
    let message = urlencoding::decode(encoded).unwrap();
    assert!(message.contains("Tuesday"));
    assert!(message.contains("9:00"));
    assert!(message.contains("10:00"));
    assert_eq!(inquiry["end"], "10:00");
}

#[test]
fn test_book_by_time_label_and_case_insensitive_day() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["book", "monday", "--at", "10:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "I'd like to reserve recurring classes on Monday between 10:00 and 11:00.",
        ))
        .stdout(predicate::str::contains("Route:   /contact?message="));
}

#[test]
fn test_book_unparseable_time_mentions_only_day() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["book", "Monday", "--row", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Message: I'd like to reserve recurring classes on Monday.\n",
        ));
}

#[test]
fn test_book_taken_slot_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["book", "Monday", "--row", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("taken by 'Ballet'"));
}

#[test]
fn test_book_second_half_of_hour_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["book", "Tuesday", "--row", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("second half of an hour"));
}

#[test]
fn test_book_unknown_day_suggests() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["book", "Tusday", "--row", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Did you mean: Tuesday?"));
}

#[test]
fn test_book_row_out_of_range() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["book", "Tuesday", "--row", "99"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid row: 99"));
}

#[test]
fn test_book_requires_slot() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["book", "Tuesday"])
        .assert()
        .failure();
}
