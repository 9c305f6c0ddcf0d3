use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with plain output, a throwaway
/// database and a pinned date
fn streakguard_cmd(temp_dir: &TempDir, today: &str) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("streakguard").expect("Failed to find streakguard binary");
    cmd.arg("--no-color")
        .args(["--database-file", db_path.to_str().unwrap()])
        .args(["--today", today]);
    cmd
}

#[test]
fn test_cli_no_active_holiday() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active holiday."));

    // The default command shows the same
    streakguard_cmd(&temp_dir, "2025-07-01")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active holiday."));
}

#[test]
fn test_cli_create_and_show_active() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args([
            "holiday",
            "create",
            "2025-07-04",
            "2025-07-10",
            "--reason",
            "Summer trip",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created holiday with ID: 1"))
        .stdout(predicate::str::contains("- Freezes: all habits"))
        .stdout(predicate::str::contains("(7 days)"));

    streakguard_cmd(&temp_dir, "2025-07-05")
        .args(["holiday", "active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Holiday 1 (❄ Active)"))
        .stdout(predicate::str::contains("- Reason: Summer trip"))
        .stdout(predicate::str::contains("- Days remaining: 5"));
}

#[test]
fn test_cli_second_holiday_is_rejected() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "create", "2025-07-04", "2025-07-05"])
        .assert()
        .success();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "create", "2025-07-20", "2025-07-21"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already active"));
}

#[test]
fn test_cli_free_plan_duration_cap() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "can-create", "2025-07-01", "2025-07-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot create a holiday"))
        .stdout(predicate::str::contains("Upgrade to premium"));

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "create", "2025-07-01", "2025-07-20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tier set premium"));

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["tier", "set", "premium"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan tier set to premium"));

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "create", "2025-07-01", "2025-07-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(20 days)"));
}

#[test]
fn test_cli_past_start_is_rejected() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-10")
        .args(["holiday", "create", "2025-07-09", "2025-07-11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn test_cli_invalid_date_format() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-10")
        .args(["holiday", "create", "07/11/2025", "2025-07-12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start_date"));
}

#[test]
fn test_cli_cancel_twice() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "create", "2025-07-01", "2025-07-07"])
        .assert()
        .success();

    streakguard_cmd(&temp_dir, "2025-07-03")
        .args(["holiday", "cancel", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled holiday with ID: 1"))
        .stdout(predicate::str::contains("✗ Cancelled early"));

    streakguard_cmd(&temp_dir, "2025-07-04")
        .args(["holiday", "cancel", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already inactive"));

    streakguard_cmd(&temp_dir, "2025-07-04")
        .args(["holiday", "cancel", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_check_respects_cancellation() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "create", "2025-07-01", "2025-07-07"])
        .assert()
        .success();
    streakguard_cmd(&temp_dir, "2025-07-04")
        .args(["holiday", "cancel", "1"])
        .assert()
        .success();

    streakguard_cmd(&temp_dir, "2025-07-10")
        .args(["check", "2025-07-02", "--habit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-07-02 is frozen"));

    streakguard_cmd(&temp_dir, "2025-07-10")
        .args(["check", "2025-07-05", "--habit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-07-05 is not frozen"));

    streakguard_cmd(&temp_dir, "2025-07-10")
        .args(["check", "2025-06-28", "--until", "2025-07-10", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2025-07-03\""))
        .stdout(predicate::str::contains("2025-07-04").not());
}

#[test]
fn test_cli_habits_and_task_scope() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-08-01")
        .args(["habit", "add", "Gym", "--category", "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created habit with ID: 1"));

    streakguard_cmd(&temp_dir, "2025-08-01")
        .args(["habit", "add-task", "1", "Legs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID: 1 (Legs)"));

    streakguard_cmd(&temp_dir, "2025-08-01")
        .args(["habit", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Gym (health)"))
        .stdout(predicate::str::contains("- 1. Legs"));

    streakguard_cmd(&temp_dir, "2025-08-01")
        .args(["holiday", "create", "2025-08-02", "2025-08-03", "--task", "1:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Freezes: tasks of habit 1 [1]"));

    streakguard_cmd(&temp_dir, "2025-08-01")
        .args(["check", "2025-08-02", "--habit", "1", "--task", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is frozen"));
}

#[test]
fn test_cli_empty_task_selection() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-08-01")
        .args(["holiday", "create", "2025-08-02", "2025-08-03", "--scope", "tasks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty selection"));
}

#[test]
fn test_cli_stats_json() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "create", "2025-07-01", "2025-07-03"])
        .assert()
        .success();

    let output = streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["holiday", "stats", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stats: serde_json::Value =
        serde_json::from_slice(&output).expect("stats output should be JSON");
    assert_eq!(stats["plan"], "free");
    assert_eq!(stats["holidays_this_year"], 1);
    assert_eq!(stats["total_days_this_year"], 3);
    assert_eq!(stats["remaining_allowance"]["limited"], 2);
    assert_eq!(stats["max_duration"]["limited"], 7);
}

#[test]
fn test_cli_users_are_isolated() {
    let temp_dir = create_cli_test_environment();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["--user", "alice", "holiday", "create", "2025-07-01", "2025-07-03"])
        .assert()
        .success();

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["--user", "bob", "holiday", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No holidays found."));

    streakguard_cmd(&temp_dir, "2025-07-01")
        .args(["--user", "alice", "holiday", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Holiday 1"));
}
