//! Command-line smoke tests that need no backend

use assert_cmd::Command;
use predicates::prelude::*;

mod common;

const OFFLINE_CONFIG: &str = r#"
api:
  base_url: http://127.0.0.1:9
  timeout_seconds: 2
session:
  backend: memory
"#;

fn fittrack(config_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("FITTRACK_API_BASE_URL")
        .env_remove("FITTRACK_SESSION_BACKEND")
        .arg("--config")
        .arg(config_path);
    cmd
}

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("workouts"))
        .stdout(predicate::str::contains("admin-login"));
}

#[test]
fn test_memberships_prints_all_tiers() {
    let (_dir, config_path) = common::temp_config_file(OFFLINE_CONFIG);
    fittrack(&config_path)
        .arg("memberships")
        .assert()
        .success()
        .stdout(predicate::str::contains("Basic"))
        .stdout(predicate::str::contains("Standard"))
        .stdout(predicate::str::contains("Premium"));
}

#[test]
fn test_diet_for_goal_prints_week() {
    let (_dir, config_path) = common::temp_config_file(OFFLINE_CONFIG);
    fittrack(&config_path)
        .args(["diet", "--goal", "muscle gain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Muscle Gain"))
        .stdout(predicate::str::contains("Sunday"));
}

#[test]
fn test_diet_for_unknown_goal_fails() {
    let (_dir, config_path) = common::temp_config_file(OFFLINE_CONFIG);
    fittrack(&config_path)
        .args(["diet", "--goal", "Levitation"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No diet plan for goal 'Levitation'"));
}

#[test]
fn test_profile_without_session_prompts_login() {
    let (_dir, config_path) = common::temp_config_file(OFFLINE_CONFIG);
    fittrack(&config_path)
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_members_require_admin_sign_in() {
    let (_dir, config_path) = common::temp_config_file(OFFLINE_CONFIG);
    fittrack(&config_path)
        .args(["members", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Admin sign-in required"));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let (_dir, config_path) = common::temp_config_file("api:\n  base_url: ftp://example.com\n");
    fittrack(&config_path)
        .arg("memberships")
        .assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
}

#[test]
fn test_trainer_without_session_prompts_login() {
    let (_dir, config_path) = common::temp_config_file(OFFLINE_CONFIG);
    fittrack(&config_path)
        .arg("trainer")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login Required"))
        .stderr(predicate::str::contains(
            "Please log in to access workout plans.",
        ));
}

#[test]
fn test_classes_require_admin_sign_in() {
    let (_dir, config_path) = common::temp_config_file(OFFLINE_CONFIG);
    fittrack(&config_path)
        .args(["members", "classes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Admin sign-in required"));
}
