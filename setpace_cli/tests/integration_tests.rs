//! Integration tests for the setpace_cli binary.
//!
//! These tests drive the binary end to end: countdowns in fast mode,
//! plan-driven lift sessions, preset listing, and config overrides.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("setpace"))
}

/// Write a three-set plan file into `dir` and return its path.
fn write_plan(dir: &TempDir) -> PathBuf {
    let plan = serde_json::json!({
        "exercise": "deadlift",
        "sets": [
            { "target_reps": 5, "target_weight": 120.0 },
            { "target_reps": 5, "target_weight": 120.0 },
            { "target_reps": 3, "target_weight": 130.0 },
        ]
    });
    let path = dir.path().join("plan.json");
    std::fs::write(&path, plan.to_string()).expect("Failed to write plan");
    path
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Workout session timer and set tracker",
        ));
}

#[test]
fn test_presets_lists_builtins() {
    cli()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("tabata"))
        .stdout(predicate::str::contains("rest_90"))
        .stdout(predicate::str::contains("emom_10"));
}

#[test]
fn test_timer_completes_in_fast_mode() {
    cli()
        .args(["timer", "--work", "2", "--rest", "1", "--rounds", "2", "--fast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session complete after 2 round(s)"));
}

#[test]
fn test_single_phase_timer_never_rests() {
    cli()
        .args(["timer", "--work", "3", "--fast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session complete after 1 round(s)"))
        .stdout(predicate::str::contains("REST").not());
}

#[test]
fn test_timer_with_builtin_preset() {
    cli()
        .args(["timer", "--preset", "tabata", "--fast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tabata"))
        .stdout(predicate::str::contains("Session complete after 8 round(s)"));
}

#[test]
fn test_timer_requires_work_or_preset() {
    cli()
        .args(["timer", "--fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--preset or --work"));
}

#[test]
fn test_timer_rejects_zero_work() {
    cli()
        .args(["timer", "--work", "0", "--fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("work duration"));
}

#[test]
fn test_unknown_preset_fails() {
    cli()
        .args(["timer", "--preset", "does_not_exist", "--fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown preset"));
}

#[test]
fn test_lift_auto_completes_plan() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let plan_path = write_plan(&temp_dir);

    cli()
        .arg("lift")
        .arg("--plan")
        .arg(&plan_path)
        .arg("--auto")
        .assert()
        .success()
        .stdout(predicate::str::contains("deadlift"))
        .stdout(predicate::str::contains("Session summary"))
        .stdout(predicate::str::contains("3/3 sets completed"));
}

#[test]
fn test_lift_missing_plan_fails() {
    cli()
        .args(["lift", "--plan", "/nonexistent/plan.json", "--auto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read plan"));
}

#[test]
fn test_lift_quit_without_completing() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let plan_path = write_plan(&temp_dir);

    cli()
        .arg("lift")
        .arg("--plan")
        .arg(&plan_path)
        .write_stdin("+\n+\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("0/3 sets completed"));
}

#[test]
fn test_custom_preset_from_config_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[[preset]]
id = "sprints"
name = "Hill sprints"
work_secs = 2
rest_secs = 1
rounds = 2
"#,
    )
    .expect("Failed to write config");

    cli()
        .arg("--config")
        .arg(&config_path)
        .args(["timer", "--preset", "sprints", "--fast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hill sprints"))
        .stdout(predicate::str::contains("Session complete after 2 round(s)"));

    cli()
        .arg("--config")
        .arg(&config_path)
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Custom presets"))
        .stdout(predicate::str::contains("sprints"));
}
