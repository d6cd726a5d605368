/// CLI integration tests for fitplan.
///
/// Each test spawns the compiled binary via the `assert_cmd::cargo_bin_cmd!`
/// macro and sets `FITPLAN_HOME` to a fresh `TempDir` so tests never touch
/// the developer's real `~/.fitplan` data.
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ── helpers ──────────────────────────────────────────────────────────────────

fn cmd_in(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("fitplan");
    c.env("FITPLAN_HOME", dir.path());
    c.env("FITPLAN_LOG", "off");
    c
}

fn init_dir(dir: &TempDir) {
    cmd_in(dir).args(["init", "--skip"]).assert().success();
}

fn parse_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stdout.clone();
    serde_json::from_slice(&bytes).expect("stdout is not valid JSON")
}

fn parse_stderr_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stderr.clone();
    serde_json::from_slice(&bytes).expect("stderr is not valid JSON")
}

const PROFILE_ARGS: [&str; 20] = [
    "profile",
    "set",
    "--age",
    "30",
    "--sex",
    "male",
    "--height",
    "175",
    "--weight",
    "70",
    "--goal",
    "weight_loss",
    "--target-weight",
    "65",
    "--activity",
    "moderate",
    "--experience",
    "intermediate",
    "--days",
    "4",
];

fn setup_profile(dir: &TempDir) {
    init_dir(dir);
    cmd_in(dir).args(PROFILE_ARGS).assert().success();
}

// ── init / config ────────────────────────────────────────────────────────────

#[test]
fn test_init_skip_creates_config_and_database() {
    let dir = TempDir::new().unwrap();
    let out = cmd_in(&dir).args(["init", "--skip"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["command"], "init");
    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("data.db").exists());

    let config = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(config.contains("Barbell Bench Press"));
}

#[test]
fn test_config_set_and_show() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["config", "set", "alias.ohp", "Overhead Press"])
        .assert()
        .success();
    let out = cmd_in(&dir).args(["config", "show"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["config"]["aliases"]["ohp"], "Overhead Press");
}

#[test]
fn test_config_unknown_key_is_validation_error() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args(["config", "set", "plan.colour", "blue"])
        .assert()
        .failure()
        .code(1);
    let json = parse_stderr_json(&out);
    assert_eq!(json["status"], "error");
    assert_eq!(json["command"], "config");
    assert_eq!(json["error"]["code"], "validation_error");
}

#[test]
fn test_completions_print_script() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fitplan"));
}

// ── profile ──────────────────────────────────────────────────────────────────

#[test]
fn test_profile_set_derives_targets() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir).args(PROFILE_ARGS).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["bmr"], 1649.0);
    assert_eq!(json["data"]["daily_calorie_target"], 2156);
    assert_eq!(json["data"]["macros"]["protein_grams"], 216);

    let out = cmd_in(&dir)
        .args(["profile", "set", "--weight", "72"])
        .assert()
        .success();
    assert_eq!(parse_json(&out)["data"]["weight_kg"], 72.0);

    let out = cmd_in(&dir).args(["profile", "show"]).assert().success();
    assert_eq!(parse_json(&out)["data"]["weight_kg"], 72.0);
}

#[test]
fn test_profile_show_without_profile_is_not_found() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args(["profile", "show"])
        .assert()
        .failure()
        .code(1);
    let json = parse_stderr_json(&out);
    assert_eq!(json["error"]["code"], "not_found");
}

#[test]
fn test_profile_bad_goal_is_validation_error() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args(["profile", "set", "--goal", "bulk"])
        .assert()
        .failure();
    assert_eq!(parse_stderr_json(&out)["error"]["code"], "validation_error");
}

#[test]
fn test_profile_human_output() {
    let dir = TempDir::new().unwrap();
    setup_profile(&dir);
    cmd_in(&dir)
        .args(["profile", "show", "--human"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2156"));
}

// ── logging ──────────────────────────────────────────────────────────────────

#[test]
fn test_log_day_returns_habit_score() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args([
            "log", "day", "--workout", "--diet", "--energy", "normal", "--sleep", "7.5",
            "--date", "2026-03-02",
        ])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["command"], "log day");
    assert_eq!(json["data"]["log"]["date"], "2026-03-02");
    assert_eq!(json["data"]["habit"]["streak_count"], 1);
    assert_eq!(json["data"]["habit"]["period"], "2026-W10");
}

#[test]
fn test_log_day_rejects_bad_energy() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args(["log", "day", "--energy", "sleepy"])
        .assert()
        .failure();
    assert_eq!(parse_stderr_json(&out)["error"]["code"], "validation_error");
}

#[test]
fn test_log_exercise_and_overload() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    for date in ["2026-03-02", "2026-03-05"] {
        cmd_in(&dir)
            .args([
                "log", "exercise", "bp", "--planned", "2", "--sets", "8x60:easy,8x60:easy",
                "--date", date,
            ])
            .assert()
            .success();
    }
    let out = cmd_in(&dir).args(["overload", "bench"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["exercise_name"], "Barbell Bench Press");
    assert_eq!(json["data"]["recommendation"], "increase_weight");

    let out = cmd_in(&dir)
        .args(["overload", "bp", "--history", "5"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["history"].as_array().unwrap().len(), 2);
}

#[test]
fn test_log_week_then_forecast_and_habit() {
    let dir = TempDir::new().unwrap();
    setup_profile(&dir);
    for (week, weight) in [("1", "70"), ("2", "69.5"), ("3", "69")] {
        cmd_in(&dir)
            .args([
                "log",
                "week",
                "--week",
                week,
                "--days",
                "completed:followed,completed:mostly,partial:followed",
                "--weight",
                weight,
            ])
            .assert()
            .success();
    }
    let out = cmd_in(&dir).args(["forecast"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["status"], "estimated");
    assert_eq!(json["data"]["estimated_weeks"], 10);

    let out = cmd_in(&dir).args(["habit"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["weekly"]["week_number"], 3);
    assert_eq!(json["data"]["weekly"]["streak_count"], 3);
}

#[test]
fn test_log_measure_then_compare() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args(["log", "measure", "--waist", "90", "--date", "2026-03-01"])
        .assert()
        .success();
    assert_eq!(parse_json(&out)["data"]["measurements"]["waist_cm"], 90.0);

    let out = cmd_in(&dir).args(["measurements", "--compare"]).assert().success();
    let json = parse_json(&out);
    assert!(json["data"]["comparison"].is_null());
    assert_eq!(json["data"]["message"], "Need at least 2 measurements to compare");

    cmd_in(&dir)
        .args(["log", "measure", "--waist", "88.5", "--left-arm", "34", "--date", "2026-03-15"])
        .assert()
        .success();
    let out = cmd_in(&dir).args(["measurements", "--compare"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["comparison"]["waist_cm"]["change_cm"], -1.5);

    let out = cmd_in(&dir).args(["measurements", "--latest"]).assert().success();
    assert_eq!(parse_json(&out)["data"]["date"], "2026-03-15");

    let out = cmd_in(&dir).args(["measurements"]).assert().success();
    assert_eq!(parse_json(&out)["data"].as_array().unwrap().len(), 2);
}

#[test]
fn test_log_measure_without_sites_is_validation_error() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir).args(["log", "measure"]).assert().failure();
    assert_eq!(parse_stderr_json(&out)["error"]["code"], "validation_error");
}

// ── plans ────────────────────────────────────────────────────────────────────

#[test]
fn test_plan_generate_and_show_workout() {
    let dir = TempDir::new().unwrap();
    setup_profile(&dir);
    let out = cmd_in(&dir)
        .args(["plan", "generate", "workout"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["week_number"], 1);
    assert_eq!(json["data"]["source"], "template");
    assert_eq!(json["data"]["workouts"].as_array().unwrap().len(), 7);

    let out = cmd_in(&dir)
        .args(["plan", "show", "workout"])
        .assert()
        .success();
    assert_eq!(parse_json(&out)["data"]["id"], json["data"]["id"]);

    let out = cmd_in(&dir).args(["plan", "list", "workout"]).assert().success();
    assert_eq!(parse_json(&out)["data"].as_array().unwrap().len(), 1);
}

#[test]
fn test_plan_generate_diet_human() {
    let dir = TempDir::new().unwrap();
    setup_profile(&dir);
    cmd_in(&dir)
        .args(["plan", "generate", "diet", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pre-bed Snack"));
}

#[test]
fn test_plan_show_missing_is_not_found() {
    let dir = TempDir::new().unwrap();
    setup_profile(&dir);
    let out = cmd_in(&dir)
        .args(["plan", "show", "diet"])
        .assert()
        .failure()
        .code(1);
    assert_eq!(parse_stderr_json(&out)["error"]["code"], "not_found");
}

#[test]
fn test_plan_bad_kind_is_validation_error() {
    let dir = TempDir::new().unwrap();
    setup_profile(&dir);
    let out = cmd_in(&dir)
        .args(["plan", "generate", "cardio"])
        .assert()
        .failure();
    assert_eq!(parse_stderr_json(&out)["error"]["code"], "validation_error");
}

#[cfg(unix)]
#[test]
fn test_failing_generator_command_falls_back() {
    let dir = TempDir::new().unwrap();
    setup_profile(&dir);
    cmd_in(&dir)
        .args(["config", "set", "generator.command", "false"])
        .assert()
        .success();
    let out = cmd_in(&dir)
        .args(["plan", "generate", "workout"])
        .assert()
        .success();
    assert_eq!(parse_json(&out)["data"]["source"], "template");
}

#[cfg(unix)]
#[test]
fn test_generator_command_output_is_used() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    setup_profile(&dir);
    let script = dir.path().join("gen.sh");
    std::fs::write(
        &script,
        r#"#!/bin/sh
cat > /dev/null
cat <<'PLAN'
{"week_summary": "Scripted week", "daily_meals": [
  {"meal_number": 1, "meal_name": "Lunch", "description": "Lentil soup",
   "estimated_calories": 600, "ingredients": ["lentils", "carrot"]}
]}
PLAN
"#,
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    cmd_in(&dir)
        .args(["config", "set", "generator.command", script.to_str().unwrap()])
        .assert()
        .success();
    let out = cmd_in(&dir)
        .args(["plan", "generate", "diet", "--week", "2"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["source"], "generated");
    assert_eq!(json["data"]["week_number"], 2);
    assert_eq!(json["data"]["week_summary"], "Scripted week");
    assert_eq!(json["data"]["daily_calorie_target"], 2156);
}

// ── insights ─────────────────────────────────────────────────────────────────

#[test]
fn test_risk_with_no_logs_is_critical() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir).args(["risk"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["risk_level"], "critical");
    assert_eq!(json["data"]["risk_score"], 100);
}

#[test]
fn test_recovery_after_tired_days() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    for date in ["2026-03-02", "2026-03-03", "2026-03-04"] {
        cmd_in(&dir)
            .args(["log", "day", "--energy", "very_tired", "--date", date])
            .assert()
            .success();
    }
    let out = cmd_in(&dir)
        .args(["recovery", "--date", "2026-03-04"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["recovery_needed"], true);
    assert_eq!(json["data"]["fatigue_count"], 3);
}

#[test]
fn test_status_requires_profile() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir).args(["status"]).assert().failure().code(1);

    cmd_in(&dir).args(PROFILE_ARGS).assert().success();
    let out = cmd_in(&dir).args(["status"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["profile"]["bmi_category"], "normal");
}

#[test]
fn test_other_user_is_isolated() {
    let dir = TempDir::new().unwrap();
    setup_profile(&dir);
    cmd_in(&dir)
        .args(["profile", "show", "--user", "someone-else"])
        .assert()
        .failure();
}
