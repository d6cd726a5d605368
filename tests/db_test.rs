mod common;

use chrono::Duration;
use fitplan::db::Database;
use fitplan::models::habit::ScoreSource;
use fitplan::models::log::{Difficulty, EnergyLevel};
use fitplan::models::plan::PlanKind;

#[test]
fn test_reopen_keeps_data() {
    let (dir, db) = common::setup_db();
    common::seed_profile(&db);
    drop(db);

    let reopened = Database::open(&dir.path().join("test.db")).unwrap();
    assert!(reopened.get_profile(common::USER).unwrap().is_some());
}

#[test]
fn test_profile_lists_round_trip() {
    let (_dir, db) = common::setup_db();
    let p = common::profile_with(|i| {
        i.allergies = vec!["peanuts".to_string(), "shellfish".to_string()];
        i.injuries = vec!["left knee".to_string()];
        i.dietary_preference = "vegetarian".to_string();
    });
    db.upsert_profile(&p).unwrap();
    let loaded = db.get_profile(common::USER).unwrap().unwrap();
    assert_eq!(loaded.input(), p.input());
    assert_eq!(loaded.targets(), p.targets());
    assert!(db.get_profile("someone-else").unwrap().is_none());
}

#[test]
fn test_daily_log_upsert_and_range() {
    let (_dir, db) = common::setup_db();
    let today = common::date(2026, 3, 8);
    for i in 0..10 {
        db.upsert_daily_log(&common::day_log(today - Duration::days(i), true, false))
            .unwrap();
    }
    let mut replaced = common::tired_log(today, EnergyLevel::VeryTired);
    replaced.weight_kg = Some(71.2);
    replaced.notes = Some("late night".to_string());
    db.upsert_daily_log(&replaced).unwrap();

    let stored = db.get_daily_log(common::USER, today).unwrap().unwrap();
    assert_eq!(stored, replaced);

    let week = db
        .daily_logs_between(common::USER, today - Duration::days(6), today)
        .unwrap();
    assert_eq!(week.len(), 7);
    assert_eq!(week[0].date, today);

    let recent = db.recent_daily_logs(common::USER, today - Duration::days(1), 3).unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].date, today - Duration::days(1));
}

#[test]
fn test_exercise_log_keeps_set_details() {
    let (_dir, db) = common::setup_db();
    let d = common::date(2026, 3, 2);
    let mut entry = common::session(d, 4, 3, Difficulty::TooHard);
    entry.week_number = Some(2);
    entry.day_number = Some(1);
    db.insert_exercise_log(&entry).unwrap();

    let history = db
        .exercise_history(common::USER, "barbell bench press", 5)
        .unwrap();
    assert_eq!(history.len(), 1);
    let loaded = &history[0];
    assert_eq!(loaded.id, entry.id);
    assert_eq!(loaded.set_details, entry.set_details);
    assert_eq!(loaded.completion_status, entry.completion_status);
    assert_eq!(loaded.sets_planned, 4);

    assert_eq!(db.week_exercise_logs(common::USER, 2).unwrap().len(), 1);
    assert!(db.week_exercise_logs(common::USER, 3).unwrap().is_empty());
}

#[test]
fn test_habit_score_unique_per_period() {
    let (_dir, db) = common::setup_db();
    let today = common::date(2026, 3, 4);
    let logs = vec![common::day_log(today, true, true)];
    let first = fitplan::core::habit::daily_record(common::USER, &logs, today).unwrap();
    db.upsert_habit_score(&first).unwrap();

    let mut second = first.clone();
    second.habit_score = 99;
    db.upsert_habit_score(&second).unwrap();

    let all = db.habit_scores(common::USER, ScoreSource::DailyLogs).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].habit_score, 99);
    let got = db
        .get_habit_score(common::USER, ScoreSource::DailyLogs, &first.period)
        .unwrap();
    assert_eq!(got, Some(second));
    assert!(db.habit_scores(common::USER, ScoreSource::WeeklySubmission).unwrap().is_empty());
}

#[test]
fn test_plans_are_keyed_by_kind_and_week() {
    let (_dir, db) = common::setup_db();
    let p = common::seed_profile(&db);
    let workout = fitplan::core::workout::template_plan(&p, 1, EnergyLevel::Normal);
    let diet = fitplan::core::diet::template_plan(&p, 1);
    db.save_workout_plan(&workout).unwrap();
    db.save_diet_plan(&diet).unwrap();

    assert_eq!(db.latest_plan_week(common::USER, PlanKind::Workout).unwrap(), Some(1));
    assert_eq!(db.get_workout_plan(common::USER, 1).unwrap(), Some(workout));
    assert_eq!(db.get_diet_plan(common::USER, 1).unwrap(), Some(diet));
    assert_eq!(db.get_diet_plan(common::USER, 2).unwrap(), None);
    assert_eq!(db.list_plans(common::USER, PlanKind::Diet).unwrap().len(), 1);
}

#[test]
fn test_failed_transaction_rolls_back() {
    let (_dir, db) = common::setup_db();
    let d = common::date(2026, 3, 2);
    let result: anyhow::Result<()> = db.transaction(|db| {
        db.upsert_daily_log(&common::day_log(d, true, true))?;
        anyhow::bail!("interrupted")
    });
    assert!(result.is_err());
    assert!(db.get_daily_log(common::USER, d).unwrap().is_none());

    db.transaction(|db| db.upsert_daily_log(&common::day_log(d, true, true)))
        .unwrap();
    assert!(db.get_daily_log(common::USER, d).unwrap().is_some());
}
