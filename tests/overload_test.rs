mod common;

use chrono::Duration;
use fitplan::core::logging::{self, ExerciseSession};
use fitplan::core::overload::{self, Recommendation};
use fitplan::core::insights;
use fitplan::models::config::Config;
use fitplan::models::log::{CompletionStatus, Difficulty};

#[test]
fn test_single_session_is_insufficient() {
    let d = common::date(2026, 3, 2);
    let advice = overload::analyze("Barbell Bench Press", &[common::session(d, 3, 3, Difficulty::TooEasy)]);
    assert_eq!(advice.recommendation, Recommendation::Maintain);
    assert!(advice.is_insufficient_data());
    assert_eq!(advice.sessions_analyzed, 1);
}

#[test]
fn test_two_easy_sessions_increase_weight() {
    let d = common::date(2026, 3, 5);
    let history = vec![
        common::session(d, 3, 3, Difficulty::TooEasy),
        common::session(d - Duration::days(3), 3, 3, Difficulty::TooEasy),
    ];
    let advice = overload::analyze("Barbell Bench Press", &history);
    assert_eq!(advice.recommendation, Recommendation::IncreaseWeight);
    assert_eq!(advice.suggested_weight_increase, Some(2.5));
    assert_eq!(advice.suggested_rep_increase, None);
}

#[test]
fn test_completed_just_right_increases_reps() {
    let d = common::date(2026, 3, 5);
    let history = vec![
        common::session(d, 3, 3, Difficulty::JustRight),
        common::session(d - Duration::days(3), 3, 3, Difficulty::TooEasy),
    ];
    let advice = overload::analyze("Barbell Bench Press", &history);
    assert_eq!(advice.recommendation, Recommendation::IncreaseReps);
    assert_eq!(advice.suggested_rep_increase, Some(2));
}

#[test]
fn test_any_hard_set_decreases() {
    let d = common::date(2026, 3, 5);
    let mut hard = common::session(d, 3, 3, Difficulty::TooEasy);
    hard.set_details[2].difficulty = Difficulty::TooHard;
    let history = vec![hard, common::session(d - Duration::days(3), 3, 3, Difficulty::TooEasy)];
    let advice = overload::analyze("Barbell Bench Press", &history);
    assert_eq!(advice.recommendation, Recommendation::Decrease);
    assert_eq!(advice.suggested_weight_decrease, Some(2.5));
}

#[test]
fn test_partial_session_decreases() {
    let d = common::date(2026, 3, 5);
    let history = vec![
        common::session(d, 4, 2, Difficulty::JustRight),
        common::session(d - Duration::days(3), 4, 4, Difficulty::JustRight),
    ];
    assert_eq!(
        overload::analyze("Barbell Bench Press", &history).recommendation,
        Recommendation::Decrease
    );
}

#[test]
fn test_only_two_most_recent_sessions_decide() {
    let d = common::date(2026, 3, 9);
    let history = vec![
        common::session(d, 3, 3, Difficulty::TooEasy),
        common::session(d - Duration::days(3), 3, 3, Difficulty::TooEasy),
        common::session(d - Duration::days(6), 3, 1, Difficulty::TooHard),
    ];
    let advice = overload::analyze("Barbell Bench Press", &history);
    assert_eq!(advice.recommendation, Recommendation::IncreaseWeight);
    assert_eq!(advice.sessions_analyzed, 3);
}

fn easy_session(name: &str, date: chrono::NaiveDate) -> ExerciseSession {
    ExerciseSession {
        name: name.to_string(),
        date,
        sets_planned: 2,
        sets: logging::parse_sets("8x60:easy,8x60:easy").unwrap(),
        status: None,
        week_number: Some(1),
        day_number: Some(1),
        notes: None,
    }
}

#[test]
fn test_logged_sessions_resolve_aliases() {
    let (_dir, db) = common::setup_db();
    let mut config = Config::default();
    config
        .aliases
        .insert("bp".to_string(), "Barbell Bench Press".to_string());

    let first = logging::log_exercise(
        &db,
        &config,
        common::USER,
        easy_session("bp", common::date(2026, 3, 2)),
    )
    .unwrap();
    assert_eq!(first.exercise_name, "Barbell Bench Press");
    assert_eq!(first.completion_status, CompletionStatus::Completed);

    logging::log_exercise(
        &db,
        &config,
        common::USER,
        easy_session("barbell bench press", common::date(2026, 3, 5)),
    )
    .unwrap();

    let advice = insights::overload(&db, &config, common::USER, "BP").unwrap();
    assert_eq!(advice.exercise_name, "Barbell Bench Press");
    assert_eq!(advice.recommendation, Recommendation::IncreaseWeight);

    let history = insights::exercise_history(&db, &config, common::USER, "bp", 10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, common::date(2026, 3, 5));
}

#[test]
fn test_log_exercise_validation() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let mut s = easy_session("Rows", common::date(2026, 3, 2));
    s.sets_planned = 0;
    assert!(logging::log_exercise(&db, &config, common::USER, s).is_err());

    let mut s = easy_session("Rows", common::date(2026, 3, 2));
    s.day_number = Some(8);
    assert!(logging::log_exercise(&db, &config, common::USER, s).is_err());
}

#[test]
fn test_session_adherence_for_week() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let mut partial = easy_session("Rows", common::date(2026, 3, 3));
    partial.sets_planned = 4;
    partial.day_number = Some(2);
    let logged = logging::log_exercise(&db, &config, common::USER, partial).unwrap();
    assert_eq!(logged.completion_status, CompletionStatus::Partial);
    logging::log_exercise(
        &db,
        &config,
        common::USER,
        easy_session("Squats", common::date(2026, 3, 2)),
    )
    .unwrap();

    let adherence = insights::session_adherence(&db, common::USER, 1).unwrap();
    assert_eq!(adherence.sessions, 2);
    assert_eq!(adherence.adherence_percent, 75);

    let empty = insights::session_adherence(&db, common::USER, 2).unwrap();
    assert_eq!((empty.sessions, empty.adherence_percent), (0, 0));
}

#[test]
fn test_parse_sets_rejects_garbage() {
    assert!(logging::parse_sets("ten by sixty").is_err());
    assert!(logging::parse_sets("8x60:brutal").is_err());
    assert!(logging::parse_sets("8x-5").is_err());
}
