mod common;

use chrono::{Duration, NaiveDate};
use fitplan::core::{habit, insights, logging};
use fitplan::error::FitError;
use fitplan::models::habit::ScoreSource;
use fitplan::models::log::{CompletionStatus, DaySubmission, DietAdherence};

fn day(n: u32, workout: CompletionStatus, diet: DietAdherence) -> DaySubmission {
    DaySubmission {
        day_number: n,
        workout,
        diet,
    }
}

fn perfect_week() -> Vec<DaySubmission> {
    (1..=7)
        .map(|n| day(n, CompletionStatus::Completed, DietAdherence::Followed))
        .collect()
}

fn lost_week() -> Vec<DaySubmission> {
    (1..=7)
        .map(|n| day(n, CompletionStatus::Skipped, DietAdherence::Deviated))
        .collect()
}

// ── weekly path ──────────────────────────────────────────────────────────────

#[test]
fn test_weekly_score_weights_workout_over_diet() {
    use CompletionStatus::*;
    use DietAdherence::*;
    let days = vec![
        day(1, Completed, Followed),
        day(2, Completed, Followed),
        day(3, Completed, Followed),
        day(4, Completed, Deviated),
        day(5, Skipped, Deviated),
    ];
    assert_eq!(habit::weekly_adherence(&days), (80, 60));
    let record = habit::weekly_record(common::USER, 3, &days, None);
    assert_eq!(record.habit_score, 72);
    assert_eq!(record.period, "week-3");
    assert_eq!(record.streak_count, 1);
}

#[test]
fn test_weekly_streak_chains_on_good_weeks() {
    let (_dir, db) = common::setup_db();
    let w1 = logging::submit_week(&db, common::USER, 1, perfect_week(), Some(80.0)).unwrap();
    let w2 = logging::submit_week(&db, common::USER, 2, perfect_week(), Some(79.5)).unwrap();
    let w3 = logging::submit_week(&db, common::USER, 3, lost_week(), None).unwrap();
    let w4 = logging::submit_week(&db, common::USER, 4, perfect_week(), None).unwrap();

    assert_eq!(w1.habit.streak_count, 1);
    assert_eq!(w2.habit.streak_count, 2);
    // The previous week was good, so a bad week still extends the count
    assert_eq!(w3.habit.habit_score, 0);
    assert_eq!(w3.habit.streak_count, 3);
    assert_eq!(w4.habit.streak_count, 1);
}

#[test]
fn test_resubmitting_week_replaces_it() {
    let (_dir, db) = common::setup_db();
    logging::submit_week(&db, common::USER, 1, lost_week(), None).unwrap();
    let again = logging::submit_week(&db, common::USER, 1, perfect_week(), Some(70.0)).unwrap();
    assert_eq!(again.submission.workout_adherence_percent, 100);

    let subs = db.weekly_submissions(common::USER).unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].weight_kg, Some(70.0));
    let scores = db.habit_scores(common::USER, ScoreSource::WeeklySubmission).unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].habit_score, 100);
}

#[test]
fn test_resubmitting_earlier_week_rechains_later_streaks() {
    let (_dir, db) = common::setup_db();
    for week in 1..=3 {
        logging::submit_week(&db, common::USER, week, perfect_week(), None).unwrap();
    }
    let streak = |week: u32| {
        db.get_habit_score(common::USER, ScoreSource::WeeklySubmission, &habit::weekly_period(week))
            .unwrap()
            .unwrap()
            .streak_count
    };
    assert_eq!((streak(1), streak(2), streak(3)), (1, 2, 3));

    logging::submit_week(&db, common::USER, 1, lost_week(), None).unwrap();
    assert_eq!((streak(1), streak(2), streak(3)), (1, 1, 2));
}

#[test]
fn test_submit_week_validation() {
    let (_dir, db) = common::setup_db();
    let code = |r: anyhow::Result<logging::WeekSubmitted>| {
        r.unwrap_err().downcast_ref::<FitError>().unwrap().code()
    };
    assert_eq!(code(logging::submit_week(&db, common::USER, 0, perfect_week(), None)), "validation_error");
    assert_eq!(code(logging::submit_week(&db, common::USER, 1, Vec::new(), None)), "validation_error");

    let mut repeated = perfect_week();
    repeated.truncate(2);
    repeated[1].day_number = 1;
    assert_eq!(code(logging::submit_week(&db, common::USER, 1, repeated, None)), "validation_error");

    assert_eq!(
        code(logging::submit_week(&db, common::USER, 1, perfect_week(), Some(12.0))),
        "validation_error"
    );
    assert!(db.weekly_submissions(common::USER).unwrap().is_empty());
}

#[test]
fn test_parse_days_numbers_from_one() {
    let days = logging::parse_days("completed:followed, partial:mostly,skipped:deviated").unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[2].day_number, 3);
    assert_eq!(days[1].workout, CompletionStatus::Partial);
    assert_eq!(days[1].diet, DietAdherence::Mostly);
    assert!(logging::parse_days("completed").is_err());
    assert!(logging::parse_days("completed:sometimes").is_err());
}

// ── daily path ───────────────────────────────────────────────────────────────

#[test]
fn test_daily_streak_counts_back_from_today() {
    let today = common::date(2026, 3, 8);
    let logs = vec![
        common::day_log(today, true, true),
        common::day_log(today - Duration::days(1), true, true),
        common::day_log(today - Duration::days(2), true, false),
        common::day_log(today - Duration::days(3), true, true),
    ];
    assert_eq!(habit::daily_streak(&logs, today), 2);
    assert_eq!(habit::best_streak(&logs), 2);
}

#[test]
fn test_daily_streak_breaks_on_missing_day() {
    let today = common::date(2026, 3, 8);
    let logs = vec![
        common::day_log(today, true, true),
        common::day_log(today - Duration::days(2), true, true),
    ];
    assert_eq!(habit::daily_streak(&logs, today), 1);
    // Nothing logged today
    assert_eq!(habit::daily_streak(&logs, today + Duration::days(1)), 0);
}

#[test]
fn test_daily_record_rates_over_seven_days() {
    let today = common::date(2026, 3, 4);
    let logs = vec![
        common::day_log(today, true, true),
        common::day_log(today - Duration::days(1), true, false),
        common::day_log(today - Duration::days(10), true, true),
    ];
    let record = habit::daily_record(common::USER, &logs, today).unwrap();
    // 2/7 and 1/7 of the window
    assert_eq!(record.workout_adherence_percent, 29);
    assert_eq!(record.diet_adherence_percent, 14);
    assert_eq!(record.habit_score, 22);
    assert_eq!(record.period, "2026-W10");
    assert_eq!(record.window_start, Some(common::date(2026, 2, 26)));
    assert_eq!(record.streak_count, 1);

    assert!(habit::daily_record(common::USER, &logs, today + Duration::days(30)).is_none());
}

#[test]
fn test_log_day_refreshes_score_idempotently() {
    let (_dir, db) = common::setup_db();
    let monday = common::date(2026, 3, 2);
    for i in 0..3 {
        logging::log_day(&db, common::day_log(monday + Duration::days(i), true, true)).unwrap();
    }
    let wednesday = monday + Duration::days(2);
    let first = logging::log_day(&db, common::day_log(wednesday, true, true)).unwrap();
    let second = logging::log_day(&db, common::day_log(wednesday, true, true)).unwrap();
    assert_eq!(first.habit, second.habit);

    let habit = second.habit.unwrap();
    assert_eq!(habit.streak_count, 3);
    assert_eq!(habit.workout_adherence_percent, 43);

    let daily = db.habit_scores(common::USER, ScoreSource::DailyLogs).unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0], habit);
}

#[test]
fn test_daily_records_ignore_entry_order() {
    let monday = common::date(2026, 3, 2);
    let wednesday = common::date(2026, 3, 4);
    let stored = |order: [NaiveDate; 2]| {
        let (_dir, db) = common::setup_db();
        for d in order {
            logging::log_day(&db, common::day_log(d, true, true)).unwrap();
        }
        db.habit_scores(common::USER, ScoreSource::DailyLogs).unwrap()
    };

    let forward = stored([monday, wednesday]);
    let backward = stored([wednesday, monday]);
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 1);
    assert_eq!(forward[0].habit_score, 29);
    assert_eq!(forward[0].window_end, Some(wednesday));
}

#[test]
fn test_backfilled_day_rescores_later_week() {
    let (_dir, db) = common::setup_db();
    let monday = common::date(2026, 3, 9);
    logging::log_day(&db, common::day_log(monday, true, true)).unwrap();
    let week11 = |db: &fitplan::db::Database| {
        db.get_habit_score(common::USER, ScoreSource::DailyLogs, "2026-W11")
            .unwrap()
            .unwrap()
    };
    assert_eq!(week11(&db).streak_count, 1);

    let sunday = monday - Duration::days(1);
    let logged = logging::log_day(&db, common::day_log(sunday, true, true)).unwrap();
    let own_week = logged.habit.unwrap();
    assert_eq!(own_week.period, "2026-W10");
    assert_eq!(own_week.window_end, Some(sunday));

    let later = week11(&db);
    assert_eq!(later.streak_count, 2);
    assert_eq!(later.workout_adherence_percent, 29);
    assert_eq!(later.window_end, Some(monday));
}

#[test]
fn test_log_day_replaces_same_date() {
    let (_dir, db) = common::setup_db();
    let d = common::date(2026, 3, 2);
    logging::log_day(&db, common::day_log(d, true, true)).unwrap();
    let updated = logging::log_day(&db, common::day_log(d, false, false)).unwrap();
    assert_eq!(updated.habit.unwrap().habit_score, 0);
    let stored = db.get_daily_log(common::USER, d).unwrap().unwrap();
    assert!(!stored.workout_completed);
}

#[test]
fn test_log_day_validation() {
    let (_dir, db) = common::setup_db();
    let mut log = common::day_log(common::date(2026, 3, 2), true, true);
    log.sleep_hours = 25.0;
    let err = logging::log_day(&db, log).unwrap_err();
    assert_eq!(err.downcast_ref::<FitError>().unwrap().code(), "validation_error");

    let mut log = common::day_log(common::date(2026, 3, 2), true, true);
    log.weight_kg = Some(700.0);
    assert!(logging::log_day(&db, log).is_err());
    assert!(db.get_daily_log(common::USER, common::date(2026, 3, 2)).unwrap().is_none());
}

#[test]
fn test_habit_summary_with_stats() {
    let (_dir, db) = common::setup_db();
    let today = common::date(2026, 3, 10);
    for i in (0..4).rev() {
        logging::log_day(&db, common::day_log(today - Duration::days(i), true, i % 2 == 0)).unwrap();
    }
    logging::submit_week(&db, common::USER, 1, perfect_week(), None).unwrap();

    let summary = insights::habit_summary(&db, common::USER, today, true).unwrap();
    assert_eq!(summary.daily.as_ref().unwrap().window_end, Some(today));
    assert_eq!(summary.weekly.as_ref().unwrap().week_number, Some(1));
    let stats = summary.stats.unwrap();
    assert_eq!(stats.total_days_logged, 4);
    assert_eq!(stats.workout_completion_rate, 100);
    assert_eq!(stats.diet_completion_rate, 50);
    assert_eq!(stats.streak, 1);

    let bare = insights::habit_summary(&db, common::USER, today, false).unwrap();
    assert!(bare.stats.is_none());
}
