mod common;

use chrono::Duration;
use fitplan::core::context::{self, consistency_rating, progress_trend};
use fitplan::core::forecast::{self, ForecastStatus};
use fitplan::core::{insights, logging, planner, risk, status};
use fitplan::error::FitError;
use fitplan::models::habit::ScoreSource;
use fitplan::models::log::{CompletionStatus, DaySubmission, DietAdherence, EnergyLevel};
use fitplan::models::profile::Goal;
use fitplan::models::risk::RiskLevel;

fn week(workout: CompletionStatus, diet: DietAdherence) -> Vec<DaySubmission> {
    (1..=7)
        .map(|n| DaySubmission {
            day_number: n,
            workout,
            diet,
        })
        .collect()
}

// ── risk ─────────────────────────────────────────────────────────────────────

#[test]
fn test_no_logs_is_critical() {
    let today = common::date(2026, 3, 8);
    let r = risk::assess(&[], None, 0, today);
    assert!(r.at_risk);
    assert_eq!(r.risk_level, RiskLevel::Critical);
    assert_eq!(r.risk_score, 100);
    assert_eq!(r.days_since_last_log, None);
}

#[test]
fn test_consistent_week_is_low_risk() {
    let today = common::date(2026, 3, 8);
    let logs: Vec<_> = (0..7)
        .map(|i| common::day_log(today - Duration::days(i), true, true))
        .collect();
    let r = risk::assess(&logs, Some(90), 7, today);
    assert!(!r.at_risk);
    assert_eq!(r.risk_score, 0);
    assert_eq!(r.risk_level, RiskLevel::Low);
    assert!(r.reasons.is_empty());
    assert!(r.positive_notes.iter().any(|n| n == "Logged today"));
    assert_eq!(r.workout_rate_7d, Some(100));
}

#[test]
fn test_lapsed_user_accumulates_signals() {
    let today = common::date(2026, 3, 8);
    let logs = vec![common::day_log(today - Duration::days(5), false, false)];
    let r = risk::assess(&logs, None, 0, today);
    // 25 inactivity + 30 workout + 25 diet + 10 streak
    assert_eq!(r.risk_score, 90);
    assert_eq!(r.risk_level, RiskLevel::Critical);
    assert_eq!(r.days_since_last_log, Some(5));
    assert_eq!(r.reasons.len(), r.recommendations.len());
}

#[test]
fn test_fatigue_and_poor_sleep_flagged() {
    let today = common::date(2026, 3, 8);
    let logs: Vec<_> = (0..7)
        .map(|i| {
            let mut l = common::tired_log(today - Duration::days(i), EnergyLevel::VeryTired);
            l.sleep_hours = 5.0;
            l
        })
        .collect();
    let r = risk::assess(&logs, Some(100), 7, today);
    assert_eq!(r.risk_score, 20);
    assert_eq!(r.risk_level, RiskLevel::Low);
    assert!(r.at_risk);
    assert!(r.reasons.iter().any(|m| m.contains("Low energy on 7")));
    assert!(r.reasons.iter().any(|m| m.contains("5.0 hours")));
}

#[test]
fn test_score_sums_every_signal() {
    let today = common::date(2026, 3, 30);
    let logs: Vec<_> = (0..5)
        .map(|i| {
            let mut l = common::tired_log(today - Duration::days(10 + i), EnergyLevel::VeryTired);
            l.workout_completed = false;
            l.diet_followed = false;
            l
        })
        .collect();
    let r = risk::assess(&logs, Some(10), 0, today);
    // 25 inactivity + 30 workout + 25 diet + 20 idle run + 15 habit + 10 streak
    assert_eq!(r.risk_score, 125);
    assert_eq!(r.risk_level, RiskLevel::Critical);
    assert_eq!(r.reasons.len(), 6);
}

#[test]
fn test_risk_scores_habit_over_trailing_logs() {
    let (_dir, db) = common::setup_db();
    let today = common::date(2026, 3, 8);
    logging::log_day(&db, common::day_log(today, true, true)).unwrap();
    let r = insights::risk(&db, common::USER, today).unwrap();
    // 1/7 of the window: workout 14%, diet 14%, habit 14
    assert_eq!(r.workout_rate_7d, Some(14));
    assert!(r.reasons.iter().any(|m| m == "Habit score is 14"));
    assert!(!r.reasons.iter().any(|m| m == "No active streak"));
}

#[test]
fn test_lapsed_user_gets_no_credit_for_old_habit() {
    let (_dir, db) = common::setup_db();
    let lapse_start = common::date(2026, 2, 1);
    for i in 0..7 {
        logging::log_day(&db, common::day_log(lapse_start + Duration::days(i), true, true)).unwrap();
    }
    let stored = db.habit_scores(common::USER, ScoreSource::DailyLogs).unwrap();
    assert_eq!(stored.last().unwrap().habit_score, 100);

    let r = insights::risk(&db, common::USER, common::date(2026, 3, 8)).unwrap();
    // 25 inactivity + 30 workout + 25 diet + 15 habit + 10 streak
    assert_eq!(r.risk_score, 105);
    assert!(r.reasons.iter().any(|m| m == "Habit score is 0"));
    assert!(!r.positive_notes.iter().any(|n| n == "Habit score is excellent"));
}

// ── forecast ─────────────────────────────────────────────────────────────────

#[test]
fn test_forecast_needs_two_weights() {
    let f = forecast::forecast(&[80.0], Some(70.0));
    assert_eq!(f.status, ForecastStatus::InsufficientData);
    assert_eq!(f.estimated_weeks, None);
    assert_eq!(f.confidence, "Low - Need more data");
}

#[test]
fn test_forecast_from_average_change() {
    let f = forecast::forecast(&[80.0, 79.0, 78.0], Some(70.0));
    assert_eq!(f.status, ForecastStatus::Estimated);
    assert_eq!(f.avg_weekly_change, Some(-1.0));
    assert_eq!(f.estimated_weeks, Some(5));
    assert_eq!(f.remaining_kg, Some(-8.0));
    assert_eq!(f.weeks_at_current_gap, Some(8));
    assert_eq!(f.confidence, "Medium");
}

#[test]
fn test_forecast_flat_weight() {
    let f = forecast::forecast(&[75.0, 75.0], None);
    assert_eq!(f.status, ForecastStatus::NoChange);
    assert_eq!(f.estimated_weeks, None);
}

#[test]
fn test_forecast_reads_weekly_weigh_ins() {
    let (_dir, db) = common::setup_db();
    common::seed_profile(&db);
    let good = week(CompletionStatus::Completed, DietAdherence::Followed);
    logging::submit_week(&db, common::USER, 1, good.clone(), Some(70.0)).unwrap();
    logging::submit_week(&db, common::USER, 2, good.clone(), None).unwrap();
    logging::submit_week(&db, common::USER, 3, good, Some(69.0)).unwrap();
    let f = insights::forecast(&db, common::USER, common::date(2026, 3, 8)).unwrap();
    assert_eq!(f.observations, 2);
    assert_eq!(f.estimated_weeks, Some(5));
    assert_eq!(f.remaining_kg, Some(-4.0));
    assert_eq!(f.weeks_at_current_gap, Some(4));
}

#[test]
fn test_weight_series_keeps_last_daily_weigh_in_per_week() {
    let weighed = |d: chrono::NaiveDate, kg: f64| {
        let mut l = common::day_log(d, true, true);
        l.weight_kg = Some(kg);
        l
    };
    let logs = vec![
        weighed(common::date(2026, 3, 16), 70.5),
        weighed(common::date(2026, 3, 2), 72.0),
        weighed(common::date(2026, 3, 4), 71.5),
        common::day_log(common::date(2026, 3, 10), true, true),
        weighed(common::date(2026, 3, 9), 71.0),
    ];
    assert_eq!(forecast::weight_series(&[], &logs), vec![71.5, 71.0, 70.5]);
}

#[test]
fn test_forecast_falls_back_to_daily_weigh_ins() {
    let (_dir, db) = common::setup_db();
    common::seed_profile(&db);
    for (d, kg) in [(2, 72.0), (9, 71.5), (16, 71.0)] {
        let mut l = common::day_log(common::date(2026, 3, d), true, true);
        l.weight_kg = Some(kg);
        logging::log_day(&db, l).unwrap();
    }
    let f = insights::forecast(&db, common::USER, common::date(2026, 3, 16)).unwrap();
    assert_eq!(f.status, ForecastStatus::Estimated);
    assert_eq!(f.observations, 3);
    assert_eq!(f.avg_weekly_change, Some(-0.5));
    assert_eq!(f.estimated_weeks, Some(10));
    assert_eq!(f.remaining_kg, Some(-6.0));
    assert_eq!(f.weeks_at_current_gap, Some(12));
}

// ── context ──────────────────────────────────────────────────────────────────

#[test]
fn test_consistency_and_trend_labels() {
    assert_eq!(consistency_rating(85, 80), "Excellent");
    assert_eq!(consistency_rating(85, 65), "Good");
    assert_eq!(consistency_rating(45, 90), "Fair");
    assert_eq!(consistency_rating(30, 90), "Needs Improvement");
    assert_eq!(progress_trend(Goal::WeightLoss, -2.5), "Excellent - Losing weight steadily");
    assert_eq!(progress_trend(Goal::WeightLoss, 0.0), "Plateau - No change");
    assert_eq!(progress_trend(Goal::MuscleGain, -0.5), "Losing weight - Need adjustment");
    assert_eq!(progress_trend(Goal::Maintenance, 0.8), "Stable - Maintaining weight");
}

#[test]
fn test_user_stats_without_submissions() {
    let stats = context::user_stats(Goal::WeightLoss, &[], &[]);
    assert_eq!(stats.total_weeks_tracked, 0);
    assert_eq!(stats.consistency_rating, "Unknown");
    assert_eq!(stats.progress_trend, "Unknown");
}

#[test]
fn test_context_document_gathers_history() {
    let (_dir, db) = common::setup_db();
    common::seed_profile(&db);
    let today = common::date(2026, 3, 8);
    logging::submit_week(&db, common::USER, 1, week(CompletionStatus::Completed, DietAdherence::Followed), Some(70.0)).unwrap();
    logging::submit_week(&db, common::USER, 2, week(CompletionStatus::Partial, DietAdherence::Mostly), Some(68.5)).unwrap();
    logging::log_day(&db, common::day_log(today, true, true)).unwrap();
    planner::generate_workout(&db, common::USER, None, today, None).unwrap();

    let doc = context::compute(&db, common::USER, today).unwrap();
    assert_eq!(doc.progress_history.len(), 2);
    assert_eq!(doc.recent_daily_logs.len(), 1);
    assert_eq!(doc.workout_history.len(), 1);
    assert_eq!(doc.workout_history[0].training_days, 4);
    // Two weekly records plus the latest daily one
    assert_eq!(doc.habit_scores.len(), 3);

    let s = &doc.statistics;
    assert_eq!(s.total_weeks_tracked, 2);
    assert_eq!(s.average_workout_adherence, 75);
    assert_eq!(s.average_diet_adherence, 88);
    assert_eq!(s.total_weight_change_kg, -1.5);
    assert_eq!(s.average_weekly_weight_change, -0.75);
    assert_eq!(s.current_streak, 2);
    assert_eq!(s.best_streak, 2);
    assert_eq!(s.consistency_rating, "Good");
    assert_eq!(s.progress_trend, "Good - Losing weight");

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["profile"]["user_id"], common::USER);
}

#[test]
fn test_context_requires_profile() {
    let (_dir, db) = common::setup_db();
    let err = context::compute(&db, common::USER, common::date(2026, 3, 8)).unwrap_err();
    assert_eq!(err.downcast_ref::<FitError>().unwrap().code(), "not_found");
}

// ── status ───────────────────────────────────────────────────────────────────

#[test]
fn test_status_overview() {
    let (_dir, db) = common::setup_db();
    common::seed_profile(&db);
    let today = common::date(2026, 3, 8);

    let empty = status::compute(&db, common::USER, today).unwrap();
    assert_eq!(empty.profile.bmi, 22.9);
    assert_eq!(empty.profile.bmi_category, "normal");
    assert_eq!(empty.risk_level, RiskLevel::Critical);
    assert!(empty.today.is_none());
    assert_eq!(empty.current_workout_week, None);

    logging::log_day(&db, common::day_log(today, true, true)).unwrap();
    planner::generate_workout(&db, common::USER, None, today, None).unwrap();
    let s = status::compute(&db, common::USER, today).unwrap();
    assert_eq!(s.streak_days, 1);
    assert_eq!(s.habit_score, Some(14));
    assert_eq!(s.current_workout_week, Some(1));
    assert!(!s.recovery_needed);
}

#[test]
fn test_status_streak_reaches_past_two_months() {
    let (_dir, db) = common::setup_db();
    common::seed_profile(&db);
    let today = common::date(2026, 3, 31);
    for i in 0..75 {
        db.upsert_daily_log(&common::day_log(today - Duration::days(i), true, true))
            .unwrap();
    }
    let s = status::compute(&db, common::USER, today).unwrap();
    assert_eq!(s.streak_days, 75);
}
