use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::core::forecast::{self, Forecast};
use crate::core::habit::{self, DailyStats, HISTORY_DAYS};
use crate::core::overload::{self, HISTORY_WINDOW, OverloadAdvice};
use crate::core::risk;
use crate::db::Database;
use crate::models::config::Config;
use crate::models::habit::{HabitScoreRecord, ScoreSource};
use crate::models::log::ExerciseLogEntry;
use crate::models::risk::RiskAssessment;

/// Progression advice from the last few sessions of one exercise.
pub fn overload(
    db: &Database,
    config: &Config,
    user_id: &str,
    exercise: &str,
) -> Result<OverloadAdvice> {
    let name = config.resolve_alias(exercise);
    let history = db.exercise_history(user_id, &name, HISTORY_WINDOW as u32)?;
    Ok(overload::analyze(&name, &history))
}

pub fn exercise_history(
    db: &Database,
    config: &Config,
    user_id: &str,
    exercise: &str,
    limit: u32,
) -> Result<Vec<ExerciseLogEntry>> {
    db.exercise_history(user_id, &config.resolve_alias(exercise), limit)
}

#[derive(Debug, Serialize)]
pub struct SessionAdherence {
    pub week_number: u32,
    pub sessions: usize,
    pub adherence_percent: u32,
}

pub fn session_adherence(db: &Database, user_id: &str, week_number: u32) -> Result<SessionAdherence> {
    let entries = db.week_exercise_logs(user_id, week_number)?;
    Ok(SessionAdherence {
        week_number,
        sessions: entries.len(),
        adherence_percent: overload::session_adherence(&entries),
    })
}

#[derive(Debug, Serialize)]
pub struct HabitSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<HabitScoreRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<HabitScoreRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DailyStats>,
}

/// Latest record on each scoring path, and with `with_stats` the 30-day
/// daily-log summary.
pub fn habit_summary(
    db: &Database,
    user_id: &str,
    today: NaiveDate,
    with_stats: bool,
) -> Result<HabitSummary> {
    let daily = db.habit_scores(user_id, ScoreSource::DailyLogs)?.pop();
    let weekly = db.habit_scores(user_id, ScoreSource::WeeklySubmission)?.pop();
    let stats = if with_stats {
        let logs = db.recent_daily_logs(user_id, today, HISTORY_DAYS)?;
        Some(habit::daily_stats(&logs, today))
    } else {
        None
    };
    Ok(HabitSummary {
        daily,
        weekly,
        stats,
    })
}

/// Drop-off risk as of `today`. The habit score is taken over the same
/// trailing window, so a user who stopped logging scores zero.
pub fn risk(db: &Database, user_id: &str, today: NaiveDate) -> Result<RiskAssessment> {
    let logs = db.recent_daily_logs(user_id, today, HISTORY_DAYS)?;
    let habit_score = habit::daily_record(user_id, &logs, today).map_or(0, |r| r.habit_score);
    let streak = habit::daily_streak(&logs, today);
    Ok(risk::assess(&logs, Some(habit_score), streak, today))
}

/// Weeks-to-goal forecast from weekly weigh-ins, falling back to daily
/// ones logged up to `today`.
pub fn forecast(db: &Database, user_id: &str, today: NaiveDate) -> Result<Forecast> {
    let target = db.get_profile(user_id)?.map(|p| p.input().target_weight_kg);
    let submissions = db.weekly_submissions(user_id)?;
    let logs = db.recent_daily_logs(user_id, today, HISTORY_DAYS)?;
    let weights = forecast::weight_series(&submissions, &logs);
    Ok(forecast::forecast(&weights, target))
}
