use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::core::profile;
use crate::db::Database;
use crate::models::habit::{HabitScoreRecord, ScoreSource};
use crate::models::log::{DailyActivityLog, WeeklySubmission};
use crate::models::plan::PlanKind;
use crate::models::profile::{Goal, UserProfile};

/// Daily logs included in the context document.
const RECENT_LOG_DAYS: u32 = 14;

/// Everything the plan generator is told about a user.
#[derive(Debug, Serialize)]
pub struct ContextDocument {
    pub generated_at: String,
    pub as_of: NaiveDate,
    pub profile: UserProfile,
    pub progress_history: Vec<ProgressEntry>,
    pub habit_scores: Vec<HabitEntry>,
    pub recent_daily_logs: Vec<DailyActivityLog>,
    pub workout_history: Vec<PlanEntry>,
    pub statistics: UserStats,
}

#[derive(Debug, Serialize)]
pub struct ProgressEntry {
    pub week: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    pub workout_adherence: u32,
    pub diet_adherence: u32,
}

#[derive(Debug, Serialize)]
pub struct HabitEntry {
    pub source: ScoreSource,
    pub period: String,
    pub score: u32,
    pub streak: u32,
}

#[derive(Debug, Serialize)]
pub struct PlanEntry {
    pub week: u32,
    pub training_days: usize,
    pub day_types: Vec<String>,
    pub adjusted: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserStats {
    pub total_weeks_tracked: usize,
    pub average_workout_adherence: u32,
    pub average_diet_adherence: u32,
    pub total_weight_change_kg: f64,
    pub average_weekly_weight_change: f64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub average_habit_score: u32,
    pub consistency_rating: String,
    pub progress_trend: String,
}

pub fn consistency_rating(workout: u32, diet: u32) -> &'static str {
    if workout >= 80 && diet >= 80 {
        "Excellent"
    } else if workout >= 60 && diet >= 60 {
        "Good"
    } else if workout >= 40 && diet >= 40 {
        "Fair"
    } else {
        "Needs Improvement"
    }
}

/// How total weight change reads against the user's goal.
pub fn progress_trend(goal: Goal, change_kg: f64) -> &'static str {
    match goal {
        Goal::WeightLoss => match change_kg {
            c if c < -2.0 => "Excellent - Losing weight steadily",
            c if c < 0.0 => "Good - Losing weight",
            c if c == 0.0 => "Plateau - No change",
            _ => "Gaining weight - Need adjustment",
        },
        Goal::MuscleGain => match change_kg {
            c if c > 2.0 => "Excellent - Gaining weight steadily",
            c if c > 0.0 => "Good - Gaining weight",
            c if c == 0.0 => "Plateau - No change",
            _ => "Losing weight - Need adjustment",
        },
        Goal::Maintenance => {
            if change_kg.abs() <= 1.0 {
                "Stable - Maintaining weight"
            } else {
                "Drifting - Need adjustment"
            }
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (value * f).round() / f
}

/// Aggregate statistics over weekly submissions and weekly habit scores,
/// both in week order.
pub fn user_stats(goal: Goal, submissions: &[WeeklySubmission], weekly_scores: &[HabitScoreRecord]) -> UserStats {
    let mut stats = UserStats {
        total_weeks_tracked: submissions.len(),
        average_workout_adherence: 0,
        average_diet_adherence: 0,
        total_weight_change_kg: 0.0,
        average_weekly_weight_change: 0.0,
        current_streak: 0,
        best_streak: 0,
        average_habit_score: 0,
        consistency_rating: "Unknown".to_string(),
        progress_trend: "Unknown".to_string(),
    };
    if submissions.is_empty() {
        return stats;
    }

    let n = submissions.len() as f64;
    let workout: u32 = submissions.iter().map(|s| s.workout_adherence_percent).sum();
    let diet: u32 = submissions.iter().map(|s| s.diet_adherence_percent).sum();
    stats.average_workout_adherence = (workout as f64 / n).round() as u32;
    stats.average_diet_adherence = (diet as f64 / n).round() as u32;

    let weights: Vec<f64> = submissions.iter().filter_map(|s| s.weight_kg).collect();
    if let (Some(first), Some(last)) = (weights.first(), weights.last()) {
        stats.total_weight_change_kg = round_to(last - first, 1);
        stats.average_weekly_weight_change = round_to(stats.total_weight_change_kg / n, 2);
    }

    if let Some(latest) = weekly_scores.last() {
        let total: u32 = weekly_scores.iter().map(|h| h.habit_score).sum();
        stats.average_habit_score = (total as f64 / weekly_scores.len() as f64).round() as u32;
        stats.current_streak = latest.streak_count;
        stats.best_streak = weekly_scores.iter().map(|h| h.streak_count).max().unwrap_or(0);
    }

    stats.consistency_rating =
        consistency_rating(stats.average_workout_adherence, stats.average_diet_adherence).to_string();
    stats.progress_trend = progress_trend(goal, stats.total_weight_change_kg).to_string();
    stats
}

/// Assemble the context document for a user as of `today`.
pub fn compute(db: &Database, user_id: &str, today: NaiveDate) -> Result<ContextDocument> {
    let profile = profile::require(db, user_id)?;
    let submissions = db.weekly_submissions(user_id)?;
    let weekly_scores = db.habit_scores(user_id, ScoreSource::WeeklySubmission)?;
    let daily_scores = db.habit_scores(user_id, ScoreSource::DailyLogs)?;
    let recent_daily_logs = db.recent_daily_logs(user_id, today, RECENT_LOG_DAYS)?;

    let mut workout_history = Vec::new();
    for stored in db.list_plans(user_id, PlanKind::Workout)? {
        if let Some(plan) = db.get_workout_plan(user_id, stored.week_number)? {
            workout_history.push(PlanEntry {
                week: plan.week_number,
                training_days: plan.training_days(),
                day_types: plan
                    .workouts
                    .iter()
                    .filter(|d| !d.rest_day)
                    .map(|d| d.day_type.clone())
                    .collect(),
                adjusted: plan.adjusted,
            });
        }
    }

    let statistics = user_stats(profile.input().goal, &submissions, &weekly_scores);
    let habit_scores = weekly_scores
        .iter()
        .chain(daily_scores.last())
        .map(|h| HabitEntry {
            source: h.source,
            period: h.period.clone(),
            score: h.habit_score,
            streak: h.streak_count,
        })
        .collect();

    Ok(ContextDocument {
        generated_at: Utc::now().to_rfc3339(),
        as_of: today,
        profile,
        progress_history: submissions
            .iter()
            .map(|s| ProgressEntry {
                week: s.week_number,
                weight_kg: s.weight_kg,
                workout_adherence: s.workout_adherence_percent,
                diet_adherence: s.diet_adherence_percent,
            })
            .collect(),
        habit_scores,
        recent_daily_logs,
        workout_history,
        statistics,
    })
}
