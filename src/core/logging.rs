use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::core::habit;
use crate::db::Database;
use crate::error::FitError;
use crate::models::config::Config;
use crate::models::habit::HabitScoreRecord;
use crate::models::log::{
    CompletionStatus, DailyActivityLog, DaySubmission, Difficulty, ExerciseLogEntry, SetDetail,
    WeeklySubmission,
};

#[derive(Debug, Serialize)]
pub struct DayLogged {
    pub log: DailyActivityLog,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habit: Option<HabitScoreRecord>,
}

/// Store (or replace) a day's log and refresh the daily habit records it
/// affects. Returns the record for the week the day falls in.
pub fn log_day(db: &Database, log: DailyActivityLog) -> Result<DayLogged> {
    if !(0.0..=24.0).contains(&log.sleep_hours) {
        return Err(FitError::Validation(format!(
            "sleep hours must be between 0 and 24 (got {})",
            log.sleep_hours
        ))
        .into());
    }
    if let Some(w) = log.weight_kg
        && !(30.0..=500.0).contains(&w)
    {
        return Err(FitError::Validation(format!("weight must be between 30 and 500 (got {})", w)).into());
    }

    let habit = db.transaction(|db| {
        db.upsert_daily_log(&log)?;
        refresh_daily_habits(db, &log.user_id, log.date)
    })?;
    Ok(DayLogged { log, habit })
}

/// Recompute the daily-log habit record of every ISO week from the one
/// containing `from` onward. Each week is scored as of its last logged
/// day, so the stored records depend only on the logs and never on the
/// order they were entered. Returns the record for `from`'s week.
pub fn refresh_daily_habits(
    db: &Database,
    user_id: &str,
    from: NaiveDate,
) -> Result<Option<HabitScoreRecord>> {
    let dates = db.daily_log_dates_since(user_id, habit::iso_week_start(from))?;
    let mut week_ends: Vec<NaiveDate> = Vec::new();
    for d in dates {
        match week_ends.last_mut() {
            Some(last) if habit::iso_week_start(*last) == habit::iso_week_start(d) => *last = d,
            _ => week_ends.push(d),
        }
    }

    let period = habit::iso_period(from);
    let mut refreshed = None;
    for as_of in week_ends {
        let logs = db.recent_daily_logs(user_id, as_of, habit::HISTORY_DAYS)?;
        let Some(record) = habit::daily_record(user_id, &logs, as_of) else {
            continue;
        };
        db.upsert_habit_score(&record)?;
        debug!(
            user = user_id,
            period = %record.period,
            score = record.habit_score,
            streak = record.streak_count,
            "recomputed daily habit score"
        );
        if record.period == period {
            refreshed = Some(record);
        }
    }
    Ok(refreshed)
}

/// A performed exercise as entered on the command line.
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    pub name: String,
    pub date: NaiveDate,
    pub sets_planned: u32,
    pub sets: Vec<SetDetail>,
    pub status: Option<CompletionStatus>,
    pub week_number: Option<u32>,
    pub day_number: Option<u32>,
    pub notes: Option<String>,
}

/// Status implied by the sets performed when none is given.
fn implied_status(done: u32, planned: u32) -> CompletionStatus {
    if done == 0 {
        CompletionStatus::Skipped
    } else if done >= planned {
        CompletionStatus::Completed
    } else {
        CompletionStatus::Partial
    }
}

pub fn log_exercise(
    db: &Database,
    config: &Config,
    user_id: &str,
    session: ExerciseSession,
) -> Result<ExerciseLogEntry> {
    if session.sets_planned == 0 {
        return Err(FitError::Validation("planned sets must be at least 1".into()).into());
    }
    if let Some(day) = session.day_number
        && !(1..=7).contains(&day)
    {
        return Err(FitError::Validation(format!("day must be between 1 and 7 (got {})", day)).into());
    }

    let name = config.resolve_alias(&session.name);
    let mut entry = ExerciseLogEntry::new(
        user_id,
        name,
        session.date,
        session.sets_planned,
        session.sets,
    );
    entry.completion_status = session
        .status
        .unwrap_or_else(|| implied_status(entry.sets_completed, entry.sets_planned));
    entry.week_number = session.week_number;
    entry.day_number = session.day_number;
    entry.notes = session.notes;
    db.insert_exercise_log(&entry)?;
    Ok(entry)
}

#[derive(Debug, Serialize)]
pub struct WeekSubmitted {
    pub submission: WeeklySubmission,
    pub habit: HabitScoreRecord,
}

/// Record a week's progress and its weekly-path habit score. Resubmitting
/// a week replaces both and re-chains the streaks of every later week.
pub fn submit_week(
    db: &Database,
    user_id: &str,
    week_number: u32,
    days: Vec<DaySubmission>,
    weight_kg: Option<f64>,
) -> Result<WeekSubmitted> {
    if week_number == 0 {
        return Err(FitError::Validation("week must be at least 1".into()).into());
    }
    if days.is_empty() || days.len() > 7 {
        return Err(FitError::Validation(format!(
            "a week has 1 to 7 days (got {})",
            days.len()
        ))
        .into());
    }
    let mut seen = [false; 8];
    for d in &days {
        let n = d.day_number as usize;
        if !(1..=7).contains(&n) || seen[n] {
            return Err(FitError::Validation(format!("invalid or repeated day {}", d.day_number)).into());
        }
        seen[n] = true;
    }
    if let Some(w) = weight_kg
        && !(30.0..=500.0).contains(&w)
    {
        return Err(FitError::Validation(format!("weight must be between 30 and 500 (got {})", w)).into());
    }

    db.transaction(|db| {
        let previous = db.previous_weekly_score(user_id, week_number)?;
        let record = habit::weekly_record(user_id, week_number, &days, previous.as_ref());
        let submission = WeeklySubmission {
            user_id: user_id.to_string(),
            week_number,
            weight_kg,
            days,
            workout_adherence_percent: record.workout_adherence_percent,
            diet_adherence_percent: record.diet_adherence_percent,
            submitted_at: Utc::now(),
        };
        db.upsert_weekly_submission(&submission)?;
        db.upsert_habit_score(&record)?;
        debug!(user = user_id, week = week_number, score = record.habit_score, "recorded weekly habit score");

        let mut previous = record.clone();
        for later in db
            .weekly_submissions(user_id)?
            .into_iter()
            .filter(|s| s.week_number > week_number)
        {
            let rechained = habit::weekly_record(user_id, later.week_number, &later.days, Some(&previous));
            db.upsert_habit_score(&rechained)?;
            previous = rechained;
        }
        Ok(WeekSubmitted {
            submission,
            habit: record,
        })
    })
}

/// Parse `"REPSxKG:difficulty,..."`, e.g. `"10x60:right,8x62.5:hard"`.
/// The difficulty may be omitted and defaults to just right.
pub fn parse_sets(input: &str) -> Result<Vec<SetDetail>, FitError> {
    let mut sets = Vec::new();
    for (i, part) in input.split(',').map(str::trim).filter(|p| !p.is_empty()).enumerate() {
        let (load, difficulty) = match part.split_once(':') {
            Some((load, d)) => (load, d.parse()?),
            None => (part, Difficulty::JustRight),
        };
        let (reps, weight) = load
            .split_once(['x', 'X'])
            .ok_or_else(|| FitError::Validation(format!("invalid set '{}' (expected REPSxKG)", part)))?;
        let reps_completed: u32 = reps
            .trim()
            .parse()
            .map_err(|_| FitError::Validation(format!("invalid reps in set '{}'", part)))?;
        let weight_kg: f64 = weight
            .trim()
            .parse()
            .map_err(|_| FitError::Validation(format!("invalid weight in set '{}'", part)))?;
        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(FitError::Validation(format!("invalid weight in set '{}'", part)));
        }
        sets.push(SetDetail {
            set_number: i as u32 + 1,
            reps_completed,
            weight_kg,
            difficulty,
        });
    }
    Ok(sets)
}

/// Parse `"completed:followed,partial:mostly,..."`, one entry per day
/// starting at day 1.
pub fn parse_days(input: &str) -> Result<Vec<DaySubmission>, FitError> {
    let mut days = Vec::new();
    for (i, part) in input.split(',').map(str::trim).filter(|p| !p.is_empty()).enumerate() {
        let (workout, diet) = part.split_once(':').ok_or_else(|| {
            FitError::Validation(format!("invalid day '{}' (expected WORKOUT:DIET)", part))
        })?;
        days.push(DaySubmission {
            day_number: i as u32 + 1,
            workout: workout.parse()?,
            diet: diet.parse()?,
        });
    }
    Ok(days)
}
