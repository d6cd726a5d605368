use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::habit::{HabitScoreRecord, ScoreSource};
use crate::models::log::{DailyActivityLog, DaySubmission};

/// Trailing window for the daily-log habit score.
pub const DAILY_WINDOW_DAYS: i64 = 7;
/// Weekly score needed to carry a weekly streak forward.
pub const WEEKLY_STREAK_THRESHOLD: u32 = 70;
pub const STATS_WINDOW_DAYS: i64 = 30;
/// Logs read back for streak calculations. Every streak reader uses the
/// same depth so they agree on long streaks.
pub const HISTORY_DAYS: u32 = 400;

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Mean of per-day category scores, rounded. Zero for an empty period.
pub fn mean_adherence(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let total: u32 = scores.iter().sum();
    (total as f64 / scores.len() as f64).round() as u32
}

/// Workout and diet adherence for a weekly submission.
pub fn weekly_adherence(days: &[DaySubmission]) -> (u32, u32) {
    let workout: Vec<u32> = days.iter().map(|d| d.workout.score()).collect();
    let diet: Vec<u32> = days.iter().map(|d| d.diet.score()).collect();
    (mean_adherence(&workout), mean_adherence(&diet))
}

/// Weighted workout/diet composite for a scoring path.
pub fn composite(source: ScoreSource, workout: u32, diet: u32) -> u32 {
    (workout as f64 * source.workout_weight() + diet as f64 * source.diet_weight()).round() as u32
}

/// Consecutive fully adherent days ending today. A missing day ends the
/// streak exactly like a failing one.
pub fn daily_streak(logs: &[DailyActivityLog], today: NaiveDate) -> u32 {
    let mut sorted: Vec<&DailyActivityLog> = logs.iter().filter(|l| l.date <= today).collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    for (i, log) in sorted.iter().enumerate() {
        let expected = today - Duration::days(i as i64);
        if log.date != expected || !log.fully_adherent() {
            break;
        }
        streak += 1;
    }
    streak
}

/// Longest run of consecutive fully adherent days anywhere in the logs.
pub fn best_streak(logs: &[DailyActivityLog]) -> u32 {
    let mut dates: Vec<NaiveDate> = logs
        .iter()
        .filter(|l| l.fully_adherent())
        .map(|l| l.date)
        .collect();
    dates.sort();
    dates.dedup();

    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for d in dates {
        run = match prev {
            Some(p) if d - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(d);
    }
    best
}

/// Weekly streak continues only when the previous week scored well.
pub fn weekly_streak(previous: Option<&HabitScoreRecord>) -> u32 {
    match previous {
        Some(p) if p.habit_score >= WEEKLY_STREAK_THRESHOLD => p.streak_count + 1,
        _ => 1,
    }
}

/// ISO week label used as the period key for daily-log records.
pub fn iso_period(date: NaiveDate) -> String {
    let w = date.iso_week();
    format!("{}-W{:02}", w.year(), w.week())
}

/// Monday of the ISO week containing `date`.
pub fn iso_week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn weekly_period(week_number: u32) -> String {
    format!("week-{}", week_number)
}

/// Habit score from the trailing seven days of logs as of `today`.
/// Rates divide by seven regardless of how many days were logged.
/// None when nothing was logged in the window.
pub fn daily_record(
    user_id: &str,
    logs: &[DailyActivityLog],
    today: NaiveDate,
) -> Option<HabitScoreRecord> {
    let start = today - Duration::days(DAILY_WINDOW_DAYS - 1);
    let window: Vec<&DailyActivityLog> = logs
        .iter()
        .filter(|l| l.date >= start && l.date <= today)
        .collect();
    if window.is_empty() {
        return None;
    }
    let days = DAILY_WINDOW_DAYS as usize;
    let workout = percent(window.iter().filter(|l| l.workout_completed).count(), days);
    let diet = percent(window.iter().filter(|l| l.diet_followed).count(), days);
    Some(HabitScoreRecord {
        user_id: user_id.to_string(),
        source: ScoreSource::DailyLogs,
        period: iso_period(today),
        week_number: None,
        window_start: Some(start),
        window_end: Some(today),
        workout_adherence_percent: workout,
        diet_adherence_percent: diet,
        habit_score: composite(ScoreSource::DailyLogs, workout, diet),
        streak_count: daily_streak(logs, today),
    })
}

/// Habit score for a weekly submission, chained to the previous week's
/// record for the streak.
pub fn weekly_record(
    user_id: &str,
    week_number: u32,
    days: &[DaySubmission],
    previous: Option<&HabitScoreRecord>,
) -> HabitScoreRecord {
    let (workout, diet) = weekly_adherence(days);
    HabitScoreRecord {
        user_id: user_id.to_string(),
        source: ScoreSource::WeeklySubmission,
        period: weekly_period(week_number),
        week_number: Some(week_number),
        window_start: None,
        window_end: None,
        workout_adherence_percent: workout,
        diet_adherence_percent: diet,
        habit_score: composite(ScoreSource::WeeklySubmission, workout, diet),
        streak_count: weekly_streak(previous),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyStats {
    pub window_days: i64,
    pub total_days_logged: usize,
    pub workout_completion_rate: u32,
    pub diet_completion_rate: u32,
    pub streak: u32,
    pub best_streak: u32,
}

/// Summary over the last 30 days. Rates are over logged days only.
pub fn daily_stats(logs: &[DailyActivityLog], today: NaiveDate) -> DailyStats {
    let start = today - Duration::days(STATS_WINDOW_DAYS - 1);
    let recent: Vec<&DailyActivityLog> = logs
        .iter()
        .filter(|l| l.date >= start && l.date <= today)
        .collect();
    let total = recent.len();
    DailyStats {
        window_days: STATS_WINDOW_DAYS,
        total_days_logged: total,
        workout_completion_rate: percent(recent.iter().filter(|l| l.workout_completed).count(), total),
        diet_completion_rate: percent(recent.iter().filter(|l| l.diet_followed).count(), total),
        streak: daily_streak(logs, today),
        best_streak: best_streak(logs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_period_pads_week() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(iso_period(d), "2026-W02");
    }

    #[test]
    fn test_iso_week_start_is_monday() {
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(iso_week_start(sunday), monday);
        assert_eq!(iso_week_start(monday), monday);
    }

    #[test]
    fn test_percent_of_empty_is_zero() {
        assert_eq!(percent(3, 0), 0);
        assert_eq!(percent(5, 7), 71);
    }
}
