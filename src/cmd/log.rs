use anyhow::Result;

use fitplan::core::logging::{self, ExerciseSession};
use fitplan::models::log::{CompletionStatus, DailyActivityLog, EnergyLevel};
use fitplan::output::human;

use super::Session;

pub struct DayArgs {
    pub workout: bool,
    pub diet: bool,
    pub energy: Option<String>,
    pub sleep: Option<f64>,
    pub weight: Option<f64>,
    pub note: Option<String>,
}

pub fn run_day(s: &Session, args: DayArgs) -> Result<()> {
    let mut log = DailyActivityLog::new(&s.user_id, s.today);
    log.workout_completed = args.workout;
    log.diet_followed = args.diet;
    if let Some(e) = args.energy {
        log.energy_level = e.parse::<EnergyLevel>()?;
    }
    log.sleep_hours = args.sleep.unwrap_or(0.0);
    log.weight_kg = args.weight;
    log.notes = args.note;

    let logged = logging::log_day(&s.db, log)?;
    s.emit("log day", &logged, |l| {
        let mut out = human::format_daily_log(&l.log);
        if let Some(ref h) = l.habit {
            out.push_str(&format!("\nHabit score: {} | streak: {}", h.habit_score, h.streak_count));
        }
        out
    })
}

pub struct ExerciseArgs {
    pub name: String,
    pub planned: u32,
    pub sets: String,
    pub status: Option<String>,
    pub week: Option<u32>,
    pub day: Option<u32>,
    pub note: Option<String>,
}

pub fn run_exercise(s: &Session, args: ExerciseArgs) -> Result<()> {
    let session = ExerciseSession {
        name: args.name,
        date: s.today,
        sets_planned: args.planned,
        sets: logging::parse_sets(&args.sets)?,
        status: args
            .status
            .as_deref()
            .map(str::parse::<CompletionStatus>)
            .transpose()?,
        week_number: args.week,
        day_number: args.day,
        notes: args.note,
    };
    let entry = logging::log_exercise(&s.db, &s.config, &s.user_id, session)?;
    s.emit("log exercise", &entry, |e| {
        format!(
            "{} | {} | {}/{} sets | {}",
            e.date, e.exercise_name, e.sets_completed, e.sets_planned, e.completion_status
        )
    })
}

pub fn run_week(s: &Session, week: u32, days: &str, weight: Option<f64>) -> Result<()> {
    let days = logging::parse_days(days)?;
    let result = logging::submit_week(&s.db, &s.user_id, week, days, weight)?;
    s.emit("log week", &result, |r| {
        format!(
            "Week {}: workout {}% | diet {}% | habit score {} | streak {}",
            r.submission.week_number,
            r.habit.workout_adherence_percent,
            r.habit.diet_adherence_percent,
            r.habit.habit_score,
            r.habit.streak_count
        )
    })
}
