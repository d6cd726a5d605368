#![allow(dead_code)]

use chrono::NaiveDate;
use fitplan::db::Database;
use fitplan::models::log::{
    CompletionStatus, DailyActivityLog, Difficulty, EnergyLevel, ExerciseLogEntry, SetDetail,
};
use fitplan::models::profile::{
    ActivityLevel, ExperienceLevel, Goal, ProfileInput, Sex, UserProfile,
};
use tempfile::TempDir;

pub const USER: &str = "tester";

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A 30-year-old male, 175 cm, 70 kg, moderately active intermediate
/// lifter training four days a week.
pub fn input() -> ProfileInput {
    ProfileInput {
        age: 30,
        sex: Sex::Male,
        height_cm: 175.0,
        weight_kg: 70.0,
        goal: Goal::WeightLoss,
        target_weight_kg: 65.0,
        activity_level: ActivityLevel::Moderate,
        experience_level: ExperienceLevel::Intermediate,
        available_days: 4,
        dietary_preference: String::new(),
        allergies: Vec::new(),
        injuries: Vec::new(),
    }
}

pub fn profile_with(f: impl FnOnce(&mut ProfileInput)) -> UserProfile {
    let mut i = input();
    f(&mut i);
    UserProfile::new(USER, i).unwrap()
}

pub fn profile() -> UserProfile {
    profile_with(|_| {})
}

/// Store the default profile and return it.
pub fn seed_profile(db: &Database) -> UserProfile {
    let p = profile();
    db.upsert_profile(&p).unwrap();
    p
}

pub fn day_log(date: NaiveDate, workout: bool, diet: bool) -> DailyActivityLog {
    let mut log = DailyActivityLog::new(USER, date);
    log.workout_completed = workout;
    log.diet_followed = diet;
    log.sleep_hours = 7.5;
    log
}

pub fn tired_log(date: NaiveDate, energy: EnergyLevel) -> DailyActivityLog {
    let mut log = day_log(date, true, true);
    log.energy_level = energy;
    log
}

/// A session of `sets` performed sets, all at the same difficulty.
pub fn session(
    date: NaiveDate,
    planned: u32,
    sets: u32,
    difficulty: Difficulty,
) -> ExerciseLogEntry {
    let details = (1..=sets)
        .map(|n| SetDetail {
            set_number: n,
            reps_completed: 8,
            weight_kg: 60.0,
            difficulty,
        })
        .collect();
    let mut e = ExerciseLogEntry::new(USER, "Barbell Bench Press", date, planned, details);
    if sets < planned {
        e.completion_status = CompletionStatus::Partial;
    }
    e
}
