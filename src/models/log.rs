use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::profile::normalize_label;
use crate::error::FitError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    Energized,
    #[default]
    Normal,
    SlightlyFatigued,
    VeryTired,
}

impl EnergyLevel {
    /// Both fatigued levels count as a fatigue flag.
    pub fn is_fatigued(self) -> bool {
        matches!(self, Self::SlightlyFatigued | Self::VeryTired)
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Energized => write!(f, "Energized"),
            Self::Normal => write!(f, "Normal"),
            Self::SlightlyFatigued => write!(f, "Slightly Fatigued"),
            Self::VeryTired => write!(f, "Very Tired"),
        }
    }
}

impl FromStr for EnergyLevel {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match normalize_label(s).as_str() {
            "energized" | "high" => Ok(Self::Energized),
            "normal" => Ok(Self::Normal),
            "slightly_fatigued" | "fatigued" => Ok(Self::SlightlyFatigued),
            "very_tired" | "tired" | "low" => Ok(Self::VeryTired),
            _ => Err(FitError::Validation(format!(
                "invalid energy level: {} (expected energized/normal/slightly_fatigued/very_tired)",
                s
            ))),
        }
    }
}

/// Outcome of a planned workout or a single exercise session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    #[default]
    Completed,
    Partial,
    Skipped,
}

impl CompletionStatus {
    pub fn score(self) -> u32 {
        match self {
            Self::Completed => 100,
            Self::Partial => 50,
            Self::Skipped => 0,
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Partial => write!(f, "partial"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

impl FromStr for CompletionStatus {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match normalize_label(s).as_str() {
            "completed" | "done" => Ok(Self::Completed),
            "partial" => Ok(Self::Partial),
            "skipped" => Ok(Self::Skipped),
            _ => Err(FitError::Validation(format!(
                "invalid completion status: {} (expected completed/partial/skipped)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietAdherence {
    Followed,
    Mostly,
    Deviated,
}

impl DietAdherence {
    pub fn score(self) -> u32 {
        match self {
            Self::Followed => 100,
            Self::Mostly => 75,
            Self::Deviated => 0,
        }
    }
}

impl fmt::Display for DietAdherence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Followed => write!(f, "followed"),
            Self::Mostly => write!(f, "mostly"),
            Self::Deviated => write!(f, "deviated"),
        }
    }
}

impl FromStr for DietAdherence {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match normalize_label(s).as_str() {
            "followed" => Ok(Self::Followed),
            "mostly" => Ok(Self::Mostly),
            "deviated" => Ok(Self::Deviated),
            _ => Err(FitError::Validation(format!(
                "invalid diet adherence: {} (expected followed/mostly/deviated)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[serde(rename = "Too Easy")]
    TooEasy,
    #[default]
    #[serde(rename = "Just Right")]
    JustRight,
    #[serde(rename = "Too Hard")]
    TooHard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooEasy => write!(f, "Too Easy"),
            Self::JustRight => write!(f, "Just Right"),
            Self::TooHard => write!(f, "Too Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match normalize_label(s).as_str() {
            "too_easy" | "easy" => Ok(Self::TooEasy),
            "just_right" | "right" | "ok" => Ok(Self::JustRight),
            "too_hard" | "hard" => Ok(Self::TooHard),
            _ => Err(FitError::Validation(format!(
                "invalid difficulty: {} (expected easy/right/hard)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetDetail {
    pub set_number: u32,
    pub reps_completed: u32,
    pub weight_kg: f64,
    pub difficulty: Difficulty,
}

/// One exercise performed in one session. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLogEntry {
    pub id: String,
    pub user_id: String,
    pub exercise_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_number: Option<u32>,
    pub date: NaiveDate,
    pub sets_completed: u32,
    pub sets_planned: u32,
    pub set_details: Vec<SetDetail>,
    pub completion_status: CompletionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ExerciseLogEntry {
    pub fn new(
        user_id: impl Into<String>,
        exercise_name: impl Into<String>,
        date: NaiveDate,
        sets_planned: u32,
        set_details: Vec<SetDetail>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            exercise_name: exercise_name.into(),
            week_number: None,
            day_number: None,
            date,
            sets_completed: set_details.len() as u32,
            sets_planned,
            set_details,
            completion_status: CompletionStatus::Completed,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Every planned set done and the session marked completed.
    pub fn is_fully_completed(&self) -> bool {
        self.completion_status == CompletionStatus::Completed
            && self.sets_completed == self.sets_planned
    }
}

/// One record per (user, calendar date).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyActivityLog {
    pub user_id: String,
    pub date: NaiveDate,
    pub workout_completed: bool,
    pub diet_followed: bool,
    pub energy_level: EnergyLevel,
    pub sleep_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DailyActivityLog {
    pub fn new(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            workout_completed: false,
            diet_followed: false,
            energy_level: EnergyLevel::Normal,
            sleep_hours: 0.0,
            weight_kg: None,
            notes: None,
        }
    }

    pub fn fully_adherent(&self) -> bool {
        self.workout_completed && self.diet_followed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySubmission {
    pub day_number: u32,
    pub workout: CompletionStatus,
    pub diet: DietAdherence,
}

/// A week's self-reported progress, keyed by plan week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySubmission {
    pub user_id: String,
    pub week_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    pub days: Vec<DaySubmission>,
    pub workout_adherence_percent: u32,
    pub diet_adherence_percent: u32,
    pub submitted_at: DateTime<Utc>,
}
