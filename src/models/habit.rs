use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FitError;

/// Which computation produced a habit score. The two paths weight workout
/// and diet adherence differently and are stored side by side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Self-reported weekly submission, 60/40 workout/diet.
    WeeklySubmission,
    /// Trailing seven daily logs, 50/50 workout/diet.
    DailyLogs,
}

impl ScoreSource {
    /// Workout weight; diet takes the remainder.
    pub fn workout_weight(self) -> f64 {
        match self {
            Self::WeeklySubmission => 0.60,
            Self::DailyLogs => 0.50,
        }
    }

    pub fn diet_weight(self) -> f64 {
        match self {
            Self::WeeklySubmission => 0.40,
            Self::DailyLogs => 0.50,
        }
    }
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeeklySubmission => write!(f, "weekly_submission"),
            Self::DailyLogs => write!(f, "daily_logs"),
        }
    }
}

impl FromStr for ScoreSource {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match s {
            "weekly_submission" => Ok(Self::WeeklySubmission),
            "daily_logs" => Ok(Self::DailyLogs),
            _ => Err(FitError::Validation(format!("invalid score source: {}", s))),
        }
    }
}

/// Cached habit score for one (user, source, period). Always rebuildable
/// from logs; carries no wall-clock fields so recomputation is bit-stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitScoreRecord {
    pub user_id: String,
    pub source: ScoreSource,
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_end: Option<NaiveDate>,
    pub workout_adherence_percent: u32,
    pub diet_adherence_percent: u32,
    pub habit_score: u32,
    pub streak_count: u32,
}
