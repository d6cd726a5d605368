use serde::Serialize;
use std::fmt;

use crate::models::log::{Difficulty, ExerciseLogEntry};

/// Entries fetched per exercise; only the two newest are evaluated.
pub const HISTORY_WINDOW: usize = 3;
pub const WEIGHT_STEP_KG: f64 = 2.5;
pub const REP_STEP: u32 = 2;
pub const INSUFFICIENT_DATA: &str = "insufficient data";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    IncreaseWeight,
    IncreaseReps,
    Decrease,
    Maintain,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncreaseWeight => write!(f, "increase_weight"),
            Self::IncreaseReps => write!(f, "increase_reps"),
            Self::Decrease => write!(f, "decrease"),
            Self::Maintain => write!(f, "maintain"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OverloadAdvice {
    pub exercise_name: String,
    pub recommendation: Recommendation,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_weight_increase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_rep_increase: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_weight_decrease: Option<f64>,
    pub sessions_analyzed: usize,
}

impl OverloadAdvice {
    fn new(exercise_name: &str, recommendation: Recommendation, reason: &str, sessions: usize) -> Self {
        Self {
            exercise_name: exercise_name.to_string(),
            recommendation,
            reason: reason.to_string(),
            suggested_weight_increase: None,
            suggested_rep_increase: None,
            suggested_weight_decrease: None,
            sessions_analyzed: sessions,
        }
    }

    pub fn is_insufficient_data(&self) -> bool {
        self.reason == INSUFFICIENT_DATA
    }
}

fn has_difficulty(entry: &ExerciseLogEntry, d: Difficulty) -> bool {
    entry.set_details.iter().any(|s| s.difficulty == d)
}

/// Recommend the next step for an exercise from its history, newest first.
///
/// Rules are checked in order against the two newest sessions:
/// all sets too easy in two full sessions adds weight, two full sessions
/// without a hard set adds reps, and any incomplete session or hard set
/// backs off.
pub fn analyze(exercise_name: &str, history: &[ExerciseLogEntry]) -> OverloadAdvice {
    let window = &history[..history.len().min(HISTORY_WINDOW)];
    if window.len() < 2 {
        return OverloadAdvice::new(
            exercise_name,
            Recommendation::Maintain,
            INSUFFICIENT_DATA,
            window.len(),
        );
    }
    let recent = &window[..2];

    let all_completed = recent.iter().all(|e| e.is_fully_completed());
    let all_too_easy = recent
        .iter()
        .all(|e| e.set_details.iter().all(|s| s.difficulty == Difficulty::TooEasy));
    let struggled = recent
        .iter()
        .any(|e| !e.is_fully_completed() || has_difficulty(e, Difficulty::TooHard));

    let sessions = window.len();
    if all_completed && all_too_easy {
        OverloadAdvice {
            suggested_weight_increase: Some(WEIGHT_STEP_KG),
            ..OverloadAdvice::new(
                exercise_name,
                Recommendation::IncreaseWeight,
                "Exercise is too easy - increase weight by 2.5-5kg",
                sessions,
            )
        }
    } else if all_completed && !struggled {
        OverloadAdvice {
            suggested_rep_increase: Some(REP_STEP),
            ..OverloadAdvice::new(
                exercise_name,
                Recommendation::IncreaseReps,
                "Good performance - increase reps by 2",
                sessions,
            )
        }
    } else if struggled {
        OverloadAdvice {
            suggested_weight_decrease: Some(WEIGHT_STEP_KG),
            ..OverloadAdvice::new(
                exercise_name,
                Recommendation::Decrease,
                "Exercise is too challenging - reduce weight or reps",
                sessions,
            )
        }
    } else {
        OverloadAdvice::new(
            exercise_name,
            Recommendation::Maintain,
            "Current intensity is appropriate",
            sessions,
        )
    }
}

/// Session adherence for a plan week: completed sessions count fully,
/// partial ones half. Zero when nothing was logged.
pub fn session_adherence(entries: &[ExerciseLogEntry]) -> u32 {
    if entries.is_empty() {
        return 0;
    }
    let points: u32 = entries.iter().map(|e| e.completion_status.score()).sum();
    (points as f64 / entries.len() as f64).round() as u32
}
