use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::profile::{Macros, normalize_label};
use crate::error::FitError;

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Workout,
    Diet,
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workout => write!(f, "workout"),
            Self::Diet => write!(f, "diet"),
        }
    }
}

impl FromStr for PlanKind {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match normalize_label(s).as_str() {
            "workout" => Ok(Self::Workout),
            "diet" => Ok(Self::Diet),
            _ => Err(FitError::Validation(format!(
                "invalid plan kind: {} (expected workout/diet)",
                s
            ))),
        }
    }
}

/// Which path produced a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Template,
    Generated,
}

impl fmt::Display for PlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => write!(f, "template"),
            Self::Generated => write!(f, "generated"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedExercise {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: u32,
    #[serde(default)]
    pub guidance: String,
    #[serde(default = "default_intensity")]
    pub intensity_level: String,
}

fn default_intensity() -> String {
    "Moderate".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDay {
    pub day: u32,
    #[serde(default)]
    pub day_name: String,
    #[serde(rename = "type")]
    pub day_type: String,
    pub rest_day: bool,
    #[serde(default)]
    pub exercises: Vec<PlannedExercise>,
}

impl WorkoutDay {
    pub fn rest(day: u32, day_type: &str) -> Self {
        Self {
            day,
            day_name: day_name(day).to_string(),
            day_type: day_type.to_string(),
            rest_day: true,
            exercises: Vec::new(),
        }
    }
}

/// Name for a 1-based day of the plan week.
pub fn day_name(day: u32) -> &'static str {
    DAY_NAMES
        .get((day as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("Unknown")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub id: String,
    pub user_id: String,
    pub week_number: u32,
    pub week_summary: String,
    pub source: PlanSource,
    pub workouts: Vec<WorkoutDay>,
    #[serde(default)]
    pub adjusted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progression_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_tips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WorkoutPlan {
    pub fn training_days(&self) -> usize {
        self.workouts.iter().filter(|d| !d.rest_day).count()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MealMacros {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub meal_number: u32,
    pub meal_name: String,
    #[serde(default)]
    pub time_suggestion: String,
    pub description: String,
    pub estimated_calories: u32,
    #[serde(default)]
    pub macros: MealMacros,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub preparation_tips: String,
    #[serde(default)]
    pub why_this_meal: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub modified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietPlan {
    pub id: String,
    pub user_id: String,
    pub week_number: u32,
    pub week_summary: String,
    pub source: PlanSource,
    pub daily_calorie_target: u32,
    pub macros: Macros,
    pub meals: Vec<Meal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydration_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplement_suggestions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_prep_tips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
