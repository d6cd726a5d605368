use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::targets;
use crate::error::FitError;

/// Lowercase a user-supplied label and fold spaces/dashes into underscores,
/// so "Weight Loss", "weight-loss" and "weight_loss" parse alike.
pub(crate) fn normalize_label(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Sex {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match normalize_label(s).as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(FitError::Validation(format!(
                "invalid sex: {} (expected male/female/other)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Maintenance,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightLoss => write!(f, "Weight Loss"),
            Self::MuscleGain => write!(f, "Muscle Gain"),
            Self::Maintenance => write!(f, "Maintenance"),
        }
    }
}

impl FromStr for Goal {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match normalize_label(s).as_str() {
            "weight_loss" | "lose" => Ok(Self::WeightLoss),
            "muscle_gain" | "gain" => Ok(Self::MuscleGain),
            "maintenance" | "maintain" => Ok(Self::Maintenance),
            _ => Err(FitError::Validation(format!(
                "invalid goal: {} (expected weight_loss/muscle_gain/maintenance)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sedentary => write!(f, "Sedentary"),
            Self::Light => write!(f, "Light"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Active => write!(f, "Active"),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match normalize_label(s).as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" | "very_active" => Ok(Self::Active),
            _ => Err(FitError::Validation(format!(
                "invalid activity level: {} (expected sedentary/light/moderate/active)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = FitError;
    fn from_str(s: &str) -> Result<Self, FitError> {
        match normalize_label(s).as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(FitError::Validation(format!(
                "invalid experience level: {} (expected beginner/intermediate/advanced)",
                s
            ))),
        }
    }
}

/// User-entered profile fields. Everything derived lives in [`DerivedTargets`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileInput {
    pub age: u32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub goal: Goal,
    pub target_weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub experience_level: ExperienceLevel,
    pub available_days: u8,
    #[serde(default)]
    pub dietary_preference: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub injuries: Vec<String>,
}

impl ProfileInput {
    pub fn validate(&self) -> Result<(), FitError> {
        check_range("age", self.age as f64, 13.0, 120.0)?;
        check_range("height_cm", self.height_cm, 100.0, 250.0)?;
        check_range("weight_kg", self.weight_kg, 30.0, 500.0)?;
        check_range("target_weight_kg", self.target_weight_kg, 30.0, 500.0)?;
        check_range("available_days", self.available_days as f64, 1.0, 7.0)?;
        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), FitError> {
    if !value.is_finite() || value < min || value > max {
        return Err(FitError::Validation(format!(
            "{} must be between {} and {} (got {})",
            field, min, max, value
        )));
    }
    Ok(())
}

/// Partial edit of a profile. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<Goal>,
    pub target_weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub experience_level: Option<ExperienceLevel>,
    pub available_days: Option<u8>,
    pub dietary_preference: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub injuries: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.sex.is_none()
            && self.height_cm.is_none()
            && self.weight_kg.is_none()
            && self.goal.is_none()
            && self.target_weight_kg.is_none()
            && self.activity_level.is_none()
            && self.experience_level.is_none()
            && self.available_days.is_none()
            && self.dietary_preference.is_none()
            && self.allergies.is_none()
            && self.injuries.is_none()
    }

    /// Apply on top of an existing input.
    pub fn merge_into(self, base: &ProfileInput) -> ProfileInput {
        ProfileInput {
            age: self.age.unwrap_or(base.age),
            sex: self.sex.unwrap_or(base.sex),
            height_cm: self.height_cm.unwrap_or(base.height_cm),
            weight_kg: self.weight_kg.unwrap_or(base.weight_kg),
            goal: self.goal.unwrap_or(base.goal),
            target_weight_kg: self.target_weight_kg.unwrap_or(base.target_weight_kg),
            activity_level: self.activity_level.unwrap_or(base.activity_level),
            experience_level: self.experience_level.unwrap_or(base.experience_level),
            available_days: self.available_days.unwrap_or(base.available_days),
            dietary_preference: self
                .dietary_preference
                .unwrap_or_else(|| base.dietary_preference.clone()),
            allergies: self.allergies.unwrap_or_else(|| base.allergies.clone()),
            injuries: self.injuries.unwrap_or_else(|| base.injuries.clone()),
        }
    }

    /// Build a complete input for a first-time profile. Every numeric and
    /// enum field is required; the free-text lists default to empty.
    pub fn into_new_input(self) -> Result<ProfileInput, FitError> {
        let mut missing = Vec::new();
        if self.age.is_none() {
            missing.push("age");
        }
        if self.sex.is_none() {
            missing.push("sex");
        }
        if self.height_cm.is_none() {
            missing.push("height");
        }
        if self.weight_kg.is_none() {
            missing.push("weight");
        }
        if self.goal.is_none() {
            missing.push("goal");
        }
        if self.target_weight_kg.is_none() {
            missing.push("target_weight");
        }
        if self.activity_level.is_none() {
            missing.push("activity");
        }
        if self.experience_level.is_none() {
            missing.push("experience");
        }
        match (
            self.age,
            self.sex,
            self.height_cm,
            self.weight_kg,
            self.goal,
            self.target_weight_kg,
            self.activity_level,
            self.experience_level,
        ) {
            (
                Some(age),
                Some(sex),
                Some(height_cm),
                Some(weight_kg),
                Some(goal),
                Some(target_weight_kg),
                Some(activity_level),
                Some(experience_level),
            ) => Ok(ProfileInput {
                age,
                sex,
                height_cm,
                weight_kg,
                goal,
                target_weight_kg,
                activity_level,
                experience_level,
                available_days: self.available_days.unwrap_or(4),
                dietary_preference: self.dietary_preference.unwrap_or_default(),
                allergies: self.allergies.unwrap_or_default(),
                injuries: self.injuries.unwrap_or_default(),
            }),
            _ => Err(FitError::Validation(format!(
                "missing profile fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    pub protein_grams: u32,
    pub carbs_grams: u32,
    pub fat_grams: u32,
    pub protein_percent: u32,
    pub carbs_percent: u32,
    pub fat_percent: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DerivedTargets {
    pub bmi: f64,
    pub bmr: f64,
    pub activity_factor: f64,
    pub tdee: f64,
    pub daily_calorie_target: u32,
    pub macros: Macros,
}

/// A user's biometric profile together with its derived targets.
///
/// The input and the derived targets are only ever set together, so a
/// profile can never carry targets computed from stale inputs.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(flatten)]
    input: ProfileInput,
    #[serde(flatten)]
    derived: DerivedTargets,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, input: ProfileInput) -> Result<Self, FitError> {
        input.validate()?;
        let derived = targets::derive(&input);
        let now = Utc::now();
        Ok(Self {
            user_id: user_id.into(),
            input,
            derived,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a stored profile. Targets are recomputed from the stored input.
    pub fn restore(
        user_id: String,
        input: ProfileInput,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, FitError> {
        input.validate()?;
        let derived = targets::derive(&input);
        Ok(Self {
            user_id,
            input,
            derived,
            created_at,
            updated_at,
        })
    }

    /// Apply an edit. On a validation failure the profile is left untouched.
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), FitError> {
        let next = update.merge_into(&self.input);
        next.validate()?;
        let derived = targets::derive(&next);
        self.input = next;
        self.derived = derived;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn input(&self) -> &ProfileInput {
        &self.input
    }

    pub fn targets(&self) -> &DerivedTargets {
        &self.derived
    }
}
