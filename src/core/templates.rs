use crate::models::plan::{PlannedExercise, WorkoutDay, day_name};
use crate::models::profile::ExperienceLevel;

/// A training-day template. Each experience level draws from its own three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRole {
    FullBody1,
    FullBody2,
    FullBody3,
    Push,
    Pull,
    Leg,
    HeavyCompound,
    Accessory,
    Volume,
}

impl DayRole {
    /// Roles for a level in the order they are assigned to training days.
    pub fn rotation(level: ExperienceLevel) -> [DayRole; 3] {
        match level {
            ExperienceLevel::Beginner => [Self::FullBody1, Self::FullBody2, Self::FullBody3],
            ExperienceLevel::Intermediate => [Self::Push, Self::Pull, Self::Leg],
            ExperienceLevel::Advanced => [Self::HeavyCompound, Self::Accessory, Self::Volume],
        }
    }

    /// Label shown as the day's `type`.
    pub fn label(self) -> &'static str {
        match self {
            Self::FullBody1 | Self::FullBody2 | Self::FullBody3 => "Full Body",
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Leg => "Leg",
            Self::HeavyCompound => "Heavy Compound",
            Self::Accessory => "Accessory",
            Self::Volume => "Volume",
        }
    }

    pub fn exercises(self) -> Vec<PlannedExercise> {
        match self {
            Self::FullBody1 => vec![
                ex("Squats", 3, "8-10", 90, "Full depth, control the descent", "Moderate"),
                ex("Bench Press", 3, "8-10", 90, "Lower to chest, controlled push", "Moderate"),
                ex("Rows", 3, "8-10", 90, "Pull to chest, squeeze back", "Moderate"),
                ex("Overhead Press", 2, "8-10", 60, "Strict form, no arching", "Light"),
            ],
            Self::FullBody2 => vec![
                ex("Deadlifts", 3, "5-8", 120, "Keep bar close, neutral spine", "High"),
                ex("Pull-ups or Lat Pulldowns", 3, "8-12", 60, "Full range of motion", "Moderate"),
                ex("Dumbbell Bench Press", 3, "8-12", 60, "Pause at bottom", "Moderate"),
                ex("Leg Press", 2, "10-12", 60, "Full range, no locking knees", "Light"),
            ],
            Self::FullBody3 => vec![
                ex("Leg Press", 3, "10-12", 90, "Full range of motion", "Moderate"),
                ex("Incline Bench Press", 3, "8-12", 60, "Focus on chest", "Moderate"),
                ex("Barbell Rows", 3, "8-10", 90, "Explode off chest", "Moderate"),
                ex("Face Pulls", 3, "15-20", 45, "Shoulder health exercise", "Light"),
            ],
            Self::Push => vec![
                ex("Barbell Bench Press", 4, "6-8", 120, "Main compound, progressive load", "High"),
                ex("Incline Dumbbell Press", 3, "8-10", 90, "Upper chest focus", "Moderate"),
                ex("Overhead Press", 3, "6-8", 90, "Shoulders main focus", "Moderate"),
                ex("Dumbbell Flyes", 3, "10-12", 60, "Chest isolation", "Light"),
                ex("Lateral Raises", 3, "12-15", 45, "Side delt isolation", "Light"),
            ],
            Self::Pull => vec![
                ex("Barbell Rows", 4, "6-8", 120, "Main compound, heavy", "High"),
                ex("Pull-ups", 3, "6-10", 90, "Add weight if possible", "Moderate"),
                ex("Dumbbell Rows", 3, "8-10", 60, "Unilateral strength", "Moderate"),
                ex("Face Pulls", 3, "15-20", 45, "Rear delt and shoulder health", "Light"),
                ex("Barbell Curls", 3, "8-10", 60, "Arm development", "Light"),
            ],
            Self::Leg => vec![
                ex("Barbell Squats", 4, "6-8", 120, "Primary leg builder", "High"),
                ex("Romanian Deadlifts", 3, "8-10", 90, "Posterior chain focus", "Moderate"),
                ex("Leg Press", 3, "8-12", 90, "Volume builder", "Moderate"),
                ex("Leg Curls", 3, "10-12", 60, "Hamstring isolation", "Light"),
                ex("Leg Extensions", 3, "12-15", 45, "Quad isolation", "Light"),
            ],
            Self::HeavyCompound => vec![
                ex("Barbell Bench Press", 5, "3-5", 180, "Heavy strength phase", "High"),
                ex("Barbell Squats", 5, "3-5", 180, "Heavy strength phase", "High"),
                ex("Deadlifts", 3, "3-5", 180, "CNS taxing, limited volume", "High"),
            ],
            Self::Accessory => vec![
                ex("Dumbbell Incline Press", 4, "8-10", 90, "Upper chest development", "Moderate"),
                ex("Weighted Pull-ups", 4, "5-8", 120, "Add resistance", "Moderate"),
                ex("Barbell Rows", 3, "6-8", 90, "Heavy back work", "Moderate"),
                ex("Dumbbell Flyes", 3, "12-15", 60, "Pump and isolation", "Light"),
            ],
            Self::Volume => vec![
                ex("Leg Press", 4, "8-12", 90, "High volume quads", "Moderate"),
                ex("Leg Curls", 4, "10-15", 60, "Hamstring volume", "Light"),
                ex("Cable Chest Press", 3, "12-15", 60, "Pump work", "Light"),
                ex("Machine Rows", 3, "12-15", 60, "Back pump", "Light"),
            ],
        }
    }
}

fn ex(
    name: &str,
    sets: u32,
    reps: &str,
    rest_seconds: u32,
    guidance: &str,
    intensity: &str,
) -> PlannedExercise {
    PlannedExercise {
        name: name.to_string(),
        sets,
        reps: reps.to_string(),
        rest_seconds,
        guidance: guidance.to_string(),
        intensity_level: intensity.to_string(),
    }
}

/// Calendar days (1 = Monday) used for `n` training days, spread so that
/// hard sessions are separated where the count allows.
pub fn training_days(n: u8) -> &'static [u32] {
    match n.clamp(1, 7) {
        1 => &[1],
        2 => &[1, 4],
        3 => &[1, 3, 5],
        4 => &[1, 2, 4, 5],
        5 => &[1, 2, 3, 5, 6],
        6 => &[1, 2, 3, 4, 5, 6],
        _ => &[1, 2, 3, 4, 5, 6, 7],
    }
}

/// Skeleton week for a level: `available_days` training days (clamped to
/// 1..=7) filled with the level's roles in rotation, the rest as rest days.
pub fn select_week(level: ExperienceLevel, available_days: u8) -> Vec<WorkoutDay> {
    let rotation = DayRole::rotation(level);
    let slots = training_days(available_days);
    (1..=7u32)
        .map(|day| match slots.iter().position(|&d| d == day) {
            Some(i) => {
                let role = rotation[i % rotation.len()];
                WorkoutDay {
                    day,
                    day_name: day_name(day).to_string(),
                    day_type: role.label().to_string(),
                    rest_day: false,
                    exercises: role.exercises(),
                }
            }
            None if day == 7 => WorkoutDay::rest(day, "Complete Rest"),
            None => WorkoutDay::rest(day, "Rest/Light Cardio"),
        })
        .collect()
}

/// Fixed low-intensity week used whenever the user reports fatigue.
pub fn recovery_week() -> Vec<WorkoutDay> {
    let active = |day: u32, day_type: &str, item: PlannedExercise| WorkoutDay {
        day,
        day_name: day_name(day).to_string(),
        day_type: day_type.to_string(),
        rest_day: false,
        exercises: vec![item],
    };
    vec![
        active(
            1,
            "Mobility",
            ex("Yoga/Stretching", 1, "30-45 min", 0, "Low intensity recovery", "Light"),
        ),
        active(
            2,
            "Light Cardio",
            ex("Walking or Swimming", 1, "20-30 min", 0, "Easy pace", "Light"),
        ),
        active(
            3,
            "Mobility",
            ex("Foam Rolling", 1, "20 min", 0, "Focus on tight areas", "Light"),
        ),
        WorkoutDay::rest(4, "Rest"),
        active(
            5,
            "Light Cardio",
            ex("Light Cycling", 1, "20-30 min", 0, "Very easy pace", "Light"),
        ),
        active(
            6,
            "Mobility",
            ex("Stretching", 1, "20-30 min", 0, "Full body stretch", "Light"),
        ),
        WorkoutDay::rest(7, "Complete Rest"),
    ]
}
