use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::log::{DailyActivityLog, EnergyLevel};
use crate::models::plan::{PlannedExercise, WorkoutPlan};

/// Fatigue flags in the trailing window that force a recovery week.
pub const RECOVERY_THRESHOLD: usize = 3;
pub const FATIGUE_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct EnergyAdjustment {
    pub intensity_multiplier: f64,
    pub volume_multiplier: f64,
    pub recommendation: &'static str,
    pub should_adjust: bool,
    pub swap_to_mobility: bool,
}

/// How today's energy changes the planned session.
pub fn adjustment(energy: EnergyLevel) -> EnergyAdjustment {
    match energy {
        EnergyLevel::Energized => EnergyAdjustment {
            intensity_multiplier: 1.1,
            volume_multiplier: 1.0,
            recommendation: "Great energy! You can push a bit harder today.",
            should_adjust: false,
            swap_to_mobility: false,
        },
        EnergyLevel::Normal => EnergyAdjustment {
            intensity_multiplier: 1.0,
            volume_multiplier: 1.0,
            recommendation: "Normal energy. Stick to your planned workout.",
            should_adjust: false,
            swap_to_mobility: false,
        },
        EnergyLevel::SlightlyFatigued => EnergyAdjustment {
            intensity_multiplier: 0.8,
            volume_multiplier: 0.85,
            recommendation: "Reduce intensity by 20% and volume by 15%. Focus on form.",
            should_adjust: true,
            swap_to_mobility: false,
        },
        EnergyLevel::VeryTired => EnergyAdjustment {
            intensity_multiplier: 0.5,
            volume_multiplier: 0.6,
            recommendation: "Significantly reduce intensity. Consider mobility work or rest.",
            should_adjust: true,
            swap_to_mobility: true,
        },
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationLevel {
    Critical,
    High,
    Moderate,
    Normal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecoveryRecommendation {
    pub level: RecommendationLevel,
    pub message: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecoveryStatus {
    pub recovery_needed: bool,
    pub fatigue_count: usize,
    pub current_energy: EnergyLevel,
    pub recommendation: RecoveryRecommendation,
}

fn recommendation(fatigue_count: usize, energy: EnergyLevel) -> RecoveryRecommendation {
    if fatigue_count >= RECOVERY_THRESHOLD {
        return RecoveryRecommendation {
            level: RecommendationLevel::Critical,
            message: "RECOVERY DAY RECOMMENDED: 3+ fatigue flags in the past week. Your body needs rest.",
            action: "Take a full rest day or do light mobility work only.",
        };
    }
    match energy {
        EnergyLevel::VeryTired => RecoveryRecommendation {
            level: RecommendationLevel::High,
            message: "HIGH FATIGUE: Swap today's workout for mobility/stretching.",
            action: "Focus on recovery: stretching, foam rolling, light walking.",
        },
        EnergyLevel::SlightlyFatigued => RecoveryRecommendation {
            level: RecommendationLevel::Moderate,
            message: "MODERATE FATIGUE: Reduce workout intensity and volume.",
            action: "Lower weights by 20%, reduce sets by 1-2, focus on technique.",
        },
        EnergyLevel::Energized | EnergyLevel::Normal => RecoveryRecommendation {
            level: RecommendationLevel::Normal,
            message: "GOOD TO GO: Your energy levels are optimal for training.",
            action: "Proceed with your planned workout.",
        },
    }
}

/// Recovery status as of `today`. Only logs dated in the trailing seven
/// days (today included) count; today's energy defaults to Normal.
pub fn status(logs: &[DailyActivityLog], today: NaiveDate) -> RecoveryStatus {
    let start = today - Duration::days(FATIGUE_WINDOW_DAYS - 1);
    let fatigue_count = logs
        .iter()
        .filter(|l| l.date >= start && l.date <= today && l.energy_level.is_fatigued())
        .count();
    let current_energy = logs
        .iter()
        .find(|l| l.date == today)
        .map(|l| l.energy_level)
        .unwrap_or_default();
    RecoveryStatus {
        recovery_needed: fatigue_count >= RECOVERY_THRESHOLD,
        fatigue_count,
        current_energy,
        recommendation: recommendation(fatigue_count, current_energy),
    }
}

fn routine_item(name: &str, sets: u32, reps: &str, rest_seconds: u32, guidance: &str) -> PlannedExercise {
    PlannedExercise {
        name: name.to_string(),
        sets,
        reps: reps.to_string(),
        rest_seconds,
        guidance: guidance.to_string(),
        intensity_level: "Light".to_string(),
    }
}

fn recovery_routine() -> Vec<PlannedExercise> {
    vec![
        routine_item("Light Stretching", 1, "10 minutes", 0, "Gentle full-body stretching routine"),
        routine_item("Foam Rolling", 1, "10 minutes", 0, "Focus on tight/sore muscle groups"),
    ]
}

fn mobility_routine() -> Vec<PlannedExercise> {
    vec![
        routine_item(
            "Dynamic Stretching",
            2,
            "10 movements",
            30,
            "Gentle dynamic stretches for all major muscle groups",
        ),
        routine_item(
            "Yoga Flow",
            1,
            "15 minutes",
            0,
            "Light yoga flow focusing on flexibility and breathing",
        ),
        routine_item("Walking", 1, "20 minutes", 0, "Easy-pace walk outdoors or on treadmill"),
    ]
}

/// Adapt an already generated plan to the user's recovery status.
/// Returns whether the plan changed.
pub fn adapt(plan: &mut WorkoutPlan, status: &RecoveryStatus) -> bool {
    if status.recovery_needed {
        for day in plan.workouts.iter_mut() {
            day.rest_day = true;
            day.day_type = "Recovery".to_string();
            day.exercises = recovery_routine();
        }
        plan.adjusted = true;
        plan.adjustment_reason =
            Some("Recovery day enforced due to accumulated fatigue".to_string());
        return true;
    }

    let adj = adjustment(status.current_energy);
    if !adj.should_adjust {
        return false;
    }
    for day in plan.workouts.iter_mut().filter(|d| !d.rest_day) {
        if adj.swap_to_mobility {
            day.day_type = "Mobility & Recovery".to_string();
            day.exercises = mobility_routine();
        } else {
            for ex in day.exercises.iter_mut() {
                ex.sets = ((ex.sets as f64 * adj.volume_multiplier).round() as u32).max(1);
                ex.rest_seconds += 15;
            }
        }
    }
    plan.adjusted = true;
    plan.adjustment_reason = Some(format!(
        "Workout adjusted for {} energy level",
        status.current_energy
    ));
    true
}
