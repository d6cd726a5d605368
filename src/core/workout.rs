use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::constraints::{ExerciseFilter, core_stability_fallback};
use super::generator::{GenerationRequest, PlanGenerator, WorkoutPayload, parse_workout};
use super::{intensity, templates};
use crate::models::log::EnergyLevel;
use crate::models::plan::{PlanKind, PlanSource, WorkoutDay, WorkoutPlan};
use crate::models::profile::UserProfile;

/// Apply the injury filter to every training day. A day left without
/// exercises gets a low-impact core circuit.
pub fn filter_days(days: &mut [WorkoutDay], filter: &ExerciseFilter) {
    if filter.is_empty() {
        return;
    }
    for day in days.iter_mut().filter(|d| !d.rest_day) {
        let exercises = std::mem::take(&mut day.exercises);
        day.exercises = filter.apply(exercises);
        if day.exercises.is_empty() {
            day.exercises.push(core_stability_fallback());
        }
    }
}

fn empty_plan(profile: &UserProfile, week_number: u32, source: PlanSource) -> WorkoutPlan {
    WorkoutPlan {
        id: Uuid::new_v4().to_string(),
        user_id: profile.user_id.clone(),
        week_number,
        week_summary: String::new(),
        source,
        workouts: Vec::new(),
        adjusted: false,
        adjustment_reason: None,
        progression_notes: None,
        recovery_tips: None,
        motivation_message: None,
        created_at: Utc::now(),
    }
}

/// Deterministic plan from the template library.
///
/// A fatigued `current_energy` overrides everything else and yields the
/// recovery week. Otherwise the level's templates are laid out over the
/// available days, filtered for injuries, then scaled for activity level.
pub fn template_plan(
    profile: &UserProfile,
    week_number: u32,
    current_energy: EnergyLevel,
) -> WorkoutPlan {
    let input = profile.input();
    let mut plan = empty_plan(profile, week_number, PlanSource::Template);

    if current_energy.is_fatigued() {
        plan.workouts = templates::recovery_week();
        plan.adjusted = true;
        plan.adjustment_reason = Some(format!(
            "Recovery week: current energy is {}",
            current_energy
        ));
        plan.week_summary = format!(
            "Week {}: recovery week with mobility and light cardio",
            week_number
        );
        plan.recovery_tips = Some(
            "Sleep 7-9 hours, stay hydrated and keep every session conversational.".to_string(),
        );
        plan.motivation_message =
            Some("Recovery is training too. You'll come back stronger.".to_string());
        return plan;
    }

    let mut days = templates::select_week(input.experience_level, input.available_days);
    let filter = ExerciseFilter::new(&input.injuries);
    filter_days(&mut days, &filter);
    intensity::apply(&mut days, input.activity_level);
    plan.workouts = days;

    let mut summary = format!(
        "Week {}: {} training days, {} program for {}",
        week_number,
        plan.training_days(),
        input.experience_level,
        input.goal
    );
    if !filter.is_empty() {
        let names: Vec<String> = filter.injuries().iter().map(|i| i.to_string()).collect();
        summary.push_str(&format!(" (adjusted for {} limitations)", names.join(", ")));
    }
    plan.week_summary = summary;
    plan.progression_notes = Some(
        "When every set feels easy for two sessions in a row, add 2.5kg; if a set feels too hard, drop back.".to_string(),
    );
    plan.recovery_tips =
        Some("Keep rest days light: walking, stretching or foam rolling.".to_string());
    plan.motivation_message = Some(format!(
        "Consistency beats intensity. Show up for all {} sessions this week.",
        plan.training_days()
    ));
    plan
}

fn from_payload(profile: &UserProfile, week_number: u32, payload: WorkoutPayload) -> WorkoutPlan {
    let mut plan = empty_plan(profile, week_number, PlanSource::Generated);
    let mut days = payload.weekly_schedule;
    filter_days(&mut days, &ExerciseFilter::new(&profile.input().injuries));
    plan.workouts = days;
    plan.week_summary = payload.week_summary;
    plan.progression_notes = payload.progression_notes;
    plan.recovery_tips = payload.recovery_tips;
    plan.motivation_message = payload.motivation_message;
    plan
}

/// Build a week's workout plan, asking the generator first when one is
/// configured. Fatigue always takes the template recovery week, and any
/// generator failure falls back to the template plan.
pub fn build(
    profile: &UserProfile,
    week_number: u32,
    current_energy: EnergyLevel,
    generator: Option<&dyn PlanGenerator>,
    context: &serde_json::Value,
) -> WorkoutPlan {
    if current_energy.is_fatigued() {
        return template_plan(profile, week_number, current_energy);
    }
    let Some(generator) = generator else {
        return template_plan(profile, week_number, current_energy);
    };

    let request = GenerationRequest {
        kind: PlanKind::Workout,
        week_number,
        context: context.clone(),
    };
    match generator
        .generate(&request)
        .and_then(|raw| parse_workout(&raw))
    {
        Ok(payload) => {
            info!(generator = generator.name(), week = week_number, "generated workout plan");
            from_payload(profile, week_number, payload)
        }
        Err(e) => {
            warn!(generator = generator.name(), error = %e, "workout generation failed, using templates");
            template_plan(profile, week_number, current_energy)
        }
    }
}
