use anyhow::Result;
use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::core::generator::PlanGenerator;
use crate::core::recovery::{self, FATIGUE_WINDOW_DAYS, RecoveryStatus};
use crate::core::{context, diet, profile, workout};
use crate::db::Database;
use crate::db::plans::StoredPlan;
use crate::error::FitError;
use crate::models::plan::{DietPlan, PlanKind, WorkoutPlan};

/// Week number the next generated plan gets when none is asked for.
pub fn next_week(db: &Database, user_id: &str, kind: PlanKind) -> Result<u32> {
    Ok(db.latest_plan_week(user_id, kind)?.map_or(1, |w| w + 1))
}

fn resolve_week(db: &Database, user_id: &str, kind: PlanKind, week: Option<u32>) -> Result<u32> {
    match week {
        Some(0) => Err(FitError::Validation("week must be at least 1".into()).into()),
        Some(w) => Ok(w),
        None => next_week(db, user_id, kind),
    }
}

/// Recovery status from the trailing fatigue window.
pub fn recovery_status(db: &Database, user_id: &str, today: NaiveDate) -> Result<RecoveryStatus> {
    let start = today - Duration::days(FATIGUE_WINDOW_DAYS - 1);
    let logs = db.daily_logs_between(user_id, start, today)?;
    Ok(recovery::status(&logs, today))
}

fn generator_context(db: &Database, user_id: &str, today: NaiveDate) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(context::compute(db, user_id, today)?)?)
}

/// Build and store a workout plan. Today's logged energy decides whether
/// the week is a recovery week.
pub fn generate_workout(
    db: &Database,
    user_id: &str,
    week: Option<u32>,
    today: NaiveDate,
    generator: Option<&dyn PlanGenerator>,
) -> Result<WorkoutPlan> {
    let profile = profile::require(db, user_id)?;
    let week_number = resolve_week(db, user_id, PlanKind::Workout, week)?;
    let energy = db
        .get_daily_log(user_id, today)?
        .map(|l| l.energy_level)
        .unwrap_or_default();
    let context = match generator {
        Some(_) => generator_context(db, user_id, today)?,
        None => serde_json::Value::Null,
    };

    let plan = workout::build(&profile, week_number, energy, generator, &context);
    db.save_workout_plan(&plan)?;
    info!(
        user = user_id,
        week = week_number,
        source = %plan.source,
        training_days = plan.training_days(),
        "saved workout plan"
    );
    Ok(plan)
}

pub fn generate_diet(
    db: &Database,
    user_id: &str,
    week: Option<u32>,
    today: NaiveDate,
    generator: Option<&dyn PlanGenerator>,
) -> Result<DietPlan> {
    let profile = profile::require(db, user_id)?;
    let week_number = resolve_week(db, user_id, PlanKind::Diet, week)?;
    let context = match generator {
        Some(_) => generator_context(db, user_id, today)?,
        None => serde_json::Value::Null,
    };

    let plan = diet::build(&profile, week_number, generator, &context);
    db.save_diet_plan(&plan)?;
    info!(
        user = user_id,
        week = week_number,
        source = %plan.source,
        meals = plan.meals.len(),
        "saved diet plan"
    );
    Ok(plan)
}

fn stored_week(db: &Database, user_id: &str, kind: PlanKind, week: Option<u32>) -> Result<u32> {
    match week {
        Some(w) => Ok(w),
        None => db
            .latest_plan_week(user_id, kind)?
            .ok_or_else(|| FitError::NotFound(format!("no {} plan yet", kind)).into()),
    }
}

/// A stored workout plan. With `adapt`, the week is adjusted for the
/// user's current recovery status; the stored plan is left as it is.
pub fn show_workout(
    db: &Database,
    user_id: &str,
    week: Option<u32>,
    adapt: bool,
    today: NaiveDate,
) -> Result<WorkoutPlan> {
    let week_number = stored_week(db, user_id, PlanKind::Workout, week)?;
    let mut plan = db.get_workout_plan(user_id, week_number)?.ok_or_else(|| {
        FitError::NotFound(format!("no workout plan for week {}", week_number))
    })?;
    if adapt {
        let status = recovery_status(db, user_id, today)?;
        recovery::adapt(&mut plan, &status);
    }
    Ok(plan)
}

pub fn show_diet(db: &Database, user_id: &str, week: Option<u32>) -> Result<DietPlan> {
    let week_number = stored_week(db, user_id, PlanKind::Diet, week)?;
    let plan = db
        .get_diet_plan(user_id, week_number)?
        .ok_or_else(|| FitError::NotFound(format!("no diet plan for week {}", week_number)))?;
    Ok(plan)
}

pub fn list(db: &Database, user_id: &str, kind: PlanKind) -> Result<Vec<StoredPlan>> {
    db.list_plans(user_id, kind)
}
