use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{habit, insights, planner, profile};
use crate::db::Database;
use crate::models::log::DailyActivityLog;
use crate::models::plan::PlanKind;
use crate::models::risk::RiskLevel;

#[derive(Serialize)]
pub struct StatusData {
    pub date: NaiveDate,
    pub profile: ProfileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<DailyActivityLog>,
    pub streak_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habit_score: Option<u32>,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub recovery_needed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_workout_week: Option<u32>,
}

#[derive(Serialize)]
pub struct ProfileStatus {
    pub goal: String,
    pub weight_kg: f64,
    pub target_weight_kg: f64,
    pub bmi: f64,
    pub bmi_category: &'static str,
    pub daily_calorie_target: u32,
}

pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "underweight"
    } else if bmi < 25.0 {
        "normal"
    } else if bmi < 30.0 {
        "overweight"
    } else {
        "obese"
    }
}

/// Compute the daily overview for a user.
pub fn compute(db: &Database, user_id: &str, today: NaiveDate) -> Result<StatusData> {
    let profile = profile::require(db, user_id)?;
    let input = profile.input();
    let targets = profile.targets();

    let logs = db.recent_daily_logs(user_id, today, habit::HISTORY_DAYS)?;
    let today_log = logs.iter().find(|l| l.date == today).cloned();
    let risk = insights::risk(db, user_id, today)?;
    let habit_score = insights::habit_summary(db, user_id, today, false)?
        .daily
        .map(|h| h.habit_score);
    let recovery = planner::recovery_status(db, user_id, today)?;

    Ok(StatusData {
        date: today,
        profile: ProfileStatus {
            goal: input.goal.to_string(),
            weight_kg: input.weight_kg,
            target_weight_kg: input.target_weight_kg,
            bmi: targets.bmi,
            bmi_category: bmi_category(targets.bmi),
            daily_calorie_target: targets.daily_calorie_target,
        },
        today: today_log,
        streak_days: habit::daily_streak(&logs, today),
        habit_score,
        risk_level: risk.risk_level,
        risk_score: risk.risk_score,
        recovery_needed: recovery.recovery_needed,
        current_workout_week: db.latest_plan_week(user_id, PlanKind::Workout)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_category_bands() {
        assert_eq!(bmi_category(17.0), "underweight");
        assert_eq!(bmi_category(22.9), "normal");
        assert_eq!(bmi_category(25.0), "overweight");
        assert_eq!(bmi_category(31.2), "obese");
    }
}
