use anyhow::Result;

use fitplan::core::generator::{CommandGenerator, PlanGenerator};
use fitplan::core::planner;
use fitplan::models::plan::PlanKind;
use fitplan::output::human;

use super::Session;

pub fn run_generate(s: &Session, kind: &str, week: Option<u32>) -> Result<()> {
    let kind: PlanKind = kind.parse()?;
    let command = CommandGenerator::from_settings(&s.config.generator);
    let generator = command.as_ref().map(|g| g as &dyn PlanGenerator);
    match kind {
        PlanKind::Workout => {
            let plan = planner::generate_workout(&s.db, &s.user_id, week, s.today, generator)?;
            s.emit("plan generate", &plan, human::format_workout_plan)
        }
        PlanKind::Diet => {
            let plan = planner::generate_diet(&s.db, &s.user_id, week, s.today, generator)?;
            s.emit("plan generate", &plan, human::format_diet_plan)
        }
    }
}

pub fn run_show(s: &Session, kind: &str, week: Option<u32>, adapt: bool) -> Result<()> {
    match kind.parse::<PlanKind>()? {
        PlanKind::Workout => {
            let plan = planner::show_workout(&s.db, &s.user_id, week, adapt, s.today)?;
            s.emit("plan show", &plan, human::format_workout_plan)
        }
        PlanKind::Diet => {
            let plan = planner::show_diet(&s.db, &s.user_id, week)?;
            s.emit("plan show", &plan, human::format_diet_plan)
        }
    }
}

pub fn run_list(s: &Session, kind: &str) -> Result<()> {
    let plans = planner::list(&s.db, &s.user_id, kind.parse()?)?;
    s.emit("plan list", &plans, |plans| {
        if plans.is_empty() {
            return "No plans stored.".to_string();
        }
        plans
            .iter()
            .map(|p| format!("week {} | {} | {}", p.week_number, p.kind, p.created_at.format("%Y-%m-%d %H:%M")))
            .collect::<Vec<_>>()
            .join("\n")
    })
}
