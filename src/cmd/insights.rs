use anyhow::Result;
use serde_json::json;

use fitplan::core::{insights, planner};
use fitplan::output::human;

use super::Session;

pub fn run_overload(s: &Session, exercise: &str, history: Option<u32>) -> Result<()> {
    let advice = insights::overload(&s.db, &s.config, &s.user_id, exercise)?;
    let Some(limit) = history else {
        return s.emit("overload", &advice, human::format_overload);
    };
    let sessions = insights::exercise_history(&s.db, &s.config, &s.user_id, exercise, limit)?;
    let data = json!({ "advice": advice, "history": sessions });
    s.emit("overload", &data, |_| {
        let mut out = human::format_overload(&advice);
        for e in &sessions {
            out.push_str(&format!(
                "\n  {} | {}/{} sets | {}",
                e.date, e.sets_completed, e.sets_planned, e.completion_status
            ));
        }
        out
    })
}

pub fn run_risk(s: &Session) -> Result<()> {
    let risk = insights::risk(&s.db, &s.user_id, s.today)?;
    s.emit("risk", &risk, human::format_risk)
}

pub fn run_forecast(s: &Session) -> Result<()> {
    let forecast = insights::forecast(&s.db, &s.user_id, s.today)?;
    s.emit("forecast", &forecast, human::format_forecast)
}

pub fn run_recovery(s: &Session) -> Result<()> {
    let status = planner::recovery_status(&s.db, &s.user_id, s.today)?;
    s.emit("recovery", &status, human::format_recovery)
}
