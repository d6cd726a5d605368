use anyhow::Result;

use fitplan::core::insights;
use fitplan::output::human;

use super::Session;

pub fn run(s: &Session, stats: bool, week: Option<u32>) -> Result<()> {
    if let Some(week) = week {
        let adherence = insights::session_adherence(&s.db, &s.user_id, week)?;
        return s.emit("habit", &adherence, |a| {
            format!(
                "Week {}: {} session(s), {}% adherence",
                a.week_number, a.sessions, a.adherence_percent
            )
        });
    }
    let summary = insights::habit_summary(&s.db, &s.user_id, s.today, stats)?;
    s.emit("habit", &summary, human::format_habit)
}
