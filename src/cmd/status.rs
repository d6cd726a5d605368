use anyhow::Result;

use fitplan::core::status;
use fitplan::output::human;

use super::Session;

pub fn run(s: &Session) -> Result<()> {
    let data = status::compute(&s.db, &s.user_id, s.today)?;
    s.emit("status", &data, human::format_status)
}
