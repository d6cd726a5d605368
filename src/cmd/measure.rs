use anyhow::Result;
use chrono::NaiveDate;

use fitplan::core::measurements;
use fitplan::models::measurement::Circumferences;
use fitplan::output::human;

use super::Session;

pub fn run_log(s: &Session, sites: Circumferences, note: Option<String>) -> Result<()> {
    let m = measurements::log_measurement(&s.db, &s.user_id, s.today, sites, note)?;
    s.emit("log measure", &m, |m| human::format_measurements(std::slice::from_ref(m)))
}

pub fn run_show(
    s: &Session,
    latest: bool,
    compare: bool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    if compare {
        let c = measurements::comparison(&s.db, &s.user_id, from, to)?;
        return s.emit("measurements", &c, human::format_comparison);
    }
    if latest {
        let m = measurements::latest(&s.db, &s.user_id)?;
        return s.emit("measurements", &m, |m| human::format_measurements(std::slice::from_ref(m)));
    }
    let all = s.db.measurement_history(&s.user_id)?;
    s.emit("measurements", &all, |all| human::format_measurements(all))
}
