use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::params;

use crate::models::log::DailyActivityLog;

use super::Database;

struct DailyLogRow {
    user_id: String,
    date: String,
    workout_completed: bool,
    diet_followed: bool,
    energy_level: String,
    sleep_hours: f64,
    weight_kg: Option<f64>,
    notes: Option<String>,
}

fn row_to_log(r: DailyLogRow) -> Result<DailyActivityLog> {
    Ok(DailyActivityLog {
        user_id: r.user_id,
        date: NaiveDate::parse_from_str(&r.date, "%Y-%m-%d")?,
        workout_completed: r.workout_completed,
        diet_followed: r.diet_followed,
        energy_level: r.energy_level.parse()?,
        sleep_hours: r.sleep_hours,
        weight_kg: r.weight_kg,
        notes: r.notes,
    })
}

const SELECT_COLS: &str =
    "user_id, date, workout_completed, diet_followed, energy_level, sleep_hours, weight_kg, notes";

macro_rules! map_row {
    ($row:expr) => {
        Ok(DailyLogRow {
            user_id: $row.get(0)?,
            date: $row.get(1)?,
            workout_completed: $row.get(2)?,
            diet_followed: $row.get(3)?,
            energy_level: $row.get(4)?,
            sleep_hours: $row.get(5)?,
            weight_kg: $row.get(6)?,
            notes: $row.get(7)?,
        })
    };
}

impl Database {
    /// One row per (user, date): a second log for the same day replaces the first.
    pub fn upsert_daily_log(&self, log: &DailyActivityLog) -> Result<()> {
        self.conn.execute(
            "INSERT INTO daily_logs (user_id, date, workout_completed, diet_followed, energy_level,
                sleep_hours, weight_kg, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(user_id, date) DO UPDATE SET
                workout_completed = excluded.workout_completed,
                diet_followed = excluded.diet_followed,
                energy_level = excluded.energy_level,
                sleep_hours = excluded.sleep_hours,
                weight_kg = excluded.weight_kg,
                notes = excluded.notes",
            params![
                log.user_id,
                log.date.to_string(),
                log.workout_completed,
                log.diet_followed,
                log.energy_level.to_string(),
                log.sleep_hours,
                log.weight_kg,
                log.notes,
            ],
        )?;
        Ok(())
    }

    pub fn get_daily_log(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyActivityLog>> {
        let sql = format!("SELECT {SELECT_COLS} FROM daily_logs WHERE user_id = ?1 AND date = ?2");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![user_id, date.to_string()], |row| map_row!(row))?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_log(row?)?)),
            None => Ok(None),
        }
    }

    /// Logs dated in `[start, end]`, most recent first.
    pub fn daily_logs_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyActivityLog>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM daily_logs
             WHERE user_id = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![user_id, start.to_string(), end.to_string()],
            |row| map_row!(row),
        )?;
        let mut logs = Vec::new();
        for row in rows {
            logs.push(row_to_log(row?)?);
        }
        Ok(logs)
    }

    /// The most recent `limit` logs on or before `until`, most recent first.
    pub fn recent_daily_logs(
        &self,
        user_id: &str,
        until: NaiveDate,
        limit: u32,
    ) -> Result<Vec<DailyActivityLog>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM daily_logs
             WHERE user_id = ?1 AND date <= ?2 ORDER BY date DESC LIMIT ?3"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, until.to_string(), limit], |row| {
            map_row!(row)
        })?;
        let mut logs = Vec::new();
        for row in rows {
            logs.push(row_to_log(row?)?);
        }
        Ok(logs)
    }

    /// Dates logged on or after `start`, oldest first.
    pub fn daily_log_dates_since(&self, user_id: &str, start: NaiveDate) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT date FROM daily_logs WHERE user_id = ?1 AND date >= ?2 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![user_id, start.to_string()], |row| row.get::<_, String>(0))?;
        let mut dates = Vec::new();
        for row in rows {
            dates.push(NaiveDate::parse_from_str(&row?, "%Y-%m-%d")?);
        }
        Ok(dates)
    }
}
