use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::params;

use crate::models::log::ExerciseLogEntry;

use super::Database;

struct ExerciseLogRow {
    id: String,
    user_id: String,
    exercise_name: String,
    week_number: Option<u32>,
    day_number: Option<u32>,
    date: String,
    sets_completed: u32,
    sets_planned: u32,
    set_details: String,
    completion_status: String,
    notes: Option<String>,
    created_at: String,
}

fn row_to_entry(r: ExerciseLogRow) -> Result<ExerciseLogEntry> {
    Ok(ExerciseLogEntry {
        id: r.id,
        user_id: r.user_id,
        exercise_name: r.exercise_name,
        week_number: r.week_number,
        day_number: r.day_number,
        date: NaiveDate::parse_from_str(&r.date, "%Y-%m-%d")?,
        sets_completed: r.sets_completed,
        sets_planned: r.sets_planned,
        set_details: serde_json::from_str(&r.set_details)?,
        completion_status: r.completion_status.parse()?,
        notes: r.notes,
        created_at: DateTime::parse_from_rfc3339(&r.created_at)?.with_timezone(&Utc),
    })
}

const SELECT_COLS: &str = "id, user_id, exercise_name, week_number, day_number, date, sets_completed, sets_planned, set_details, completion_status, notes, created_at";

macro_rules! map_row {
    ($row:expr) => {
        Ok(ExerciseLogRow {
            id: $row.get(0)?,
            user_id: $row.get(1)?,
            exercise_name: $row.get(2)?,
            week_number: $row.get(3)?,
            day_number: $row.get(4)?,
            date: $row.get(5)?,
            sets_completed: $row.get(6)?,
            sets_planned: $row.get(7)?,
            set_details: $row.get(8)?,
            completion_status: $row.get(9)?,
            notes: $row.get(10)?,
            created_at: $row.get(11)?,
        })
    };
}

impl Database {
    pub fn insert_exercise_log(&self, e: &ExerciseLogEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO exercise_logs (id, user_id, exercise_name, week_number, day_number, date,
                sets_completed, sets_planned, set_details, completion_status, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                e.id,
                e.user_id,
                e.exercise_name,
                e.week_number,
                e.day_number,
                e.date.to_string(),
                e.sets_completed,
                e.sets_planned,
                serde_json::to_string(&e.set_details)?,
                e.completion_status.to_string(),
                e.notes,
                e.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Entries for one exercise (name matched case-insensitively), most recent first.
    pub fn exercise_history(
        &self,
        user_id: &str,
        exercise_name: &str,
        limit: u32,
    ) -> Result<Vec<ExerciseLogEntry>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM exercise_logs
             WHERE user_id = ?1 AND exercise_name = ?2 COLLATE NOCASE
             ORDER BY date DESC, created_at DESC LIMIT ?3"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, exercise_name, limit], |row| map_row!(row))?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row_to_entry(row?)?);
        }
        Ok(entries)
    }

    /// Entries logged against a plan week, in day order.
    pub fn week_exercise_logs(&self, user_id: &str, week_number: u32) -> Result<Vec<ExerciseLogEntry>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM exercise_logs
             WHERE user_id = ?1 AND week_number = ?2
             ORDER BY day_number, created_at"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, week_number], |row| map_row!(row))?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row_to_entry(row?)?);
        }
        Ok(entries)
    }
}
