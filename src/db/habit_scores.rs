use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::params;

use crate::models::habit::{HabitScoreRecord, ScoreSource};

use super::Database;

struct HabitRow {
    user_id: String,
    source: String,
    period: String,
    week_number: Option<u32>,
    window_start: Option<String>,
    window_end: Option<String>,
    workout_adherence_percent: u32,
    diet_adherence_percent: u32,
    habit_score: u32,
    streak_count: u32,
}

fn parse_date(s: Option<String>) -> Result<Option<NaiveDate>> {
    match s {
        Some(ref d) => Ok(Some(NaiveDate::parse_from_str(d, "%Y-%m-%d")?)),
        None => Ok(None),
    }
}

fn row_to_record(r: HabitRow) -> Result<HabitScoreRecord> {
    Ok(HabitScoreRecord {
        user_id: r.user_id,
        source: r.source.parse()?,
        period: r.period,
        week_number: r.week_number,
        window_start: parse_date(r.window_start)?,
        window_end: parse_date(r.window_end)?,
        workout_adherence_percent: r.workout_adherence_percent,
        diet_adherence_percent: r.diet_adherence_percent,
        habit_score: r.habit_score,
        streak_count: r.streak_count,
    })
}

const SELECT_COLS: &str = "user_id, source, period, week_number, window_start, window_end, workout_adherence_percent, diet_adherence_percent, habit_score, streak_count";

macro_rules! map_row {
    ($row:expr) => {
        Ok(HabitRow {
            user_id: $row.get(0)?,
            source: $row.get(1)?,
            period: $row.get(2)?,
            week_number: $row.get(3)?,
            window_start: $row.get(4)?,
            window_end: $row.get(5)?,
            workout_adherence_percent: $row.get(6)?,
            diet_adherence_percent: $row.get(7)?,
            habit_score: $row.get(8)?,
            streak_count: $row.get(9)?,
        })
    };
}

impl Database {
    /// Keyed by (user, source, period); recomputing a period overwrites it.
    pub fn upsert_habit_score(&self, r: &HabitScoreRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO habit_scores (user_id, source, period, week_number, window_start,
                window_end, workout_adherence_percent, diet_adherence_percent, habit_score,
                streak_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(user_id, source, period) DO UPDATE SET
                week_number = excluded.week_number,
                window_start = excluded.window_start,
                window_end = excluded.window_end,
                workout_adherence_percent = excluded.workout_adherence_percent,
                diet_adherence_percent = excluded.diet_adherence_percent,
                habit_score = excluded.habit_score,
                streak_count = excluded.streak_count",
            params![
                r.user_id,
                r.source.to_string(),
                r.period,
                r.week_number,
                r.window_start.map(|d| d.to_string()),
                r.window_end.map(|d| d.to_string()),
                r.workout_adherence_percent,
                r.diet_adherence_percent,
                r.habit_score,
                r.streak_count,
            ],
        )?;
        Ok(())
    }

    pub fn get_habit_score(
        &self,
        user_id: &str,
        source: ScoreSource,
        period: &str,
    ) -> Result<Option<HabitScoreRecord>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM habit_scores
             WHERE user_id = ?1 AND source = ?2 AND period = ?3"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![user_id, source.to_string(), period], |row| {
            map_row!(row)
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_record(row?)?)),
            None => Ok(None),
        }
    }

    /// Latest weekly-submission record strictly before `week_number`.
    pub fn previous_weekly_score(
        &self,
        user_id: &str,
        week_number: u32,
    ) -> Result<Option<HabitScoreRecord>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM habit_scores
             WHERE user_id = ?1 AND source = ?2 AND week_number < ?3
             ORDER BY week_number DESC LIMIT 1"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(
            params![
                user_id,
                ScoreSource::WeeklySubmission.to_string(),
                week_number
            ],
            |row| map_row!(row),
        )?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_record(row?)?)),
            None => Ok(None),
        }
    }

    /// All records for one scoring path, oldest period first.
    pub fn habit_scores(&self, user_id: &str, source: ScoreSource) -> Result<Vec<HabitScoreRecord>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM habit_scores
             WHERE user_id = ?1 AND source = ?2
             ORDER BY COALESCE(window_end, ''), week_number, period"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, source.to_string()], |row| map_row!(row))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row_to_record(row?)?);
        }
        Ok(out)
    }
}
