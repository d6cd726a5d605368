use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::models::log::WeeklySubmission;

use super::Database;

struct ProgressRow {
    user_id: String,
    week_number: u32,
    weight_kg: Option<f64>,
    days: String,
    workout_adherence_percent: u32,
    diet_adherence_percent: u32,
    submitted_at: String,
}

fn row_to_submission(r: ProgressRow) -> Result<WeeklySubmission> {
    Ok(WeeklySubmission {
        user_id: r.user_id,
        week_number: r.week_number,
        weight_kg: r.weight_kg,
        days: serde_json::from_str(&r.days)?,
        workout_adherence_percent: r.workout_adherence_percent,
        diet_adherence_percent: r.diet_adherence_percent,
        submitted_at: DateTime::parse_from_rfc3339(&r.submitted_at)?.with_timezone(&Utc),
    })
}

impl Database {
    /// One submission per (user, week); resubmitting replaces it.
    pub fn upsert_weekly_submission(&self, s: &WeeklySubmission) -> Result<()> {
        self.conn.execute(
            "INSERT INTO progress_logs (user_id, week_number, weight_kg, days,
                workout_adherence_percent, diet_adherence_percent, submitted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(user_id, week_number) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                days = excluded.days,
                workout_adherence_percent = excluded.workout_adherence_percent,
                diet_adherence_percent = excluded.diet_adherence_percent,
                submitted_at = excluded.submitted_at",
            params![
                s.user_id,
                s.week_number,
                s.weight_kg,
                serde_json::to_string(&s.days)?,
                s.workout_adherence_percent,
                s.diet_adherence_percent,
                s.submitted_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All submissions for a user in week order.
    pub fn weekly_submissions(&self, user_id: &str) -> Result<Vec<WeeklySubmission>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, week_number, weight_kg, days, workout_adherence_percent,
                    diet_adherence_percent, submitted_at
             FROM progress_logs WHERE user_id = ?1 ORDER BY week_number",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(ProgressRow {
                user_id: row.get(0)?,
                week_number: row.get(1)?,
                weight_kg: row.get(2)?,
                days: row.get(3)?,
                workout_adherence_percent: row.get(4)?,
                diet_adherence_percent: row.get(5)?,
                submitted_at: row.get(6)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row_to_submission(row?)?);
        }
        Ok(out)
    }
}
