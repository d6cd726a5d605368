use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::params;

use crate::models::measurement::{BodyMeasurement, Circumferences};

use super::Database;

struct MeasurementRow {
    id: String,
    user_id: String,
    date: String,
    waist_cm: Option<f64>,
    chest_cm: Option<f64>,
    hips_cm: Option<f64>,
    left_arm_cm: Option<f64>,
    right_arm_cm: Option<f64>,
    left_thigh_cm: Option<f64>,
    right_thigh_cm: Option<f64>,
    notes: Option<String>,
    created_at: String,
}

fn row_to_measurement(r: MeasurementRow) -> Result<BodyMeasurement> {
    Ok(BodyMeasurement {
        id: r.id,
        user_id: r.user_id,
        date: NaiveDate::parse_from_str(&r.date, "%Y-%m-%d")?,
        measurements: Circumferences {
            waist_cm: r.waist_cm,
            chest_cm: r.chest_cm,
            hips_cm: r.hips_cm,
            left_arm_cm: r.left_arm_cm,
            right_arm_cm: r.right_arm_cm,
            left_thigh_cm: r.left_thigh_cm,
            right_thigh_cm: r.right_thigh_cm,
        },
        notes: r.notes,
        created_at: DateTime::parse_from_rfc3339(&r.created_at)?.with_timezone(&Utc),
    })
}

const SELECT_COLS: &str = "id, user_id, date, waist_cm, chest_cm, hips_cm, left_arm_cm, right_arm_cm, left_thigh_cm, right_thigh_cm, notes, created_at";

macro_rules! map_row {
    ($row:expr) => {
        Ok(MeasurementRow {
            id: $row.get(0)?,
            user_id: $row.get(1)?,
            date: $row.get(2)?,
            waist_cm: $row.get(3)?,
            chest_cm: $row.get(4)?,
            hips_cm: $row.get(5)?,
            left_arm_cm: $row.get(6)?,
            right_arm_cm: $row.get(7)?,
            left_thigh_cm: $row.get(8)?,
            right_thigh_cm: $row.get(9)?,
            notes: $row.get(10)?,
            created_at: $row.get(11)?,
        })
    };
}

impl Database {
    pub fn insert_measurement(&self, m: &BodyMeasurement) -> Result<()> {
        let c = &m.measurements;
        self.conn.execute(
            "INSERT INTO body_measurements (id, user_id, date, waist_cm, chest_cm, hips_cm,
                left_arm_cm, right_arm_cm, left_thigh_cm, right_thigh_cm, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                m.id,
                m.user_id,
                m.date.to_string(),
                c.waist_cm,
                c.chest_cm,
                c.hips_cm,
                c.left_arm_cm,
                c.right_arm_cm,
                c.left_thigh_cm,
                c.right_thigh_cm,
                m.notes,
                m.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Measurements dated within the optional bounds, oldest first.
    pub fn measurements_between(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<BodyMeasurement>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM body_measurements
             WHERE user_id = ?1 AND (?2 IS NULL OR date >= ?2) AND (?3 IS NULL OR date <= ?3)
             ORDER BY date, created_at"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                user_id,
                from.map(|d| d.to_string()),
                to.map(|d| d.to_string())
            ],
            |row| map_row!(row),
        )?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row_to_measurement(row?)?);
        }
        Ok(out)
    }

    /// Every measurement for a user, most recent first.
    pub fn measurement_history(&self, user_id: &str) -> Result<Vec<BodyMeasurement>> {
        let mut all = self.measurements_between(user_id, None, None)?;
        all.reverse();
        Ok(all)
    }
}
