use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::params;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::plan::{DietPlan, PlanKind, WorkoutPlan};

use super::Database;

#[derive(Debug, Clone, Serialize)]
pub struct StoredPlan {
    pub id: String,
    pub kind: PlanKind,
    pub week_number: u32,
    pub created_at: DateTime<Utc>,
}

impl Database {
    fn upsert_plan<T: Serialize>(
        &self,
        id: &str,
        user_id: &str,
        kind: PlanKind,
        week_number: u32,
        created_at: DateTime<Utc>,
        plan: &T,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO plans (id, user_id, kind, week_number, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id, kind, week_number) DO UPDATE SET
                id = excluded.id,
                body = excluded.body,
                created_at = excluded.created_at",
            params![
                id,
                user_id,
                kind.to_string(),
                week_number,
                serde_json::to_string(plan)?,
                created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn get_plan<T: DeserializeOwned>(
        &self,
        user_id: &str,
        kind: PlanKind,
        week_number: u32,
    ) -> Result<Option<T>> {
        let mut stmt = self.conn.prepare(
            "SELECT body FROM plans WHERE user_id = ?1 AND kind = ?2 AND week_number = ?3",
        )?;
        let mut rows = stmt.query_map(params![user_id, kind.to_string(), week_number], |row| {
            row.get::<_, String>(0)
        })?;
        match rows.next() {
            Some(body) => Ok(Some(serde_json::from_str(&body?)?)),
            None => Ok(None),
        }
    }

    /// Store a week's workout plan, replacing any earlier plan for that week.
    pub fn save_workout_plan(&self, p: &WorkoutPlan) -> Result<()> {
        self.upsert_plan(&p.id, &p.user_id, PlanKind::Workout, p.week_number, p.created_at, p)
    }

    pub fn save_diet_plan(&self, p: &DietPlan) -> Result<()> {
        self.upsert_plan(&p.id, &p.user_id, PlanKind::Diet, p.week_number, p.created_at, p)
    }

    pub fn get_workout_plan(&self, user_id: &str, week_number: u32) -> Result<Option<WorkoutPlan>> {
        self.get_plan(user_id, PlanKind::Workout, week_number)
    }

    pub fn get_diet_plan(&self, user_id: &str, week_number: u32) -> Result<Option<DietPlan>> {
        self.get_plan(user_id, PlanKind::Diet, week_number)
    }

    pub fn list_plans(&self, user_id: &str, kind: PlanKind) -> Result<Vec<StoredPlan>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, week_number, created_at FROM plans
             WHERE user_id = ?1 AND kind = ?2 ORDER BY week_number",
        )?;
        let rows = stmt.query_map(params![user_id, kind.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, week_number, created_at) = row?;
            out.push(StoredPlan {
                id,
                kind,
                week_number,
                created_at: DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc),
            });
        }
        Ok(out)
    }

    /// Highest week number with a stored plan of this kind.
    pub fn latest_plan_week(&self, user_id: &str, kind: PlanKind) -> Result<Option<u32>> {
        let week: Option<u32> = self.conn.query_row(
            "SELECT MAX(week_number) FROM plans WHERE user_id = ?1 AND kind = ?2",
            params![user_id, kind.to_string()],
            |row| row.get(0),
        )?;
        Ok(week)
    }
}
