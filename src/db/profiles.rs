use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::models::profile::{ProfileInput, UserProfile};

use super::Database;

struct ProfileRow {
    user_id: String,
    age: u32,
    sex: String,
    height_cm: f64,
    weight_kg: f64,
    goal: String,
    target_weight_kg: f64,
    activity_level: String,
    experience_level: String,
    available_days: u8,
    dietary_preference: String,
    allergies: String,
    injuries: String,
    created_at: String,
    updated_at: String,
}

fn row_to_profile(r: ProfileRow) -> Result<UserProfile> {
    let input = ProfileInput {
        age: r.age,
        sex: r.sex.parse()?,
        height_cm: r.height_cm,
        weight_kg: r.weight_kg,
        goal: r.goal.parse()?,
        target_weight_kg: r.target_weight_kg,
        activity_level: r.activity_level.parse()?,
        experience_level: r.experience_level.parse()?,
        available_days: r.available_days,
        dietary_preference: r.dietary_preference,
        allergies: serde_json::from_str(&r.allergies).unwrap_or_default(),
        injuries: serde_json::from_str(&r.injuries).unwrap_or_default(),
    };
    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&r.created_at)?.with_timezone(&Utc);
    let updated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&r.updated_at)?.with_timezone(&Utc);
    Ok(UserProfile::restore(r.user_id, input, created_at, updated_at)?)
}

impl Database {
    /// Insert or replace the single profile row for a user. Derived targets
    /// are never stored; they are recomputed on load.
    pub fn upsert_profile(&self, p: &UserProfile) -> Result<()> {
        let input = p.input();
        self.conn.execute(
            "INSERT INTO profiles (user_id, age, sex, height_cm, weight_kg, goal, target_weight_kg,
                activity_level, experience_level, available_days, dietary_preference, allergies,
                injuries, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
             ON CONFLICT(user_id) DO UPDATE SET
                age = excluded.age,
                sex = excluded.sex,
                height_cm = excluded.height_cm,
                weight_kg = excluded.weight_kg,
                goal = excluded.goal,
                target_weight_kg = excluded.target_weight_kg,
                activity_level = excluded.activity_level,
                experience_level = excluded.experience_level,
                available_days = excluded.available_days,
                dietary_preference = excluded.dietary_preference,
                allergies = excluded.allergies,
                injuries = excluded.injuries,
                updated_at = excluded.updated_at",
            params![
                p.user_id,
                input.age,
                input.sex.to_string(),
                input.height_cm,
                input.weight_kg,
                input.goal.to_string(),
                input.target_weight_kg,
                input.activity_level.to_string(),
                input.experience_level.to_string(),
                input.available_days,
                input.dietary_preference,
                serde_json::to_string(&input.allergies)?,
                serde_json::to_string(&input.injuries)?,
                p.created_at.to_rfc3339(),
                p.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, age, sex, height_cm, weight_kg, goal, target_weight_kg, activity_level,
                    experience_level, available_days, dietary_preference, allergies, injuries,
                    created_at, updated_at
             FROM profiles WHERE user_id = ?1",
        )?;
        let mut rows = stmt.query_map(params![user_id], |row| {
            Ok(ProfileRow {
                user_id: row.get(0)?,
                age: row.get(1)?,
                sex: row.get(2)?,
                height_cm: row.get(3)?,
                weight_kg: row.get(4)?,
                goal: row.get(5)?,
                target_weight_kg: row.get(6)?,
                activity_level: row.get(7)?,
                experience_level: row.get(8)?,
                available_days: row.get(9)?,
                dietary_preference: row.get(10)?,
                allergies: row.get(11)?,
                injuries: row.get(12)?,
                created_at: row.get(13)?,
                updated_at: row.get(14)?,
            })
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_profile(row?)?)),
            None => Ok(None),
        }
    }
}
