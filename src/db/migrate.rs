use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS profiles (
            user_id            TEXT PRIMARY KEY,
            age                INTEGER NOT NULL,
            sex                TEXT NOT NULL,
            height_cm          REAL NOT NULL,
            weight_kg          REAL NOT NULL,
            goal               TEXT NOT NULL,
            target_weight_kg   REAL NOT NULL,
            activity_level     TEXT NOT NULL,
            experience_level   TEXT NOT NULL,
            available_days     INTEGER NOT NULL,
            dietary_preference TEXT NOT NULL DEFAULT '',
            allergies          TEXT NOT NULL DEFAULT '[]',
            injuries           TEXT NOT NULL DEFAULT '[]',
            created_at         TEXT NOT NULL,
            updated_at         TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS daily_logs (
            user_id           TEXT NOT NULL,
            date              TEXT NOT NULL,
            workout_completed INTEGER NOT NULL DEFAULT 0,
            diet_followed     INTEGER NOT NULL DEFAULT 0,
            energy_level      TEXT NOT NULL DEFAULT 'normal',
            sleep_hours       REAL NOT NULL DEFAULT 0,
            weight_kg         REAL,
            notes             TEXT,
            UNIQUE(user_id, date)
        );
        CREATE INDEX IF NOT EXISTS idx_daily_logs_user_date ON daily_logs(user_id, date);

        CREATE TABLE IF NOT EXISTS exercise_logs (
            id                TEXT PRIMARY KEY,
            user_id           TEXT NOT NULL,
            exercise_name     TEXT NOT NULL,
            week_number       INTEGER,
            day_number        INTEGER,
            date              TEXT NOT NULL,
            sets_completed    INTEGER NOT NULL,
            sets_planned      INTEGER NOT NULL,
            set_details       TEXT NOT NULL,
            completion_status TEXT NOT NULL,
            notes             TEXT,
            created_at        TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_exercise_logs_name
            ON exercise_logs(user_id, exercise_name, date);
        CREATE INDEX IF NOT EXISTS idx_exercise_logs_week ON exercise_logs(user_id, week_number);

        CREATE TABLE IF NOT EXISTS progress_logs (
            user_id                   TEXT NOT NULL,
            week_number               INTEGER NOT NULL,
            weight_kg                 REAL,
            days                      TEXT NOT NULL,
            workout_adherence_percent INTEGER NOT NULL,
            diet_adherence_percent    INTEGER NOT NULL,
            submitted_at              TEXT NOT NULL,
            UNIQUE(user_id, week_number)
        );

        CREATE TABLE IF NOT EXISTS habit_scores (
            user_id                   TEXT NOT NULL,
            source                    TEXT NOT NULL,
            period                    TEXT NOT NULL,
            week_number               INTEGER,
            window_start              TEXT,
            window_end                TEXT,
            workout_adherence_percent INTEGER NOT NULL,
            diet_adherence_percent    INTEGER NOT NULL,
            habit_score               INTEGER NOT NULL,
            streak_count              INTEGER NOT NULL,
            PRIMARY KEY (user_id, source, period)
        );

        CREATE TABLE IF NOT EXISTS plans (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            kind        TEXT NOT NULL,
            week_number INTEGER NOT NULL,
            body        TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            UNIQUE(user_id, kind, week_number)
        );

        CREATE TABLE IF NOT EXISTS body_measurements (
            id             TEXT PRIMARY KEY,
            user_id        TEXT NOT NULL,
            date           TEXT NOT NULL,
            waist_cm       REAL,
            chest_cm       REAL,
            hips_cm        REAL,
            left_arm_cm    REAL,
            right_arm_cm   REAL,
            left_thigh_cm  REAL,
            right_thigh_cm REAL,
            notes          TEXT,
            created_at     TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_body_measurements_user_date
            ON body_measurements(user_id, date);",
    )?;
    Ok(())
}
