pub mod config;
pub mod habit;
pub mod init;
pub mod insights;
pub mod log;
pub mod measure;
pub mod plan;
pub mod profile;
pub mod status;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use fitplan::db::Database;
use fitplan::models::config::Config;
use fitplan::output;

/// Options shared by every command.
pub struct Session {
    pub config: Config,
    pub db: Database,
    pub user_id: String,
    pub today: NaiveDate,
    pub human: bool,
}

impl Session {
    pub fn open(user: Option<&str>, date: Option<NaiveDate>, human: bool) -> Result<Self> {
        let config = Config::load()?;
        let db = Database::open(&Config::db_path())?;
        let user_id = user.map_or_else(|| config.user.id.clone(), str::to_string);
        Ok(Self {
            config,
            db,
            user_id,
            today: date.unwrap_or_else(|| Local::now().date_naive()),
            human,
        })
    }

    /// Print `data` in the JSON envelope, or through `render` with `--human`.
    pub fn emit<T: Serialize>(
        &self,
        command: &str,
        data: &T,
        render: impl FnOnce(&T) -> String,
    ) -> Result<()> {
        if self.human {
            println!("{}", render(data));
        } else {
            let out = output::success(command, serde_json::to_value(data)?);
            println!("{}", serde_json::to_string(&out)?);
        }
        Ok(())
    }
}

/// Split a comma-separated flag into trimmed, non-empty items.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
