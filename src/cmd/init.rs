use anyhow::Result;
use std::io::{self, Write};

use fitplan::core::profile;
use fitplan::db::Database;
use fitplan::models::config::Config;
use fitplan::models::profile::ProfileUpdate;
use fitplan::output;

pub fn run(skip: bool) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    if config.aliases.is_empty() {
        config.aliases = Config::default_aliases();
    }
    config.save()?;
    let db = Database::open(&Config::db_path())?;

    if !skip {
        println!("fitplan: initial setup\n");
        let update = ProfileUpdate {
            age: Some(prompt("Age", |s| s.parse().ok())?),
            sex: Some(prompt("Sex (male/female)", |s| s.parse().ok())?),
            height_cm: Some(prompt("Height (cm)", |s| s.parse().ok())?),
            weight_kg: Some(prompt("Current weight (kg)", |s| s.parse().ok())?),
            goal: Some(prompt("Goal (weight_loss/muscle_gain/maintenance)", |s| {
                s.parse().ok()
            })?),
            target_weight_kg: Some(prompt("Target weight (kg)", |s| s.parse().ok())?),
            activity_level: Some(prompt(
                "Activity (sedentary/light/moderate/very_active)",
                |s| s.parse().ok(),
            )?),
            experience_level: Some(prompt(
                "Experience (beginner/intermediate/advanced)",
                |s| s.parse().ok(),
            )?),
            available_days: Some(prompt("Training days per week (1-7)", |s| s.parse().ok())?),
            dietary_preference: Some(prompt("Dietary preference (or empty)", |s| {
                Some(s.to_string())
            })?),
            allergies: Some(prompt("Allergies (comma separated, or empty)", |s| {
                Some(super::split_list(s))
            })?),
            injuries: Some(prompt("Injuries (comma separated, or empty)", |s| {
                Some(super::split_list(s))
            })?),
        };
        let p = profile::set(&db, &config, &config.user.id, update)?;
        println!(
            "\nSetup complete. Daily calorie target: {} kcal. Data stored in {:?}",
            p.targets().daily_calorie_target,
            Config::data_dir()
        );
    } else {
        let out = output::success(
            "init",
            serde_json::json!({ "config": Config::path(), "database": Config::db_path() }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }

    Ok(())
}

/// Ask until `parse` accepts the answer.
fn prompt<T>(label: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
    loop {
        print!("{}: ", label);
        io::stdout().flush()?;
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf)? == 0 {
            anyhow::bail!("input closed during setup");
        }
        match parse(buf.trim()) {
            Some(v) => return Ok(v),
            None => println!("Please try again."),
        }
    }
}
