use anyhow::Result;
use serde_json::json;

use fitplan::error::FitError;
use fitplan::models::config::Config;
use fitplan::output;

use super::split_list;

pub fn run_show(human: bool) -> Result<()> {
    let config = Config::load()?;
    if human {
        let toml_str = toml::to_string_pretty(&config)?;
        println!("{}", toml_str);
    } else {
        let out = output::success("config", json!({ "config": config }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

fn invalid(key: &str, value: &str) -> FitError {
    FitError::Validation(format!("invalid value for {}: {}", key, value))
}

pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "user.id" => {
            if value.trim().is_empty() {
                return Err(invalid(key, value).into());
            }
            config.user.id = value.trim().to_string();
        }
        "plan.default_training_days" => {
            let days: u8 = value.parse().map_err(|_| invalid(key, value))?;
            if !(1..=7).contains(&days) {
                return Err(invalid(key, value).into());
            }
            config.plan.default_training_days = days;
        }
        "generator.command" => {
            config.generator.command = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        "generator.args" => config.generator.args = split_list(value),
        "generator.timeout_secs" => {
            config.generator.timeout_secs = value.parse().map_err(|_| invalid(key, value))?;
        }
        k if k.starts_with("alias.") => {
            let alias = &k["alias.".len()..];
            if alias.is_empty() {
                return Err(invalid(key, value).into());
            }
            config.aliases.insert(alias.to_lowercase(), value.to_string());
        }
        _ => return Err(FitError::Validation(format!("unknown config key: {}", key)).into()),
    }

    config.save()?;
    let out = output::success("config", json!({ "key": key, "value": value }));
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
