use anyhow::Result;

use crate::db::Database;
use crate::error::FitError;
use crate::models::config::Config;
use crate::models::profile::{ProfileUpdate, UserProfile};

/// Load a profile, or fail with `not_found`.
pub fn require(db: &Database, user_id: &str) -> Result<UserProfile> {
    db.get_profile(user_id)?
        .ok_or_else(|| FitError::NotFound(format!("no profile for user '{}'", user_id)).into())
}

/// Create the profile on first use, otherwise apply the edit. Derived
/// targets are recomputed either way.
pub fn set(
    db: &Database,
    config: &Config,
    user_id: &str,
    mut update: ProfileUpdate,
) -> Result<UserProfile> {
    let profile = match db.get_profile(user_id)? {
        Some(mut existing) => {
            if update.is_empty() {
                return Err(FitError::Validation("no profile fields given".into()).into());
            }
            existing.apply(update)?;
            existing
        }
        None => {
            if update.available_days.is_none() {
                update.available_days = Some(config.plan.default_training_days);
            }
            UserProfile::new(user_id, update.into_new_input()?)?
        }
    };
    db.upsert_profile(&profile)?;
    Ok(profile)
}
