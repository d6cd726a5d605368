use anyhow::Result;

use fitplan::core::profile;
use fitplan::models::profile::{ActivityLevel, ExperienceLevel, Goal, ProfileUpdate, Sex};
use fitplan::output::human;

use super::{Session, split_list};

pub fn run_show(s: &Session) -> Result<()> {
    let p = profile::require(&s.db, &s.user_id)?;
    s.emit("profile", &p, human::format_profile)
}

/// Raw `profile set` flags; enum fields are parsed here so bad values
/// come back as validation errors in the JSON envelope.
#[derive(Default)]
pub struct SetArgs {
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<String>,
    pub target_weight: Option<f64>,
    pub activity: Option<String>,
    pub experience: Option<String>,
    pub days: Option<u8>,
    pub diet: Option<String>,
    pub allergies: Option<String>,
    pub injuries: Option<String>,
}

impl SetArgs {
    fn into_update(self) -> Result<ProfileUpdate> {
        Ok(ProfileUpdate {
            age: self.age,
            sex: self.sex.as_deref().map(str::parse::<Sex>).transpose()?,
            height_cm: self.height,
            weight_kg: self.weight,
            goal: self.goal.as_deref().map(str::parse::<Goal>).transpose()?,
            target_weight_kg: self.target_weight,
            activity_level: self.activity.as_deref().map(str::parse::<ActivityLevel>).transpose()?,
            experience_level: self
                .experience
                .as_deref()
                .map(str::parse::<ExperienceLevel>)
                .transpose()?,
            available_days: self.days,
            dietary_preference: self.diet,
            allergies: self.allergies.as_deref().map(split_list),
            injuries: self.injuries.as_deref().map(split_list),
        })
    }
}

pub fn run_set(s: &Session, args: SetArgs) -> Result<()> {
    let update = args.into_update()?;
    let p = profile::set(&s.db, &s.config, &s.user_id, update)?;
    s.emit("profile", &p, human::format_profile)
}
