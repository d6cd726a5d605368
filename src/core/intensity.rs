use crate::models::plan::WorkoutDay;
use crate::models::profile::ActivityLevel;

const MIN_SETS: u32 = 2;
const MAX_SETS: u32 = 5;

pub fn multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 0.8,
        ActivityLevel::Light => 0.9,
        ActivityLevel::Moderate => 1.0,
        ActivityLevel::Active => 1.1,
    }
}

/// Set count after applying an activity multiplier. Reductions floor and
/// never go below two sets; increases ceil and never go above five.
pub fn scale_sets(sets: u32, m: f64) -> u32 {
    let raw = sets as f64 * m;
    if m < 1.0 {
        (raw.floor() as u32).max(MIN_SETS)
    } else if m > 1.0 {
        (raw.ceil() as u32).min(MAX_SETS)
    } else {
        sets
    }
}

/// Scale every training day's set counts for the user's activity level.
pub fn apply(days: &mut [WorkoutDay], level: ActivityLevel) {
    let m = multiplier(level);
    if m == 1.0 {
        return;
    }
    let suffix = if m < 1.0 {
        format!(" (volume reduced for {} activity level)", level)
    } else {
        format!(" (volume increased for {} activity level)", level)
    };
    for day in days.iter_mut().filter(|d| !d.rest_day) {
        for ex in day.exercises.iter_mut() {
            ex.sets = scale_sets(ex.sets, m);
            ex.guidance.push_str(&suffix);
        }
    }
}
