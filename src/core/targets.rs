use crate::models::profile::{
    ActivityLevel, DerivedTargets, Goal, Macros, ProfileInput, Sex,
};

/// Basal metabolic rate (Mifflin-St Jeor), rounded to whole kcal.
pub fn bmr(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    let bmr = match sex {
        Sex::Male => base + 5.0,
        Sex::Female | Sex::Other => base - 161.0,
    };
    bmr.round()
}

pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
    }
}

/// Factor for a free-text activity label; unrecognized labels fall back
/// to the sedentary factor.
pub fn activity_factor_for_label(label: &str) -> f64 {
    label
        .parse::<ActivityLevel>()
        .map(activity_factor)
        .unwrap_or(1.2)
}

pub fn tdee(bmr: f64, factor: f64) -> f64 {
    bmr * factor
}

/// Lowest daily calorie target ever recommended for a sex.
pub fn calorie_floor(sex: Sex) -> u32 {
    match sex {
        Sex::Male => 1500,
        Sex::Female | Sex::Other => 1200,
    }
}

/// Daily calorie target for a goal, never below the sex-specific floor.
pub fn calorie_target(goal: Goal, tdee: f64, sex: Sex) -> u32 {
    let target = match goal {
        Goal::WeightLoss => tdee - 400.0,
        Goal::MuscleGain => tdee + 300.0,
        Goal::Maintenance => tdee,
    }
    .round();
    let floor = calorie_floor(sex);
    if target.is_nan() || target < floor as f64 {
        floor
    } else {
        target as u32
    }
}

/// Percent of calories from (protein, carbs, fat).
pub fn macro_split(goal: Goal) -> (u32, u32, u32) {
    match goal {
        Goal::WeightLoss => (40, 30, 30),
        Goal::MuscleGain => (30, 50, 20),
        Goal::Maintenance => (30, 50, 20),
    }
}

pub fn macros(calories: u32, goal: Goal) -> Macros {
    let (protein, carbs, fat) = macro_split(goal);
    let kcal = calories as f64;
    Macros {
        protein_grams: (protein as f64 / 100.0 * kcal / 4.0).round() as u32,
        carbs_grams: (carbs as f64 / 100.0 * kcal / 4.0).round() as u32,
        fat_grams: (fat as f64 / 100.0 * kcal / 9.0).round() as u32,
        protein_percent: protein,
        carbs_percent: carbs,
        fat_percent: fat,
    }
}

/// Body mass index to one decimal.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let h_m = height_cm / 100.0;
    (weight_kg / (h_m * h_m) * 10.0).round() / 10.0
}

/// Every derived profile field, computed together from one input snapshot.
pub fn derive(input: &ProfileInput) -> DerivedTargets {
    let bmr = bmr(input.weight_kg, input.height_cm, input.age, input.sex);
    let factor = activity_factor(input.activity_level);
    let tdee = tdee(bmr, factor);
    let daily_calorie_target = calorie_target(input.goal, tdee, input.sex);
    DerivedTargets {
        bmi: bmi(input.weight_kg, input.height_cm),
        bmr,
        activity_factor: factor,
        tdee: (tdee * 10.0).round() / 10.0,
        daily_calorie_target,
        macros: macros(daily_calorie_target, input.goal),
    }
}
