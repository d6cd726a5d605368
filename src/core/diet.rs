use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::constraints::DietFilter;
use super::generator::{DietPayload, GenerationRequest, PlanGenerator, parse_diet};
use crate::models::plan::{DietPlan, Meal, MealMacros, PlanKind, PlanSource};
use crate::models::profile::{Goal, Macros, UserProfile};

pub const MEALS_PER_DAY: u32 = 4;
/// Share of the day's calories and macros in the weight-loss pre-bed snack.
const PRE_BED_SHARE: f64 = 0.1;

struct BaseMeal {
    name: &'static str,
    time: &'static str,
    description: &'static str,
    ingredients: &'static [&'static str],
    tips: &'static str,
    why: &'static str,
}

const BASE_MEALS: [BaseMeal; 4] = [
    BaseMeal {
        name: "Breakfast",
        time: "7:00 AM",
        description: "Oats with protein powder and banana",
        ingredients: &["rolled oats", "whey protein powder", "banana", "cinnamon"],
        tips: "Cook the oats first and stir the protein in off the heat.",
        why: "Slow carbs and protein to start the day fuelled.",
    },
    BaseMeal {
        name: "Snack",
        time: "10:30 AM",
        description: "Greek yogurt with berries",
        ingredients: &["greek yogurt", "mixed berries", "chia seeds"],
        tips: "Use frozen berries to keep it cheap year round.",
        why: "Protein between meals keeps hunger steady.",
    },
    BaseMeal {
        name: "Lunch",
        time: "1:00 PM",
        description: "Chicken breast with rice and vegetables",
        ingredients: &["chicken breast", "brown rice", "mixed vegetables", "olive oil"],
        tips: "Batch-cook the chicken and rice for three days at a time.",
        why: "Lean protein plus carbs to fuel afternoon training.",
    },
    BaseMeal {
        name: "Dinner",
        time: "7:00 PM",
        description: "Salmon with sweet potato and broccoli",
        ingredients: &["salmon fillet", "sweet potato", "broccoli", "lemon"],
        tips: "Roast everything on one tray at 200C for 20 minutes.",
        why: "Omega-3 fats and fibre support recovery overnight.",
    },
];

fn scaled(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).round() as u32
}

/// The daily meal template for a calorie target: four equal meals, plus a
/// pre-bed snack at 10% of the day for weight loss.
pub fn template_meals(calorie_target: u32, goal: Goal, macros: &Macros) -> Vec<Meal> {
    let per_meal = 1.0 / MEALS_PER_DAY as f64;
    let share = |factor: f64| MealMacros {
        protein_g: scaled(macros.protein_grams, factor),
        carbs_g: scaled(macros.carbs_grams, factor),
        fat_g: scaled(macros.fat_grams, factor),
    };

    let mut meals: Vec<Meal> = BASE_MEALS
        .iter()
        .zip(1u32..)
        .map(|(base, number)| Meal {
            meal_number: number,
            meal_name: base.name.to_string(),
            time_suggestion: base.time.to_string(),
            description: base.description.to_string(),
            estimated_calories: scaled(calorie_target, per_meal),
            macros: share(per_meal),
            ingredients: base.ingredients.iter().map(|s| s.to_string()).collect(),
            preparation_tips: base.tips.to_string(),
            why_this_meal: base.why.to_string(),
            modified: false,
            modification_note: None,
        })
        .collect();

    if goal == Goal::WeightLoss {
        meals.push(Meal {
            meal_number: MEALS_PER_DAY + 1,
            meal_name: "Pre-bed Snack".to_string(),
            time_suggestion: "9:30 PM".to_string(),
            description: "Casein or cottage cheese".to_string(),
            estimated_calories: scaled(calorie_target, PRE_BED_SHARE),
            macros: share(PRE_BED_SHARE),
            ingredients: vec!["casein protein".to_string(), "cottage cheese".to_string()],
            preparation_tips: "Mix casein thick like pudding.".to_string(),
            why_this_meal: "Slow-digesting protein protects muscle in a deficit.".to_string(),
            modified: false,
            modification_note: None,
        });
    }
    meals
}

fn empty_plan(profile: &UserProfile, week_number: u32, source: PlanSource) -> DietPlan {
    let targets = profile.targets();
    DietPlan {
        id: Uuid::new_v4().to_string(),
        user_id: profile.user_id.clone(),
        week_number,
        week_summary: String::new(),
        source,
        daily_calorie_target: targets.daily_calorie_target,
        macros: targets.macros,
        meals: Vec::new(),
        hydration_goal: None,
        supplement_suggestions: None,
        meal_prep_tips: None,
        adjustment_notes: None,
        created_at: Utc::now(),
    }
}

fn finish(plan: &mut DietPlan, filter: &DietFilter) {
    let modified = filter.apply_all(&mut plan.meals);
    if modified > 0 {
        let mut reasons: Vec<String> = filter.allergens().iter().map(|a| format!("{} allergy", a)).collect();
        if let Some(p) = filter.preference() {
            reasons.push(format!("{} diet", p));
        }
        plan.adjustment_notes = Some(format!(
            "{} meal(s) adjusted for {}",
            modified,
            reasons.join(", ")
        ));
    }
}

/// Deterministic diet plan from the meal template.
pub fn template_plan(profile: &UserProfile, week_number: u32) -> DietPlan {
    let input = profile.input();
    let mut plan = empty_plan(profile, week_number, PlanSource::Template);
    plan.meals = template_meals(plan.daily_calorie_target, input.goal, &plan.macros);
    plan.week_summary = format!(
        "Week {}: {} kcal/day for {} ({}g protein, {}g carbs, {}g fat)",
        week_number,
        plan.daily_calorie_target,
        input.goal,
        plan.macros.protein_grams,
        plan.macros.carbs_grams,
        plan.macros.fat_grams
    );
    plan.hydration_goal = Some(format!(
        "{:.1} L of water per day",
        (input.weight_kg * 0.035 * 10.0).round() / 10.0
    ));
    plan.meal_prep_tips =
        Some("Prep proteins and grains twice a week; keep cut vegetables ready.".to_string());
    finish(&mut plan, &DietFilter::new(&input.allergies, &input.dietary_preference));
    plan
}

fn from_payload(profile: &UserProfile, week_number: u32, payload: DietPayload) -> DietPlan {
    let input = profile.input();
    let mut plan = empty_plan(profile, week_number, PlanSource::Generated);
    plan.week_summary = payload.week_summary;
    plan.meals = payload.daily_meals;
    plan.hydration_goal = payload.hydration_goal;
    plan.supplement_suggestions = payload.supplement_suggestions;
    plan.meal_prep_tips = payload.meal_prep_tips;
    finish(&mut plan, &DietFilter::new(&input.allergies, &input.dietary_preference));
    plan
}

/// Build a week's diet plan, asking the generator first when one is
/// configured. Calorie and macro targets always come from the profile.
pub fn build(
    profile: &UserProfile,
    week_number: u32,
    generator: Option<&dyn PlanGenerator>,
    context: &serde_json::Value,
) -> DietPlan {
    let Some(generator) = generator else {
        return template_plan(profile, week_number);
    };
    let request = GenerationRequest {
        kind: PlanKind::Diet,
        week_number,
        context: context.clone(),
    };
    match generator.generate(&request).and_then(|raw| parse_diet(&raw)) {
        Ok(payload) => {
            info!(generator = generator.name(), week = week_number, "generated diet plan");
            from_payload(profile, week_number, payload)
        }
        Err(e) => {
            warn!(generator = generator.name(), error = %e, "diet generation failed, using templates");
            template_plan(profile, week_number)
        }
    }
}
