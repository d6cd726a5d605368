use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use crate::core::forecast::{Forecast, ForecastStatus};
use crate::core::insights::HabitSummary;
use crate::core::measurements::MeasurementComparison;
use crate::core::overload::OverloadAdvice;
use crate::core::recovery::{RecommendationLevel, RecoveryStatus};
use crate::core::status::StatusData;
use crate::models::log::DailyActivityLog;
use crate::models::measurement::BodyMeasurement;
use crate::models::plan::{DietPlan, WorkoutPlan};
use crate::models::profile::UserProfile;
use crate::models::risk::{RiskAssessment, RiskLevel};

fn table(header: Vec<&str>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    t
}

fn risk_label(level: RiskLevel) -> String {
    let text = level.to_string().to_uppercase();
    match level {
        RiskLevel::Critical => text.red().bold().to_string(),
        RiskLevel::High => text.red().to_string(),
        RiskLevel::Medium => text.yellow().to_string(),
        RiskLevel::Low => text.green().to_string(),
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

pub fn format_profile(p: &UserProfile) -> String {
    let i = p.input();
    let t = p.targets();
    let mut out = format!("=== Profile: {} ===\n\n", p.user_id);
    out.push_str(&format!(
        "{} | {} y | {} cm | {} kg -> {} kg\n",
        i.sex, i.age, i.height_cm, i.weight_kg, i.target_weight_kg
    ));
    out.push_str(&format!(
        "Goal: {} | Activity: {} | Experience: {} | {} training day(s)\n",
        i.goal, i.activity_level, i.experience_level, i.available_days
    ));
    if !i.injuries.is_empty() {
        out.push_str(&format!("Injuries: {}\n", i.injuries.join(", ")));
    }
    if !i.allergies.is_empty() {
        out.push_str(&format!("Allergies: {}\n", i.allergies.join(", ")));
    }
    let mut tt = table(vec!["BMI", "BMR", "TDEE", "Calories", "Protein", "Carbs", "Fat"]);
    tt.add_row(vec![
        format!("{}", t.bmi),
        format!("{}", t.bmr),
        format!("{}", t.tdee),
        t.daily_calorie_target.to_string(),
        format!("{} g", t.macros.protein_grams),
        format!("{} g", t.macros.carbs_grams),
        format!("{} g", t.macros.fat_grams),
    ]);
    out.push_str(&tt.to_string());
    out
}

pub fn format_workout_plan(p: &WorkoutPlan) -> String {
    let mut out = format!("=== Workout plan, week {} ({}) ===\n", p.week_number, p.source);
    out.push_str(&p.week_summary);
    out.push('\n');
    if let Some(ref reason) = p.adjustment_reason {
        out.push_str(&format!("{} {}\n", "Adjusted:".yellow(), reason));
    }
    let mut t = table(vec!["Day", "Type", "Exercise", "Sets", "Reps", "Rest"]);
    for day in &p.workouts {
        if day.exercises.is_empty() {
            t.add_row(vec![day.day_name.clone(), day.day_type.clone(), "-".into(), "".into(), "".into(), "".into()]);
            continue;
        }
        for (i, ex) in day.exercises.iter().enumerate() {
            let (name, kind) = if i == 0 {
                (day.day_name.clone(), day.day_type.clone())
            } else {
                (String::new(), String::new())
            };
            t.add_row(vec![
                name,
                kind,
                ex.name.clone(),
                ex.sets.to_string(),
                ex.reps.clone(),
                format!("{}s", ex.rest_seconds),
            ]);
        }
    }
    out.push_str(&t.to_string());
    out
}

pub fn format_diet_plan(p: &DietPlan) -> String {
    let mut out = format!(
        "=== Diet plan, week {} ({}) ===\n{} kcal/day | P {} g | C {} g | F {} g\n",
        p.week_number,
        p.source,
        p.daily_calorie_target,
        p.macros.protein_grams,
        p.macros.carbs_grams,
        p.macros.fat_grams
    );
    let mut t = table(vec!["#", "Meal", "Time", "kcal", "Description"]);
    for m in &p.meals {
        let mut desc = m.description.clone();
        if let Some(ref note) = m.modification_note {
            desc.push_str(&format!("\n({})", note));
        }
        t.add_row(vec![
            m.meal_number.to_string(),
            m.meal_name.clone(),
            m.time_suggestion.clone(),
            m.estimated_calories.to_string(),
            desc,
        ]);
    }
    out.push_str(&t.to_string());
    out
}

pub fn format_daily_log(l: &DailyActivityLog) -> String {
    let mut line = format!(
        "{} | workout: {} | diet: {} | energy: {} | sleep: {} h",
        l.date,
        yes_no(l.workout_completed),
        yes_no(l.diet_followed),
        l.energy_level,
        l.sleep_hours
    );
    if let Some(w) = l.weight_kg {
        line.push_str(&format!(" | {} kg", w));
    }
    line
}

pub fn format_overload(a: &OverloadAdvice) -> String {
    let mut out = format!(
        "{}: {} ({})",
        a.exercise_name,
        a.recommendation.to_string().bold(),
        a.reason
    );
    if let Some(kg) = a.suggested_weight_increase {
        out.push_str(&format!("\n  add {} kg", kg));
    }
    if let Some(reps) = a.suggested_rep_increase {
        out.push_str(&format!("\n  add {} reps", reps));
    }
    if let Some(kg) = a.suggested_weight_decrease {
        out.push_str(&format!("\n  drop {} kg", kg));
    }
    out
}

pub fn format_habit(h: &HabitSummary) -> String {
    let mut t = table(vec!["Source", "Period", "Workout %", "Diet %", "Score", "Streak"]);
    for r in [&h.daily, &h.weekly].into_iter().flatten() {
        t.add_row(vec![
            r.source.to_string(),
            r.period.clone(),
            r.workout_adherence_percent.to_string(),
            r.diet_adherence_percent.to_string(),
            r.habit_score.to_string(),
            r.streak_count.to_string(),
        ]);
    }
    let mut out = t.to_string();
    if let Some(ref s) = h.stats {
        out.push_str(&format!(
            "\nLast {} days: {} logged | workout {}% | diet {}% | streak {} (best {})",
            s.window_days,
            s.total_days_logged,
            s.workout_completion_rate,
            s.diet_completion_rate,
            s.streak,
            s.best_streak
        ));
    }
    out
}

pub fn format_risk(r: &RiskAssessment) -> String {
    let mut out = format!("Risk: {} (score {})\n", risk_label(r.risk_level), r.risk_score);
    for reason in &r.reasons {
        out.push_str(&format!("  - {}\n", reason));
    }
    for rec in &r.recommendations {
        out.push_str(&format!("  > {}\n", rec));
    }
    for note in &r.positive_notes {
        out.push_str(&format!("  + {}\n", note.green()));
    }
    out.trim_end().to_string()
}

pub fn format_forecast(f: &Forecast) -> String {
    match f.status {
        ForecastStatus::InsufficientData => format!(
            "Not enough weigh-ins ({}). {}",
            f.observations, f.confidence
        ),
        ForecastStatus::NoChange => format!("Weight is not changing. {}", f.confidence),
        ForecastStatus::Estimated => {
            let mut out = format!(
                "~{} week(s) to goal | avg {} kg/week | confidence: {}",
                f.estimated_weeks.unwrap_or(0),
                f.avg_weekly_change.unwrap_or(0.0),
                f.confidence
            );
            if let (Some(weeks), Some(remaining)) = (f.weeks_at_current_gap, f.remaining_kg) {
                out.push_str(&format!("\nAt the current rate: {} week(s) for {} kg", weeks, remaining));
            }
            out
        }
    }
}

pub fn format_recovery(r: &RecoveryStatus) -> String {
    let level = format!("{:?}", r.recommendation.level).to_uppercase();
    let level = match r.recommendation.level {
        RecommendationLevel::Critical => level.red().bold().to_string(),
        RecommendationLevel::High => level.red().to_string(),
        RecommendationLevel::Moderate => level.yellow().to_string(),
        RecommendationLevel::Normal => level.green().to_string(),
    };
    format!(
        "Recovery: {} | fatigued days (7d): {} | energy today: {}\n{}\n{}",
        level,
        r.fatigue_count,
        r.current_energy,
        r.recommendation.message,
        r.recommendation.action
    )
}

pub fn format_status(s: &StatusData) -> String {
    let p = &s.profile;
    let mut out = format!("=== fitplan status: {} ===\n\n", s.date);
    out.push_str(&format!(
        "Goal: {} | {} kg -> {} kg | BMI: {} ({})\n",
        p.goal, p.weight_kg, p.target_weight_kg, p.bmi, p.bmi_category
    ));
    out.push_str(&format!("Calorie target: {} kcal\n", p.daily_calorie_target));
    match s.today {
        Some(ref l) => out.push_str(&format!("Today: {}\n", format_daily_log(l))),
        None => out.push_str("Nothing logged today.\n"),
    }
    if s.streak_days > 0 {
        out.push_str(&format!("Streak: {} day(s)\n", s.streak_days));
    }
    if let Some(score) = s.habit_score {
        out.push_str(&format!("Habit score: {}\n", score));
    }
    out.push_str(&format!("Risk: {} (score {})", risk_label(s.risk_level), s.risk_score));
    if s.recovery_needed {
        out.push_str(&format!("\n{}", "Recovery needed: take it easy this week".yellow()));
    }
    out
}

fn cm(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn format_measurements(list: &[BodyMeasurement]) -> String {
    if list.is_empty() {
        return "No body measurements logged.".to_string();
    }
    let mut t = table(vec!["Date", "Waist", "Chest", "Hips", "L arm", "R arm", "L thigh", "R thigh"]);
    for m in list {
        let mut row = vec![m.date.to_string()];
        row.extend(m.measurements.sites().iter().map(|(_, v)| cm(*v)));
        t.add_row(row);
    }
    t.to_string()
}

pub fn format_comparison(c: &MeasurementComparison) -> String {
    let (Some(changes), Some(from), Some(to)) = (&c.comparison, c.from, c.to) else {
        return c.message.clone().unwrap_or_default();
    };
    let mut out = format!("=== Measurements {} -> {} ===\n", from, to);
    let mut t = table(vec!["Site", "Start", "End", "Change"]);
    for (site, ch) in changes {
        let change = if ch.change_cm < 0.0 {
            format!("{} cm", ch.change_cm).green().to_string()
        } else {
            format!("+{} cm", ch.change_cm)
        };
        t.add_row(vec![
            site.trim_end_matches("_cm").replace('_', " "),
            ch.start_cm.to_string(),
            ch.end_cm.to_string(),
            change,
        ]);
    }
    out.push_str(&t.to_string());
    out
}
