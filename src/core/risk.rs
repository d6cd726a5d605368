use chrono::{Duration, NaiveDate};

use crate::models::log::DailyActivityLog;
use crate::models::risk::{RiskAssessment, RiskLevel};

pub const TRAILING_DAYS: i64 = 7;
/// Score reported when nothing has been logged at all.
const NO_HISTORY_SCORE: u32 = 100;

/// Score accumulator. Every triggered signal marks the user at risk,
/// whatever the final total.
#[derive(Default)]
struct Signals {
    score: u32,
    triggered: bool,
    reasons: Vec<String>,
    recommendations: Vec<String>,
    positive_notes: Vec<String>,
}

impl Signals {
    fn flag(&mut self, points: u32, reason: String, recommendation: &str) {
        self.score += points;
        self.triggered = true;
        self.reasons.push(reason);
        self.recommendations.push(recommendation.to_string());
    }

    fn praise(&mut self, note: &str) {
        self.positive_notes.push(note.to_string());
    }
}

fn rate(count: usize) -> u32 {
    (count as f64 / TRAILING_DAYS as f64 * 100.0).round() as u32
}

/// Assess drop-off risk from the user's daily logs (any order) as of
/// `today`, together with their latest habit score and current streak.
pub fn assess(
    logs: &[DailyActivityLog],
    habit_score: Option<u32>,
    streak: u32,
    today: NaiveDate,
) -> RiskAssessment {
    let mut sorted: Vec<&DailyActivityLog> = logs.iter().filter(|l| l.date <= today).collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let Some(latest) = sorted.first() else {
        return RiskAssessment {
            at_risk: true,
            risk_level: RiskLevel::Critical,
            risk_score: NO_HISTORY_SCORE,
            reasons: vec!["No activity logged yet".to_string()],
            recommendations: vec!["Log today's workout, meals and energy to get started".to_string()],
            positive_notes: Vec::new(),
            days_since_last_log: None,
            workout_rate_7d: None,
            diet_rate_7d: None,
        };
    };

    let mut s = Signals::default();

    let days_since = (today - latest.date).num_days();
    if days_since > 3 {
        s.flag(
            25,
            format!("No log for {} days", days_since),
            "Send a motivational check-in and log something small today",
        );
    } else if days_since == 0 {
        s.praise("Logged today");
    }

    let start = today - Duration::days(TRAILING_DAYS - 1);
    let trailing: Vec<&DailyActivityLog> =
        sorted.iter().copied().filter(|l| l.date >= start).collect();

    let workout_rate = rate(trailing.iter().filter(|l| l.workout_completed).count());
    if workout_rate < 30 {
        s.flag(
            30,
            format!("Workout completion at {}% over the last 7 days", workout_rate),
            "Offer a lighter plan with fewer training days",
        );
    } else if workout_rate >= 70 {
        s.praise("Strong workout consistency this week");
    }

    let diet_rate = rate(trailing.iter().filter(|l| l.diet_followed).count());
    if diet_rate < 40 {
        s.flag(
            25,
            format!("Diet adherence at {}% over the last 7 days", diet_rate),
            "Offer a simpler meal plan or a schedule reset",
        );
    } else if diet_rate >= 80 {
        s.praise("Excellent diet adherence this week");
    }

    let idle_run = sorted
        .iter()
        .take_while(|l| !l.workout_completed && !l.diet_followed)
        .count();
    if idle_run >= 3 {
        s.flag(
            20,
            format!("{} logged days in a row with no workout or diet", idle_run),
            "Set one tiny goal for tomorrow",
        );
    }

    if let Some(score) = habit_score {
        if score < 50 {
            s.flag(
                15,
                format!("Habit score is {}", score),
                "Focus on one habit at a time",
            );
        } else if score >= 80 {
            s.praise("Habit score is excellent");
        }
    }

    if streak == 0 {
        s.flag(10, "No active streak".to_string(), "Start a new streak today");
    } else if streak >= 7 {
        s.praise("Streak of 7+ days");
    }

    let low_energy = trailing.iter().filter(|l| l.energy_level.is_fatigued()).count();
    if low_energy >= 4 {
        s.flag(
            10,
            format!("Low energy on {} of the last 7 days", low_energy),
            "Schedule a recovery week",
        );
    }

    let slept: Vec<f64> = trailing
        .iter()
        .map(|l| l.sleep_hours)
        .filter(|h| *h > 0.0)
        .collect();
    if !slept.is_empty() {
        let avg = slept.iter().sum::<f64>() / slept.len() as f64;
        if avg < 6.0 {
            s.flag(
                10,
                format!("Averaging {:.1} hours of sleep", avg),
                "Aim for 7-9 hours of sleep",
            );
        } else if (7.0..=9.0).contains(&avg) {
            s.praise("Sleep is in the healthy range");
        }
    }

    if !s.triggered {
        s.praise("You're on track. Keep it up!");
    }

    RiskAssessment {
        at_risk: s.triggered,
        risk_level: RiskLevel::from_score(s.score),
        risk_score: s.score,
        reasons: s.reasons,
        recommendations: s.recommendations,
        positive_notes: s.positive_notes,
        days_since_last_log: Some(days_since),
        workout_rate_7d: Some(workout_rate),
        diet_rate_7d: Some(diet_rate),
    }
}
