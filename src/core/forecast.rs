use chrono::NaiveDate;
use serde::Serialize;

use crate::core::habit;
use crate::models::log::{DailyActivityLog, WeeklySubmission};

/// Distance in kg the headline estimate is computed against. It is not the
/// user's remaining distance; see `weeks_at_current_gap` for that.
pub const FIXED_GOAL_DISTANCE_KG: f64 = 5.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForecastStatus {
    Estimated,
    /// Weight is not changing, so no estimate can be made.
    NoChange,
    InsufficientData,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Forecast {
    pub status: ForecastStatus,
    pub estimated_weeks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_weekly_change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weeks_at_current_gap: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_kg: Option<f64>,
    pub observations: usize,
    pub confidence: String,
}

/// Weekly weight series, oldest first. Weekly submissions are used when
/// they hold at least two weigh-ins; otherwise the last daily weigh-in of
/// each ISO week.
pub fn weight_series(submissions: &[WeeklySubmission], daily_logs: &[DailyActivityLog]) -> Vec<f64> {
    let weekly: Vec<f64> = submissions.iter().filter_map(|s| s.weight_kg).collect();
    if weekly.len() >= 2 {
        return weekly;
    }

    let mut weighed: Vec<(NaiveDate, f64)> = daily_logs
        .iter()
        .filter_map(|l| l.weight_kg.map(|w| (l.date, w)))
        .collect();
    weighed.sort_by_key(|(d, _)| *d);

    let mut series: Vec<(NaiveDate, f64)> = Vec::new();
    for (date, w) in weighed {
        match series.last_mut() {
            Some(last) if habit::iso_week_start(last.0) == habit::iso_week_start(date) => *last = (date, w),
            _ => series.push((date, w)),
        }
    }
    if series.len() >= 2 {
        series.into_iter().map(|(_, w)| w).collect()
    } else {
        weekly
    }
}

fn weeks_for(distance: f64, avg: f64) -> u32 {
    (distance / avg).abs().ceil() as u32
}

/// Forecast weeks to goal from weekly weight observations in
/// chronological order.
pub fn forecast(weights: &[f64], target_weight_kg: Option<f64>) -> Forecast {
    if weights.len() < 2 {
        return Forecast {
            status: ForecastStatus::InsufficientData,
            estimated_weeks: None,
            avg_weekly_change: None,
            weeks_at_current_gap: None,
            remaining_kg: None,
            observations: weights.len(),
            confidence: "Low - Need more data".to_string(),
        };
    }

    let deltas: Vec<f64> = weights.windows(2).map(|w| w[1] - w[0]).collect();
    let avg = deltas.iter().sum::<f64>() / deltas.len() as f64;
    let current = weights[weights.len() - 1];
    let remaining = target_weight_kg.map(|t| ((t - current) * 10.0).round() / 10.0);

    if avg == 0.0 {
        return Forecast {
            status: ForecastStatus::NoChange,
            estimated_weeks: None,
            avg_weekly_change: Some(0.0),
            weeks_at_current_gap: None,
            remaining_kg: remaining,
            observations: weights.len(),
            confidence: "Low - Weight is not changing".to_string(),
        };
    }

    Forecast {
        status: ForecastStatus::Estimated,
        estimated_weeks: Some(weeks_for(FIXED_GOAL_DISTANCE_KG, avg)),
        avg_weekly_change: Some((avg * 10.0).round() / 10.0),
        weeks_at_current_gap: remaining.map(|r| weeks_for(r, avg)),
        remaining_kg: remaining,
        observations: weights.len(),
        confidence: "Medium".to_string(),
    }
}
