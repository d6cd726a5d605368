use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::db::Database;
use crate::error::FitError;
use crate::models::measurement::{BodyMeasurement, Circumferences};

const MIN_CM: f64 = 10.0;
const MAX_CM: f64 = 300.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SiteChange {
    pub start_cm: f64,
    pub end_cm: f64,
    pub change_cm: f64,
}

/// First-to-last change per site. With fewer than two measurements the
/// comparison is absent and `message` says why.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MeasurementComparison {
    pub measurements_compared: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    pub comparison: Option<BTreeMap<&'static str, SiteChange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MeasurementComparison {
    pub fn is_insufficient_data(&self) -> bool {
        self.comparison.is_none()
    }
}

fn validate(c: &Circumferences) -> Result<(), FitError> {
    if c.is_empty() {
        return Err(FitError::Validation("at least one measurement is required".into()));
    }
    for (site, value) in c.sites() {
        if let Some(v) = value
            && !(MIN_CM..=MAX_CM).contains(&v)
        {
            return Err(FitError::Validation(format!(
                "{} must be between {} and {} (got {})",
                site, MIN_CM, MAX_CM, v
            )));
        }
    }
    Ok(())
}

pub fn log_measurement(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
    measurements: Circumferences,
    notes: Option<String>,
) -> Result<BodyMeasurement> {
    validate(&measurements)?;
    let mut m = BodyMeasurement::new(user_id, date, measurements);
    m.notes = notes;
    db.insert_measurement(&m)?;
    Ok(m)
}

/// Compare the earliest and latest measurements. Sites missing from
/// either end are left out.
pub fn compare(measurements: &[BodyMeasurement]) -> MeasurementComparison {
    let mut sorted: Vec<&BodyMeasurement> = measurements.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(f), Some(l)) if sorted.len() >= 2 => (*f, *l),
        _ => {
            return MeasurementComparison {
                measurements_compared: sorted.len(),
                from: None,
                to: None,
                comparison: None,
                message: Some("Need at least 2 measurements to compare".to_string()),
            };
        }
    };

    let mut changes = BTreeMap::new();
    for ((site, start), (_, end)) in first
        .measurements
        .sites()
        .into_iter()
        .zip(last.measurements.sites())
    {
        if let (Some(start_cm), Some(end_cm)) = (start, end) {
            changes.insert(
                site,
                SiteChange {
                    start_cm,
                    end_cm,
                    change_cm: ((end_cm - start_cm) * 10.0).round() / 10.0,
                },
            );
        }
    }

    MeasurementComparison {
        measurements_compared: sorted.len(),
        from: Some(first.date),
        to: Some(last.date),
        comparison: Some(changes),
        message: None,
    }
}

pub fn latest(db: &Database, user_id: &str) -> Result<BodyMeasurement> {
    db.measurement_history(user_id)?
        .into_iter()
        .next()
        .ok_or_else(|| FitError::NotFound("no body measurements logged".into()).into())
}

pub fn comparison(
    db: &Database,
    user_id: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<MeasurementComparison> {
    Ok(compare(&db.measurements_between(user_id, from, to)?))
}
