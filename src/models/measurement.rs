use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body circumferences in centimetres. Any subset may be recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Circumferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hips_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_arm_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_arm_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_thigh_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_thigh_cm: Option<f64>,
}

impl Circumferences {
    /// Every site with its field name, in a fixed order.
    pub fn sites(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("waist_cm", self.waist_cm),
            ("chest_cm", self.chest_cm),
            ("hips_cm", self.hips_cm),
            ("left_arm_cm", self.left_arm_cm),
            ("right_arm_cm", self.right_arm_cm),
            ("left_thigh_cm", self.left_thigh_cm),
            ("right_thigh_cm", self.right_thigh_cm),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.sites().iter().all(|(_, v)| v.is_none())
    }
}

/// One measuring session. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyMeasurement {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub measurements: Circumferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BodyMeasurement {
    pub fn new(user_id: impl Into<String>, date: NaiveDate, measurements: Circumferences) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            date,
            measurements,
            notes: None,
            created_at: Utc::now(),
        }
    }
}
