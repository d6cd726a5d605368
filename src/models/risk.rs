use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 75 => Self::Critical,
            s if s >= 50 => Self::High,
            s if s >= 25 => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiskAssessment {
    pub at_risk: bool,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
    pub positive_notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_last_log: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_rate_7d: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_rate_7d: Option<u32>,
}
