use serde::Serialize;
use std::fmt;

const MEDIUM_FROM: f64 = 0.3;
const HIGH_FROM: f64 = 0.6;

/// Display bucket for a route's risk score. Boundaries belong to the higher
/// bucket, and anything that is not below a threshold (NaN included) is high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_risk(risk: f64) -> Self {
        if risk < MEDIUM_FROM {
            RiskLevel::Low
        } else if risk < HIGH_FROM {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "orange",
            RiskLevel::High => "red",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
