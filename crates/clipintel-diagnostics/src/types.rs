use serde::{Deserialize, Serialize};

/// Urgency of a diagnostic recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: lower is more urgent.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Estimated monthly upside of acting on an item, in views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub views_per_month: f64,
}

/// One recommendation produced by a diagnostic detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action: String,
    /// Machine-readable detector tag, e.g. `upload_cadence_drop`.
    pub reason: String,
    pub impact: Option<ImpactEstimate>,
    /// Supporting video titles, at most three.
    pub examples: Vec<String>,
}
