use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use clipintel_core::{Confidence, Effort, Impact};

/// Comparison dimension a gap was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapType {
    Format,
    Pattern,
    ContentType,
    Frequency,
    Series,
    Topic,
}

impl GapType {
    /// Human-readable label for the dimension.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GapType::Format => "Content Format",
            GapType::Pattern => "Title Pattern",
            GapType::ContentType => "Shorts vs Long-form",
            GapType::Frequency => "Upload Frequency",
            GapType::Series => "Recurring Series",
            GapType::Topic => "Topic Coverage",
        }
    }
}

impl std::fmt::Display for GapType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GapType::Format => write!(f, "format"),
            GapType::Pattern => write!(f, "pattern"),
            GapType::ContentType => write!(f, "content_type"),
            GapType::Frequency => write!(f, "frequency"),
            GapType::Series => write!(f, "series"),
            GapType::Topic => write!(f, "topic"),
        }
    }
}

/// Competitor-vs-client statistics backing a gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapEvidence {
    pub competitor_stat: String,
    pub client_stat: String,
    /// Best supporting competitor examples, at most three.
    pub top_examples: Vec<String>,
}

/// One evidence-backed gap between the client corpus and the competitor
/// corpus. Created fresh per detection run and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub id: String,
    #[serde(rename = "type")]
    pub gap_type: GapType,
    pub type_label: String,
    pub title: String,
    pub description: String,
    pub action: String,
    pub evidence: GapEvidence,
    /// Severity in `[0, 1]`.
    pub gap_size: f64,
    pub impact: Impact,
    pub confidence: Confidence,
    pub effort: Effort,
    /// Weighted score from the shared scoring policy.
    pub score: f64,
}

/// Roll-up statistics over a detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapSummary {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub top_gap_type: Option<String>,
    pub competitor_count: usize,
    pub video_count: usize,
}

/// Full output of one gap-detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapReport {
    pub gaps: Vec<Gap>,
    pub summary: GapSummary,
    /// Set when the competitor corpus was empty and no comparison ran.
    pub no_videos: bool,
}
