use serde::{Deserialize, Serialize};
use serde_json::Value;

use clipintel_core::{Confidence, Effort, Impact};

/// Where a normalized opportunity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunitySource {
    Diagnostics,
    Competitor,
    Audit,
}

impl OpportunitySource {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OpportunitySource::Diagnostics => "Channel Diagnostics",
            OpportunitySource::Competitor => "Competitor Analysis",
            OpportunitySource::Audit => "Content Audit",
        }
    }
}

/// One recommendation in the common schema all sources normalize into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub source: OpportunitySource,
    pub source_label: String,
    pub action: String,
    pub evidence: String,
    pub format: Option<String>,
    pub impact: Impact,
    pub confidence: Confidence,
    pub effort: Effort,
    /// Weighted score in `[0, 1]`.
    pub score: f64,
    /// The source record as supplied, kept for traceability.
    pub raw_data: Value,
}

/// How replicable an outlier's success is for the client, as judged by the
/// upstream insight layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Replicability {
    High,
    Medium,
    Low,
}

/// Insight attached to a competitor outlier by the upstream analysis layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierInsight {
    pub applicable_tactics: Vec<String>,
    pub content_angle: String,
    pub why_it_worked: String,
    pub replicability: Replicability,
}

/// A competitor video that massively outperformed its channel average,
/// paired with the insight explaining it. Outliers arriving without an
/// insight are malformed and dropped during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorOutlier {
    pub id: String,
    pub title: String,
    pub view_count: u64,
    pub channel: String,
    pub insight: Option<OutlierInsight>,
}

/// One content gap from an externally-run channel audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditContentGap {
    pub gap: String,
    pub suggested_action: String,
    pub evidence: String,
    pub format: Option<String>,
    pub potential_impact: Impact,
}

/// One growth lever from an externally-run channel audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthLever {
    pub lever: String,
    pub current_state: String,
    pub target_state: String,
    pub evidence: String,
    pub format: Option<String>,
    pub priority: Impact,
}

/// Externally-produced audit payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub content_gaps: Vec<AuditContentGap>,
    pub growth_levers: Vec<GrowthLever>,
}

/// Per-source availability and contribution counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SourceStatus {
    pub count: usize,
    /// Whether the collaborator supplied this source at all.
    pub available: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SourceSummary {
    pub diagnostics: SourceStatus,
    pub competitor: SourceStatus,
    pub audit: SourceStatus,
}

/// The ranked opportunity list plus source coverage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityReport {
    pub opportunities: Vec<Opportunity>,
    pub sources: SourceSummary,
}
