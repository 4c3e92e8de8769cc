use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clipintel_core::VideoFormat;

/// Lifecycle state of an externally-persisted brief. Drafts are excluded
/// from before/after window computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BriefStatus {
    Draft,
    Queued,
    Published,
    Archived,
}

/// The predicted upside recorded on a brief when it was created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedImpact {
    pub views_per_month: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefData {
    /// Intended format of the recommended video, if the brief specified one.
    pub content_type: Option<VideoFormat>,
    pub impact: Option<PredictedImpact>,
}

/// The slice of an externally-owned brief record this core reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brief {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub status: BriefStatus,
    /// Which pipeline source produced the recommendation, e.g. `diagnostics`.
    pub source_type: String,
    pub brief_data: BriefData,
}

/// One candidate video for linking to a brief.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// Index into the history slice the matcher was given.
    pub video_index: usize,
    pub title: String,
    pub score: f64,
    pub title_similarity: f64,
    /// Signed days between brief creation and publication.
    pub days_from_brief: i64,
}

/// Mean metrics over the pre-brief baseline window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Baseline {
    pub views: f64,
    pub ctr: f64,
    pub retention: f64,
    /// Number of videos the baseline was computed over. A zero count makes
    /// `outperformed` meaningless and every delta `null`.
    pub count: usize,
}

/// The linked video's own metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActualMetrics {
    pub views: u64,
    pub ctr: f64,
    pub retention: f64,
    pub title: String,
}

/// Relative deltas vs the baseline; `None` where the baseline was zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutcomeDelta {
    pub views: Option<f64>,
    pub ctr: Option<f64>,
    pub retention: Option<f64>,
}

/// Outcome of one executed brief: actual vs baseline vs prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefOutcome {
    pub baseline: Baseline,
    pub actual: ActualMetrics,
    pub predicted: Option<PredictedImpact>,
    pub delta: OutcomeDelta,
    pub outperformed: bool,
    /// `None` when the brief carried no prediction.
    pub exceeded_prediction: Option<bool>,
    pub computed_at: DateTime<Utc>,
}

/// A brief paired with its computed outcome, if a video was ever linked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedBrief {
    pub brief: Brief,
    pub outcome: Option<BriefOutcome>,
}

/// Mean channel metrics over one reporting window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    pub views: f64,
    pub ctr: f64,
    pub retention: f64,
    pub subscribers_gained: f64,
    pub video_count: usize,
}

/// Recommendation-accuracy roll-up over linked briefs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyStats {
    pub linked: usize,
    pub outperformed: usize,
    pub outperformed_pct: f64,
    /// Linked briefs that carried a prediction.
    pub predicted: usize,
    pub exceeded: usize,
    pub exceeded_pct: f64,
}

/// Per-source-type accuracy breakdown.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SourceTypeStats {
    pub linked: usize,
    pub outperformed: usize,
}

/// Channel-level before/after statistics plus accuracy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    /// Absent when no non-draft brief exists to anchor the window.
    pub channel_before: Option<WindowStats>,
    pub channel_after: WindowStats,
    pub accuracy: AccuracyStats,
    pub by_source_type: std::collections::BTreeMap<String, SourceTypeStats>,
}
