//! Shared domain types exchanged between the pipeline stages.
//!
//! All rate fields (`ctr`, `retention`) are fractions in `[0.0, 1.0]`.
//! Callers normalizing external rows from a 0-100 scale must divide by 100
//! before records enter the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publishing format of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Short,
    Long,
}

impl VideoFormat {
    /// The opposite format, used by the format-balance detector.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            VideoFormat::Short => VideoFormat::Long,
            VideoFormat::Long => VideoFormat::Short,
        }
    }
}

impl std::fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoFormat::Short => write!(f, "short"),
            VideoFormat::Long => write!(f, "long"),
        }
    }
}

/// Immutable performance snapshot of one published video.
///
/// Supplied fresh on each pipeline run; the core assigns no persistent
/// identity to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub views: u64,
    /// Click-through rate as a fraction in `[0, 1]`.
    pub ctr: f64,
    /// Average-percent-retention as a fraction in `[0, 1]`.
    pub retention: f64,
    pub impressions: u64,
    pub subscribers_gained: i64,
    pub duration_secs: u32,
    pub format: VideoFormat,
    pub channel_id: String,
}

/// A competitor's video row: the base record plus classification extras
/// computed upstream of this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorVideoRecord {
    #[serde(flatten)]
    pub record: VideoRecord,
    /// Content-type classification supplied by the ingest layer, if any.
    pub detected_format: Option<String>,
    /// Stylistic markers the ingest layer matched on the title.
    #[serde(default)]
    pub title_patterns: Vec<String>,
    pub channel_name: String,
}

/// External classification of a recurring competitor series.
///
/// The label derivation is out of this core's scope; it is treated as an
/// opaque signal gating the series-gap detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSignal {
    pub title_prefix: String,
    pub channel_name: String,
    pub video_count: u32,
    pub label: SeriesLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesLabel {
    Growing,
    HighPerforming,
    Steady,
    Declining,
}

impl SeriesLabel {
    /// Whether this series should count as worth imitating.
    #[must_use]
    pub fn is_promising(self) -> bool {
        matches!(self, SeriesLabel::Growing | SeriesLabel::HighPerforming)
    }
}

/// Three-level estimated upside of acting on a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// Three-level certainty that the underlying signal is real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Three-level estimated cost of acting on a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::High => write!(f, "high"),
            Impact::Medium => write!(f, "medium"),
            Impact::Low => write!(f, "low"),
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

impl std::fmt::Display for Effort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effort::High => write!(f, "high"),
            Effort::Medium => write!(f, "medium"),
            Effort::Low => write!(f, "low"),
        }
    }
}
