//! Shared types, policy, and helpers for the ClipIntel opportunity pipeline.
//!
//! The pipeline crates (`clipintel-diagnostics`, `clipintel-gaps`,
//! `clipintel-opportunities`, `clipintel-feedback`) are pure transformations
//! over the types defined here; this crate owns the injectable
//! [`policy::AnalysisPolicy`] they all read thresholds from.

pub mod error;
pub mod policy;
pub mod stats;
pub mod text;
pub mod types;

pub use error::PolicyError;
pub use policy::{load_policy, validate_policy, AnalysisPolicy, ScoringPolicy, WeightMap};
pub use types::{
    CompetitorVideoRecord, Confidence, Effort, Impact, SeriesLabel, SeriesSignal, VideoFormat,
    VideoRecord,
};
