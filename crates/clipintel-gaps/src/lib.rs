//! Competitor gap detection across six independent comparison dimensions.
//!
//! Compares a client's video corpus against a competitor corpus (typically
//! windowed to the trailing 90 days by the caller) and produces ranked,
//! evidence-backed [`types::Gap`] records. Classification of titles into
//! format buckets and stylistic patterns sits behind the pluggable traits in
//! [`classify`] so a learned classifier can replace the keyword heuristics.

pub mod classify;
pub mod detect;
pub mod types;

pub use classify::{
    Classifiers, ContentFormat, FormatClassifier, HeuristicPatternClassifier,
    KeywordFormatClassifier, PatternClassifier, TitlePattern,
};
pub use detect::detect_gaps;
pub use types::{Gap, GapEvidence, GapReport, GapSummary, GapType};
