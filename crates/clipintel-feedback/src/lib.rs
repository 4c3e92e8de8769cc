//! Closed-loop feedback: link published videos back to the briefs that
//! recommended them and measure whether the recommendations worked.
//!
//! The matcher proposes candidate videos for a brief, the outcome module
//! compares a confirmed link against the channel's pre-brief baseline, and
//! the report module rolls individual outcomes into channel-level
//! before/after and accuracy statistics. Briefs themselves are persisted
//! elsewhere; this crate only reads the fields it needs.

pub mod matcher;
pub mod outcome;
pub mod report;
pub mod types;

pub use matcher::match_candidates;
pub use outcome::compute_outcome;
pub use report::aggregate_feedback;
pub use types::{
    Brief, BriefOutcome, BriefStatus, FeedbackReport, LinkedBrief, MatchCandidate,
};
