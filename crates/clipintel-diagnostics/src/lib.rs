//! Diagnostic action-item generation for a single creator's history.
//!
//! Eight detectors inspect upload cadence, per-format CTR/retention cohorts,
//! outlier cohorts, format balance, and per-video packaging signals, each
//! emitting at most one recommendation. No competitor data is required and
//! nothing here performs I/O: callers supply the records and the clock.

pub mod generator;
pub mod types;

mod detectors;

pub use generator::generate_action_items;
pub use types::{ActionItem, ImpactEstimate, Priority};
