//! Channel-level before/after aggregation and recommendation accuracy.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use clipintel_core::policy::MatchPolicy;
use clipintel_core::stats::mean_by;
use clipintel_core::VideoRecord;

use crate::types::{
    AccuracyStats, BriefStatus, FeedbackReport, LinkedBrief, SourceTypeStats, WindowStats,
};

#[allow(clippy::cast_precision_loss)]
fn window_stats(history: &[VideoRecord], start: DateTime<Utc>, end: DateTime<Utc>) -> WindowStats {
    let in_window: Vec<&VideoRecord> = history
        .iter()
        .filter(|v| v.published_at >= start && v.published_at < end)
        .collect();
    WindowStats {
        views: mean_by(&in_window, |v| v.views as f64),
        ctr: mean_by(&in_window, |v| v.ctr),
        retention: mean_by(&in_window, |v| v.retention),
        subscribers_gained: mean_by(&in_window, |v| v.subscribers_gained as f64),
        video_count: in_window.len(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Roll per-brief outcomes into channel-level statistics.
///
/// The "before" window is the `report_window_days` preceding the earliest
/// non-draft brief (absent when no such brief exists); the "after" window
/// is the trailing `report_window_days` from `now`. Accuracy counts only
/// briefs that have a computed outcome; the per-source breakdown groups by
/// the brief's `source_type`.
#[must_use]
pub fn aggregate_feedback(
    linked: &[LinkedBrief],
    history: &[VideoRecord],
    now: DateTime<Utc>,
    policy: &MatchPolicy,
) -> FeedbackReport {
    let window = Duration::days(policy.report_window_days);

    let earliest_active = linked
        .iter()
        .filter(|l| l.brief.status != BriefStatus::Draft)
        .map(|l| l.brief.created_at)
        .min();
    let channel_before = earliest_active.map(|t| window_stats(history, t - window, t));
    let channel_after = window_stats(history, now - window, now);

    let outcomes: Vec<&LinkedBrief> = linked.iter().filter(|l| l.outcome.is_some()).collect();
    let outperformed = outcomes
        .iter()
        .filter(|l| l.outcome.as_ref().is_some_and(|o| o.outperformed))
        .count();
    let predicted = outcomes
        .iter()
        .filter(|l| {
            l.outcome
                .as_ref()
                .is_some_and(|o| o.exceeded_prediction.is_some())
        })
        .count();
    let exceeded = outcomes
        .iter()
        .filter(|l| {
            l.outcome
                .as_ref()
                .is_some_and(|o| o.exceeded_prediction == Some(true))
        })
        .count();

    let accuracy = AccuracyStats {
        linked: outcomes.len(),
        outperformed,
        outperformed_pct: percentage(outperformed, outcomes.len()),
        predicted,
        exceeded,
        exceeded_pct: percentage(exceeded, predicted),
    };

    let mut by_source_type: BTreeMap<String, SourceTypeStats> = BTreeMap::new();
    for l in &outcomes {
        let entry = by_source_type
            .entry(l.brief.source_type.clone())
            .or_default();
        entry.linked += 1;
        if l.outcome.as_ref().is_some_and(|o| o.outperformed) {
            entry.outperformed += 1;
        }
    }

    tracing::info!(
        linked = accuracy.linked,
        outperformed = accuracy.outperformed,
        "aggregated brief feedback"
    );

    FeedbackReport {
        channel_before,
        channel_after,
        accuracy,
        by_source_type,
    }
}
