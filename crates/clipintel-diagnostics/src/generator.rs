//! Detector orchestration and final ordering.

use chrono::{DateTime, Utc};
use clipintel_core::policy::AnalysisPolicy;
use clipintel_core::VideoRecord;

use crate::detectors::cohorts::FORMAT_ORDER;
use crate::detectors::{balance, cadence, cohorts, outliers, packaging};
use crate::types::ActionItem;

/// Run all diagnostic detectors over a creator's history.
///
/// Pure and deterministic: `now` is supplied by the caller, detectors run in
/// a fixed order, and the final sort is stable. Items carrying an impact
/// estimate come first in descending `views_per_month`; impact-less items
/// follow in priority order. At most `diagnostics.max_items` are returned.
#[must_use]
pub fn generate_action_items(
    videos: &[VideoRecord],
    now: DateTime<Utc>,
    policy: &AnalysisPolicy,
) -> Vec<ActionItem> {
    let d = &policy.diagnostics;
    tracing::info!(videos = videos.len(), "running diagnostic detectors");

    let mut items: Vec<ActionItem> = Vec::new();
    items.extend(cadence::upload_cadence_drop(videos, now, d));
    for format in FORMAT_ORDER {
        items.extend(cohorts::ctr_packaging_gap(videos, format, d));
    }
    for format in FORMAT_ORDER {
        items.extend(cohorts::top_performer_replication(videos, format, now, d));
    }
    for format in FORMAT_ORDER {
        items.extend(cohorts::retention_gap(videos, format, d));
    }
    items.extend(outliers::bottom_performer_anti_pattern(videos, d));
    items.extend(balance::format_balance(videos, d));
    items.extend(packaging::packaging_mismatch(videos, d));
    items.extend(packaging::refresh_candidates(videos, d));

    items.sort_by(|a, b| match (&a.impact, &b.impact) {
        (Some(ia), Some(ib)) => ib.views_per_month.total_cmp(&ia.views_per_month),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.priority.rank().cmp(&b.priority.rank()),
    });
    items.truncate(d.max_items);

    tracing::info!(items = items.len(), "diagnostic detectors finished");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_short, make_video, test_now};
    use crate::types::Priority;

    /// A channel shaped to trip several detectors at once.
    fn busy_channel() -> Vec<VideoRecord> {
        let now = test_now();
        let mut videos = Vec::new();
        for i in 0..10 {
            videos.push(make_video(&format!("prior {i}"), now, 35 + i, 4000));
        }
        for i in 0..2 {
            videos.push(make_video(&format!("recent {i}"), now, 5 + i, 4000));
        }
        let mut stale = make_video("stale packaging", now, 70, 2000);
        stale.impressions = 200_000;
        stale.ctr = 0.01;
        videos.push(stale);
        for i in 0..2 {
            videos.push(make_short(&format!("short {i}"), now, 12 + i, 30_000));
        }
        videos
    }

    #[test]
    fn caps_output_at_max_items() {
        let policy = AnalysisPolicy::default();
        let items = generate_action_items(&busy_channel(), test_now(), &policy);
        assert!(items.len() <= policy.diagnostics.max_items);
    }

    #[test]
    fn impact_items_lead_in_descending_order() {
        let items = generate_action_items(&busy_channel(), test_now(), &AnalysisPolicy::default());
        let mut last_vpm = f64::INFINITY;
        let mut seen_impactless = false;
        for item in &items {
            match &item.impact {
                Some(impact) => {
                    assert!(!seen_impactless, "impact items must precede impact-less ones");
                    assert!(impact.views_per_month <= last_vpm);
                    last_vpm = impact.views_per_month;
                }
                None => seen_impactless = true,
            }
        }
    }

    #[test]
    fn impactless_tail_ordered_by_priority() {
        let items = generate_action_items(&busy_channel(), test_now(), &AnalysisPolicy::default());
        let ranks: Vec<u8> = items
            .iter()
            .filter(|i| i.impact.is_none())
            .map(|i| i.priority.rank())
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn cadence_drop_scenario_fires_high() {
        // Scenario: 3 uploads in the last 30 days, 10 in the prior 30.
        let now = test_now();
        let mut videos = Vec::new();
        for i in 0..10 {
            videos.push(make_video(&format!("prior {i}"), now, 35 + i, 5000));
        }
        for i in 0..3 {
            videos.push(make_video(&format!("recent {i}"), now, 4 + i, 5000));
        }
        let items = generate_action_items(&videos, now, &AnalysisPolicy::default());
        let cadence = items
            .iter()
            .find(|i| i.reason == "upload_cadence_drop")
            .expect("cadence item expected");
        assert_eq!(cadence.priority, Priority::High);
    }

    #[test]
    fn deterministic_across_runs() {
        let videos = busy_channel();
        let now = test_now();
        let policy = AnalysisPolicy::default();
        let first = generate_action_items(&videos, now, &policy);
        let second = generate_action_items(&videos, now, &policy);
        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_history_yields_no_items() {
        let items = generate_action_items(&[], test_now(), &AnalysisPolicy::default());
        assert!(items.is_empty());
    }
}
