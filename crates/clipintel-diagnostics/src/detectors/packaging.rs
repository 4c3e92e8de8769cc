//! Packaging-level per-video flags: high-retention/low-CTR mismatches and
//! high-impression/low-CTR refresh candidates.

use clipintel_core::policy::DiagnosticPolicy;
use clipintel_core::VideoRecord;

use crate::types::{ActionItem, ImpactEstimate, Priority};

/// Videos whose content works but whose packaging fails: retention above
/// the floor, CTR below the ceiling, enough impressions to trust the CTR.
pub(crate) fn packaging_mismatch(
    videos: &[VideoRecord],
    policy: &DiagnosticPolicy,
) -> Option<ActionItem> {
    let mut flagged: Vec<&VideoRecord> = videos
        .iter()
        .filter(|v| {
            v.retention > policy.mismatch_retention_floor
                && v.ctr < policy.mismatch_ctr_ceiling
                && v.impressions > policy.mismatch_impressions_floor
        })
        .collect();
    if flagged.is_empty() {
        return None;
    }
    flagged.sort_by(|a, b| b.retention.total_cmp(&a.retention));

    Some(ActionItem {
        priority: Priority::Medium,
        title: "Strong content hidden behind weak packaging".to_string(),
        description: format!(
            "{} video(s) hold viewers well but rarely earn the click: the content works, \
             the title/thumbnail does not.",
            flagged.len()
        ),
        action: "Re-title and re-thumbnail these videos; the retention numbers say the \
                 content deserves another chance."
            .to_string(),
        reason: "packaging_mismatch".to_string(),
        impact: None,
        examples: flagged.iter().take(3).map(|v| v.title.clone()).collect(),
    })
}

/// Videos with heavy impression volume and weak CTR, with missed views
/// estimated against the benchmark CTR.
pub(crate) fn refresh_candidates(
    videos: &[VideoRecord],
    policy: &DiagnosticPolicy,
) -> Option<ActionItem> {
    let mut flagged: Vec<&VideoRecord> = videos
        .iter()
        .filter(|v| {
            v.impressions > policy.refresh_impressions_floor && v.ctr < policy.refresh_ctr_ceiling
        })
        .collect();
    if flagged.is_empty() {
        return None;
    }
    flagged.sort_by(|a, b| b.impressions.cmp(&a.impressions));

    #[allow(clippy::cast_precision_loss)]
    let missed_views: f64 = flagged
        .iter()
        .map(|v| (policy.refresh_benchmark_ctr - v.ctr).max(0.0) * v.impressions as f64)
        .sum();

    Some(ActionItem {
        priority: Priority::Medium,
        title: "Refresh packaging on high-impression videos".to_string(),
        description: format!(
            "{} video(s) get substantial impression volume at a CTR below {:.0}%; at a \
             {:.0}% benchmark they are missing roughly {missed_views:.0} views.",
            flagged.len(),
            policy.refresh_ctr_ceiling * 100.0,
            policy.refresh_benchmark_ctr * 100.0
        ),
        action: "Swap in new titles and thumbnails on these uploads to recapture the \
                 impression volume they already receive."
            .to_string(),
        reason: "refresh_candidates".to_string(),
        impact: Some(ImpactEstimate {
            views_per_month: missed_views,
        }),
        examples: flagged.iter().take(3).map(|v| v.title.clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_video, test_now};

    #[test]
    fn mismatch_flags_held_back_videos() {
        let now = test_now();
        let mut videos = vec![make_video("fine", now, 10, 5000)];
        let mut hidden = make_video("hidden gem", now, 12, 800);
        hidden.retention = 0.62;
        hidden.ctr = 0.02;
        hidden.impressions = 40_000;
        videos.push(hidden);

        let item = packaging_mismatch(&videos, &DiagnosticPolicy::default())
            .expect("mismatch should fire");
        assert_eq!(item.examples, vec!["hidden gem"]);
    }

    #[test]
    fn mismatch_ignores_low_impression_videos() {
        let now = test_now();
        let mut v = make_video("tiny sample", now, 10, 50);
        v.retention = 0.70;
        v.ctr = 0.01;
        v.impressions = 500;
        assert!(packaging_mismatch(&[v], &DiagnosticPolicy::default()).is_none());
    }

    #[test]
    fn refresh_estimates_missed_views() {
        let now = test_now();
        let mut v = make_video("stale packaging", now, 10, 2000);
        v.impressions = 100_000;
        v.ctr = 0.02;
        let item = refresh_candidates(&[v], &DiagnosticPolicy::default())
            .expect("refresh should fire");
        // (0.05 - 0.02) * 100_000
        let impact = item.impact.expect("impact expected");
        assert!((impact.views_per_month - 3000.0).abs() < 1e-6);
    }

    #[test]
    fn refresh_silent_when_ctr_healthy() {
        let now = test_now();
        let mut v = make_video("healthy", now, 10, 9000);
        v.impressions = 100_000;
        v.ctr = 0.06;
        assert!(refresh_candidates(&[v], &DiagnosticPolicy::default()).is_none());
    }
}
