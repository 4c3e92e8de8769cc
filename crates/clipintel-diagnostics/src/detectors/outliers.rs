//! Bottom-performer anti-pattern detection.

use clipintel_core::policy::DiagnosticPolicy;
use clipintel_core::stats::{mean_by, top_quintile_len};
use clipintel_core::VideoRecord;

use crate::types::{ActionItem, Priority};

/// Inspect the bottom 20% of videos by views and label what they share.
///
/// Fires when the bottom cohort holds at least `min_bottom_sample` records
/// and its mean views fall below `bottom_floor_ratio` of the overall mean.
pub(crate) fn bottom_performer_anti_pattern(
    videos: &[VideoRecord],
    policy: &DiagnosticPolicy,
) -> Option<ActionItem> {
    let mut by_views: Vec<&VideoRecord> = videos.iter().collect();
    by_views.sort_by(|a, b| a.views.cmp(&b.views));
    let bottom = &by_views[..top_quintile_len(by_views.len())];

    if bottom.len() < policy.min_bottom_sample {
        tracing::debug!(n = bottom.len(), "bottom cohort too small for anti-pattern detector");
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let overall_mean = mean_by(&by_views, |v| v.views as f64);
    #[allow(clippy::cast_precision_loss)]
    let bottom_mean = mean_by(bottom, |v| v.views as f64);
    if overall_mean == 0.0 || bottom_mean >= policy.bottom_floor_ratio * overall_mean {
        return None;
    }

    let overall_ctr = mean_by(&by_views, |v| v.ctr);
    let overall_retention = mean_by(&by_views, |v| v.retention);
    let bottom_ctr = mean_by(bottom, |v| v.ctr);
    let bottom_retention = mean_by(bottom, |v| v.retention);

    let anti_pattern = if bottom_ctr < 0.8 * overall_ctr {
        "weak packaging: titles and thumbnails fail to earn the click"
    } else if bottom_retention < 0.8 * overall_retention {
        "early drop-off: viewers click but do not stay"
    } else {
        "topic mismatch: these subjects do not land with your audience"
    };

    Some(ActionItem {
        priority: Priority::Medium,
        title: "Your weakest videos share an anti-pattern".to_string(),
        description: format!(
            "The bottom 20% average {bottom_mean:.0} views against a channel mean of \
             {overall_mean:.0}. Common thread: {anti_pattern}."
        ),
        action: "Avoid repeating this cohort's approach in upcoming uploads.".to_string(),
        reason: "bottom_performer_anti_pattern".to_string(),
        impact: None,
        examples: bottom.iter().take(3).map(|v| v.title.clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_video, test_now};

    fn channel_with_floor(bottom_views: u64) -> Vec<VideoRecord> {
        let now = test_now();
        let mut videos = Vec::new();
        for i in 0..20 {
            videos.push(make_video(&format!("solid {i}"), now, 10 + i, 10_000));
        }
        for i in 0..5 {
            videos.push(make_video(&format!("flop {i}"), now, 40 + i, bottom_views));
        }
        videos
    }

    #[test]
    fn fires_when_bottom_cohort_collapses() {
        let videos = channel_with_floor(500);
        let item = bottom_performer_anti_pattern(&videos, &DiagnosticPolicy::default())
            .expect("anti-pattern should fire");
        assert_eq!(item.reason, "bottom_performer_anti_pattern");
        assert_eq!(item.examples.len(), 3);
    }

    #[test]
    fn labels_weak_packaging_from_low_ctr() {
        let mut videos = channel_with_floor(500);
        for v in videos.iter_mut().filter(|v| v.views == 500) {
            v.ctr = 0.01;
        }
        let item = bottom_performer_anti_pattern(&videos, &DiagnosticPolicy::default()).unwrap();
        assert!(item.description.contains("weak packaging"));
    }

    #[test]
    fn labels_drop_off_when_ctr_holds_but_retention_sinks() {
        let mut videos = channel_with_floor(500);
        for v in videos.iter_mut().filter(|v| v.views == 500) {
            v.retention = 0.05;
        }
        let item = bottom_performer_anti_pattern(&videos, &DiagnosticPolicy::default()).unwrap();
        assert!(item.description.contains("early drop-off"));
    }

    #[test]
    fn silent_when_bottom_cohort_small() {
        let now = test_now();
        let videos: Vec<VideoRecord> = (0..10)
            .map(|i| make_video(&format!("video {i}"), now, 10 + i, 1000))
            .collect();
        // Bottom quintile of 10 is 2 records: below the 5-record floor.
        assert!(bottom_performer_anti_pattern(&videos, &DiagnosticPolicy::default()).is_none());
    }
}
