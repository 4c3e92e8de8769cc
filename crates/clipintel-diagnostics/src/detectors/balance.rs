//! Short/long format-balance rebalancing.

use clipintel_core::policy::DiagnosticPolicy;
use clipintel_core::stats::mean_by;
use clipintel_core::{VideoFormat, VideoRecord};

use crate::types::{ActionItem, Priority};

/// Recommend shifting output toward the format that out-performs.
///
/// Needs at least one record of each format. Fires when the stronger
/// format's mean views exceed the weaker's by `balance_dominance_multiple`
/// while the stronger format holds less than `balance_share_floor` of
/// output (equivalently, the weaker format holds more than 60%).
pub(crate) fn format_balance(
    videos: &[VideoRecord],
    policy: &DiagnosticPolicy,
) -> Option<ActionItem> {
    let shorts: Vec<&VideoRecord> = videos
        .iter()
        .filter(|v| v.format == VideoFormat::Short)
        .collect();
    let longs: Vec<&VideoRecord> = videos
        .iter()
        .filter(|v| v.format == VideoFormat::Long)
        .collect();
    if shorts.is_empty() || longs.is_empty() {
        tracing::debug!("format balance needs at least one record of each format");
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let short_mean = mean_by(&shorts, |v| v.views as f64);
    #[allow(clippy::cast_precision_loss)]
    let long_mean = mean_by(&longs, |v| v.views as f64);

    let (stronger, stronger_count, stronger_mean, weaker_mean) = if short_mean >= long_mean {
        (VideoFormat::Short, shorts.len(), short_mean, long_mean)
    } else {
        (VideoFormat::Long, longs.len(), long_mean, short_mean)
    };

    let dominant =
        weaker_mean > 0.0 && stronger_mean > policy.balance_dominance_multiple * weaker_mean;
    if !dominant {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let stronger_share = stronger_count as f64 / videos.len() as f64;
    if stronger_share >= policy.balance_share_floor {
        return None;
    }

    Some(ActionItem {
        priority: Priority::Medium,
        title: format!("Lean further into {stronger}-form content"),
        description: format!(
            "{stronger}-form videos average {stronger_mean:.0} views vs {weaker_mean:.0} \
             for {}-form, yet make up only {:.0}% of output.",
            stronger.other(),
            stronger_share * 100.0
        ),
        action: format!(
            "Shift the upload mix toward a 50/50 split by adding more {stronger}-form videos."
        ),
        reason: "format_balance".to_string(),
        impact: None,
        examples: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_short, make_video, test_now};

    #[test]
    fn fires_when_underused_format_outperforms() {
        let now = test_now();
        let mut videos = Vec::new();
        for i in 0..8 {
            videos.push(make_video(&format!("long {i}"), now, 10 + i, 2000));
        }
        for i in 0..2 {
            videos.push(make_short(&format!("short {i}"), now, 12 + i, 20_000));
        }
        let item = format_balance(&videos, &DiagnosticPolicy::default())
            .expect("balance detector should fire");
        assert!(item.title.contains("short"));
        assert!(item.description.contains("20%"));
    }

    #[test]
    fn silent_when_mix_already_balanced() {
        let now = test_now();
        let mut videos = Vec::new();
        for i in 0..5 {
            videos.push(make_video(&format!("long {i}"), now, 10 + i, 2000));
            videos.push(make_short(&format!("short {i}"), now, 12 + i, 20_000));
        }
        assert!(format_balance(&videos, &DiagnosticPolicy::default()).is_none());
    }

    #[test]
    fn silent_without_both_formats() {
        let now = test_now();
        let videos: Vec<VideoRecord> = (0..6)
            .map(|i| make_video(&format!("long {i}"), now, 10 + i, 2000))
            .collect();
        assert!(format_balance(&videos, &DiagnosticPolicy::default()).is_none());
    }

    #[test]
    fn silent_when_performance_close() {
        let now = test_now();
        let mut videos = Vec::new();
        for i in 0..8 {
            videos.push(make_video(&format!("long {i}"), now, 10 + i, 18_000));
        }
        for i in 0..2 {
            videos.push(make_short(&format!("short {i}"), now, 12 + i, 20_000));
        }
        assert!(format_balance(&videos, &DiagnosticPolicy::default()).is_none());
    }
}
