//! Upload-cadence drop detection.

use chrono::{DateTime, Duration, Utc};
use clipintel_core::policy::DiagnosticPolicy;
use clipintel_core::stats::mean_by;
use clipintel_core::VideoRecord;

use crate::types::{ActionItem, ImpactEstimate, Priority};

/// Compare uploads in `[now-30d, now)` against `[now-60d, now-30d)`.
///
/// Fires when the recent count falls below `cadence_drop_ratio` of the prior
/// count. The impact estimate is the missing upload count times the recent
/// mean views (all-history mean when the recent window is empty).
pub(crate) fn upload_cadence_drop(
    videos: &[VideoRecord],
    now: DateTime<Utc>,
    policy: &DiagnosticPolicy,
) -> Option<ActionItem> {
    let recent_start = now - Duration::days(30);
    let prior_start = now - Duration::days(60);

    let recent: Vec<&VideoRecord> = videos
        .iter()
        .filter(|v| v.published_at >= recent_start && v.published_at < now)
        .collect();
    let prior_count = videos
        .iter()
        .filter(|v| v.published_at >= prior_start && v.published_at < recent_start)
        .count();

    if prior_count == 0 {
        tracing::debug!("no uploads in the prior window, cadence detector idle");
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let fired = (recent.len() as f64) < policy.cadence_drop_ratio * prior_count as f64;
    if !fired {
        return None;
    }

    let missing = prior_count - recent.len();
    #[allow(clippy::cast_precision_loss)]
    let avg_views = if recent.is_empty() {
        mean_by(videos, |v| v.views as f64)
    } else {
        let sum: u64 = recent.iter().map(|v| v.views).sum();
        sum as f64 / recent.len() as f64
    };
    #[allow(clippy::cast_precision_loss)]
    let views_per_month = missing as f64 * avg_views;

    Some(ActionItem {
        priority: Priority::High,
        title: "Upload cadence has dropped".to_string(),
        description: format!(
            "{} uploads in the last 30 days vs {} in the prior 30 days.",
            recent.len(),
            prior_count
        ),
        action: format!(
            "Return to roughly {prior_count} uploads per month; the recent slowdown is \
             leaving an estimated {views_per_month:.0} monthly views on the table."
        ),
        reason: "upload_cadence_drop".to_string(),
        impact: Some(ImpactEstimate { views_per_month }),
        examples: Vec::new(),
    })
}
