//! Outcome computation for a brief linked to a published video.

use chrono::{DateTime, Duration, Utc};
use clipintel_core::policy::MatchPolicy;
use clipintel_core::stats::{mean_by, relative_delta};
use clipintel_core::VideoRecord;

use crate::types::{ActualMetrics, Baseline, Brief, BriefOutcome, OutcomeDelta};

/// Compare a linked video's metrics against the channel's pre-brief
/// baseline and the brief's original prediction.
///
/// The baseline is the mean views/CTR/retention of same-format videos
/// published in the `baseline_days` immediately before the brief was
/// created. Deltas are relative and `None` when the corresponding
/// baseline is zero; `outperformed` is only asserted when the baseline
/// has at least one video behind it. `now` is the caller's clock and is
/// recorded as `computed_at`.
#[must_use]
pub fn compute_outcome(
    brief: &Brief,
    video: &VideoRecord,
    history: &[VideoRecord],
    now: DateTime<Utc>,
    policy: &MatchPolicy,
) -> BriefOutcome {
    let baseline_start = brief.created_at - Duration::days(policy.baseline_days);

    let cohort: Vec<&VideoRecord> = history
        .iter()
        .filter(|v| {
            v.format == video.format
                && v.published_at >= baseline_start
                && v.published_at < brief.created_at
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let baseline = Baseline {
        views: mean_by(&cohort, |v| v.views as f64),
        ctr: mean_by(&cohort, |v| v.ctr),
        retention: mean_by(&cohort, |v| v.retention),
        count: cohort.len(),
    };

    let actual = ActualMetrics {
        views: video.views,
        ctr: video.ctr,
        retention: video.retention,
        title: video.title.clone(),
    };

    #[allow(clippy::cast_precision_loss)]
    let delta = OutcomeDelta {
        views: relative_delta(actual.views as f64, baseline.views),
        ctr: relative_delta(actual.ctr, baseline.ctr),
        retention: relative_delta(actual.retention, baseline.retention),
    };

    #[allow(clippy::cast_precision_loss)]
    let outperformed = baseline.count > 0 && actual.views as f64 > baseline.views;

    let predicted = brief.brief_data.impact;
    #[allow(clippy::cast_precision_loss)]
    let exceeded_prediction = predicted
        .map(|p| actual.views as f64 - baseline.views >= p.views_per_month);

    BriefOutcome {
        baseline,
        actual,
        predicted,
        delta,
        outperformed,
        exceeded_prediction,
        computed_at: now,
    }
}
