//! Per-format cohort detectors: CTR packaging gap, top-performer
//! replication, and retention gap.
//!
//! Each detector compares the format's overall mean against its top-20%
//! cohort and stays silent below the minimum sample size.

use chrono::{DateTime, Duration, Utc};
use clipintel_core::policy::DiagnosticPolicy;
use clipintel_core::stats::{mean_by, top_quintile_len};
use clipintel_core::{VideoFormat, VideoRecord};

use crate::types::{ActionItem, ImpactEstimate, Priority};

/// Fixed cohort iteration order keeps the output deterministic.
pub(crate) const FORMAT_ORDER: [VideoFormat; 2] = [VideoFormat::Long, VideoFormat::Short];

fn cohort<'a>(videos: &'a [VideoRecord], format: VideoFormat) -> Vec<&'a VideoRecord> {
    videos.iter().filter(|v| v.format == format).collect()
}

fn example_titles(cohort: &[&VideoRecord]) -> Vec<String> {
    cohort.iter().take(3).map(|v| v.title.clone()).collect()
}

/// Mean CTR vs the top-20%-by-CTR mean for one format.
pub(crate) fn ctr_packaging_gap(
    videos: &[VideoRecord],
    format: VideoFormat,
    policy: &DiagnosticPolicy,
) -> Option<ActionItem> {
    let cohort = cohort(videos, format);
    if cohort.len() < policy.min_format_sample {
        tracing::debug!(%format, n = cohort.len(), "too few records for CTR gap detector");
        return None;
    }

    let mut by_ctr = cohort.clone();
    by_ctr.sort_by(|a, b| b.ctr.total_cmp(&a.ctr));
    let top = &by_ctr[..top_quintile_len(by_ctr.len())];

    let overall_mean = mean_by(&cohort, |v| v.ctr);
    let top_mean = mean_by(top, |v| v.ctr);
    if top_mean == 0.0 || overall_mean >= policy.ctr_gap_ratio * top_mean {
        return None;
    }

    Some(ActionItem {
        priority: Priority::Medium,
        title: format!("Packaging gap on {format}-form CTR"),
        description: format!(
            "Average CTR is {:.1}% while your best {format}-form packaging reaches {:.1}%.",
            overall_mean * 100.0,
            top_mean * 100.0
        ),
        action: "Rework titles and thumbnails toward the style of your top click-through \
                 performers."
            .to_string(),
        reason: format!("ctr_packaging_gap_{format}"),
        impact: None,
        examples: example_titles(top),
    })
}

/// Top-20%-by-views mean vs the overall mean, with a title-formula label.
pub(crate) fn top_performer_replication(
    videos: &[VideoRecord],
    format: VideoFormat,
    now: DateTime<Utc>,
    policy: &DiagnosticPolicy,
) -> Option<ActionItem> {
    let cohort = cohort(videos, format);
    if cohort.len() < policy.min_replication_sample {
        tracing::debug!(%format, n = cohort.len(), "too few records for replication detector");
        return None;
    }

    let mut by_views = cohort.clone();
    by_views.sort_by(|a, b| b.views.cmp(&a.views));
    let top = &by_views[..top_quintile_len(by_views.len())];

    #[allow(clippy::cast_precision_loss)]
    let overall_mean = mean_by(&cohort, |v| v.views as f64);
    #[allow(clippy::cast_precision_loss)]
    let top_mean = mean_by(top, |v| v.views as f64);
    if overall_mean == 0.0 || top_mean <= policy.top_performer_multiple * overall_mean {
        return None;
    }

    let formula = infer_formula(top);

    let recent_start = now - Duration::days(30);
    let recent_uploads = cohort
        .iter()
        .filter(|v| v.published_at >= recent_start && v.published_at < now)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let impact = (recent_uploads > 0).then(|| ImpactEstimate {
        views_per_month: (top_mean - overall_mean) * recent_uploads as f64,
    });

    Some(ActionItem {
        priority: Priority::High,
        title: format!("Replicate your winning {format}-form formula"),
        description: format!(
            "Your top {format}-form videos average {top_mean:.0} views against an overall \
             mean of {overall_mean:.0}; the winners share {formula}."
        ),
        action: format!("Plan the next uploads around {formula}."),
        reason: format!("top_performer_replication_{format}"),
        impact,
        examples: example_titles(top),
    })
}

/// Title-pattern heuristics over the winning cohort.
fn infer_formula(top: &[&VideoRecord]) -> String {
    let half = top.len().div_ceil(2);
    let questions = top.iter().filter(|v| v.title.contains('?')).count();
    let numbered = top
        .iter()
        .filter(|v| v.title.chars().any(|c| c.is_ascii_digit()))
        .count();

    let mut traits = Vec::new();
    if questions >= half {
        traits.push("question-led titles");
    }
    if numbered >= half {
        traits.push("numbered titles");
    }
    if traits.is_empty() {
        "a repeatable hook worth isolating".to_string()
    } else {
        traits.join(" and ")
    }
}

/// Mean retention vs the top-20%-by-retention mean for one format.
pub(crate) fn retention_gap(
    videos: &[VideoRecord],
    format: VideoFormat,
    policy: &DiagnosticPolicy,
) -> Option<ActionItem> {
    let cohort: Vec<&VideoRecord> = videos
        .iter()
        .filter(|v| v.format == format && v.retention > 0.0)
        .collect();
    if cohort.len() < policy.min_format_sample {
        tracing::debug!(%format, n = cohort.len(), "too few records for retention gap detector");
        return None;
    }

    let mut by_retention = cohort.clone();
    by_retention.sort_by(|a, b| b.retention.total_cmp(&a.retention));
    let top = &by_retention[..top_quintile_len(by_retention.len())];

    let overall_mean = mean_by(&cohort, |v| v.retention);
    let top_mean = mean_by(top, |v| v.retention);
    if top_mean == 0.0 || overall_mean >= policy.retention_gap_ratio * top_mean {
        return None;
    }

    Some(ActionItem {
        priority: Priority::Medium,
        title: format!("Retention gap on {format}-form videos"),
        description: format!(
            "Average retention is {:.0}% while your strongest {format}-form videos hold \
             {:.0}%.",
            overall_mean * 100.0,
            top_mean * 100.0
        ),
        action: "Study the pacing and structure of your highest-retention videos and apply \
                 it to upcoming scripts."
            .to_string(),
        reason: format!("retention_gap_{format}"),
        impact: None,
        examples: example_titles(top),
    })
}
