//! Recurring-series gap, gated on externally-classified competitor series.

use std::collections::BTreeMap;

use clipintel_core::policy::GapPolicy;
use clipintel_core::text::series_prefix;
use clipintel_core::{Confidence, Effort, Impact, SeriesSignal, VideoRecord};

use crate::types::{Gap, GapEvidence, GapType};

/// Detect the client's own recurring series: normalized first-3-token title
/// prefixes occurring at least `series_min_occurrences` times.
pub(crate) fn client_series(client: &[VideoRecord], policy: &GapPolicy) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for video in client {
        if let Some(prefix) = series_prefix(&video.title) {
            *counts.entry(prefix).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n >= policy.series_min_occurrences)
        .map(|(prefix, _)| prefix)
        .collect()
}

/// Fires when competitors run at least one promising series (growing or
/// high-performing, classified upstream) while the client has fewer than
/// `series_client_floor` detected series of its own.
pub(crate) fn series_gap(
    client: &[VideoRecord],
    series_signals: &[SeriesSignal],
    policy: &GapPolicy,
) -> Option<Gap> {
    let promising: Vec<&SeriesSignal> = series_signals
        .iter()
        .filter(|s| s.label.is_promising())
        .collect();
    if promising.is_empty() {
        return None;
    }

    let own_series = client_series(client, policy);
    if own_series.len() >= policy.series_client_floor {
        return None;
    }

    Some(Gap {
        id: "series".to_string(),
        gap_type: GapType::Series,
        type_label: GapType::Series.label().to_string(),
        title: "Competitors run recurring series, you do not".to_string(),
        description: format!(
            "{} competitor series are growing or high-performing; {} recurring series \
             detected in your corpus.",
            promising.len(),
            own_series.len()
        ),
        action: "Launch a recurring series with a consistent title prefix so returning \
                 viewers can find the next installment."
            .to_string(),
        evidence: GapEvidence {
            competitor_stat: format!("{} growing or high-performing series", promising.len()),
            client_stat: format!("{} recurring series detected", own_series.len()),
            top_examples: promising
                .iter()
                .take(3)
                .map(|s| s.title_prefix.clone())
                .collect(),
        },
        gap_size: 0.7,
        impact: Impact::Medium,
        confidence: if promising.len() >= 2 {
            Confidence::High
        } else {
            Confidence::Medium
        },
        effort: Effort::High,
        score: 0.0,
    })
}
