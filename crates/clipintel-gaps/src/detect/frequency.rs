//! Upload-frequency gap against the competitor per-channel average.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use clipintel_core::policy::GapPolicy;
use clipintel_core::{CompetitorVideoRecord, Confidence, Effort, Impact, VideoRecord};

use crate::types::{Gap, GapEvidence, GapType};

pub(crate) fn frequency_gap(
    client: &[VideoRecord],
    competitors: &[CompetitorVideoRecord],
    now: DateTime<Utc>,
    policy: &GapPolicy,
) -> Option<Gap> {
    let window_start = now - Duration::days(30);

    let client_count = client
        .iter()
        .filter(|v| v.published_at >= window_start && v.published_at < now)
        .count();

    // Per-channel counts over the same trailing window. BTreeMap keeps the
    // channel iteration order stable.
    let mut per_channel: BTreeMap<&str, usize> = BTreeMap::new();
    for video in competitors {
        let entry = per_channel.entry(video.channel_name.as_str()).or_insert(0);
        if video.record.published_at >= window_start && video.record.published_at < now {
            *entry += 1;
        }
    }
    if per_channel.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let comp_avg = per_channel.values().sum::<usize>() as f64 / per_channel.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let client_f = client_count as f64;

    if comp_avg <= policy.frequency_competitor_floor
        || client_f >= policy.frequency_client_ratio * comp_avg
    {
        tracing::debug!(comp_avg, client_count, "frequency gap did not fire");
        return None;
    }

    let gap_size = (1.0 - client_f / comp_avg).clamp(0.0, 1.0);

    Some(Gap {
        id: "frequency".to_string(),
        gap_type: GapType::Frequency,
        type_label: GapType::Frequency.label().to_string(),
        title: "Competitors out-publish you".to_string(),
        description: format!(
            "Competitor channels average {comp_avg:.1} uploads in the last 30 days; you \
             published {client_count}."
        ),
        action: format!(
            "Close the cadence gap: target at least {:.0} uploads over the next 30 days.",
            (policy.frequency_client_ratio * comp_avg).ceil()
        ),
        evidence: GapEvidence {
            competitor_stat: format!("{comp_avg:.1} uploads/30d per channel"),
            client_stat: format!("{client_count} uploads/30d"),
            top_examples: Vec::new(),
        },
        gap_size,
        impact: Impact::Medium,
        confidence: if per_channel.len() >= 3 {
            Confidence::High
        } else {
            Confidence::Medium
        },
        effort: Effort::Medium,
        score: 0.0,
    })
}
