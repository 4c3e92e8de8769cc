//! Brief-to-video candidate matching.

use chrono::Duration;
use clipintel_core::policy::MatchPolicy;
use clipintel_core::text::jaccard_similarity;
use clipintel_core::VideoRecord;

use crate::types::{Brief, MatchCandidate};

/// Find the videos most likely published in response to a brief.
///
/// Candidates are restricted to `[created_at - lookback_days,
/// created_at + window_days]` and scored as title similarity (Jaccard)
/// weighted by `title_weight`, a flat `format_bonus` when the brief's
/// content type matches, and a date-proximity term decaying linearly to
/// zero over `window_days`. Candidates below `min_score` are dropped; the
/// best `max_candidates` are returned in descending score order.
#[must_use]
pub fn match_candidates(
    brief: &Brief,
    history: &[VideoRecord],
    policy: &MatchPolicy,
) -> Vec<MatchCandidate> {
    let window_start = brief.created_at - Duration::days(policy.lookback_days);
    let window_end = brief.created_at + Duration::days(policy.window_days);

    let mut candidates: Vec<MatchCandidate> = history
        .iter()
        .enumerate()
        .filter(|(_, v)| v.published_at >= window_start && v.published_at <= window_end)
        .map(|(index, video)| {
            let title_similarity = jaccard_similarity(&brief.title, &video.title);

            let format_bonus = match brief.brief_data.content_type {
                Some(format) if format == video.format => policy.format_bonus,
                _ => 0.0,
            };

            let days_from_brief = (video.published_at - brief.created_at).num_days();
            #[allow(clippy::cast_precision_loss)]
            let proximity = (1.0 - days_from_brief.unsigned_abs() as f64
                / policy.window_days as f64)
                .max(0.0)
                * policy.proximity_weight;

            MatchCandidate {
                video_index: index,
                title: video.title.clone(),
                score: title_similarity * policy.title_weight + format_bonus + proximity,
                title_similarity,
                days_from_brief,
            }
        })
        .filter(|c| c.score > policy.min_score)
        .collect();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(policy.max_candidates);

    tracing::debug!(
        brief = %brief.title,
        candidates = candidates.len(),
        "matched brief candidates"
    );
    candidates
}
