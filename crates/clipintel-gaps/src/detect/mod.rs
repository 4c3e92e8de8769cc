//! Gap-detection orchestration across the six comparison dimensions.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use clipintel_core::policy::{AnalysisPolicy, GapPolicy};
use clipintel_core::{CompetitorVideoRecord, Confidence, Impact, SeriesSignal, VideoRecord};

use crate::classify::Classifiers;
use crate::types::{Gap, GapReport, GapSummary};

mod content_type;
mod format;
mod frequency;
mod patterns;
mod series;
mod topics;

/// Impact tag from the mean views of a gap's supporting videos.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn impact_for_views(mean_views: f64, policy: &GapPolicy) -> Impact {
    if mean_views > policy.impact_views_high as f64 {
        Impact::High
    } else if mean_views > policy.impact_views_medium as f64 {
        Impact::Medium
    } else {
        Impact::Low
    }
}

/// Confidence tag from the supporting sample size.
pub(crate) fn confidence_for_sample(n: usize, policy: &GapPolicy) -> Confidence {
    if n >= policy.confidence_sample_high {
        Confidence::High
    } else if n >= policy.confidence_sample_medium {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Evidence stat of the form `"9 videos (30%)"`.
pub(crate) fn share_stat(count: usize, share: f64) -> String {
    format!("{count} videos ({:.0}%)", share * 100.0)
}

/// Run all six gap detectors over the client and competitor corpora.
///
/// Pure and deterministic: detectors run in a fixed order, every internal
/// map is ordered, and the final sort is stable. An empty competitor corpus
/// short-circuits into an empty report flagged `no_videos`.
#[must_use]
pub fn detect_gaps(
    client: &[VideoRecord],
    competitors: &[CompetitorVideoRecord],
    series_signals: &[SeriesSignal],
    now: DateTime<Utc>,
    policy: &AnalysisPolicy,
    classifiers: &Classifiers,
) -> GapReport {
    if competitors.is_empty() {
        tracing::info!("no competitor videos supplied, returning empty gap report");
        return GapReport {
            gaps: Vec::new(),
            summary: GapSummary {
                total: 0,
                by_type: BTreeMap::new(),
                top_gap_type: None,
                competitor_count: 0,
                video_count: client.len(),
            },
            no_videos: true,
        };
    }

    tracing::info!(
        client = client.len(),
        competitors = competitors.len(),
        "running gap detectors"
    );

    let g = &policy.gaps;
    let mut gaps: Vec<Gap> = Vec::new();
    gaps.extend(format::format_gaps(client, competitors, classifiers.format.as_ref(), g));
    gaps.extend(patterns::pattern_gaps(client, competitors, classifiers.pattern.as_ref(), g));
    gaps.extend(content_type::content_type_gaps(client, competitors, g));
    gaps.extend(frequency::frequency_gap(client, competitors, now, g));
    gaps.extend(series::series_gap(client, series_signals, g));
    gaps.extend(topics::topic_gaps(client, competitors, g));

    for gap in &mut gaps {
        gap.score = policy.scoring.score(gap.impact, gap.confidence, gap.effort);
    }
    gaps.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for gap in &gaps {
        *by_type.entry(gap.gap_type.to_string()).or_insert(0) += 1;
    }
    let top_gap_type = by_type
        .iter()
        .max_by_key(|(_, n)| *n)
        .map(|(t, _)| t.clone());

    let summary = GapSummary {
        total: gaps.len(),
        by_type,
        top_gap_type,
        competitor_count: competitors.len(),
        video_count: client.len(),
    };

    tracing::info!(total = summary.total, "gap detectors finished");
    GapReport {
        gaps,
        summary,
        no_videos: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_client_video, make_competitor_video, test_now};
    use clipintel_core::{SeriesLabel, SeriesSignal};

    fn plain_client(n: usize) -> Vec<VideoRecord> {
        (0..n)
            .map(|i| make_client_video(&format!("weekly upload number {i}"), 10 + i as i64, 3000))
            .collect()
    }

    /// Competitor corpus that is 30% tutorials (Scenario 2 shape).
    fn tutorial_heavy_competitors() -> Vec<CompetitorVideoRecord> {
        let mut corpus = Vec::new();
        for i in 0..3 {
            corpus.push(make_competitor_video(
                &format!("How To Master Lighting Part {i}"),
                "Rival A",
                5 + i as i64,
                60_000,
            ));
        }
        for i in 0..7 {
            corpus.push(make_competitor_video(
                &format!("Channel update number {i}"),
                "Rival B",
                8 + i as i64,
                4000,
            ));
        }
        corpus
    }

    #[test]
    fn format_tutorial_gap_scenario() {
        let report = detect_gaps(
            &plain_client(10),
            &tutorial_heavy_competitors(),
            &[],
            test_now(),
            &AnalysisPolicy::default(),
            &Classifiers::default(),
        );
        let gap = report
            .gaps
            .iter()
            .find(|g| g.id == "format_tutorial")
            .expect("format_tutorial gap expected");
        assert_eq!(gap.gap_type, crate::types::GapType::Format);
        assert_eq!(gap.evidence.client_stat, "0 videos (0%)");
        assert!(gap.evidence.competitor_stat.contains("30%"));
    }

    #[test]
    fn empty_competitor_corpus_flags_no_videos() {
        let report = detect_gaps(
            &plain_client(5),
            &[],
            &[],
            test_now(),
            &AnalysisPolicy::default(),
            &Classifiers::default(),
        );
        assert!(report.no_videos);
        assert!(report.gaps.is_empty());
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.video_count, 5);
    }

    #[test]
    fn gap_sizes_stay_in_unit_range() {
        let report = detect_gaps(
            &plain_client(10),
            &tutorial_heavy_competitors(),
            &[SeriesSignal {
                title_prefix: "budget builds episode".to_string(),
                channel_name: "Rival A".to_string(),
                video_count: 6,
                label: SeriesLabel::Growing,
            }],
            test_now(),
            &AnalysisPolicy::default(),
            &Classifiers::default(),
        );
        assert!(!report.gaps.is_empty());
        for gap in &report.gaps {
            assert!(
                (0.0..=1.0).contains(&gap.gap_size),
                "gap_size out of range for {}: {}",
                gap.id,
                gap.gap_size
            );
            assert!((0.0..=1.0).contains(&gap.score));
        }
    }

    #[test]
    fn gaps_sorted_descending_by_score() {
        let report = detect_gaps(
            &plain_client(10),
            &tutorial_heavy_competitors(),
            &[],
            test_now(),
            &AnalysisPolicy::default(),
            &Classifiers::default(),
        );
        assert!(report
            .gaps
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn detection_is_idempotent() {
        let client = plain_client(10);
        let competitors = tutorial_heavy_competitors();
        let now = test_now();
        let policy = AnalysisPolicy::default();
        let classifiers = Classifiers::default();
        let a = detect_gaps(&client, &competitors, &[], now, &policy, &classifiers);
        let b = detect_gaps(&client, &competitors, &[], now, &policy, &classifiers);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn series_gap_requires_promising_signal() {
        let signals = [SeriesSignal {
            title_prefix: "studio diaries episode".to_string(),
            channel_name: "Rival A".to_string(),
            video_count: 4,
            label: SeriesLabel::Declining,
        }];
        let report = detect_gaps(
            &plain_client(10),
            &tutorial_heavy_competitors(),
            &signals,
            test_now(),
            &AnalysisPolicy::default(),
            &Classifiers::default(),
        );
        assert!(report.gaps.iter().all(|g| g.id != "series"));
    }

    #[test]
    fn frequency_gap_fires_when_outpublished() {
        // Competitors upload heavily inside the trailing 30 days; the client
        // corpus here is entirely older than the window.
        let client: Vec<VideoRecord> = (0..6)
            .map(|i| make_client_video(&format!("old upload {i}"), 40 + i as i64, 3000))
            .collect();
        let mut competitors = Vec::new();
        for i in 0..5 {
            competitors.push(make_competitor_video(
                &format!("rival upload {i}"),
                "Rival A",
                2 + i as i64,
                8000,
            ));
        }
        let report = detect_gaps(
            &client,
            &competitors,
            &[],
            test_now(),
            &AnalysisPolicy::default(),
            &Classifiers::default(),
        );
        let gap = report
            .gaps
            .iter()
            .find(|g| g.id == "frequency")
            .expect("frequency gap expected");
        assert!(gap.evidence.client_stat.starts_with("0 uploads"));
    }

    #[test]
    fn topic_gap_emerges_from_repeated_ngrams() {
        let mut competitors = tutorial_heavy_competitors();
        for i in 0..3 {
            competitors.push(make_competitor_video(
                &format!("Silent vlog morning routine {i}"),
                "Rival C",
                3 + i as i64,
                80_000,
            ));
        }
        let report = detect_gaps(
            &plain_client(10),
            &competitors,
            &[],
            test_now(),
            &AnalysisPolicy::default(),
            &Classifiers::default(),
        );
        assert!(report.gaps.iter().any(|g| g.id.starts_with("topic_")));
        assert!(report.summary.total >= 1);
    }
}
