//! Topic-coverage gaps via title n-grams.
//!
//! A topic is a 2- or 3-gram of stopword-filtered title tokens. It
//! qualifies when it appears in enough competitor videos and in none of
//! the client's, ranked by the mean views of the videos carrying it.

use std::collections::{BTreeMap, BTreeSet};

use clipintel_core::policy::GapPolicy;
use clipintel_core::text::{ngrams, slugify, topic_tokens};
use clipintel_core::{CompetitorVideoRecord, Effort, VideoRecord};

use crate::detect::{confidence_for_sample, impact_for_views};
use crate::types::{Gap, GapEvidence, GapType};

/// Distinct topics in one title: its 2-grams and 3-grams, deduplicated.
fn title_topics(title: &str) -> BTreeSet<String> {
    let tokens = topic_tokens(title);
    let mut topics: BTreeSet<String> = ngrams(&tokens, 2).into_iter().collect();
    topics.extend(ngrams(&tokens, 3));
    topics
}

struct TopicStats {
    video_count: usize,
    total_views: u64,
    /// (views, title) pairs for evidence examples.
    examples: Vec<(u64, String)>,
}

pub(crate) fn topic_gaps(
    client: &[VideoRecord],
    competitors: &[CompetitorVideoRecord],
    policy: &GapPolicy,
) -> Vec<Gap> {
    let mut client_topics: BTreeSet<String> = BTreeSet::new();
    for video in client {
        client_topics.extend(title_topics(&video.title));
    }

    let mut stats: BTreeMap<String, TopicStats> = BTreeMap::new();
    for video in competitors {
        for topic in title_topics(&video.record.title) {
            let entry = stats.entry(topic).or_insert(TopicStats {
                video_count: 0,
                total_views: 0,
                examples: Vec::new(),
            });
            entry.video_count += 1;
            entry.total_views += video.record.views;
            entry.examples.push((video.record.views, video.record.title.clone()));
        }
    }

    let mut qualified: Vec<(String, TopicStats)> = stats
        .into_iter()
        .filter(|(topic, s)| {
            s.video_count >= policy.topic_min_competitor_videos && !client_topics.contains(topic)
        })
        .collect();

    // Rank by mean views; the BTreeMap origin makes ties alphabetical.
    #[allow(clippy::cast_precision_loss)]
    qualified.sort_by(|(_, a), (_, b)| {
        let mean_a = a.total_views as f64 / a.video_count as f64;
        let mean_b = b.total_views as f64 / b.video_count as f64;
        mean_b.total_cmp(&mean_a)
    });
    qualified.truncate(policy.topic_limit);

    qualified
        .into_iter()
        .map(|(topic, mut s)| {
            #[allow(clippy::cast_precision_loss)]
            let mean_views = s.total_views as f64 / s.video_count as f64;
            s.examples.sort_by(|a, b| b.0.cmp(&a.0));
            Gap {
                id: format!("topic_{}", slugify(&topic)),
                gap_type: GapType::Topic,
                type_label: GapType::Topic.label().to_string(),
                title: format!("Untouched topic: \"{topic}\""),
                description: format!(
                    "{} competitor videos cover \"{topic}\" averaging {mean_views:.0} views; \
                     your corpus has none.",
                    s.video_count
                ),
                action: format!("Plan a video on \"{topic}\"."),
                evidence: GapEvidence {
                    competitor_stat: format!("{} videos, {mean_views:.0} avg views", s.video_count),
                    client_stat: "0 videos".to_string(),
                    top_examples: s.examples.into_iter().take(3).map(|(_, t)| t).collect(),
                },
                gap_size: (mean_views / 50_000.0).clamp(0.2, 1.0),
                impact: impact_for_views(mean_views, policy),
                confidence: confidence_for_sample(s.video_count, policy),
                effort: Effort::Medium,
                score: 0.0,
            }
        })
        .collect()
}
