//! Content-format gaps: buckets the competitor corpus does well in that
//! the client barely touches.

use clipintel_core::policy::GapPolicy;
use clipintel_core::{CompetitorVideoRecord, Effort, VideoRecord};

use crate::classify::{ContentFormat, FormatClassifier};
use crate::detect::{confidence_for_sample, impact_for_views, share_stat};
use crate::types::{Gap, GapEvidence, GapType};

pub(crate) fn format_gaps(
    client: &[VideoRecord],
    competitors: &[CompetitorVideoRecord],
    classifier: &dyn FormatClassifier,
    policy: &GapPolicy,
) -> Vec<Gap> {
    let mut gaps = Vec::new();

    for format in ContentFormat::ALL {
        let mut comp_in_bucket: Vec<&CompetitorVideoRecord> = competitors
            .iter()
            .filter(|v| classifier.classify(&v.record.title) == Some(format))
            .collect();
        let client_count = client
            .iter()
            .filter(|v| classifier.classify(&v.title) == Some(format))
            .count();

        #[allow(clippy::cast_precision_loss)]
        let comp_share = comp_in_bucket.len() as f64 / competitors.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let client_share = if client.is_empty() {
            0.0
        } else {
            client_count as f64 / client.len() as f64
        };

        if comp_share <= policy.format_competitor_share || client_share >= policy.format_client_share
        {
            continue;
        }

        comp_in_bucket.sort_by(|a, b| b.record.views.cmp(&a.record.views));
        #[allow(clippy::cast_precision_loss)]
        let mean_views = comp_in_bucket
            .iter()
            .map(|v| v.record.views as f64)
            .sum::<f64>()
            / comp_in_bucket.len() as f64;

        let gap_size = ((comp_share - client_share) * policy.format_gap_scale).min(1.0);

        gaps.push(Gap {
            id: format!("format_{}", format.slug()),
            gap_type: GapType::Format,
            type_label: GapType::Format.label().to_string(),
            title: format!("Competitors win with {format} content"),
            description: format!(
                "{:.0}% of competitor uploads are {format} videos averaging {mean_views:.0} \
                 views; your corpus is {:.0}% {format}.",
                comp_share * 100.0,
                client_share * 100.0
            ),
            action: format!("Test two {format} videos over the next month."),
            evidence: GapEvidence {
                competitor_stat: share_stat(comp_in_bucket.len(), comp_share),
                client_stat: share_stat(client_count, client_share),
                top_examples: comp_in_bucket
                    .iter()
                    .take(3)
                    .map(|v| v.record.title.clone())
                    .collect(),
            },
            gap_size,
            impact: impact_for_views(mean_views, policy),
            confidence: confidence_for_sample(comp_in_bucket.len(), policy),
            effort: Effort::Medium,
            score: 0.0,
        });
    }

    gaps
}
