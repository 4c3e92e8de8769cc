//! Shorts-vs-long-form mix gaps.

use clipintel_core::policy::GapPolicy;
use clipintel_core::{CompetitorVideoRecord, Effort, VideoFormat, VideoRecord};

use crate::detect::{confidence_for_sample, impact_for_views, share_stat};
use crate::types::{Gap, GapEvidence, GapType};

pub(crate) fn content_type_gaps(
    client: &[VideoRecord],
    competitors: &[CompetitorVideoRecord],
    policy: &GapPolicy,
) -> Vec<Gap> {
    let mut gaps = Vec::new();

    // Asymmetric thresholds: a shorts gap opens earlier than a long-form gap
    // because shorts are the cheaper format to test.
    let rules = [
        (
            VideoFormat::Short,
            policy.shorts_competitor_share,
            policy.shorts_client_share,
        ),
        (
            VideoFormat::Long,
            policy.long_competitor_share,
            policy.long_client_share,
        ),
    ];

    for (format, comp_floor, client_ceiling) in rules {
        let mut comp_matching: Vec<&CompetitorVideoRecord> = competitors
            .iter()
            .filter(|v| v.record.format == format)
            .collect();
        let client_count = client.iter().filter(|v| v.format == format).count();

        #[allow(clippy::cast_precision_loss)]
        let comp_share = comp_matching.len() as f64 / competitors.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let client_share = if client.is_empty() {
            0.0
        } else {
            client_count as f64 / client.len() as f64
        };

        if comp_share <= comp_floor || client_share >= client_ceiling {
            continue;
        }

        comp_matching.sort_by(|a, b| b.record.views.cmp(&a.record.views));
        #[allow(clippy::cast_precision_loss)]
        let mean_views = comp_matching
            .iter()
            .map(|v| v.record.views as f64)
            .sum::<f64>()
            / comp_matching.len() as f64;

        let gap_size = ((comp_share - client_share) * 2.0).min(1.0);

        gaps.push(Gap {
            id: format!("content_type_{format}"),
            gap_type: GapType::ContentType,
            type_label: GapType::ContentType.label().to_string(),
            title: format!("Your mix is light on {format}-form"),
            description: format!(
                "Competitors publish {:.0}% {format}-form content; you publish {:.0}%.",
                comp_share * 100.0,
                client_share * 100.0
            ),
            action: format!("Raise the share of {format}-form uploads in the coming month."),
            evidence: GapEvidence {
                competitor_stat: share_stat(comp_matching.len(), comp_share),
                client_stat: share_stat(client_count, client_share),
                top_examples: comp_matching
                    .iter()
                    .take(3)
                    .map(|v| v.record.title.clone())
                    .collect(),
            },
            gap_size,
            impact: impact_for_views(mean_views, policy),
            confidence: confidence_for_sample(comp_matching.len(), policy),
            effort: Effort::High,
            score: 0.0,
        });
    }

    gaps
}
