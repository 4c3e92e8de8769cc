//! Title-pattern gaps: stylistic markers competitors lean on that the
//! client's titles lack.

use clipintel_core::policy::GapPolicy;
use clipintel_core::{CompetitorVideoRecord, Effort, VideoRecord};

use crate::classify::{PatternClassifier, TitlePattern};
use crate::detect::{confidence_for_sample, impact_for_views, share_stat};
use crate::types::{Gap, GapEvidence, GapType};

pub(crate) fn pattern_gaps(
    client: &[VideoRecord],
    competitors: &[CompetitorVideoRecord],
    classifier: &dyn PatternClassifier,
    policy: &GapPolicy,
) -> Vec<Gap> {
    let mut gaps = Vec::new();

    for pattern in TitlePattern::ALL {
        let mut comp_matching: Vec<&CompetitorVideoRecord> = competitors
            .iter()
            .filter(|v| classifier.patterns(&v.record.title).contains(&pattern))
            .collect();
        let client_count = client
            .iter()
            .filter(|v| classifier.patterns(&v.title).contains(&pattern))
            .count();

        #[allow(clippy::cast_precision_loss)]
        let comp_share = comp_matching.len() as f64 / competitors.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let client_share = if client.is_empty() {
            0.0
        } else {
            client_count as f64 / client.len() as f64
        };

        if comp_share <= policy.pattern_competitor_share
            || client_share >= policy.pattern_client_share
        {
            continue;
        }

        comp_matching.sort_by(|a, b| b.record.views.cmp(&a.record.views));
        #[allow(clippy::cast_precision_loss)]
        let mean_views = comp_matching
            .iter()
            .map(|v| v.record.views as f64)
            .sum::<f64>()
            / comp_matching.len() as f64;

        let gap_size = ((comp_share - client_share) * policy.pattern_gap_scale).min(1.0);

        gaps.push(Gap {
            id: format!("pattern_{}", pattern.slug()),
            gap_type: GapType::Pattern,
            type_label: GapType::Pattern.label().to_string(),
            title: format!("Competitors lean on {}", pattern.label()),
            description: format!(
                "{:.0}% of competitor titles use {} against {:.0}% of yours.",
                comp_share * 100.0,
                pattern.label(),
                client_share * 100.0
            ),
            action: format!("Work {} into the next batch of titles.", pattern.label()),
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
            effort: Effort::Low,
            score: 0.0,
        });
    }

    gaps
}
