//! Merge, score, and rank opportunities from all sources.

use clipintel_core::policy::AnalysisPolicy;
use clipintel_diagnostics::ActionItem;
use clipintel_gaps::Gap;

use crate::normalize;
use crate::types::{
    AuditReport, CompetitorOutlier, Opportunity, OpportunityReport, SourceStatus, SourceSummary,
};

/// Merge all sources into one ranked opportunity list.
///
/// A `None` input means the collaborator for that source was unavailable
/// (no competitors configured, no audit run); this is reflected in the
/// `sources` summary rather than treated as an error. Malformed records
/// (outliers without insights) are dropped with a warning. The sort is
/// stable and descending by score, so ties keep insertion order:
/// diagnostics, then gaps, then outliers, then audit items.
#[must_use]
pub fn rank_opportunities(
    action_items: Option<&[ActionItem]>,
    gaps: Option<&[Gap]>,
    outliers: Option<&[CompetitorOutlier]>,
    audit: Option<&AuditReport>,
    policy: &AnalysisPolicy,
) -> OpportunityReport {
    let mut opportunities: Vec<Opportunity> = Vec::new();

    let mut diagnostics_count = 0;
    if let Some(items) = action_items {
        for (i, item) in items.iter().enumerate() {
            opportunities.push(normalize::from_action_item(item, i));
            diagnostics_count += 1;
        }
    }

    let mut competitor_count = 0;
    if let Some(gaps) = gaps {
        for gap in gaps {
            opportunities.push(normalize::from_gap(gap));
            competitor_count += 1;
        }
    }
    if let Some(outliers) = outliers {
        for outlier in outliers {
            match normalize::from_outlier(outlier, policy) {
                Some(opp) => {
                    opportunities.push(opp);
                    competitor_count += 1;
                }
                None => {
                    tracing::warn!(id = %outlier.id, "dropping outlier without insight");
                }
            }
        }
    }

    let mut audit_count = 0;
    if let Some(report) = audit {
        for (i, gap) in report.content_gaps.iter().enumerate() {
            opportunities.push(normalize::from_audit_gap(gap, i));
            audit_count += 1;
        }
        for (i, lever) in report.growth_levers.iter().enumerate() {
            opportunities.push(normalize::from_growth_lever(lever, i));
            audit_count += 1;
        }
    }

    for opp in &mut opportunities {
        opp.score = policy.scoring.score(opp.impact, opp.confidence, opp.effort);
    }
    opportunities.sort_by(|a, b| b.score.total_cmp(&a.score));

    tracing::info!(
        total = opportunities.len(),
        diagnostics = diagnostics_count,
        competitor = competitor_count,
        audit = audit_count,
        "ranked opportunities"
    );

    OpportunityReport {
        opportunities,
        sources: SourceSummary {
            diagnostics: SourceStatus {
                count: diagnostics_count,
                available: action_items.is_some(),
            },
            competitor: SourceStatus {
                count: competitor_count,
                available: gaps.is_some() || outliers.is_some(),
            },
            audit: SourceStatus {
                count: audit_count,
                available: audit.is_some(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_action_item, make_audit_report, make_outlier};
    use crate::types::{OpportunitySource, Replicability};
    use clipintel_core::{Confidence, Effort, Impact};

    #[test]
    fn all_sources_unavailable_yields_empty_report() {
        let report = rank_opportunities(None, None, None, None, &AnalysisPolicy::default());
        assert!(report.opportunities.is_empty());
        assert!(!report.sources.diagnostics.available);
        assert!(!report.sources.competitor.available);
        assert!(!report.sources.audit.available);
    }

    #[test]
    fn empty_but_present_source_counts_as_available() {
        let report = rank_opportunities(Some(&[]), None, None, None, &AnalysisPolicy::default());
        assert!(report.sources.diagnostics.available);
        assert_eq!(report.sources.diagnostics.count, 0);
    }

    #[test]
    fn scores_match_weighted_sum_exactly() {
        let policy = AnalysisPolicy::default();
        let items = [make_action_item("High priority item", true)];
        let report = rank_opportunities(Some(&items), None, None, None, &policy);
        let opp = &report.opportunities[0];
        // Impact high (1.0)*0.4 + confidence high (1.0)*0.3 + effort medium (0.6)*0.3.
        assert!((opp.score - 0.88).abs() < 1e-12);
        assert!((opp.score - policy.scoring.score(opp.impact, opp.confidence, opp.effort)).abs()
            < f64::EPSILON);
    }

    #[test]
    fn all_scores_in_unit_range_and_sorted() {
        let policy = AnalysisPolicy::default();
        let items = [
            make_action_item("first", true),
            make_action_item("second", false),
        ];
        let outliers = [
            make_outlier("o1", 90_000, Replicability::High),
            make_outlier("o2", 2_000, Replicability::Low),
        ];
        let audit = make_audit_report();
        let report =
            rank_opportunities(Some(&items), None, Some(&outliers), Some(&audit), &policy);
        assert!(report
            .opportunities
            .iter()
            .all(|o| (0.0..=1.0).contains(&o.score)));
        assert!(report
            .opportunities
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn malformed_outliers_are_filtered_not_fatal() {
        let mut broken = make_outlier("o9", 50_000, Replicability::Medium);
        broken.insight = None;
        let outliers = [broken, make_outlier("o1", 90_000, Replicability::High)];
        let report =
            rank_opportunities(None, None, Some(&outliers), None, &AnalysisPolicy::default());
        assert_eq!(report.sources.competitor.count, 1);
        assert_eq!(report.opportunities.len(), 1);
        assert_eq!(report.opportunities[0].id, "outlier_o1");
    }

    #[test]
    fn ties_keep_insertion_order() {
        // Two audit content gaps with identical labels score identically;
        // the stable sort must keep their original order.
        let audit = make_audit_report();
        let report =
            rank_opportunities(None, None, None, Some(&audit), &AnalysisPolicy::default());
        let tied: Vec<&str> = report
            .opportunities
            .iter()
            .filter(|o| o.impact == Impact::Medium && o.confidence == Confidence::Medium)
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(tied, vec!["audit_gap_1", "audit_gap_2"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let policy = AnalysisPolicy::default();
        let items = [make_action_item("repeatable", true)];
        let outliers = [make_outlier("o1", 90_000, Replicability::High)];
        let a = rank_opportunities(Some(&items), None, Some(&outliers), None, &policy);
        let b = rank_opportunities(Some(&items), None, Some(&outliers), None, &policy);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn source_labels_follow_source() {
        let audit = make_audit_report();
        let report =
            rank_opportunities(None, None, None, Some(&audit), &AnalysisPolicy::default());
        assert!(report
            .opportunities
            .iter()
            .all(|o| o.source == OpportunitySource::Audit && o.source_label == "Content Audit"));
        assert!(report.opportunities.iter().any(|o| o.effort == Effort::Medium));
    }
}
