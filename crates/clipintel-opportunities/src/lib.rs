//! Opportunity normalization, scoring, and ranking.
//!
//! Merges diagnostic action items, competitor gaps, competitor-outlier
//! insights, and audit findings into one schema, scores each entry with the
//! shared weighted model, and returns a ranked list plus per-source
//! availability. Heterogeneous inputs stay strongly typed: each source has
//! its own variant and exactly one normalization function.

pub mod normalize;
pub mod rank;
pub mod types;

pub use rank::rank_opportunities;
pub use types::{
    AuditContentGap, AuditReport, CompetitorOutlier, GrowthLever, Opportunity, OpportunityReport,
    OpportunitySource, OutlierInsight, Replicability, SourceStatus, SourceSummary,
};

#[cfg(test)]
pub(crate) mod test_fixtures {
    use clipintel_core::Impact;
    use clipintel_diagnostics::{ActionItem, ImpactEstimate, Priority};

    use crate::types::{
        AuditContentGap, AuditReport, CompetitorOutlier, GrowthLever, OutlierInsight, Replicability,
    };

    pub(crate) fn make_action_item(title: &str, with_estimate: bool) -> ActionItem {
        ActionItem {
            priority: Priority::High,
            title: title.to_string(),
            description: "detector description".to_string(),
            action: "do the thing".to_string(),
            reason: "test_detector".to_string(),
            impact: with_estimate.then_some(ImpactEstimate {
                views_per_month: 12_000.0,
            }),
            examples: Vec::new(),
        }
    }

    pub(crate) fn make_outlier(
        id: &str,
        view_count: u64,
        replicability: Replicability,
    ) -> CompetitorOutlier {
        CompetitorOutlier {
            id: id.to_string(),
            title: format!("outlier {id}"),
            view_count,
            channel: "Rival Channel".to_string(),
            insight: Some(OutlierInsight {
                applicable_tactics: vec!["open with the payoff".to_string()],
                content_angle: "payoff-first storytelling".to_string(),
                why_it_worked: "the hook shows the result in the first five seconds".to_string(),
                replicability,
            }),
        }
    }

    pub(crate) fn make_audit_report() -> AuditReport {
        AuditReport {
            content_gaps: vec![
                AuditContentGap {
                    gap: "No beginner-facing content".to_string(),
                    suggested_action: "Add an entry-level series".to_string(),
                    evidence: "search traffic skews beginner".to_string(),
                    format: Some("long".to_string()),
                    potential_impact: Impact::High,
                },
                AuditContentGap {
                    gap: "Thumbnails lack faces".to_string(),
                    suggested_action: "A/B test face thumbnails".to_string(),
                    evidence: "top competitors all use faces".to_string(),
                    format: None,
                    potential_impact: Impact::Medium,
                },
                AuditContentGap {
                    gap: "No end-screen strategy".to_string(),
                    suggested_action: "Add end screens to the last 20 uploads".to_string(),
                    evidence: "session chains end after one video".to_string(),
                    format: None,
                    potential_impact: Impact::Medium,
                },
            ],
            growth_levers: vec![GrowthLever {
                lever: "Publish on a fixed weekday".to_string(),
                current_state: "irregular uploads".to_string(),
                target_state: "every Tuesday".to_string(),
                evidence: "returning-viewer share is flat".to_string(),
                format: None,
                priority: Impact::Medium,
            }],
        }
    }
}
