//! Per-source normalization into the common [`Opportunity`] schema.
//!
//! Each source has one explicit normalization function; there is no
//! ad hoc optional-field access. The original payload is serialized into
//! `raw_data` so downstream consumers can trace a recommendation back to
//! the record that produced it.

use serde_json::Value;

use clipintel_core::policy::AnalysisPolicy;
use clipintel_core::{Confidence, Effort, Impact};
use clipintel_diagnostics::{ActionItem, Priority};
use clipintel_gaps::Gap;

use crate::types::{
    AuditContentGap, CompetitorOutlier, GrowthLever, Opportunity, OpportunitySource, Replicability,
};

fn raw<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn priority_impact(priority: Priority) -> Impact {
    match priority {
        Priority::High => Impact::High,
        Priority::Medium => Impact::Medium,
        Priority::Low => Impact::Low,
    }
}

pub(crate) fn from_action_item(item: &ActionItem, index: usize) -> Opportunity {
    let source = OpportunitySource::Diagnostics;
    Opportunity {
        id: format!("diag_{index}"),
        title: item.title.clone(),
        source,
        source_label: source.label().to_string(),
        action: item.action.clone(),
        evidence: item.description.clone(),
        format: None,
        impact: priority_impact(item.priority),
        // An attached impact estimate means the detector had numbers behind it.
        confidence: if item.impact.is_some() {
            Confidence::High
        } else {
            Confidence::Medium
        },
        effort: Effort::Medium,
        score: 0.0,
        raw_data: raw(item),
    }
}

pub(crate) fn from_gap(gap: &Gap) -> Opportunity {
    let source = OpportunitySource::Competitor;
    Opportunity {
        id: gap.id.clone(),
        title: gap.title.clone(),
        source,
        source_label: source.label().to_string(),
        action: gap.action.clone(),
        evidence: format!(
            "competitors: {}; you: {}",
            gap.evidence.competitor_stat, gap.evidence.client_stat
        ),
        format: None,
        impact: gap.impact,
        confidence: gap.confidence,
        effort: gap.effort,
        score: 0.0,
        raw_data: raw(gap),
    }
}

/// Returns `None` for outliers missing their insight; the caller logs and
/// drops them.
pub(crate) fn from_outlier(
    outlier: &CompetitorOutlier,
    policy: &AnalysisPolicy,
) -> Option<Opportunity> {
    let insight = outlier.insight.as_ref()?;
    let source = OpportunitySource::Competitor;

    #[allow(clippy::cast_precision_loss)]
    let impact = if outlier.view_count as f64 > policy.gaps.impact_views_high as f64 {
        Impact::High
    } else if outlier.view_count as f64 > policy.gaps.impact_views_medium as f64 {
        Impact::Medium
    } else {
        Impact::Low
    };

    // High replicability means low effort to imitate.
    let effort = match insight.replicability {
        Replicability::High => Effort::Low,
        Replicability::Medium => Effort::Medium,
        Replicability::Low => Effort::High,
    };

    let action = if insight.applicable_tactics.is_empty() {
        format!("Adapt the angle: {}", insight.content_angle)
    } else {
        insight.applicable_tactics.join("; ")
    };

    Some(Opportunity {
        id: format!("outlier_{}", outlier.id),
        title: format!("Adapt \"{}\" from {}", outlier.title, outlier.channel),
        source,
        source_label: source.label().to_string(),
        action,
        evidence: insight.why_it_worked.clone(),
        format: None,
        impact,
        confidence: Confidence::Medium,
        effort,
        score: 0.0,
        raw_data: raw(outlier),
    })
}

pub(crate) fn from_audit_gap(gap: &AuditContentGap, index: usize) -> Opportunity {
    let source = OpportunitySource::Audit;
    Opportunity {
        id: format!("audit_gap_{index}"),
        title: gap.gap.clone(),
        source,
        source_label: source.label().to_string(),
        action: gap.suggested_action.clone(),
        evidence: gap.evidence.clone(),
        format: gap.format.clone(),
        impact: gap.potential_impact,
        confidence: Confidence::Medium,
        effort: Effort::Medium,
        score: 0.0,
        raw_data: raw(gap),
    }
}

pub(crate) fn from_growth_lever(lever: &GrowthLever, index: usize) -> Opportunity {
    let source = OpportunitySource::Audit;
    Opportunity {
        id: format!("audit_lever_{index}"),
        title: lever.lever.clone(),
        source,
        source_label: source.label().to_string(),
        action: format!("Move from {} to {}", lever.current_state, lever.target_state),
        evidence: lever.evidence.clone(),
        format: lever.format.clone(),
        impact: lever.priority,
        confidence: Confidence::High,
        effort: Effort::Medium,
        score: 0.0,
        raw_data: raw(lever),
    }
}
