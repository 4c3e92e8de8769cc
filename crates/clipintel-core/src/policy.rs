//! Injectable scoring and threshold policy.
//!
//! Every weight map and percentage cutoff used by the detectors lives here
//! rather than as module-level constants, so scoring behavior can be swapped
//! per caller or per test without code edits. Defaults carry the production
//! numbers; a YAML file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::types::{Confidence, Effort, Impact};

/// Weight lookup for a three-level label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightMap {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl WeightMap {
    /// Standard map: higher label, higher weight.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            high: 1.0,
            medium: 0.6,
            low: 0.3,
        }
    }

    /// Inverted map, used for effort: low effort is the desirable end.
    #[must_use]
    pub fn inverted() -> Self {
        Self {
            high: 0.3,
            medium: 0.6,
            low: 1.0,
        }
    }

    #[must_use]
    pub fn for_impact(&self, impact: Impact) -> f64 {
        match impact {
            Impact::High => self.high,
            Impact::Medium => self.medium,
            Impact::Low => self.low,
        }
    }

    #[must_use]
    pub fn for_confidence(&self, confidence: Confidence) -> f64 {
        match confidence {
            Confidence::High => self.high,
            Confidence::Medium => self.medium,
            Confidence::Low => self.low,
        }
    }

    #[must_use]
    pub fn for_effort(&self, effort: Effort) -> f64 {
        match effort {
            Effort::High => self.high,
            Effort::Medium => self.medium,
            Effort::Low => self.low,
        }
    }

    fn in_unit_range(&self) -> bool {
        [self.high, self.medium, self.low]
            .iter()
            .all(|w| (0.0..=1.0).contains(w))
    }
}

/// Weighted-sum scoring model applied to every opportunity and gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub impact_weights: WeightMap,
    pub confidence_weights: WeightMap,
    /// Inverted: low effort scores highest.
    pub effort_weights: WeightMap,
    pub impact_share: f64,
    pub confidence_share: f64,
    pub effort_share: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            impact_weights: WeightMap::standard(),
            confidence_weights: WeightMap::standard(),
            effort_weights: WeightMap::inverted(),
            impact_share: 0.4,
            confidence_share: 0.3,
            effort_share: 0.3,
        }
    }
}

impl ScoringPolicy {
    /// The uniform score for an impact/confidence/effort label triple.
    ///
    /// With shares summing to 1 and unit-range weight maps, the result is
    /// guaranteed to land in `[0, 1]`.
    #[must_use]
    pub fn score(&self, impact: Impact, confidence: Confidence, effort: Effort) -> f64 {
        self.impact_weights.for_impact(impact) * self.impact_share
            + self.confidence_weights.for_confidence(confidence) * self.confidence_share
            + self.effort_weights.for_effort(effort) * self.effort_share
    }
}

/// Thresholds for the single-creator diagnostic detectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticPolicy {
    /// Fires when recent-30d uploads fall below this fraction of the prior 30d.
    pub cadence_drop_ratio: f64,
    /// Fires when mean CTR falls below this fraction of the top-20% mean.
    pub ctr_gap_ratio: f64,
    /// Fires when the top-20% mean views exceed this multiple of the overall mean.
    pub top_performer_multiple: f64,
    /// Fires when mean retention falls below this fraction of the top-20% mean.
    pub retention_gap_ratio: f64,
    /// Fires when the bottom-20% mean views fall below this fraction of overall.
    pub bottom_floor_ratio: f64,
    /// Stronger format must out-view the weaker by this multiple.
    pub balance_dominance_multiple: f64,
    /// Stronger format must hold less than this share of output to fire.
    pub balance_share_floor: f64,
    pub mismatch_retention_floor: f64,
    pub mismatch_ctr_ceiling: f64,
    pub mismatch_impressions_floor: u64,
    pub refresh_impressions_floor: u64,
    pub refresh_ctr_ceiling: f64,
    /// Benchmark CTR used to estimate missed views on refresh candidates.
    pub refresh_benchmark_ctr: f64,
    /// Minimum per-format sample for CTR/retention cohort detectors.
    pub min_format_sample: usize,
    /// Minimum per-format sample for the top-performer replication detector.
    pub min_replication_sample: usize,
    /// Minimum bottom-cohort size for the anti-pattern detector.
    pub min_bottom_sample: usize,
    /// Hard cap on emitted action items.
    pub max_items: usize,
}

impl Default for DiagnosticPolicy {
    fn default() -> Self {
        Self {
            cadence_drop_ratio: 0.7,
            ctr_gap_ratio: 0.8,
            top_performer_multiple: 1.5,
            retention_gap_ratio: 0.85,
            bottom_floor_ratio: 0.4,
            balance_dominance_multiple: 1.5,
            balance_share_floor: 0.4,
            mismatch_retention_floor: 0.5,
            mismatch_ctr_ceiling: 0.04,
            mismatch_impressions_floor: 1000,
            refresh_impressions_floor: 5000,
            refresh_ctr_ceiling: 0.03,
            refresh_benchmark_ctr: 0.05,
            min_format_sample: 5,
            min_replication_sample: 10,
            min_bottom_sample: 5,
            max_items: 10,
        }
    }
}

/// Thresholds for the competitor gap detectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GapPolicy {
    pub format_competitor_share: f64,
    pub format_client_share: f64,
    pub format_gap_scale: f64,
    pub pattern_competitor_share: f64,
    pub pattern_client_share: f64,
    pub pattern_gap_scale: f64,
    pub shorts_competitor_share: f64,
    pub shorts_client_share: f64,
    pub long_competitor_share: f64,
    pub long_client_share: f64,
    /// Competitor per-channel monthly upload mean must exceed this to fire.
    pub frequency_competitor_floor: f64,
    /// Client uploads must fall below this fraction of the competitor mean.
    pub frequency_client_ratio: f64,
    /// Title-prefix occurrences needed to count as a client series.
    pub series_min_occurrences: usize,
    /// Client series count below which the series gap can fire.
    pub series_client_floor: usize,
    /// Competitor videos an n-gram must appear in to qualify as a topic.
    pub topic_min_competitor_videos: usize,
    pub topic_limit: usize,
    /// Mean supporting views above which a gap is tagged high impact.
    pub impact_views_high: u64,
    pub impact_views_medium: u64,
    /// Supporting sample sizes for confidence tagging.
    pub confidence_sample_high: usize,
    pub confidence_sample_medium: usize,
}

impl Default for GapPolicy {
    fn default() -> Self {
        Self {
            format_competitor_share: 0.10,
            format_client_share: 0.05,
            format_gap_scale: 3.0,
            pattern_competitor_share: 0.20,
            pattern_client_share: 0.10,
            pattern_gap_scale: 2.5,
            shorts_competitor_share: 0.25,
            shorts_client_share: 0.10,
            long_competitor_share: 0.50,
            long_client_share: 0.20,
            frequency_competitor_floor: 2.0,
            frequency_client_ratio: 0.6,
            series_min_occurrences: 3,
            series_client_floor: 2,
            topic_min_competitor_videos: 3,
            topic_limit: 8,
            impact_views_high: 50_000,
            impact_views_medium: 10_000,
            confidence_sample_high: 10,
            confidence_sample_medium: 5,
        }
    }
}

/// Thresholds for brief-to-video matching and outcome baselines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Days before brief creation a candidate may have been published.
    pub lookback_days: i64,
    /// Days after brief creation the candidate window stays open.
    pub window_days: i64,
    pub title_weight: f64,
    pub format_bonus: f64,
    pub proximity_weight: f64,
    /// Candidates below this combined score are discarded.
    pub min_score: f64,
    pub max_candidates: usize,
    /// Length of the pre-brief baseline window.
    pub baseline_days: i64,
    /// Length of the channel before/after windows in the aggregate report.
    pub report_window_days: i64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            lookback_days: 7,
            window_days: 60,
            title_weight: 0.5,
            format_bonus: 0.2,
            proximity_weight: 0.3,
            min_score: 0.05,
            max_candidates: 5,
            baseline_days: 30,
            report_window_days: 30,
        }
    }
}

/// The full injectable policy: one struct handed to every pipeline entry point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPolicy {
    pub scoring: ScoringPolicy,
    pub diagnostics: DiagnosticPolicy,
    pub gaps: GapPolicy,
    pub matching: MatchPolicy,
}

/// Load and validate an analysis policy from a YAML file.
///
/// Fields omitted from the file keep their defaults.
///
/// # Errors
///
/// Returns `PolicyError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_policy(path: &Path) -> Result<AnalysisPolicy, PolicyError> {
    let content = std::fs::read_to_string(path).map_err(|e| PolicyError::PolicyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let policy: AnalysisPolicy = serde_yaml::from_str(&content)?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Validate policy invariants shared by the scoring model and detectors.
///
/// # Errors
///
/// Returns `PolicyError::Validation` naming the first violated invariant.
pub fn validate_policy(policy: &AnalysisPolicy) -> Result<(), PolicyError> {
    let s = &policy.scoring;
    let share_sum = s.impact_share + s.confidence_share + s.effort_share;
    if (share_sum - 1.0).abs() > 1e-9 {
        return Err(PolicyError::Validation(format!(
            "scoring shares must sum to 1.0, got {share_sum}"
        )));
    }
    for (name, map) in [
        ("impact_weights", &s.impact_weights),
        ("confidence_weights", &s.confidence_weights),
        ("effort_weights", &s.effort_weights),
    ] {
        if !map.in_unit_range() {
            return Err(PolicyError::Validation(format!(
                "scoring.{name} entries must lie in [0, 1]"
            )));
        }
    }

    let g = &policy.gaps;
    for (name, share) in [
        ("format_competitor_share", g.format_competitor_share),
        ("format_client_share", g.format_client_share),
        ("pattern_competitor_share", g.pattern_competitor_share),
        ("pattern_client_share", g.pattern_client_share),
        ("shorts_competitor_share", g.shorts_competitor_share),
        ("shorts_client_share", g.shorts_client_share),
        ("long_competitor_share", g.long_competitor_share),
        ("long_client_share", g.long_client_share),
    ] {
        if !(0.0..=1.0).contains(&share) {
            return Err(PolicyError::Validation(format!(
                "gaps.{name} must lie in [0, 1], got {share}"
            )));
        }
    }
    if g.topic_limit == 0 {
        return Err(PolicyError::Validation(
            "gaps.topic_limit must be at least 1".to_string(),
        ));
    }

    let d = &policy.diagnostics;
    if d.max_items == 0 {
        return Err(PolicyError::Validation(
            "diagnostics.max_items must be at least 1".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&d.cadence_drop_ratio) {
        return Err(PolicyError::Validation(format!(
            "diagnostics.cadence_drop_ratio must lie in [0, 1], got {}",
            d.cadence_drop_ratio
        )));
    }

    let m = &policy.matching;
    if m.window_days <= 0 || m.baseline_days <= 0 || m.report_window_days <= 0 {
        return Err(PolicyError::Validation(
            "matching windows must be positive day counts".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&m.min_score) {
        return Err(PolicyError::Validation(format!(
            "matching.min_score must lie in [0, 1], got {}",
            m.min_score
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_validates() {
        assert!(validate_policy(&AnalysisPolicy::default()).is_ok());
    }

    #[test]
    fn default_score_matches_weighted_sum() {
        let scoring = ScoringPolicy::default();
        let score = scoring.score(Impact::High, Confidence::Medium, Effort::Low);
        // 1.0*0.4 + 0.6*0.3 + 1.0*0.3
        assert!((score - 0.88).abs() < 1e-12);
    }

    #[test]
    fn score_stays_in_unit_range_for_all_labels() {
        let scoring = ScoringPolicy::default();
        for impact in [Impact::High, Impact::Medium, Impact::Low] {
            for confidence in [Confidence::High, Confidence::Medium, Confidence::Low] {
                for effort in [Effort::High, Effort::Medium, Effort::Low] {
                    let score = scoring.score(impact, confidence, effort);
                    assert!(
                        (0.0..=1.0).contains(&score),
                        "score out of range for {impact}/{confidence}/{effort}: {score}"
                    );
                }
            }
        }
    }

    #[test]
    fn validate_rejects_bad_share_sum() {
        let mut policy = AnalysisPolicy::default();
        policy.scoring.impact_share = 0.9;
        let err = validate_policy(&policy).unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn validate_rejects_out_of_range_weight() {
        let mut policy = AnalysisPolicy::default();
        policy.scoring.impact_weights.high = 1.5;
        let err = validate_policy(&policy).unwrap_err();
        assert!(err.to_string().contains("impact_weights"));
    }

    #[test]
    fn validate_rejects_zero_topic_limit() {
        let mut policy = AnalysisPolicy::default();
        policy.gaps.topic_limit = 0;
        let err = validate_policy(&policy).unwrap_err();
        assert!(err.to_string().contains("topic_limit"));
    }

    #[test]
    fn validate_rejects_nonpositive_window() {
        let mut policy = AnalysisPolicy::default();
        policy.matching.window_days = 0;
        let err = validate_policy(&policy).unwrap_err();
        assert!(err.to_string().contains("positive day counts"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "scoring:\n  impact_share: 0.5\n  confidence_share: 0.25\n  effort_share: 0.25\n";
        let policy: AnalysisPolicy = serde_yaml::from_str(yaml).unwrap();
        assert!((policy.scoring.impact_share - 0.5).abs() < f64::EPSILON);
        assert_eq!(policy.diagnostics.max_items, 10);
        assert_eq!(policy.gaps.topic_limit, 8);
        assert!(validate_policy(&policy).is_ok());
    }
}
