//! Small numeric helpers with explicit zero-guards.
//!
//! Every mean/ratio in the pipeline goes through these so `NaN`/`Infinity`
//! can never escape into scores or deltas.

/// Mean of an `f64` slice; `0.0` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = values.len() as f64;
    values.iter().sum::<f64>() / denom
}

/// Mean over a projection of a slice; `0.0` for an empty slice.
pub fn mean_by<T>(items: &[T], f: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = items.len() as f64;
    items.iter().map(f).sum::<f64>() / denom
}

/// `numerator / denominator`, or `0.0` when the denominator is zero.
#[must_use]
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Relative delta `(actual - baseline) / baseline`; `None` when the
/// baseline is zero.
#[must_use]
pub fn relative_delta(actual: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 {
        None
    } else {
        Some((actual - baseline) / baseline)
    }
}

/// Size of a top-20% cohort: at least one element once any exist.
#[must_use]
pub fn top_quintile_len(total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (total / 5).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_basic() {
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn safe_ratio_guards_zero_denominator() {
        assert_eq!(safe_ratio(5.0, 0.0), 0.0);
        assert!((safe_ratio(5.0, 2.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn relative_delta_none_on_zero_baseline() {
        assert_eq!(relative_delta(100.0, 0.0), None);
        assert_eq!(relative_delta(20_000.0, 10_000.0), Some(1.0));
    }

    #[test]
    fn top_quintile_len_minimum_one() {
        assert_eq!(top_quintile_len(0), 0);
        assert_eq!(top_quintile_len(3), 1);
        assert_eq!(top_quintile_len(10), 2);
        assert_eq!(top_quintile_len(25), 5);
    }
}
