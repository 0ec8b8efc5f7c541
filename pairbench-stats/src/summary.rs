//! Central Tendency and Extremes

/// Arithmetic mean of the samples, `NaN` when empty.
///
/// The result is clamped to `[min, max]` of the samples: summation rounding
/// can otherwise put the mean of identical values just outside them.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    let raw = samples.iter().sum::<f64>() / samples.len() as f64;
    let (lo, hi) = (min(samples), max(samples));
    if raw.is_finite() && lo <= hi {
        raw.clamp(lo, hi)
    } else {
        raw
    }
}

/// Smallest sample, `NaN` when empty.
pub fn min(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

/// Largest sample, `NaN` when empty.
pub fn max(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_mean() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((mean(&samples) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_with_negatives() {
        // Heap deltas can be negative when memory is released mid-trial
        let samples = vec![-4096.0, 1024.0, 0.0];
        assert!((mean(&samples) - (-1024.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_within_extremes() {
        let samples = vec![0.31, 0.29, 0.45, 0.30, 0.33];
        let m = mean(&samples);
        assert!(m >= min(&samples) && m <= max(&samples));
    }

    #[test]
    fn test_mean_of_identical_values_is_exact() {
        // 0.1 * 3 / 3 rounds to 0.10000000000000002 without clamping
        let samples = [0.1, 0.1, 0.1];
        assert_eq!(mean(&samples), 0.1);
        let samples = [0.7; 10];
        assert_eq!(mean(&samples), 0.7);
    }

    #[test]
    fn test_extremes() {
        let samples = vec![2.5, -1.0, 8.0];
        assert_eq!(min(&samples), -1.0);
        assert_eq!(max(&samples), 8.0);
    }

    #[test]
    fn test_empty_samples() {
        assert!(mean(&[]).is_nan());
        assert!(min(&[]).is_nan());
        assert!(max(&[]).is_nan());
    }
}
