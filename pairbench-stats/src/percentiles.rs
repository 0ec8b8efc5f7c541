//! Percentile Computation
//!
//! Percentiles are computed from raw samples. Tail percentiles (p95) must
//! include slow trials since they ARE the signal.

use crate::summary::{max, min};

/// Quantile used for the median
pub const P50: f64 = 0.5;

/// Quantile used for tail latency
pub const P95: f64 = 0.95;

/// Compute a single quantile from samples, `q` in `[0, 1]`.
///
/// Uses linear interpolation between the two samples bracketing the
/// fractional rank `(len - 1) * q`. `q <= 0` yields the minimum and
/// `q >= 1` the maximum. Empty input yields `NaN`.
///
/// The input slice is left untouched; sorting happens on a copy.
///
/// # Examples
///
/// ```
/// # use pairbench_stats::quantile;
/// let samples = [10.0, 20.0, 30.0, 40.0];
/// assert_eq!(quantile(&samples, 0.5), 25.0);
/// assert!((quantile(&samples, 0.95) - 38.5).abs() < 1e-9);
/// ```
pub fn quantile(samples: &[f64], q: f64) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    if q <= 0.0 {
        return min(samples);
    }
    if q >= 1.0 {
        return max(samples);
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;

    match sorted.get(base + 1) {
        Some(upper) => sorted[base] + rest * (upper - sorted[base]),
        None => sorted[base],
    }
}
