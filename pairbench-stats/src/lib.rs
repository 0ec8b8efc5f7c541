#![warn(missing_docs)]
//! Pairbench Statistical Engine
//!
//! Pure numeric aggregation over benchmark sample sequences:
//! - Arithmetic mean
//! - Linear-interpolation percentiles (`quantile`)
//! - Extremes
//!
//! Every function takes a borrowed slice and never reorders it. Sample order
//! is meaningful to callers (trial order), so percentile computation always
//! works on a fresh sorted copy.
//!
//! Empty input is a degenerate case, not an error: every aggregate returns
//! [`f64::NAN`] so that partially filled reports stay structurally valid.

mod percentiles;
mod summary;

pub use percentiles::{P50, P95, quantile};
pub use summary::{max, mean, min};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!((P50 - 0.5).abs() < f64::EPSILON);
        assert!((P95 - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input_is_nan_everywhere() {
        assert!(mean(&[]).is_nan());
        assert!(quantile(&[], P50).is_nan());
        assert!(min(&[]).is_nan());
        assert!(max(&[]).is_nan());
    }
}
