//! Tabular Output
//!
//! Tab-separated rows for quick terminal reading and `cut`/`awk` piping:
//! one row per measured variant, then a speedup line for every pair with both
//! variants measured, then any correctness failures.

use crate::report::Report;
use pairbench_core::Variant;
use std::fmt::Write;

/// Column header of the result rows
pub const TABLE_HEADER: &str =
    "pair\tvariant\twall_p50_ms\twall_p95_ms\tcpu_mean_ms\theap_delta_mean_bytes";

/// Render a report as tab-separated text
pub fn generate_table_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(TABLE_HEADER);
    output.push('\n');

    for record in &report.results {
        let s = &record.summary;
        let _ = writeln!(
            output,
            "{}\t{}\t{:.3}\t{:.3}\t{:.3}\t{}",
            record.pair,
            record.variant,
            s.wall_ms_p50(),
            s.wall_ms_p95(),
            s.cpu_ms_mean(),
            truncate_bytes(s.heap_used_delta_bytes_mean()),
        );
    }

    let speedups: Vec<(&str, f64)> = report
        .pairs()
        .into_iter()
        .filter_map(|pair| report.speedup(pair).map(|x| (pair, x)))
        .collect();
    if !speedups.is_empty() {
        output.push('\n');
        for (pair, speedup) in speedups {
            let _ = writeln!(
                output,
                "{pair}\t{}/{} p50\t{speedup:.2}x",
                Variant::Slow,
                Variant::Fast
            );
        }
    }

    if !report.failures.is_empty() {
        output.push('\n');
        for failure in &report.failures {
            let _ = writeln!(output, "FAIL\t{}", failure.message);
        }
    }

    output
}

/// Whole bytes, keeping `NaN` visible for empty summaries
fn truncate_bytes(mean: f64) -> String {
    if mean.is_finite() {
        format!("{}", mean.trunc() as i64)
    } else {
        format!("{mean}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::{record, report};
    use crate::CorrectnessFailure;

    #[test]
    fn test_header_and_rows() {
        let r = report(
            vec![
                record("sum", Variant::Slow, &[2.0, 4.0, 6.0]),
                record("sum", Variant::Fast, &[1.0, 1.0, 1.0]),
            ],
            vec![],
        );
        let text = generate_table_report(&r);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(TABLE_HEADER));
        assert_eq!(lines.next(), Some("sum\tslow\t4.000\t5.800\t2.000\t64"));
        assert_eq!(lines.next(), Some("sum\tfast\t1.000\t1.000\t0.500\t64"));
        assert!(text.contains("sum\tslow/fast p50\t4.00x"));
        assert!(!text.contains("FAIL"));
    }

    #[test]
    fn test_single_variant_has_no_speedup() {
        let r = report(vec![record("sum", Variant::Fast, &[1.0])], vec![]);
        assert!(!generate_table_report(&r).contains("p50\t"));
    }

    #[test]
    fn test_failures_listed() {
        let r = report(
            vec![],
            vec![CorrectnessFailure::mismatch(
                "arrays",
                2,
                &serde_json::json!(1),
                &serde_json::json!(2),
            )],
        );
        let text = generate_table_report(&r);
        assert!(text.contains("FAIL\tMismatch in arrays (seed=2)"));
    }

    #[test]
    fn test_truncate_bytes() {
        assert_eq!(truncate_bytes(96.9), "96");
        assert_eq!(truncate_bytes(-128.5), "-128");
        assert_eq!(truncate_bytes(f64::NAN), "NaN");
    }
}
