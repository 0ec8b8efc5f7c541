//! Report Data Structures

use crate::OutputFormat;
use chrono::{DateTime, Utc};
use pairbench_core::{BenchSummary, HeapStatistics, Variant, VariantSelector};
use serde::Serialize;

/// Complete result of one `bench` invocation
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// When the report was assembled
    pub ts: DateTime<Utc>,
    /// Environment the numbers were taken in
    pub env: EnvInfo,
    /// Effective configuration of the run
    pub args: RunConfig,
    /// One record per measured (pair, variant), in execution order
    pub results: Vec<ResultRecord>,
    /// Every correctness violation found during the run
    pub failures: Vec<CorrectnessFailure>,
}

impl Report {
    /// Whether the run found no correctness violation
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Record for one (pair, variant), if it was measured
    pub fn record(&self, pair: &str, variant: Variant) -> Option<&ResultRecord> {
        self.results
            .iter()
            .find(|r| r.pair == pair && r.variant == variant)
    }

    /// `slow p50 / fast p50` for a pair with both variants measured
    pub fn speedup(&self, pair: &str) -> Option<f64> {
        let slow = self.record(pair, Variant::Slow)?;
        let fast = self.record(pair, Variant::Fast)?;
        Some(slow.summary.wall_ms_p50() / fast.summary.wall_ms_p50())
    }

    /// Distinct pair ids in first-seen order
    pub fn pairs(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.results {
            if !seen.contains(&record.pair.as_str()) {
                seen.push(&record.pair);
            }
        }
        seen
    }
}

/// Measurement environment
#[derive(Debug, Clone, Serialize)]
pub struct EnvInfo {
    /// Version of this harness
    pub harness_version: String,
    /// `debug` or `release`
    pub build_profile: String,
    /// Version of the compiler that built the harness, "unknown" when not recorded
    pub rustc_version: String,
    /// Compilation target
    pub rustc_target: TargetInfo,
    /// CPU architecture
    pub arch: String,
    /// Operating system
    pub platform: String,
    /// CPU model name, "Unknown" when unavailable
    pub cpu: String,
    /// Available parallelism
    pub cpu_cores: u32,
    /// Allocator counters at report time
    pub heap_statistics: HeapStatistics,
}

/// Target triple components
#[derive(Debug, Clone, Serialize)]
pub struct TargetInfo {
    /// `target_arch`
    pub arch: String,
    /// `target_os`
    pub os: String,
    /// `target_family`
    pub family: String,
}

/// Configuration a run was executed with
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    /// Subcommand name
    pub command: String,
    /// Pair selection (`all` or an id)
    pub pair: String,
    /// Variant selection
    pub variant: VariantSelector,
    /// Warmup calls per variant
    pub warmup: u64,
    /// Calls per trial
    pub iters: u64,
    /// Trials per variant
    pub repeats: u64,
    /// Input seed
    pub seed: u64,
    /// Output format
    pub format: OutputFormat,
    /// Whether the report is also written to the artifacts directory
    pub write_artifacts: bool,
    /// Whether a compaction hook ran before each trial
    pub compact: bool,
}

/// Summary of one measured variant
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    /// Pair id
    pub pair: String,
    /// Variant measured
    pub variant: Variant,
    /// Output of one untimed call, for eyeballing
    pub out: serde_json::Value,
    /// Samples and statistics
    #[serde(flatten)]
    pub summary: BenchSummary,
}

/// Kind of correctness violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Slow and fast disagree on the same input
    Mismatch,
    /// A variant produced a value that is not a well-formed result
    MalformedOutput,
}

/// A correctness violation, reported instead of silently measured
#[derive(Debug, Clone, Serialize)]
pub struct CorrectnessFailure {
    /// Pair id
    pub pair: String,
    /// Seed the input was generated from
    pub seed: u64,
    /// What went wrong
    pub kind: FailureKind,
    /// Offending variant, when a single one is at fault
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    /// Human-readable description including the offending values
    pub message: String,
}

impl CorrectnessFailure {
    /// Slow and fast outputs differ
    pub fn mismatch(
        pair: &str,
        seed: u64,
        slow: &serde_json::Value,
        fast: &serde_json::Value,
    ) -> Self {
        Self {
            pair: pair.to_string(),
            seed,
            kind: FailureKind::Mismatch,
            variant: None,
            message: format!("Mismatch in {pair} (seed={seed}): slow={slow} fast={fast}"),
        }
    }

    /// One variant's output failed its well-formedness check
    pub fn malformed(
        pair: &str,
        seed: u64,
        variant: Variant,
        problem: &str,
        value: &serde_json::Value,
    ) -> Self {
        Self {
            pair: pair.to_string(),
            seed,
            kind: FailureKind::MalformedOutput,
            variant: Some(variant),
            message: format!(
                "Malformed output from {pair}/{variant} (seed={seed}): {problem} (out={value})"
            ),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use pairbench_core::{BenchSample, heap_statistics};

    pub fn record(pair: &str, variant: Variant, walls: &[f64]) -> ResultRecord {
        let samples = walls
            .iter()
            .map(|&w| BenchSample::new(w, w / 2.0, 64))
            .collect();
        ResultRecord {
            pair: pair.to_string(),
            variant,
            out: serde_json::json!(124750),
            summary: BenchSummary::from_samples(samples),
        }
    }

    pub fn report(results: Vec<ResultRecord>, failures: Vec<CorrectnessFailure>) -> Report {
        Report {
            ts: Utc::now(),
            env: EnvInfo {
                harness_version: "0.1.0".into(),
                build_profile: "debug".into(),
                rustc_version: "1.85.0".into(),
                rustc_target: TargetInfo {
                    arch: "x86_64".into(),
                    os: "linux".into(),
                    family: "unix".into(),
                },
                arch: "x86_64".into(),
                platform: "linux".into(),
                cpu: "Unknown".into(),
                cpu_cores: 1,
                heap_statistics: heap_statistics(),
            },
            args: RunConfig {
                command: "bench".into(),
                pair: "all".into(),
                variant: VariantSelector::Both,
                warmup: 1,
                iters: 1,
                repeats: 3,
                seed: 1,
                format: OutputFormat::Table,
                write_artifacts: false,
                compact: false,
            },
            results,
            failures,
        }
    }
}
