//! Comparison Driver
//!
//! For every selected pair the driver generates one input from the run seed
//! and reuses it for every variant:
//!
//! ```text
//! prepare(seed)
//!     │
//!     ├─► observe(slow) ─► well-formed? ─► bench(slow) ─► ResultRecord
//!     │                        └─ no ───► CorrectnessFailure (not timed)
//!     ├─► observe(fast) ─► ... same ...
//!     │
//!     └─► both well-formed? ─► equivalent(slow, fast)? ─ no ─► CorrectnessFailure
//! ```
//!
//! Pairs run strictly in registration order and variants slow before fast.
//! Correctness failures never stop the run; they are collected and returned
//! in the report alongside every measurement that was taken.

use super::metadata::collect_env;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use pairbench_core::{
    HarnessError, Observation, PairRegistry, PairSelector, Runner, Variant, VariantSelector,
};
use pairbench_report::{CorrectnessFailure, Report, ResultRecord, RunConfig};

/// Compares slow and fast variants of registered pairs
pub struct ComparisonDriver<'a> {
    registry: &'a PairRegistry,
    runner: Runner,
    show_progress: bool,
}

impl<'a> ComparisonDriver<'a> {
    /// Create a driver measuring with `runner`
    pub fn new(registry: &'a PairRegistry, runner: Runner) -> Self {
        Self {
            registry,
            runner,
            show_progress: false,
        }
    }

    /// Draw a progress bar on stderr while measuring
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the comparison for the selected pairs and variants.
    ///
    /// Selection errors are returned before anything is measured. Every
    /// other problem is recorded in the returned report.
    pub fn compare(
        &self,
        pairs: &PairSelector,
        variants: VariantSelector,
        args: &RunConfig,
    ) -> Result<Report, HarnessError> {
        let selected = self.registry.select(pairs)?;
        let variants = variants.variants();
        let seed = self.runner.options().seed;

        tracing::info!(
            pairs = selected.len(),
            variants = variants.len(),
            seed,
            "starting comparison"
        );

        let pb = self.progress_bar((selected.len() * variants.len()) as u64);
        let mut results = Vec::new();
        let mut failures = Vec::new();

        for pair in selected {
            let id = pair.id();
            let prepared = pair.prepare(seed);
            let mut observed: Vec<Observation> = Vec::with_capacity(variants.len());

            for &variant in &variants {
                pb.set_message(format!("{id}/{variant}"));
                let observation = prepared.observe(variant);

                match observation.problem() {
                    Some(problem) => {
                        tracing::warn!(pair = id, %variant, seed, problem, "malformed output, not timing");
                        failures.push(CorrectnessFailure::malformed(
                            id,
                            seed,
                            variant,
                            problem,
                            observation.value(),
                        ));
                    }
                    None => {
                        let summary = prepared.bench(variant, &self.runner);
                        tracing::info!(
                            pair = id,
                            %variant,
                            wall_ms_p50 = summary.wall_ms_p50(),
                            wall_ms_p95 = summary.wall_ms_p95(),
                            "measured"
                        );
                        results.push(ResultRecord {
                            pair: id.to_string(),
                            variant,
                            out: observation.value().clone(),
                            summary,
                        });
                    }
                }

                observed.push(observation);
                pb.inc(1);
            }

            if let Some(failure) = check_equivalence(id, seed, &observed, |a, b| {
                prepared.equivalent(a, b)
            }) {
                tracing::warn!(pair = id, seed, "{}", failure.message);
                failures.push(failure);
            }
        }

        pb.finish_and_clear();

        Ok(Report {
            ts: Utc::now(),
            env: collect_env(),
            args: args.clone(),
            results,
            failures,
        })
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

/// Mismatch failure when slow and fast were both observed well-formed and
/// disagree. A malformed side is already reported on its own.
fn check_equivalence(
    pair: &str,
    seed: u64,
    observed: &[Observation],
    equivalent: impl Fn(&Observation, &Observation) -> bool,
) -> Option<CorrectnessFailure> {
    let slow = observed.iter().find(|o| o.variant() == Variant::Slow)?;
    let fast = observed.iter().find(|o| o.variant() == Variant::Fast)?;
    if !slow.is_well_formed() || !fast.is_well_formed() || equivalent(slow, fast) {
        return None;
    }
    Some(CorrectnessFailure::mismatch(
        pair,
        seed,
        slow.value(),
        fast.value(),
    ))
}
