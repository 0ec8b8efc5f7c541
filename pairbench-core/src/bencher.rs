//! Bench Runner - Warmup / Repeated-Trial Protocol
//!
//! Produces a [`BenchSummary`] for one function-input pair:
//! - Warmup phase runs the function unmeasured so the code under test (and
//!   the allocator, caches and branch predictors behind it) reach a steady
//!   state
//! - Each trial runs the function `measure_iterations` times back to back and
//!   becomes one [`BenchSample`] (wall ms, CPU ms, heap delta)
//! - Samples are reduced through `pairbench_stats`
//!
//! The runner never catches panics. A payload that panics during warmup or
//! measurement aborts the run with its panic.

use crate::allocator::heap_used;
use crate::measure::Timer;
use pairbench_stats::{P50, P95, max, mean, min, quantile};
use serde::{Deserialize, Serialize};
use std::hint::black_box;

/// Default number of unmeasured warmup calls
pub const DEFAULT_WARMUP_ITERATIONS: u64 = 1_500;

/// Default number of calls per measured trial
pub const DEFAULT_MEASURE_ITERATIONS: u64 = 2_500;

/// Default number of trials
pub const DEFAULT_REPEATS: u64 = 5;

/// Default input seed
pub const DEFAULT_SEED: u64 = 1;

/// Configuration for one measurement run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchOptions {
    /// Unmeasured calls before the first trial
    pub warmup_iterations: u64,
    /// Calls per trial; the trial's timing covers all of them
    pub measure_iterations: u64,
    /// Number of trials (one sample each)
    pub repeats: u64,
    /// Seed passed to the pair's input generator
    pub seed: u64,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            measure_iterations: DEFAULT_MEASURE_ITERATIONS,
            repeats: DEFAULT_REPEATS,
            seed: DEFAULT_SEED,
        }
    }
}

/// One trial's raw measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchSample {
    /// Elapsed wall-clock milliseconds
    pub wall_ms: f64,
    /// Elapsed CPU milliseconds (user + system)
    pub cpu_ms: f64,
    /// Live heap bytes after the trial minus before; negative when the trial
    /// released more than it allocated
    pub heap_used_delta_bytes: i64,
    /// Fraction of the wall window spent on CPU (`cpu_ms / wall_ms`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elu_utilization: Option<f64>,
}

impl BenchSample {
    /// Build a sample, deriving the utilization ratio from the timings.
    pub fn new(wall_ms: f64, cpu_ms: f64, heap_used_delta_bytes: i64) -> Self {
        let elu_utilization = (wall_ms > 0.0).then(|| cpu_ms / wall_ms);
        Self {
            wall_ms,
            cpu_ms,
            heap_used_delta_bytes,
            elu_utilization,
        }
    }
}

/// Sample sequence plus the aggregates derived from it.
///
/// Aggregates are computed once in [`BenchSummary::from_samples`] and are
/// only readable, so they always agree with `samples`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchSummary {
    samples: Vec<BenchSample>,
    wall_ms_p50: f64,
    wall_ms_p95: f64,
    wall_ms_mean: f64,
    cpu_ms_mean: f64,
    heap_used_delta_bytes_mean: f64,
}

impl BenchSummary {
    /// Reduce a sample sequence. An empty sequence yields `NaN` aggregates.
    pub fn from_samples(samples: Vec<BenchSample>) -> Self {
        let wall = Self::series(&samples, |s| s.wall_ms);
        let cpu = Self::series(&samples, |s| s.cpu_ms);
        let heap = Self::series(&samples, |s| s.heap_used_delta_bytes as f64);

        Self {
            wall_ms_p50: quantile(&wall, P50),
            wall_ms_p95: quantile(&wall, P95),
            wall_ms_mean: mean(&wall),
            cpu_ms_mean: mean(&cpu),
            heap_used_delta_bytes_mean: mean(&heap),
            samples,
        }
    }

    fn series(samples: &[BenchSample], field: impl Fn(&BenchSample) -> f64) -> Vec<f64> {
        samples.iter().map(field).collect()
    }

    /// Raw samples in trial order
    pub fn samples(&self) -> &[BenchSample] {
        &self.samples
    }

    /// Median wall time per trial
    pub fn wall_ms_p50(&self) -> f64 {
        self.wall_ms_p50
    }

    /// 95th-percentile wall time per trial
    pub fn wall_ms_p95(&self) -> f64 {
        self.wall_ms_p95
    }

    /// Mean wall time per trial
    pub fn wall_ms_mean(&self) -> f64 {
        self.wall_ms_mean
    }

    /// Mean CPU time per trial
    pub fn cpu_ms_mean(&self) -> f64 {
        self.cpu_ms_mean
    }

    /// Mean heap delta per trial
    pub fn heap_used_delta_bytes_mean(&self) -> f64 {
        self.heap_used_delta_bytes_mean
    }

    /// Fastest trial
    pub fn wall_ms_min(&self) -> f64 {
        min(&Self::series(&self.samples, |s| s.wall_ms))
    }

    /// Slowest trial
    pub fn wall_ms_max(&self) -> f64 {
        max(&Self::series(&self.samples, |s| s.wall_ms))
    }
}

/// Best-effort memory compaction requested before each trial
pub type CompactionHook = Box<dyn Fn()>;

/// Executes a function under the warmup / repeated-trial protocol.
pub struct Runner {
    options: BenchOptions,
    compaction: Option<CompactionHook>,
}

impl Runner {
    /// Upper bound on the sample buffer reserved before the first trial
    const MAX_PREALLOCATED_SAMPLES: u64 = 1 << 16;

    /// Create a runner without a compaction hook
    pub fn new(options: BenchOptions) -> Self {
        if options.repeats == 0 {
            tracing::warn!("repeats = 0: summaries will contain no samples and NaN statistics");
        }
        if options.measure_iterations == 0 {
            tracing::warn!("measure_iterations = 0: trials will time an empty loop");
        }
        Self {
            options,
            compaction: None,
        }
    }

    /// Install a hook run before every trial's heap snapshot
    pub fn with_compaction(mut self, hook: impl Fn() + 'static) -> Self {
        self.compaction = Some(Box::new(hook));
        self
    }

    fn sample_capacity(repeats: u64) -> usize {
        repeats.min(Self::MAX_PREALLOCATED_SAMPLES) as usize
    }

    /// Options this runner was built with
    pub fn options(&self) -> &BenchOptions {
        &self.options
    }

    /// Run warmup then `repeats` measured trials of `f(input)`.
    pub fn run<I, O, F>(&self, mut f: F, input: &I) -> BenchSummary
    where
        F: FnMut(&I) -> O,
    {
        let opts = &self.options;

        // Warmup phase - results discarded, nothing measured
        for _ in 0..opts.warmup_iterations {
            black_box(f(black_box(input)));
        }

        let mut samples = Vec::with_capacity(Self::sample_capacity(opts.repeats));
        for trial in 0..opts.repeats {
            if let Some(compact) = &self.compaction {
                compact();
            }

            let heap_before = heap_used();
            let timer = Timer::start();

            let mut last = None;
            for _ in 0..opts.measure_iterations {
                last = Some(black_box(f(black_box(input))));
            }

            let elapsed = timer.stop();
            let heap_after = heap_used();
            let heap_delta = heap_after as i64 - heap_before as i64;

            let sample = BenchSample::new(elapsed.wall_ms, elapsed.cpu_ms, heap_delta);
            tracing::debug!(
                trial,
                wall_ms = sample.wall_ms,
                cpu_ms = sample.cpu_ms,
                heap_delta,
                "trial complete"
            );
            samples.push(sample);
            drop(last);
        }

        BenchSummary::from_samples(samples)
    }
}
