#![warn(missing_docs)]
//! # pairbench
//!
//! Micro-benchmark harness for slow/fast implementation pairs.
//!
//! Each pair supplies two implementations of one function plus a
//! deterministic input generator. pairbench checks the two agree before it
//! trusts any timing, then measures both under the same protocol:
//! - **Equivalence first**: slow and fast are called on the same generated
//!   input and compared with `PartialEq`; disagreements are reported, never
//!   averaged away
//! - **Warmup / repeated trials**: unmeasured warmup, then `repeats` trials of
//!   `iters` calls each, one sample per trial
//! - **Wall, CPU and heap**: every sample carries wall time, process CPU time
//!   and the live-heap delta from `TrackingAllocator`
//! - **Percentile summaries**: p50/p95/mean with linear interpolation
//!
//! ## Quick Start
//!
//! ```ignore
//! use pairbench::prelude::*;
//!
//! struct Sum;
//!
//! impl Pair for Sum {
//!     type Input = u64;
//!     type Output = u64;
//!     fn id(&self) -> &'static str { "sum" }
//!     fn title(&self) -> &'static str { "Sum: loop vs closed form" }
//!     fn make_input(&self, seed: u64) -> u64 { 500 + seed }
//!     fn slow(&self, n: &u64) -> u64 { (0..*n).sum() }
//!     fn fast(&self, n: &u64) -> u64 { n * (n - 1) / 2 }
//! }
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator;
//!
//! fn main() -> std::process::ExitCode {
//!     let registry = PairRegistry::new().with(Sum).expect("unique ids");
//!     pairbench::run(&registry).unwrap_or(std::process::ExitCode::FAILURE)
//! }
//! ```

// Re-export core types
pub use pairbench_core::{
    BenchOptions, BenchSample, BenchSummary, HarnessError, HeapStatistics, Observation, Pair,
    PairOutput, PairRegistry, PairSelector, PreparedPair, RegisteredPair, Runner,
    TrackingAllocator, Variant, VariantSelector, heap_statistics, heap_used,
};

// Re-export the driver layer
pub use pairbench_cli::{ComparisonDriver, HotOutcome, PairbenchConfig, run_hot};

// Re-export report types
pub use pairbench_report::{
    CorrectnessFailure, EnvInfo, FailureKind, OutputFormat, Report, ResultRecord, RunConfig,
    generate_json_report, generate_table_report,
};

// Re-export stats
pub use pairbench_stats::{mean, quantile};

/// Demonstration pairs
pub mod pairs {
    pub use pairbench_pairs::*;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchOptions, Pair, PairOutput, PairRegistry, PairSelector, Runner, TrackingAllocator,
        Variant, VariantSelector,
    };
}

/// Run the pairbench CLI harness over a registry.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> std::process::ExitCode {
///     let registry = pairbench::pairs::registry().unwrap();
///     pairbench::run(&registry).unwrap()
/// }
/// ```
pub use pairbench_cli::run;
