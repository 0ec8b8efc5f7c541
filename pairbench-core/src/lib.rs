#![warn(missing_docs)]
//! Pairbench Core - Pair Contract and Measurement Runtime
//!
//! This crate provides everything needed to measure one pair:
//! - [`Pair`] contract and the [`PairRegistry`] that holds pairs by id
//! - [`Runner`] for the warmup / repeated-trial protocol
//! - Wall-clock and CPU timing
//! - Global allocator interceptor for live-heap tracking

mod allocator;
mod bencher;
mod error;
mod measure;
mod pair;
mod registry;

pub use allocator::{HeapStatistics, TrackingAllocator, heap_statistics, heap_used};
pub use bencher::{
    BenchOptions, BenchSample, BenchSummary, CompactionHook, DEFAULT_MEASURE_ITERATIONS,
    DEFAULT_REPEATS, DEFAULT_SEED, DEFAULT_WARMUP_ITERATIONS, Runner,
};
pub use error::HarnessError;
/// Whether this platform reports process CPU time. When `false`, CPU
/// columns read as 0 and only wall-clock time is meaningful.
pub use measure::HAS_CPU_CLOCK;
pub use measure::{Elapsed, Timer, cpu_time};
pub use pair::{Pair, PairOutput, PairSelector, Variant, VariantSelector};
pub use registry::{Observation, PairRegistry, PreparedPair, RegisteredPair};
