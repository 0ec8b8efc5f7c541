//! Comparison Executor
//!
//! Runs selected pairs through the bench runner and assembles the report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PairRegistry (built explicitly at startup)
//!       │
//!       ▼
//! ┌─────────────┐
//! │   driver    │  prepare input, observe, check, measure
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  metadata   │  Environment description
//! └──────┬──────┘
//!        │
//!        ▼
//!     Report  ──► pairbench_report renderers
//! ```
//!
//! ## Modules
//!
//! - [`driver`] - Per-pair comparison and correctness checking
//! - [`hot`] - Unmeasured hot loop for external tooling
//! - [`compaction`] - Platform memory-compaction hook
//! - [`metadata`] - Environment metadata collection

mod compaction;
mod driver;
mod hot;
mod metadata;

// Re-export public API
pub use compaction::system_compaction;
pub use driver::ComparisonDriver;
pub use hot::{HotOutcome, run_hot};
pub use metadata::collect_env;
