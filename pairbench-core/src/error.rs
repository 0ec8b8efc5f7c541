//! Harness Errors
//!
//! Configuration problems surface as `HarnessError` before any measurement
//! starts. Correctness violations are not errors: they are recorded in the
//! report so they can never be dropped. Panics from a measured function are
//! not caught at all.

use thiserror::Error;

/// Errors raised while configuring or selecting work for a run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum HarnessError {
    /// No registered pair has this id
    #[error("Unknown pair: {id}")]
    UnknownPair { id: String },

    /// Two pairs were registered under one id
    #[error("Duplicate pair id: {id} (pair ids must be unique)")]
    DuplicatePair { id: String },

    /// An operation needs a single pair or variant but got a wildcard
    #[error("{what} must be a concrete selection, not '{given}'")]
    ConcreteSelectionRequired { what: &'static str, given: String },

    /// A selector string could not be parsed
    #[error("Invalid {kind} selector: '{value}' (expected {expected})")]
    InvalidSelector {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}
