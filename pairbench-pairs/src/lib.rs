#![warn(missing_docs)]
//! Pairbench Pairs - Demonstration Payloads
//!
//! Three slow/fast pairs, each contrasting a representation choice:
//! - [`ShapePair`]: per-element maps whose key layout churns, vs a reused
//!   pool of fixed-layout structs
//! - [`ArraysPair`]: sparse, mixed-type slots vs a dense integer vector
//! - [`ClosuresPair`]: a boxed closure allocated per element vs one closure
//!   reading a mutable cell
//!
//! All three return `i64` sums so equivalence is exact.

mod arrays;
mod closures;
mod shape;

pub use arrays::{ArraysInput, ArraysPair};
pub use closures::{ClosuresInput, ClosuresPair};
pub use shape::{ShapeInput, ShapePair};

use pairbench_core::{HarnessError, PairRegistry};

/// Registry holding the demonstration pairs in their canonical order.
pub fn registry() -> Result<PairRegistry, HarnessError> {
    PairRegistry::new()
        .with(ShapePair)?
        .with(ArraysPair)?
        .with(ClosuresPair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairbench_core::Variant;

    #[test]
    fn test_registry_order() {
        let reg = registry().unwrap();
        assert_eq!(reg.ids(), vec!["shape", "arrays", "closures"]);
    }

    #[test]
    fn test_all_pairs_equivalent_for_seeds() {
        let reg = registry().unwrap();
        for pair in reg.iter() {
            for seed in 1..=3 {
                let prepared = pair.prepare(seed);
                let slow = prepared.observe(Variant::Slow);
                let fast = prepared.observe(Variant::Fast);
                assert!(
                    prepared.equivalent(&slow, &fast),
                    "{} seed={seed}: slow={} fast={}",
                    pair.id(),
                    slow.value(),
                    fast.value()
                );
                assert!(slow.is_well_formed());
            }
        }
    }

    #[test]
    fn test_inputs_are_deterministic() {
        let reg = registry().unwrap();
        for pair in reg.iter() {
            for seed in 1..=3 {
                let a = pair.prepare(seed).observe(Variant::Fast);
                let b = pair.prepare(seed).observe(Variant::Fast);
                assert_eq!(a.value(), b.value(), "{} seed={seed}", pair.id());
            }
        }
    }

    #[test]
    fn test_hot_inputs_are_equivalent() {
        let reg = registry().unwrap();
        for pair in reg.iter() {
            let prepared = pair.prepare_hot(1);
            let slow = prepared.hot(Variant::Slow, 2).unwrap();
            let fast = prepared.hot(Variant::Fast, 2).unwrap();
            assert!(prepared.equivalent(&slow, &fast), "{}", pair.id());
        }
    }
}
