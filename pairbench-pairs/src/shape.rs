//! Record layout churn vs fixed-layout reuse.
//!
//! The slow side builds a fresh keyed map for every element, inserting the
//! fields in a per-element order and removing then re-inserting one of them,
//! so no two consecutive records need share a layout. The fast side writes
//! the same four fields into a pool of fixed structs allocated once.

use pairbench_core::Pair;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Field insertion plan for one slow-side record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// a, b, c then d; b removed and re-added
    Abc,
    /// b, a, c then d; c removed and re-added
    Bac,
    /// d, c, b, a; a removed and re-added
    Dcba,
}

/// Input for [`ShapePair`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeInput {
    /// Records per pass
    pub n: usize,
    /// Passes over the records
    pub iters: usize,
    /// Slow-side insertion plan per record, `n` entries
    pub layouts: Vec<Layout>,
}

impl ShapeInput {
    fn generate(n: usize, iters: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let layouts = (0..n)
            .map(|_| match rng.gen_range(0..3) {
                0 => Layout::Abc,
                1 => Layout::Bac,
                _ => Layout::Dcba,
            })
            .collect();
        Self { n, iters, layouts }
    }
}

#[derive(Default, Clone, Copy)]
struct Quad {
    a: i64,
    b: i64,
    c: i64,
    d: i64,
}

/// Churning map layouts vs a reused struct pool
pub struct ShapePair;

impl Pair for ShapePair {
    type Input = ShapeInput;
    type Output = i64;

    fn id(&self) -> &'static str {
        "shape"
    }

    fn title(&self) -> &'static str {
        "Shape: churning record layouts vs a fixed-layout pool"
    }

    fn make_input(&self, seed: u64) -> ShapeInput {
        let n = 500 + (seed % 7) as usize * 50;
        ShapeInput::generate(n, 20, seed)
    }

    fn hot_input(&self, seed: u64) -> ShapeInput {
        ShapeInput::generate(200, 2, seed)
    }

    fn slow(&self, input: &ShapeInput) -> i64 {
        let mut acc = 0i64;
        for _ in 0..input.iters {
            for (i, layout) in input.layouts.iter().enumerate() {
                let i = i as i64;
                let mut record: HashMap<&'static str, i64> = HashMap::new();
                match layout {
                    Layout::Abc => {
                        record.insert("a", i);
                        record.insert("b", i + 1);
                        record.insert("c", i + 2);
                        record.insert("d", i + 3);
                        record.remove("b");
                        record.insert("b", i + 1);
                    }
                    Layout::Bac => {
                        record.insert("b", i + 1);
                        record.insert("a", i);
                        record.insert("c", i + 2);
                        record.insert("d", i + 3);
                        record.remove("c");
                        record.insert("c", i + 2);
                    }
                    Layout::Dcba => {
                        record.insert("d", i + 3);
                        record.insert("c", i + 2);
                        record.insert("b", i + 1);
                        record.insert("a", i);
                        record.remove("a");
                        record.insert("a", i);
                    }
                }
                acc += ["a", "b", "c", "d"]
                    .iter()
                    .map(|k| record.get(k).copied().unwrap_or(0))
                    .sum::<i64>();
            }
        }
        acc
    }

    fn fast(&self, input: &ShapeInput) -> i64 {
        let mut pool = vec![Quad::default(); input.n];
        let mut acc = 0i64;
        for _ in 0..input.iters {
            for (i, q) in pool.iter_mut().enumerate() {
                let i = i as i64;
                q.a = i;
                q.b = i + 1;
                q.c = i + 2;
                q.d = i + 3;
                acc += q.a + q.b + q.c + q.d;
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sum() {
        // 4i + 6 summed over i in 0..n, per pass
        let input = ShapeInput::generate(10, 3, 1);
        let expected = 3 * (4 * 45 + 6 * 10);
        assert_eq!(ShapePair.slow(&input), expected);
        assert_eq!(ShapePair.fast(&input), expected);
    }

    #[test]
    fn test_layouts_follow_seed() {
        let a = ShapePair.make_input(4);
        assert_eq!(a, ShapePair.make_input(4));
        assert_eq!(a.layouts.len(), a.n);
        assert_eq!(a.n, 500 + 4 * 50);
    }

    #[test]
    fn test_empty_input() {
        let input = ShapeInput::generate(0, 5, 1);
        assert_eq!(ShapePair.slow(&input), 0);
        assert_eq!(ShapePair.fast(&input), 0);
    }
}
