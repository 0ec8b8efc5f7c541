//! Per-element closure allocation vs one reused closure.

use pairbench_core::Pair;
use std::cell::Cell;

/// Input for [`ClosuresPair`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosuresInput {
    /// Closures per pass
    pub n: usize,
    /// Passes
    pub iters: usize,
}

/// Allocating a boxed closure per element vs reading a shared cell
pub struct ClosuresPair;

impl Pair for ClosuresPair {
    type Input = ClosuresInput;
    type Output = i64;

    fn id(&self) -> &'static str {
        "closures"
    }

    fn title(&self) -> &'static str {
        "Closures: per-element boxed closures vs one reused closure"
    }

    fn make_input(&self, seed: u64) -> ClosuresInput {
        ClosuresInput {
            n: 20_000 + (seed % 3) as usize * 5_000,
            iters: 10,
        }
    }

    fn hot_input(&self, _seed: u64) -> ClosuresInput {
        ClosuresInput { n: 800, iters: 1 }
    }

    fn slow(&self, input: &ClosuresInput) -> i64 {
        let mut acc = 0i64;
        for _ in 0..input.iters {
            let mut fns: Vec<Box<dyn Fn() -> i64>> = Vec::new();
            for i in 0..input.n {
                let captured = Box::new(i as i64);
                fns.push(Box::new(move || *captured + 1));
            }
            acc += fns.iter().map(|f| f()).sum::<i64>();
        }
        acc
    }

    fn fast(&self, input: &ClosuresInput) -> i64 {
        let current = Cell::new(0i64);
        let next = || current.get() + 1;

        let mut acc = 0i64;
        for _ in 0..input.iters {
            for i in 0..input.n {
                current.set(i as i64);
                acc += next();
            }
        }
        acc
    }
}
