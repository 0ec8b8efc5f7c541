//! Sparse mixed-type slots vs a dense integer vector.
//!
//! Even positions hold their index. On the slow side odd positions are
//! holes, and a seeded handful of them hold non-integer junk instead, so
//! every read has to inspect the slot's kind. The fast side stores zero at
//! odd positions and sums straight through.

use pairbench_core::Pair;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

/// One slow-side element
#[derive(Debug, Clone)]
enum Slot {
    Hole,
    Int(i64),
    Text(String),
    Float(f64),
    Null,
}

impl Slot {
    /// Integer contribution of the slot. Anything that is not an integer
    /// counts as zero.
    fn integer(&self) -> i64 {
        match self {
            Slot::Int(v) => *v,
            Slot::Text(s) => s.parse().unwrap_or(0),
            Slot::Float(f) if f.fract() == 0.0 => *f as i64,
            Slot::Float(_) | Slot::Hole | Slot::Null => 0,
        }
    }
}

/// Input for [`ArraysPair`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraysInput {
    /// Vector length
    pub n: usize,
    /// Passes over the vector
    pub iters: usize,
    /// Odd positions that hold non-numeric junk on the slow side
    pub junk: Vec<usize>,
}

impl ArraysInput {
    const JUNK_SLOTS: usize = 8;

    fn generate(n: usize, iters: usize, seed: u64) -> Self {
        let odd = n / 2;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut junk: Vec<usize> = sample(&mut rng, odd, Self::JUNK_SLOTS.min(odd))
            .into_iter()
            .map(|k| 2 * k + 1)
            .collect();
        junk.sort_unstable();
        Self { n, iters, junk }
    }
}

/// Holey mixed-kind storage vs packed integers
pub struct ArraysPair;

impl ArraysPair {
    fn junk_slot(rng: &mut StdRng) -> Slot {
        match rng.gen_range(0..3) {
            0 => Slot::Text("x".to_string()),
            1 => Slot::Float(rng.r#gen::<f64>()),
            _ => Slot::Null,
        }
    }
}

impl Pair for ArraysPair {
    type Input = ArraysInput;
    type Output = i64;

    fn id(&self) -> &'static str {
        "arrays"
    }

    fn title(&self) -> &'static str {
        "Arrays: holey mixed-kind slots vs packed integers"
    }

    fn make_input(&self, seed: u64) -> ArraysInput {
        let n = 10_000 + (seed % 5) as usize * 1_000;
        ArraysInput::generate(n, 30, seed)
    }

    fn hot_input(&self, seed: u64) -> ArraysInput {
        ArraysInput::generate(20_000, 1, seed)
    }

    fn slow(&self, input: &ArraysInput) -> i64 {
        let mut slots = vec![Slot::Hole; input.n];
        for (i, slot) in slots.iter_mut().enumerate().step_by(2) {
            *slot = Slot::Int(i as i64);
        }
        let mut rng = StdRng::seed_from_u64(input.n as u64);
        for &j in &input.junk {
            if let Some(slot) = slots.get_mut(j) {
                *slot = Self::junk_slot(&mut rng);
            }
        }

        let mut acc = 0i64;
        for _ in 0..input.iters {
            for slot in &slots {
                acc += slot.integer();
            }
        }
        acc
    }

    fn fast(&self, input: &ArraysInput) -> i64 {
        let dense: Vec<i64> = (0..input.n)
            .map(|i| if i & 1 == 0 { i as i64 } else { 0 })
            .collect();

        let mut acc = 0i64;
        for _ in 0..input.iters {
            acc += dense.iter().sum::<i64>();
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_junk_only_on_odd_slots() {
        let input = ArraysPair.make_input(2);
        assert_eq!(input.junk.len(), ArraysInput::JUNK_SLOTS);
        assert!(input.junk.iter().all(|&j| j % 2 == 1 && j < input.n));
        assert_eq!(input, ArraysPair.make_input(2));
    }

    #[test]
    fn test_known_sum() {
        // Even indices below 10: 0 + 2 + 4 + 6 + 8
        let input = ArraysInput::generate(10, 2, 1);
        assert_eq!(ArraysPair.slow(&input), 40);
        assert_eq!(ArraysPair.fast(&input), 40);
    }

    #[test]
    fn test_slot_kinds() {
        assert_eq!(Slot::Int(12).integer(), 12);
        assert_eq!(Slot::Text("x".into()).integer(), 0);
        assert_eq!(Slot::Text("7".into()).integer(), 7);
        assert_eq!(Slot::Float(0.25).integer(), 0);
        assert_eq!(Slot::Float(3.0).integer(), 3);
        assert_eq!(Slot::Hole.integer(), 0);
        assert_eq!(Slot::Null.integer(), 0);
    }

    #[test]
    fn test_junk_never_contributes() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..64 {
            assert_eq!(ArraysPair::junk_slot(&mut rng).integer(), 0);
        }
    }

    #[test]
    fn test_tiny_inputs() {
        for n in 0..4 {
            let input = ArraysInput::generate(n, 1, 9);
            assert_eq!(ArraysPair.slow(&input), ArraysPair.fast(&input));
        }
    }
}
