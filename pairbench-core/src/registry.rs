//! Pair Registry
//!
//! An explicitly constructed, ordered, immutable collection of pairs. Pairs
//! have different input and output types, so the registry stores them behind
//! [`RegisteredPair`], a type-erased view implemented for every [`Pair`].
//!
//! A registered pair is used in two steps:
//! 1. `prepare(seed)` generates the input once and returns a
//!    [`PreparedPair`] that owns it
//! 2. the prepared pair observes, benches, or hot-loops either variant on
//!    that same input, so slow and fast always see identical data

use crate::bencher::{BenchSummary, Runner};
use crate::error::HarnessError;
use crate::pair::{Pair, PairOutput, PairSelector, Variant};
use std::any::Any;
use std::hint::black_box;

/// Output captured from a single call of one variant.
pub struct Observation {
    variant: Variant,
    value: serde_json::Value,
    problem: Option<String>,
    output: Box<dyn Any>,
}

impl Observation {
    fn capture<O: PairOutput>(variant: Variant, output: O) -> Self {
        let (value, serialize_problem) = match serde_json::to_value(&output) {
            Ok(value) => (value, None),
            Err(e) => (
                serde_json::Value::Null,
                Some(format!("output is not serializable: {e}")),
            ),
        };
        let problem = output.check().err().or(serialize_problem);
        Self {
            variant,
            value,
            problem,
            output: Box::new(output),
        }
    }

    /// Variant that produced this output
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Output as reported
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Why the output is not a well-formed result, if it is not
    pub fn problem(&self) -> Option<&str> {
        self.problem.as_deref()
    }

    /// Whether the output passed its well-formedness check
    pub fn is_well_formed(&self) -> bool {
        self.problem.is_none()
    }
}

impl std::fmt::Debug for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observation")
            .field("variant", &self.variant)
            .field("value", &self.value)
            .field("problem", &self.problem)
            .finish()
    }
}

/// A pair bound to one generated input.
pub trait PreparedPair {
    /// Call `variant` once and capture its output
    fn observe(&self, variant: Variant) -> Observation;

    /// Measure `variant` with the runner's protocol
    fn bench(&self, variant: Variant, runner: &Runner) -> BenchSummary;

    /// Call `variant` `loops` times with no measurement and capture the last
    /// output. `None` when `loops` is zero.
    fn hot(&self, variant: Variant, loops: u64) -> Option<Observation>;

    /// Deep-equality of two observations taken from this prepared pair
    fn equivalent(&self, a: &Observation, b: &Observation) -> bool;
}

/// Type-erased view of a [`Pair`]
pub trait RegisteredPair {
    /// Stable identifier
    fn id(&self) -> &'static str;

    /// Human-readable label
    fn title(&self) -> &'static str;

    /// Generate the benchmark input for `seed`
    fn prepare(&self, seed: u64) -> Box<dyn PreparedPair + '_>;

    /// Generate the hot-loop input for `seed`
    fn prepare_hot(&self, seed: u64) -> Box<dyn PreparedPair + '_>;
}

struct Prepared<'a, P: Pair> {
    pair: &'a P,
    input: P::Input,
}

impl<P: Pair> PreparedPair for Prepared<'_, P> {
    fn observe(&self, variant: Variant) -> Observation {
        Observation::capture(variant, self.pair.call(variant, &self.input))
    }

    fn bench(&self, variant: Variant, runner: &Runner) -> BenchSummary {
        runner.run(|input| self.pair.call(variant, input), &self.input)
    }

    fn hot(&self, variant: Variant, loops: u64) -> Option<Observation> {
        let mut last = None;
        for _ in 0..loops {
            last = Some(black_box(self.pair.call(variant, black_box(&self.input))));
        }
        last.map(|output| Observation::capture(variant, output))
    }

    fn equivalent(&self, a: &Observation, b: &Observation) -> bool {
        match (
            a.output.downcast_ref::<P::Output>(),
            b.output.downcast_ref::<P::Output>(),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl<P: Pair> RegisteredPair for P {
    fn id(&self) -> &'static str {
        Pair::id(self)
    }

    fn title(&self) -> &'static str {
        Pair::title(self)
    }

    fn prepare(&self, seed: u64) -> Box<dyn PreparedPair + '_> {
        Box::new(Prepared {
            pair: self,
            input: self.make_input(seed),
        })
    }

    fn prepare_hot(&self, seed: u64) -> Box<dyn PreparedPair + '_> {
        Box::new(Prepared {
            pair: self,
            input: self.hot_input(seed),
        })
    }
}

/// Ordered collection of pairs with unique ids
#[derive(Default)]
pub struct PairRegistry {
    pairs: Vec<Box<dyn RegisteredPair>>,
}

impl PairRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. A duplicate id is a configuration error.
    pub fn register<P: Pair>(&mut self, pair: P) -> Result<&mut Self, HarnessError> {
        let id = Pair::id(&pair);
        if self.pairs.iter().any(|p| p.id() == id) {
            return Err(HarnessError::DuplicatePair { id: id.to_string() });
        }
        tracing::debug!(pair = id, "registered pair");
        self.pairs.push(Box::new(pair));
        Ok(self)
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<P: Pair>(mut self, pair: P) -> Result<Self, HarnessError> {
        self.register(pair)?;
        Ok(self)
    }

    /// Find a pair by id
    pub fn lookup(&self, id: &str) -> Result<&dyn RegisteredPair, HarnessError> {
        self.pairs
            .iter()
            .find(|p| p.id() == id)
            .map(|p| p.as_ref())
            .ok_or_else(|| HarnessError::UnknownPair { id: id.to_string() })
    }

    /// Resolve a selector into pairs, in registration order
    pub fn select(&self, selector: &PairSelector) -> Result<Vec<&dyn RegisteredPair>, HarnessError> {
        match selector {
            PairSelector::All => Ok(self.iter().collect()),
            PairSelector::Id(id) => Ok(vec![self.lookup(id)?]),
        }
    }

    /// All pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn RegisteredPair> {
        self.pairs.iter().map(|p| p.as_ref())
    }

    /// Registered ids in order
    pub fn ids(&self) -> Vec<&'static str> {
        self.pairs.iter().map(|p| p.id()).collect()
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair is registered
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl std::fmt::Debug for PairRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairRegistry")
            .field("pairs", &self.ids())
            .finish()
    }
}
