//! Pair Contract
//!
//! A pair is two implementations ("slow" and "fast") of one semantic
//! function plus a deterministic input generator. The harness never looks
//! inside the input; it only requires that both variants produce equal
//! outputs for every generated input.

use crate::error::HarnessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output of a pair's variants.
///
/// `PartialEq` is the deep-equality capability used for the equivalence
/// check; `Serialize` puts the output into the report. `check` lets an
/// output type reject values that are technically representable but not
/// meaningful results (e.g. a NaN sum).
pub trait PairOutput: PartialEq + fmt::Debug + Serialize + 'static {
    /// Validate that this value is a well-formed result.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

macro_rules! plain_outputs {
    ($($t:ty),* $(,)?) => {
        $(impl PairOutput for $t {})*
    };
}

plain_outputs!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, String);

impl PairOutput for f64 {
    fn check(&self) -> Result<(), String> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(format!("expected a finite number, got {self}"))
        }
    }
}

impl PairOutput for f32 {
    fn check(&self) -> Result<(), String> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(format!("expected a finite number, got {self}"))
        }
    }
}

impl<T: PairOutput> PairOutput for Vec<T> {
    fn check(&self) -> Result<(), String> {
        self.iter().try_for_each(PairOutput::check)
    }
}

impl<T: PairOutput> PairOutput for Option<T> {
    fn check(&self) -> Result<(), String> {
        self.as_ref().map_or(Ok(()), PairOutput::check)
    }
}

/// A comparable slow/fast pair.
///
/// Implementations must be pure: `make_input(seed)` returns the same value
/// for the same seed, and `slow` and `fast` return equal outputs for it.
pub trait Pair: 'static {
    /// Generated input shared by both variants
    type Input: 'static;
    /// Result type of both variants
    type Output: PairOutput;

    /// Stable identifier, unique within a registry
    fn id(&self) -> &'static str;

    /// Human-readable label
    fn title(&self) -> &'static str;

    /// Deterministically build the input for `seed`
    fn make_input(&self, seed: u64) -> Self::Input;

    /// Input used by the hot loop. Defaults to [`Pair::make_input`]; pairs
    /// override it to keep each call small when driving high call counts.
    fn hot_input(&self, seed: u64) -> Self::Input {
        self.make_input(seed)
    }

    /// Reference implementation
    fn slow(&self, input: &Self::Input) -> Self::Output;

    /// Optimized implementation
    fn fast(&self, input: &Self::Input) -> Self::Output;

    /// Dispatch to one variant
    fn call(&self, variant: Variant, input: &Self::Input) -> Self::Output {
        match variant {
            Variant::Slow => self.slow(input),
            Variant::Fast => self.fast(input),
        }
    }
}

/// One side of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Reference implementation
    Slow,
    /// Optimized implementation
    Fast,
}

impl Variant {
    /// Lowercase name used in reports
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Slow => "slow",
            Variant::Fast => "fast",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which variants of a pair to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantSelector {
    /// Slow only
    Slow,
    /// Fast only
    Fast,
    /// Slow, then fast
    #[default]
    Both,
}

impl VariantSelector {
    /// Expand into concrete variants. `Both` is always `[Slow, Fast]` so
    /// reports line up run to run.
    pub fn variants(self) -> Vec<Variant> {
        match self {
            VariantSelector::Slow => vec![Variant::Slow],
            VariantSelector::Fast => vec![Variant::Fast],
            VariantSelector::Both => vec![Variant::Slow, Variant::Fast],
        }
    }

    /// The single variant selected, or an error for `Both`.
    pub fn concrete(self) -> Result<Variant, HarnessError> {
        match self {
            VariantSelector::Slow => Ok(Variant::Slow),
            VariantSelector::Fast => Ok(Variant::Fast),
            VariantSelector::Both => Err(HarnessError::ConcreteSelectionRequired {
                what: "variant",
                given: self.to_string(),
            }),
        }
    }
}

impl From<Variant> for VariantSelector {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Slow => VariantSelector::Slow,
            Variant::Fast => VariantSelector::Fast,
        }
    }
}

impl FromStr for VariantSelector {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slow" => Ok(VariantSelector::Slow),
            "fast" => Ok(VariantSelector::Fast),
            "both" => Ok(VariantSelector::Both),
            _ => Err(HarnessError::InvalidSelector {
                kind: "variant",
                value: s.to_string(),
                expected: "slow, fast or both",
            }),
        }
    }
}

impl fmt::Display for VariantSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VariantSelector::Slow => "slow",
            VariantSelector::Fast => "fast",
            VariantSelector::Both => "both",
        })
    }
}

/// Which pairs to run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PairSelector {
    /// Every registered pair, in registration order
    #[default]
    All,
    /// One pair by id
    Id(String),
}

impl PairSelector {
    /// The single pair id selected, or an error for `All`.
    pub fn concrete(&self) -> Result<&str, HarnessError> {
        match self {
            PairSelector::Id(id) => Ok(id),
            PairSelector::All => Err(HarnessError::ConcreteSelectionRequired {
                what: "pair",
                given: self.to_string(),
            }),
        }
    }
}

impl FromStr for PairSelector {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(HarnessError::InvalidSelector {
                kind: "pair",
                value: s.to_string(),
                expected: "'all' or a pair id",
            }),
            "all" => Ok(PairSelector::All),
            id => Ok(PairSelector::Id(id.to_string())),
        }
    }
}

impl fmt::Display for PairSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairSelector::All => f.write_str("all"),
            PairSelector::Id(id) => f.write_str(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_is_slow_then_fast() {
        assert_eq!(
            VariantSelector::Both.variants(),
            vec![Variant::Slow, Variant::Fast]
        );
        assert_eq!(VariantSelector::Slow.variants(), vec![Variant::Slow]);
        assert_eq!(VariantSelector::Fast.variants(), vec![Variant::Fast]);
    }

    #[test]
    fn test_variant_selector_parse() {
        assert_eq!("both".parse(), Ok(VariantSelector::Both));
        assert_eq!("FAST".parse(), Ok(VariantSelector::Fast));
        assert!(matches!(
            "medium".parse::<VariantSelector>(),
            Err(HarnessError::InvalidSelector { kind: "variant", .. })
        ));
    }

    #[test]
    fn test_concrete_selection() {
        assert_eq!(VariantSelector::Slow.concrete(), Ok(Variant::Slow));
        assert!(VariantSelector::Both.concrete().is_err());
        assert_eq!(PairSelector::Id("shape".into()).concrete(), Ok("shape"));
        assert!(matches!(
            PairSelector::All.concrete(),
            Err(HarnessError::ConcreteSelectionRequired { what: "pair", .. })
        ));
    }

    #[test]
    fn test_pair_selector_parse() {
        assert_eq!("all".parse(), Ok(PairSelector::All));
        assert_eq!("arrays".parse(), Ok(PairSelector::Id("arrays".into())));
        assert!("  ".parse::<PairSelector>().is_err());
    }

    #[test]
    fn test_float_output_check() {
        assert!(1.5f64.check().is_ok());
        assert!(f64::NAN.check().is_err());
        assert!(vec![1.0f64, f64::INFINITY].check().is_err());
        assert!(42i64.check().is_ok());
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Variant::Slow).unwrap(), "\"slow\"");
        assert_eq!(Variant::Fast.to_string(), "fast");
    }
}
