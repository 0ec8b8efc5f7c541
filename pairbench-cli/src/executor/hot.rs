//! Hot Loop
//!
//! Calls one variant of one pair a fixed number of times with nothing
//! measured, so external profilers and debuggers can attach to a process
//! that spends nearly all of its time in the payload.

use chrono::{DateTime, Utc};
use pairbench_core::{HarnessError, PairRegistry, PairSelector, Variant, VariantSelector};
use serde::Serialize;

/// Result line printed by the `hot` command
#[derive(Debug, Clone, Serialize)]
pub struct HotOutcome {
    /// When the loop finished
    pub ts: DateTime<Utc>,
    /// Pair id
    pub pair: String,
    /// Variant driven
    pub variant: Variant,
    /// Number of calls made
    pub loops: u64,
    /// Output of the final call, `null` when no call was made
    pub out: serde_json::Value,
    /// Why the final output is not well-formed, if it is not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

/// Drive `variant` of `pair` `loops` times on its hot input.
///
/// Both selections must be concrete: `all` or `both` is rejected before any
/// input is generated.
pub fn run_hot(
    registry: &PairRegistry,
    pair: &PairSelector,
    variant: VariantSelector,
    loops: u64,
    seed: u64,
) -> Result<HotOutcome, HarnessError> {
    let id = pair.concrete()?;
    let variant = variant.concrete()?;
    let registered = registry.lookup(id)?;

    tracing::debug!(pair = id, %variant, loops, seed, "starting hot loop");
    let prepared = registered.prepare_hot(seed);
    let last = prepared.hot(variant, loops);

    let (out, problem) = match last {
        Some(observation) => (
            observation.value().clone(),
            observation.problem().map(str::to_string),
        ),
        None => (serde_json::Value::Null, None),
    };

    Ok(HotOutcome {
        ts: Utc::now(),
        pair: registered.id().to_string(),
        variant,
        loops,
        out,
        problem,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PairRegistry {
        pairbench_pairs::registry().unwrap()
    }

    #[test]
    fn test_hot_returns_last_output() {
        let outcome = run_hot(
            &registry(),
            &PairSelector::Id("closures".into()),
            VariantSelector::Fast,
            3,
            1,
        )
        .unwrap();
        // Hot input is 800 closures, one pass: sum of 1..=800
        assert_eq!(outcome.out, serde_json::json!(320_400));
        assert_eq!(outcome.loops, 3);
        assert_eq!(outcome.variant, Variant::Fast);
        assert!(outcome.problem.is_none());
    }

    #[test]
    fn test_hot_requires_concrete_selection() {
        let reg = registry();
        assert!(matches!(
            run_hot(&reg, &PairSelector::All, VariantSelector::Slow, 1, 1),
            Err(HarnessError::ConcreteSelectionRequired { what: "pair", .. })
        ));
        assert!(matches!(
            run_hot(&reg, &PairSelector::Id("shape".into()), VariantSelector::Both, 1, 1),
            Err(HarnessError::ConcreteSelectionRequired { what: "variant", .. })
        ));
        assert!(matches!(
            run_hot(&reg, &PairSelector::Id("nope".into()), VariantSelector::Slow, 1, 1),
            Err(HarnessError::UnknownPair { .. })
        ));
    }

    #[test]
    fn test_zero_loops() {
        let outcome = run_hot(
            &registry(),
            &PairSelector::Id("shape".into()),
            VariantSelector::Slow,
            0,
            1,
        )
        .unwrap();
        assert!(outcome.out.is_null());
    }

    #[test]
    fn test_outcome_line_shape() {
        let outcome = run_hot(
            &registry(),
            &PairSelector::Id("arrays".into()),
            VariantSelector::Slow,
            1,
            1,
        )
        .unwrap();
        let line = serde_json::to_string(&outcome).unwrap();
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["pair"], "arrays");
        assert_eq!(value["variant"], "slow");
        assert!(value["ts"].is_string());
        assert!(value.get("problem").is_none());
    }
}
