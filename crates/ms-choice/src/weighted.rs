//! Weight-proportional random choice.

use ms_core::RandomSource;
use ms_graph::{AgentView, Transition};

use crate::{ChoiceError, ChoiceModel, ChoiceResult};

/// Picks a transition with probability proportional to its
/// [`weight`][Transition::weight].
///
/// Zero-weight transitions are never picked.  One `next_f64` draw per
/// non-empty call.
///
/// # Errors
///
/// [`ChoiceError::InvalidArgument`] if any weight is negative or not
/// finite, or if every weight is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRandom;

impl<C> ChoiceModel<C> for WeightedRandom {
    fn select_transition<'g>(
        &self,
        _agent:   &AgentView<'_, C>,
        eligible: &[&'g Transition<C>],
        rng:      &mut dyn RandomSource,
    ) -> ChoiceResult<Option<&'g Transition<C>>> {
        if eligible.is_empty() {
            return Ok(None);
        }

        let mut total = 0.0;
        for t in eligible {
            let w = t.weight();
            if !w.is_finite() || w < 0.0 {
                return Err(ChoiceError::InvalidArgument(format!(
                    "transition {:?} has invalid weight {w}",
                    t.label()
                )));
            }
            total += w;
        }
        if !total.is_finite() {
            return Err(ChoiceError::InvalidArgument(format!(
                "eligible weights sum to {total}"
            )));
        }
        if total <= 0.0 {
            return Err(ChoiceError::InvalidArgument("all eligible weights are zero".into()));
        }

        let target = rng.next_f64() * total;
        let mut acc = 0.0;
        let mut last_positive = None;
        for &t in eligible {
            if t.weight() == 0.0 {
                continue;
            }
            acc += t.weight();
            last_positive = Some(t);
            if target < acc {
                return Ok(Some(t));
            }
        }
        // Rounding can leave `target` a hair above the final sum.
        Ok(last_positive)
    }

    fn name(&self) -> &'static str {
        "weighted-random"
    }
}
