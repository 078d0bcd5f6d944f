//! Utility-maximising choice.

use ms_core::RandomSource;
use ms_graph::{AgentView, Transition};

use crate::{ChoiceError, ChoiceModel, ChoiceResult};

type UtilityFn<C> = Box<dyn Fn(&AgentView<'_, C>, &Transition<C>) -> f64 + Send + Sync>;

/// Scores each eligible transition with a user-supplied utility function and
/// returns the best one.
///
/// Ties go to the earliest-registered transition, so the policy is fully
/// deterministic and consumes no entropy.  The utility function itself is
/// domain code (e.g. a mode-choice model) and out of scope here.
pub struct UtilityMaximizing<C> {
    utility: UtilityFn<C>,
}

impl<C> UtilityMaximizing<C> {
    pub fn new<F>(utility: F) -> Self
    where
        F: Fn(&AgentView<'_, C>, &Transition<C>) -> f64 + Send + Sync + 'static,
    {
        Self { utility: Box::new(utility) }
    }
}

impl<C> ChoiceModel<C> for UtilityMaximizing<C> {
    fn select_transition<'g>(
        &self,
        agent:    &AgentView<'_, C>,
        eligible: &[&'g Transition<C>],
        _rng:     &mut dyn RandomSource,
    ) -> ChoiceResult<Option<&'g Transition<C>>> {
        let mut best: Option<(&'g Transition<C>, f64)> = None;
        for &t in eligible {
            let u = (self.utility)(agent, t);
            if u.is_nan() {
                return Err(ChoiceError::InvalidArgument(format!(
                    "utility of transition {:?} is NaN",
                    t.label()
                )));
            }
            match best {
                Some((_, best_u)) if u <= best_u => {}
                _ => best = Some((t, u)),
            }
        }
        Ok(best.map(|(t, _)| t))
    }

    fn name(&self) -> &'static str {
        "utility-maximizing"
    }
}
