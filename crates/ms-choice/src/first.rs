//! Deterministic first-match policy.

use ms_core::RandomSource;
use ms_graph::{AgentView, Transition};

use crate::{ChoiceModel, ChoiceResult};

/// Always takes the earliest-registered eligible transition.
///
/// Consumes no entropy.  Useful for fixed progressions and as a priority
/// list: register the preferred transition first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEligible;

impl<C> ChoiceModel<C> for FirstEligible {
    #[inline]
    fn select_transition<'g>(
        &self,
        _agent:   &AgentView<'_, C>,
        eligible: &[&'g Transition<C>],
        _rng:     &mut dyn RandomSource,
    ) -> ChoiceResult<Option<&'g Transition<C>>> {
        Ok(eligible.first().copied())
    }

    fn name(&self) -> &'static str {
        "first-eligible"
    }
}
