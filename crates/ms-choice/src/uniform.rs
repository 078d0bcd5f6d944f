//! The reference policy: pick uniformly at random.

use ms_core::RandomSource;
use ms_graph::{AgentView, Transition};

use crate::{ChoiceModel, ChoiceResult};

/// Draws an index uniformly from `[0, eligible.len())`.
///
/// Exactly one `next_int` draw per non-empty call and none for an empty
/// one, so the draw sequence (and therefore the run) is a pure function of
/// the seed and the tick schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandom;

impl<C> ChoiceModel<C> for UniformRandom {
    fn select_transition<'g>(
        &self,
        _agent:   &AgentView<'_, C>,
        eligible: &[&'g Transition<C>],
        rng:      &mut dyn RandomSource,
    ) -> ChoiceResult<Option<&'g Transition<C>>> {
        if eligible.is_empty() {
            return Ok(None);
        }
        let i = rng.next_int(eligible.len())?;
        Ok(Some(eligible[i]))
    }

    fn name(&self) -> &'static str {
        "uniform-random"
    }
}
