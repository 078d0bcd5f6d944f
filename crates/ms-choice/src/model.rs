//! The `ChoiceModel` trait — the policy extension point.

use ms_core::RandomSource;
use ms_graph::{AgentView, Transition};

use crate::ChoiceResult;

/// Pluggable resolution of nondeterminism between eligible transitions.
///
/// # Contract
///
/// - `eligible` is the pre-filtered set for this tick, in graph
///   registration order.  It may be empty.
/// - Return `Ok(None)` to leave the agent where it is; an empty `eligible`
///   must always yield `Ok(None)`.
/// - A returned transition must be one of `eligible`.
/// - The only permitted side effect is consuming entropy from `rng`.
///
/// # Thread safety
///
/// One model instance is typically shared by every agent of a type and may
/// be called from several Rayon workers at once, so implementations must
/// be `Send + Sync`.  State that varies per call belongs in `rng` or in the
/// context reachable through `agent.ctx`, not in the model.
///
/// # Example
///
/// ```rust,ignore
/// struct PreferSelfLoops;
///
/// impl<C> ChoiceModel<C> for PreferSelfLoops {
///     fn select_transition<'g>(
///         &self,
///         _agent:   &AgentView<'_, C>,
///         eligible: &[&'g Transition<C>],
///         _rng:     &mut dyn RandomSource,
///     ) -> ChoiceResult<Option<&'g Transition<C>>> {
///         Ok(eligible.iter().find(|t| t.is_self_loop()).or(eligible.first()).copied())
///     }
/// }
/// ```
pub trait ChoiceModel<C>: Send + Sync {
    fn select_transition<'g>(
        &self,
        agent:    &AgentView<'_, C>,
        eligible: &[&'g Transition<C>],
        rng:      &mut dyn RandomSource,
    ) -> ChoiceResult<Option<&'g Transition<C>>>;

    /// Short policy name for log output.
    fn name(&self) -> &'static str {
        "custom"
    }
}
