//! Directed edges: eligibility predicate plus executable effect.
//!
//! Transition kinds are values, not subtypes.  A transition is described by a
//! [`TransitionSpec`] holding its eligibility and effect as closures, and the
//! builder turns that into a [`Transition`] with resolved endpoints.  Every
//! transition in a graph therefore has the same concrete type.

use std::fmt;

use ms_core::{SchedulerPort, StateId, TransitionId};

use crate::{AgentView, EffectError, GraphError, GraphResult};

/// Pure eligibility check.  Must not have observable side effects.
pub type Predicate<C> = Box<dyn Fn(&AgentView<'_, C>) -> bool + Send + Sync>;

/// Side effect run when the transition fires, e.g. scheduling follow-up
/// events.  Runs before the agent's state is updated; an error leaves the
/// agent where it was.
pub type Effect<C> = Box<
    dyn Fn(&AgentView<'_, C>, &mut dyn SchedulerPort<C>) -> Result<(), EffectError> + Send + Sync,
>;

/// Whether a transition is always available or depends on runtime conditions.
pub enum Eligibility<C> {
    /// Non-contingent: a fixed, unconditional progression.
    Always,
    /// Contingent: evaluated fresh on every advance.
    When(Predicate<C>),
}

impl<C> fmt::Debug for Eligibility<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eligibility::Always => f.write_str("Always"),
            Eligibility::When(_) => f.write_str("When(..)"),
        }
    }
}

// ── TransitionSpec ────────────────────────────────────────────────────────────

/// Everything about a transition except its endpoints.
///
/// ```rust,ignore
/// builder.add_transition(
///     traveling,
///     choosing_mode,
///     TransitionSpec::when(|v: &AgentView<'_, Trip>| v.ctx.arrived(v.agent))
///         .named("arrive"),
/// )?;
/// ```
pub struct TransitionSpec<C> {
    pub(crate) label:       Option<String>,
    pub(crate) eligibility: Eligibility<C>,
    pub(crate) effect:      Option<Effect<C>>,
    pub(crate) weight:      f64,
}

impl<C> TransitionSpec<C> {
    /// A non-contingent transition.
    pub fn always() -> Self {
        Self {
            label:       None,
            eligibility: Eligibility::Always,
            effect:      None,
            weight:      1.0,
        }
    }

    /// A contingent transition, available whenever `predicate` returns `true`.
    pub fn when<P>(predicate: P) -> Self
    where
        P: Fn(&AgentView<'_, C>) -> bool + Send + Sync + 'static,
    {
        Self {
            eligibility: Eligibility::When(Box::new(predicate)),
            ..Self::always()
        }
    }

    /// Display label.  Defaults to `"<from>-><to>"`.
    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach the effect run when this transition fires.
    pub fn with_effect<E>(mut self, effect: E) -> Self
    where
        E: Fn(&AgentView<'_, C>, &mut dyn SchedulerPort<C>) -> Result<(), EffectError>
            + Send
            + Sync
            + 'static,
    {
        self.effect = Some(Box::new(effect));
        self
    }

    /// Relative weight consulted by weighted choice models.  Default `1.0`.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

// ── Transition ────────────────────────────────────────────────────────────────

/// A directed edge of a [`TransitionGraph`][crate::TransitionGraph].
///
/// Shared read-only by every agent of the graph's type.  `from == to` is a
/// legal in-place action.
pub struct Transition<C> {
    pub(crate) id:          TransitionId,
    pub(crate) from:        StateId,
    pub(crate) to:          StateId,
    pub(crate) label:       String,
    pub(crate) eligibility: Eligibility<C>,
    pub(crate) effect:      Option<Effect<C>>,
    pub(crate) weight:      f64,
}

impl<C> Transition<C> {
    #[inline]
    pub fn id(&self) -> TransitionId {
        self.id
    }

    #[inline]
    pub fn from(&self) -> StateId {
        self.from
    }

    #[inline]
    pub fn to(&self) -> StateId {
        self.to
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// `true` if eligibility depends on runtime conditions.
    #[inline]
    pub fn is_contingent(&self) -> bool {
        matches!(self.eligibility, Eligibility::When(_))
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Evaluate eligibility for `agent` right now.
    ///
    /// Non-contingent transitions are always available.
    pub fn is_available_to(&self, agent: &AgentView<'_, C>) -> bool {
        match &self.eligibility {
            Eligibility::Always => true,
            Eligibility::When(predicate) => predicate(agent),
        }
    }

    /// Fire the transition: run the effect, then move `current` to `to`.
    ///
    /// This is the only place an agent's current state is written.  If the
    /// effect fails, `current` is left untouched and the error is returned;
    /// nothing is retried.
    pub fn perform(
        &self,
        current:   &mut StateId,
        agent:     &AgentView<'_, C>,
        scheduler: &mut dyn SchedulerPort<C>,
    ) -> GraphResult<()> {
        if *current != self.from {
            return Err(GraphError::NotApplicable { transition: self.id, state: *current });
        }
        if let Some(effect) = &self.effect {
            effect(agent, scheduler)
                .map_err(|source| GraphError::Effect { transition: self.id, source })?;
        }
        *current = self.to;
        Ok(())
    }
}

impl<C> fmt::Debug for Transition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("label", &self.label)
            .field("eligibility", &self.eligibility)
            .field("has_effect", &self.effect.is_some())
            .field("weight", &self.weight)
            .finish()
    }
}
