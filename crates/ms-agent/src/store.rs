//! Per-agent RNG streams, kept beside (not inside) the agents.
//!
//! # Why a separate struct?
//!
//! The runner needs `&mut Agent` and `&mut AgentRng` for the same agent at
//! once, for many agents in parallel.  Holding the RNGs in their own `Vec`
//! lets it zip the two slices and hand each Rayon worker a disjoint pair:
//!
//! ```ignore
//! agents.par_iter_mut()
//!     .zip(rngs.inner.par_iter_mut())
//!     .map(|(agent, rng)| agent.advance(ctx, &mut buffer, rng));
//! ```

use ms_core::{AgentId, AgentRng};

/// Per-agent deterministic RNG state, indexed by `AgentId`.
///
/// Each stream is seeded from the run seed and the agent's id, so adding
/// agents at the end of the population never disturbs existing streams.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` RNGs for agents `0..count`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        Self::for_ids(0, count, global_seed)
    }

    /// Allocate and seed RNGs for agents `first..first + count`.
    pub(crate) fn for_ids(first: u32, count: usize, global_seed: u64) -> Self {
        let inner = (first..first + count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Append another population's RNGs (ids must continue this one's).
    pub fn extend(&mut self, other: AgentRngs) {
        self.inner.extend(other.inner);
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
