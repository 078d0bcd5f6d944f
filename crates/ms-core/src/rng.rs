//! Deterministic random sources.
//!
//! # Determinism strategy
//!
//! Choice models never own randomness; they draw from a [`RandomSource`]
//! passed in by the caller.  Three implementations are provided:
//!
//! - [`AgentRng`] — one independent `SmallRng` per agent, seeded by
//!   `global_seed XOR (agent_id * MIXING_CONSTANT)`.  Agents never share RNG
//!   state, so advancing them in parallel cannot race and the result does
//!   not depend on thread scheduling.  This is what `ms-sim` uses.
//! - [`SimRng`] — a single run-level stream.  Reproducible only with a fixed
//!   single-threaded draw order.
//! - [`SharedRng`] — a `SimRng` behind a `Mutex` for callers that want one
//!   process-wide stream shared across threads.  Safe, but the draw order
//!   (and therefore the run) is only reproducible if the caller serialises
//!   agent advancement.
//!
//! Every source is seeded once per run and advances deterministically per
//! draw.

use std::sync::{Mutex, PoisonError};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, MsError, MsResult};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// The entropy capability consumed by choice models.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`.
    ///
    /// Fails with [`MsError::InvalidArgument`] when `bound == 0`.
    fn next_int(&mut self, bound: usize) -> MsResult<usize>;

    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_int(&mut self, bound: usize) -> MsResult<usize> {
        (**self).next_int(bound)
    }

    #[inline]
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

fn draw_index(rng: &mut SmallRng, bound: usize) -> MsResult<usize> {
    if bound == 0 {
        return Err(MsError::InvalidArgument("random bound must be positive".into()));
    }
    Ok(rng.gen_range(0..bound))
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Create one per agent at simulation init and store it in a parallel `Vec`
/// alongside the agents.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for AgentRng {
    #[inline]
    fn next_int(&mut self, bound: usize) -> MsResult<usize> {
        draw_index(&mut self.0, bound)
    }

    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.0.r#gen()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for single-threaded draws.
///
/// For parallel randomness use one [`AgentRng`] per agent or a
/// [`SharedRng`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_int(&mut self, bound: usize) -> MsResult<usize> {
        draw_index(&mut self.0, bound)
    }

    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.0.r#gen()
    }
}

// ── SharedRng ─────────────────────────────────────────────────────────────────

/// One process-wide stream that many threads may draw from.
///
/// `&SharedRng` implements [`RandomSource`], so a single instance can be
/// handed to every agent.  Each draw takes the lock once.
pub struct SharedRng(Mutex<SimRng>);

impl SharedRng {
    pub fn new(seed: u64) -> Self {
        SharedRng(Mutex::new(SimRng::new(seed)))
    }

    /// Recover the inner stream, e.g. to continue single-threaded.
    pub fn into_inner(self) -> SimRng {
        self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RandomSource for &SharedRng {
    fn next_int(&mut self, bound: usize) -> MsResult<usize> {
        // A panic in another drawer leaves the RNG state itself intact.
        let mut rng = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        rng.next_int(bound)
    }

    fn next_f64(&mut self) -> f64 {
        let mut rng = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        rng.next_f64()
    }
}
