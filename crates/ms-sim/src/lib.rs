//! `ms-sim` — reference scheduler adapter and tick loop for metasim.
//!
//! The behavioral core (`ms-graph`, `ms-choice`, `ms-agent`) owns no clock;
//! it only talks to a [`SchedulerPort`][ms_core::SchedulerPort].  This crate
//! supplies one concrete scheduler so the core can be run end to end.  Host
//! simulations with their own event loop can skip it and drive
//! `Agent::advance` directly.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   repeat until no events remain at `tick`:
//!     ① Drain   — pop every event queued for `tick`.
//!     ② Events  — run callbacks (insertion order, `&mut C`);
//!                 collect Wake(agent), sort + dedup, drop finished agents,
//!                 defer agents already advanced this tick to `tick + 1`.
//!     ③ Advance — Agent::advance for each woken agent into a private
//!                 EventBuffer (parallel with the `parallel` feature).
//!     ④ Apply   — in ascending AgentId order: report transitions, merge
//!                 buffered events into the queue, mark agents that reached
//!                 a terminal state finished, otherwise re-wake them after
//!                 `reevaluate_interval_ticks`.
//! ```
//!
//! Step ④ being sequential and ordered is what makes a run a pure function
//! of (seed, graph, initial schedule), with or without `parallel`.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the advance phase on Rayon's thread pool.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let (agents, rngs) = PopulationBuilder::new(1_000, config.seed, graph, Arc::new(UniformRandom))
//!     .build()?;
//! let mut sim = SimBuilder::new(config, ctx, agents, rngs).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod buffer;
pub mod builder;
pub mod error;
pub mod observer;
pub mod queue;
pub mod sim;


pub use buffer::EventBuffer;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TransitionEvent};
pub use queue::EventQueue;
pub use sim::{SharedContext, Sim};
