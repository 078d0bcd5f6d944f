//! `ms-core` — foundational types for the `metasim` agent state-machine
//! framework.
//!
//! This crate is a dependency of every other `ms-*` crate.  It intentionally
//! has no `ms-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StateId`, `TransitionId`                       |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`rng`]         | `RandomSource`, `AgentRng` (per-agent), `SimRng`, `SharedRng` |
//! | [`scheduler`]   | `SchedulerPort`, `SimEvent`, `SchedulerError`              |
//! | [`error`]       | `MsError`, `MsResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Tick`, `SimConfig`.|

pub mod error;
pub mod ids;
pub mod rng;
pub mod scheduler;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{MsError, MsResult};
pub use ids::{AgentId, StateId, TransitionId};
pub use rng::{AgentRng, RandomSource, SharedRng, SimRng};
pub use scheduler::{EventCallback, SchedulerError, SchedulerPort, SchedulerResult, SimEvent};
pub use time::{SimClock, SimConfig, Tick};
