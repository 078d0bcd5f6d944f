//! `ms-agent` — agents and the per-tick driver loop.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`agent`]   | `Agent` (current state + shared graph/model), `Step`       |
//! | [`store`]   | `AgentRngs` — per-agent deterministic RNG streams          |
//! | [`builder`] | `PopulationBuilder` — `n` agents of one type plus RNGs     |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                             |
//!
//! # Driver loop (one `Agent::advance`)
//!
//! ```text
//! outgoing = graph.outgoing_transitions(current)
//! outgoing empty           → Step::Terminal      (stop scheduling this agent)
//! eligible = outgoing.filter(is_available_to)    (registration order kept)
//! choice.select_transition(eligible)
//!   None                   → Step::Stayed        (re-evaluated on a later tick)
//!   Some(t)                → t.perform(...)      → Step::Transitioned
//! ```
//!
//! `advance` takes `&mut self`, so the borrow checker rules out two
//! concurrent driver runs for the same agent.

pub mod agent;
pub mod builder;
pub mod error;
pub mod store;


pub use agent::{Agent, Step};
pub use builder::PopulationBuilder;
pub use error::{AgentError, AgentResult};
pub use store::AgentRngs;
