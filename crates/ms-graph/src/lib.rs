//! `ms-graph` — the per-agent-type behavior graph.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`state`]       | `State` — named node holding its outgoing transitions          |
//! | [`transition`]  | `Transition`, `TransitionSpec`, `Eligibility`, closure aliases |
//! | [`view`]        | `AgentView<'a, C>` — read-only input to predicates and effects |
//! | [`builder`]     | `GraphBuilder` — mutable assembly, ends in `validate()`        |
//! | [`graph`]       | `TransitionGraph` — validated, immutable, shared via `Arc`     |
//! | [`error`]       | `GraphError`, `EffectError`, `GraphResult<T>`                  |
//!
//! # Lifecycle
//!
//! ```text
//! GraphBuilder::new()
//!     .add_state / add_terminal_state / add_transition / set_initial
//!     .validate()  ──►  TransitionGraph   (no mutators; Send + Sync)
//! ```
//!
//! The type-state split makes "mutate after validation" unrepresentable:
//! the only way to obtain a `TransitionGraph` is through `validate`, and it
//! exposes nothing but read-only traversal.
//!
//! The graph is generic over `C`, the read-only context (services, agent
//! attributes, configuration) that eligibility predicates and effects
//! consult.  The core never inspects `C`.

pub mod builder;
pub mod error;
pub mod graph;
pub mod state;
pub mod transition;
pub mod view;

#[cfg(test)]
mod tests;

pub use builder::GraphBuilder;
pub use error::{EffectError, GraphError, GraphResult};
pub use graph::TransitionGraph;
pub use state::State;
pub use transition::{Effect, Eligibility, Predicate, Transition, TransitionSpec};
pub use view::AgentView;
