//! `ms-choice` — transition-selection policies.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`model`]     | `ChoiceModel` trait                                         |
//! | [`uniform`]   | `UniformRandom` — reference policy, one uniform draw        |
//! | [`first`]     | `FirstEligible` — deterministic, registration order         |
//! | [`weighted`]  | `WeightedRandom` — proportional to `Transition::weight`     |
//! | [`utility`]   | `UtilityMaximizing` — argmax of a user utility function     |
//! | [`error`]     | `ChoiceError`, `ChoiceResult<T>`                            |
//!
//! # Design notes
//!
//! Choice models are strategy objects shared by many agents (usually behind
//! an `Arc<dyn ChoiceModel<C>>`).  They hold no per-call state: randomness
//! arrives as a `&mut dyn RandomSource` argument, so the caller decides
//! whether draws come from a per-agent stream or a single run-level one.
//!
//! "Nothing eligible" and "policy declined" are `Ok(None)`, never errors.

pub mod error;
pub mod first;
pub mod model;
pub mod uniform;
pub mod utility;
pub mod weighted;


pub use error::{ChoiceError, ChoiceResult};
pub use first::FirstEligible;
pub use model::ChoiceModel;
pub use uniform::UniformRandom;
pub use utility::UtilityMaximizing;
pub use weighted::WeightedRandom;
