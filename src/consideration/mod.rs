//! Considerations: the individual scoring steps of a pipeline.
//!
//! A consideration is a named rule that nudges, scales, resets or overrides a
//! [`Score`](crate::score::Score) based on read-only agent and map facts.
//! The [`Builtin`] catalogue covers skills, passion, peer comparison, crowding,
//! scarcity, hazards, health, stickiness and incapability; hosts can add their
//! own by implementing [`Consideration`].

mod builtin;
mod types;

pub use builtin::Builtin;
pub use types::{Consideration, EvalContext};
