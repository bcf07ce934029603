//! Scores and their discretization.
//!
//! A [`Score`] is a normalized value in [0, 1] plus two mutually exclusive
//! override flags and an audit trail. [`PriorityScale`] turns it into the
//! ordinal levels a host dispatcher understands.

mod level;
mod types;

pub use level::PriorityScale;
pub use types::{clamp01, Checkpoint, Score, TrailEntry, TrailKind};
