//! Autonomous task-priority engine for colony simulations.
//!
//! Decides, for every agent and every work category, how urgently the agent
//! should take up that kind of work, and writes the answer into the host's
//! per-agent priority table:
//!
//! - **Score**: a bounded `[0, 1]` value with sticky forced-on/forced-off
//!   flags and an audit trail of every contribution.
//! - **Considerations**: small reusable scoring rules applied to a score in
//!   sequence, each with a weight.
//! - **Registry**: the ordered pipeline of considerations for each category,
//!   with a default for categories without their own.
//! - **Engine**: runs pipelines, isolates failing steps, falls back on setup
//!   failures, and discretizes scores into host priority levels.
//! - **Scheduler**: amortizes recomputation over ticks with a strict
//!   per-tick work bound.
//!
//! # Architecture
//!
//! The crate never touches the host directly. Everything it reads comes
//! through the traits in [`context`], and the only thing it writes is a
//! priority level through [`context::HostDispatcher`].

pub mod consideration;
pub mod context;
pub mod engine;
pub mod registry;
pub mod scheduler;
pub mod score;

#[cfg(test)]
mod testing;
