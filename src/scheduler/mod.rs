//! Incremental, amortized scheduling of score recomputation.
//!
//! The host calls [`IncrementalScheduler::tick`] once per simulation tick.
//! Each call does a bounded amount of work: one aggregate refresh or one
//! (agent, category) evaluation, and writes at most one level to the host.

mod config;
mod runner;

pub use config::{RefreshAction, SchedulerConfig};
pub use runner::{IncrementalScheduler, TickInputs, TickReport, TickWork};
