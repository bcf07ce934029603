//! The priority engine.
//!
//! Runs a category's pipeline for one agent, isolates failing steps, falls
//! back on setup errors, tracks autonomy revocation and discretizes the
//! result for the host.
//!
//! # Failure handling
//!
//! | Failure | Effect |
//! |---|---|
//! | A consideration errors | Step rolled back, weight zeroed from then on, logged once |
//! | Setup error | Constant fallback score for this tick, category unavailable |
//! | Repeated agent setup errors | Autonomy revoked, logged once at `error` |
//!
//! Nothing here panics or returns an error to the tick loop.

mod config;
mod error;
mod limiter;
mod priority;

pub use config::EngineConfig;
pub use error::{ConfigError, ConsiderationError, SetupError};
pub use limiter::{LogKey, LogLimiter, LogScope};
pub use priority::{Environment, Evaluation, PriorityEngine, Source};
