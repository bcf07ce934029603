//! Error types surfaced by considerations and engine setup.

use crate::context::{AgentId, CategoryId};
use thiserror::Error;

/// A single consideration could not produce its contribution.
///
/// The engine rolls the score back to where it was before the step, zeroes
/// the step's weight for future runs and moves on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConsiderationError {
    #[error("non-finite input `{0}`")]
    NonFinite(&'static str),

    /// A required input was absent. The built-ins treat missing inputs as
    /// "no contribution"; this is for custom considerations that cannot.
    #[error("missing input `{0}`")]
    MissingInput(&'static str),

    #[error("{0}")]
    Failed(String),
}

/// The (agent, category) pair cannot be scored this tick.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("{0} is not available for scoring")]
    AgentUnavailable(AgentId),

    /// Never counts toward autonomy revocation.
    #[error("category `{0}` is not supported by the host")]
    CategoryUnsupported(CategoryId),

    /// Returned by host [`AgentContext::validate`](crate::context::AgentContext::validate)
    /// implementations for anything the other variants do not cover.
    #[error("invalid context: {0}")]
    InvalidContext(String),
}

/// Invalid engine or scheduler configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);

impl From<String> for ConfigError {
    fn from(message: String) -> Self {
        Self(message)
    }
}
