//! Log deduplication keyed by failure site.

use crate::context::{AgentId, CategoryId};
use std::borrow::Cow;
use std::collections::HashSet;

/// What a logged failure is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogScope {
    Category(CategoryId),
    Agent(AgentId),
}

/// Stable identity of a failure site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogKey {
    pub site: Cow<'static, str>,
    pub scope: LogScope,
}

impl LogKey {
    pub fn new(site: impl Into<Cow<'static, str>>, scope: LogScope) -> Self {
        Self {
            site: site.into(),
            scope,
        }
    }
}

/// Lets each failure site through once.
///
/// The limiter knows nothing about where logs go; callers ask
/// [`should_log`](LogLimiter::should_log) and emit through `tracing` only on
/// `true`.
#[derive(Debug, Default)]
pub struct LogLimiter {
    seen: HashSet<LogKey>,
    suppressed: u64,
}

impl LogLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` the first time `key` is seen.
    pub fn should_log(&mut self, key: LogKey) -> bool {
        if self.seen.insert(key) {
            true
        } else {
            self.suppressed += 1;
            false
        }
    }

    /// Number of repeats swallowed so far.
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }

    /// Forgets the agent-scoped keys of one agent.
    pub fn forget_agent(&mut self, agent: AgentId) {
        self.seen
            .retain(|key| !matches!(key.scope, LogScope::Agent(a) if a == agent));
    }

    /// Forgets every key, so each site may log once more.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
