//! Narrow, read-only interfaces onto the host simulation.
//!
//! Everything the engine knows about the world arrives through these traits,
//! passed explicitly per call. Implementations belong to the host adapter.

use super::aggregates::{HazardFlags, LocalAggregates, ScarcityFlags};
use super::ids::{AgentId, CategoryId, Passion, Position};
use super::settings::ConsiderationSetting;
use crate::engine::SetupError;
use std::collections::HashMap;

/// Global, map-independent settings.
pub trait WorldStateProvider {
    /// Enable flag and weight multiplier for the named consideration.
    ///
    /// A non-finite weight skips the step for that run only; fix it with
    /// [`WorldSettings::validate`](crate::context::WorldSettings::validate).
    fn consideration_setting(&self, name: &str) -> ConsiderationSetting;

    /// Colony-wide adjustment for a category, typically in [-1, 1].
    fn category_adjustment(&self, category: &CategoryId) -> f64;
}

/// Per-map facts and keyed lookups.
pub trait MapStateProvider {
    /// Current simulation tick.
    fn now(&self) -> u64;

    /// Fraction of the colony that is healthy, in [0, 1].
    fn colony_health(&self) -> f64;

    fn hazards(&self) -> HazardFlags;

    fn scarcity(&self) -> ScarcityFlags;

    /// Position of the worst deteriorating item, if any.
    fn deterioration(&self) -> Option<Position>;

    /// Tick at which each agent was last idle.
    fn idle_memory(&self) -> HashMap<AgentId, u64>;

    /// Highest normalized skill among the colony's agents for a category.
    fn peer_best_skill(&self, category: &CategoryId) -> Option<f64>;

    /// How many agents other than `agent` are currently working `category`.
    fn others_doing(&self, category: &CategoryId, agent: AgentId) -> usize;

    /// Spatial facts around one agent. `None` if the agent is not on this map.
    fn local_aggregates(&self, agent: AgentId) -> Option<LocalAggregates>;
}

/// Read-only view of one agent.
pub trait AgentContext {
    fn id(&self) -> AgentId;

    /// Normalized skill in [0, 1] relevant to `category`, if any.
    fn skill(&self, category: &CategoryId) -> Option<f64>;

    fn passion(&self, category: &CategoryId) -> Passion;

    /// Mood in [0, 1].
    fn mood(&self) -> f64;

    /// Overall health in [0, 1].
    fn health(&self) -> f64;

    fn is_downed(&self) -> bool;

    fn current_task(&self) -> Option<&CategoryId>;

    fn position(&self) -> Position;

    /// Effective range of the equipped ranged weapon, in cells.
    fn weapon_range(&self) -> Option<f64>;

    fn has_trait(&self, tag: &str) -> bool;

    /// Permanent incapability (backstory, traits, disabilities).
    fn is_category_disabled(&self, category: &CategoryId) -> bool;

    /// Checks that this context can be scored for `category` at all.
    fn validate(&self, _category: &CategoryId) -> Result<(), SetupError> {
        Ok(())
    }
}

/// Index-addressed view of the agents on one map.
///
/// Slots may become vacant between ticks; the scheduler treats a vacant slot
/// as a no-op.
pub trait Population {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn agent(&self, index: usize) -> Option<&dyn AgentContext>;
}

/// Decides whether an agent's priorities are engine-driven.
pub trait AutonomyGate {
    fn is_autonomous(&self, agent: AgentId) -> bool;
}

/// Every agent is autonomous.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAutonomous;

impl AutonomyGate for AlwaysAutonomous {
    fn is_autonomous(&self, _agent: AgentId) -> bool {
        true
    }
}

/// The host's own priority table.
pub trait HostDispatcher {
    /// Level currently assigned, or `None` if the host does not know the
    /// category for this agent.
    fn priority(&self, agent: AgentId, category: &CategoryId) -> Option<u8>;

    fn set_priority(&mut self, agent: AgentId, category: &CategoryId, level: u8);
}

/// Writes `level` into the host table unless it is already there.
///
/// Returns `true` if a write happened.
pub fn apply_to_host_scheduler(
    host: &mut dyn HostDispatcher,
    agent: AgentId,
    category: &CategoryId,
    level: u8,
) -> bool {
    if host.priority(agent, category) == Some(level) {
        return false;
    }
    host.set_priority(agent, category, level);
    true
}
