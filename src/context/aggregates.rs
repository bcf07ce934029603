//! Read-only map facts consumed by considerations.

use super::ids::{AgentId, Position};
use std::collections::HashMap;

/// Map-wide hazards that trigger emergency overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardFlags {
    /// Fire burning inside the home area.
    pub fire: bool,
    /// Hostile units present on the map.
    pub hostiles: bool,
    /// Patients waiting for treatment.
    pub patients_waiting: bool,
    /// Colonists lying downed outside a bed.
    pub downed_colonists: bool,
}

/// Resources a category can be sensitive to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScarcityKind {
    Food,
    Medicine,
    Fuel,
}

/// Which resources are currently running low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScarcityFlags {
    pub food: bool,
    pub medicine: bool,
    pub fuel: bool,
}

impl ScarcityFlags {
    pub fn is_short(&self, kind: ScarcityKind) -> bool {
        match kind {
            ScarcityKind::Food => self.food,
            ScarcityKind::Medicine => self.medicine,
            ScarcityKind::Fuel => self.fuel,
        }
    }
}

/// Snapshot of map-wide facts, refreshed piecewise by the scheduler.
///
/// The engine only ever reads this; each field is overwritten by exactly one
/// refresh action.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aggregates {
    /// Fraction of the colony that is healthy, in [0, 1].
    pub colony_health: f64,
    pub hazards: HazardFlags,
    pub scarcity: ScarcityFlags,
    /// Position of the worst deteriorating item, if anything is rotting.
    pub deterioration: Option<Position>,
    /// Tick at which each agent was last idle.
    pub idle_memory: HashMap<AgentId, u64>,
}

impl Default for Aggregates {
    fn default() -> Self {
        Self {
            colony_health: 1.0,
            hazards: HazardFlags::default(),
            scarcity: ScarcityFlags::default(),
            deterioration: None,
            idle_memory: HashMap::new(),
        }
    }
}

/// Spatial facts local to one agent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalAggregates {
    /// Dirtiness of the agent's own room in [0, 1]; `None` if it owns no room.
    pub own_room_dirt: Option<f64>,
    /// Distance to the nearest hunt target, in cells.
    pub nearest_target: Option<f64>,
    /// Hostile units within alert range of the agent.
    pub hostiles_nearby: u32,
}
