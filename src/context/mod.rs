//! Domain identifiers and the read-only interfaces the engine consumes.
//!
//! The engine never reaches into host state directly. World settings, map
//! aggregates, agent views, the population, the autonomy gate and the host's
//! priority table are all injected through the traits defined here.

mod aggregates;
mod ids;
mod providers;
mod settings;

pub use aggregates::{Aggregates, HazardFlags, LocalAggregates, ScarcityFlags, ScarcityKind};
pub use ids::{categories, AgentId, CategoryId, Passion, Position};
pub use providers::{
    apply_to_host_scheduler, AgentContext, AlwaysAutonomous, AutonomyGate, HostDispatcher,
    MapStateProvider, Population, WorldStateProvider,
};
pub use settings::{ConsiderationSetting, WorldSettings};
