//! Core trait for considerations.

use crate::context::{
    AgentContext, Aggregates, CategoryId, LocalAggregates, MapStateProvider, WorldStateProvider,
};
use crate::engine::ConsiderationError;
use crate::score::Score;

/// Everything a consideration may read while scoring one (agent, category)
/// pair. All of it is read-only.
pub struct EvalContext<'a> {
    pub agent: &'a dyn AgentContext,
    pub category: &'a CategoryId,
    pub world: &'a dyn WorldStateProvider,
    pub map: &'a dyn MapStateProvider,
    pub aggregates: &'a Aggregates,
    /// Spatial facts for `agent`, if the scheduler has refreshed them.
    pub local: Option<&'a LocalAggregates>,
    /// How recently an agent must have idled to count as bored, in ticks.
    pub idle_window: u64,
}

/// One named, weighted scoring step.
///
/// A consideration reads its inputs from [`EvalContext`] and changes the
/// score only through the score's mutation primitives. The sign of
/// `weight` picks the direction of the effect.
///
/// Returning `Err` isolates the step: its partial changes are rolled back and
/// it is skipped from then on.
///
/// # Examples
///
/// ```ignore
/// struct NightOwl;
///
/// impl Consideration for NightOwl {
///     fn name(&self) -> &str { "night_owl" }
///     fn evaluate(&self, score: &mut Score, weight: f64, ctx: &EvalContext<'_>)
///         -> Result<(), ConsiderationError>
///     {
///         score.add(weight, "likes the night shift");
///         Ok(())
///     }
/// }
/// ```
pub trait Consideration: Send + Sync {
    /// Stable name, also the key for global settings.
    fn name(&self) -> &str;

    fn evaluate(
        &self,
        score: &mut Score,
        weight: f64,
        ctx: &EvalContext<'_>,
    ) -> Result<(), ConsiderationError>;
}
