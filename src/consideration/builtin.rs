//! Built-in considerations.
//!
//! Each variant is a small, self-contained rule expressed only through the
//! score primitives. Category pipelines combine them with signed weights:
//! the same rule can raise one category and lower another.

use super::types::{Consideration, EvalContext};
use crate::context::ScarcityKind;
use crate::engine::ConsiderationError;
use crate::score::{clamp01, Score};
use std::borrow::Cow;

/// Distance, in cells, at which deterioration urgency halves.
const DETERIORATION_FALLOFF: f64 = 25.0;

/// Penalty per other agent already working a category, capped at four.
const CROWDING_STEP: f64 = 0.25;

/// The built-in consideration catalogue.
///
/// Force-type considerations (`FireEmergency`, `MedicalEmergency`,
/// `RangeScaling`'s no-weapon case, `Downed`, `Incapable`) act only on a
/// non-zero weight, so a zero global weight switches them off. The emergency
/// rules force on only with a positive weight; a negative weight demotes
/// ordinary work while the emergency lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `reset(w)`: the weight is the starting value.
    Baseline,
    /// Skill above or below average.
    Skill,
    /// Passion for the work, scaled by mood.
    Passion,
    /// Rewards being the colony's best at this; penalizes the skill gap.
    BestAmongPeers,
    /// Rewards uncovered work; penalizes crowding.
    OthersDoing,
    /// Fires when the given resource is running low.
    Scarcity(ScarcityKind),
    /// Fires when hostiles are on the map or near the agent.
    Hostiles,
    /// While fire burns in the home area: forces on and adds `w`, or just
    /// adds a negative `w`.
    FireEmergency,
    /// While patients wait or colonists lie downed: forces on and adds `w`,
    /// or just adds a negative `w`.
    MedicalEmergency,
    /// Scales with the agent's missing health.
    Injury,
    /// Scales with the colony's missing health.
    ColonyHealth,
    /// Sticks with the task the agent is already doing.
    MidTask,
    /// Fires if the agent idled within the idle window.
    Idle,
    /// Scales with proximity to deteriorating items.
    Deterioration,
    /// Weapon range versus distance to the nearest target.
    RangeScaling,
    /// Scales with the dirtiness of the agent's own room.
    RoomOwnership,
    /// Fires if the agent has the trait.
    TraitAffinity(&'static str),
    /// Colony-wide per-category adjustment from world settings.
    ColonyPolicy,
    /// Positive weight forces off when downed; negative forces on.
    Downed,
    /// Forces off categories the agent can never do.
    Incapable,
}

fn finite(v: f64, input: &'static str) -> Result<f64, ConsiderationError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConsiderationError::NonFinite(input))
    }
}

fn emergency(score: &mut Score, weight: f64, label: &'static str) {
    if weight > 0.0 {
        score.force_on_if(true, label);
        score.add(weight, label);
    } else if weight < 0.0 {
        score.add(weight, "emergency elsewhere");
    }
}

impl Consideration for Builtin {
    fn name(&self) -> &str {
        match self {
            Builtin::Baseline => "baseline",
            Builtin::Skill => "skill",
            Builtin::Passion => "passion",
            Builtin::BestAmongPeers => "best_among_peers",
            Builtin::OthersDoing => "others_doing",
            Builtin::Scarcity(ScarcityKind::Food) => "scarcity_food",
            Builtin::Scarcity(ScarcityKind::Medicine) => "scarcity_medicine",
            Builtin::Scarcity(ScarcityKind::Fuel) => "scarcity_fuel",
            Builtin::Hostiles => "hostiles",
            Builtin::FireEmergency => "fire_emergency",
            Builtin::MedicalEmergency => "medical_emergency",
            Builtin::Injury => "injury",
            Builtin::ColonyHealth => "colony_health",
            Builtin::MidTask => "mid_task",
            Builtin::Idle => "idle",
            Builtin::Deterioration => "deterioration",
            Builtin::RangeScaling => "range_scaling",
            Builtin::RoomOwnership => "room_ownership",
            Builtin::TraitAffinity(_) => "trait_affinity",
            Builtin::ColonyPolicy => "colony_policy",
            Builtin::Downed => "downed",
            Builtin::Incapable => "incapable",
        }
    }

    fn evaluate(
        &self,
        score: &mut Score,
        weight: f64,
        ctx: &EvalContext<'_>,
    ) -> Result<(), ConsiderationError> {
        let agent = ctx.agent;
        match *self {
            Builtin::Baseline => {
                score.reset(finite(weight, "weight")?, "baseline");
            }

            Builtin::Skill => {
                if let Some(skill) = agent.skill(ctx.category) {
                    let skill = clamp01(finite(skill, "skill")?);
                    score.add(weight * (skill - 0.5), "skill level");
                }
            }

            Builtin::Passion => {
                let mood = clamp01(finite(agent.mood(), "mood")?);
                let passion = agent.passion(ctx.category);
                let bonus = passion.bonus();
                if bonus > 0.0 {
                    score.add(weight * bonus * (0.5 + 0.5 * mood), "passion");
                }
            }

            Builtin::BestAmongPeers => {
                let (Some(own), Some(best)) =
                    (agent.skill(ctx.category), ctx.map.peer_best_skill(ctx.category))
                else {
                    return Ok(());
                };
                let gap = finite(best, "peer_best_skill")? - finite(own, "skill")?;
                if gap <= 1e-9 {
                    score.add(weight, "best at this in the colony");
                } else {
                    score.add(-weight * gap.min(1.0), "others are better at this");
                }
            }

            Builtin::OthersDoing => {
                let others = ctx.map.others_doing(ctx.category, agent.id());
                if others == 0 {
                    score.add(weight, "nobody else is doing this");
                } else {
                    let crowd = others.min(4) as f64;
                    score.add(-weight * CROWDING_STEP * crowd, "others are already doing this");
                }
            }

            Builtin::Scarcity(kind) => {
                if ctx.aggregates.scarcity.is_short(kind) {
                    let label = match kind {
                        ScarcityKind::Food => "food is running low",
                        ScarcityKind::Medicine => "medicine is running low",
                        ScarcityKind::Fuel => "fuel is running low",
                    };
                    score.add(weight, label);
                }
            }

            Builtin::Hostiles => {
                let near = ctx.local.is_some_and(|l| l.hostiles_nearby > 0);
                if ctx.aggregates.hazards.hostiles || near {
                    score.add(weight, "hostiles about");
                }
            }

            Builtin::FireEmergency => {
                if ctx.aggregates.hazards.fire {
                    emergency(score, weight, "fire in home area");
                }
            }

            Builtin::MedicalEmergency => {
                let hazards = ctx.aggregates.hazards;
                if hazards.patients_waiting || hazards.downed_colonists {
                    emergency(score, weight, "patients need treatment");
                }
            }

            Builtin::Injury => {
                let health = clamp01(finite(agent.health(), "health")?);
                score.add(weight * (1.0 - health), "injured");
            }

            Builtin::ColonyHealth => {
                let health = clamp01(finite(ctx.aggregates.colony_health, "colony_health")?);
                score.add(weight * (1.0 - health), "colony is unwell");
            }

            Builtin::MidTask => {
                if agent.current_task() == Some(ctx.category) {
                    score.add(weight, "currently doing this");
                }
            }

            Builtin::Idle => {
                if let Some(&last_idle) = ctx.aggregates.idle_memory.get(&agent.id()) {
                    if ctx.map.now().saturating_sub(last_idle) <= ctx.idle_window {
                        score.add(weight, "recently idle");
                    }
                }
            }

            Builtin::Deterioration => {
                if let Some(at) = ctx.aggregates.deterioration {
                    let distance = agent.position().distance_to(at);
                    score.add(
                        weight / (1.0 + distance / DETERIORATION_FALLOFF),
                        "things are deteriorating",
                    );
                }
            }

            Builtin::RangeScaling => {
                let range = match agent.weapon_range() {
                    Some(r) => finite(r, "weapon_range")?,
                    None => 0.0,
                };
                if range <= 0.0 {
                    score.force_off_if(weight != 0.0, "no ranged weapon");
                    return Ok(());
                }
                if let Some(distance) = ctx.local.and_then(|l| l.nearest_target) {
                    let distance = finite(distance, "nearest_target")?;
                    let reach = if distance <= 0.0 {
                        1.0
                    } else {
                        (range / distance).min(1.0)
                    };
                    score.multiply(1.0 - weight + weight * reach, "target range");
                }
            }

            Builtin::RoomOwnership => {
                if let Some(dirt) = ctx.local.and_then(|l| l.own_room_dirt) {
                    let dirt = clamp01(finite(dirt, "own_room_dirt")?);
                    score.add(weight * dirt, "own room is dirty");
                }
            }

            Builtin::TraitAffinity(tag) => {
                if agent.has_trait(tag) {
                    score.add(weight, Cow::Borrowed(tag));
                }
            }

            Builtin::ColonyPolicy => {
                let adjustment = finite(
                    ctx.world.category_adjustment(ctx.category),
                    "category_adjustment",
                )?;
                score.add(weight * adjustment, "colony policy");
            }

            Builtin::Downed => {
                if weight > 0.0 {
                    score.force_off_if(agent.is_downed(), "downed");
                } else if weight < 0.0 {
                    score.force_on_if(agent.is_downed(), "downed and needs care");
                }
            }

            Builtin::Incapable => {
                score.force_off_if(
                    weight != 0.0 && agent.is_category_disabled(ctx.category),
                    "incapable",
                );
            }
        }
        Ok(())
    }
}
