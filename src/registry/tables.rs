//! Built-in pipeline tables.
//!
//! Each table is plain data: an ordered list of `(consideration, weight)`.
//! Conventions shared by every table:
//!
//! - `Baseline` comes first.
//! - Emergency overrides precede `Downed`, so a downed agent is never pulled
//!   into an emergency it cannot answer.
//! - `Incapable` comes last, so nothing can re-enable a category the agent can
//!   never do.

use crate::consideration::Builtin::{self, *};
use crate::context::ScarcityKind::{Food, Fuel, Medicine};

/// Trait tags the built-in tables react to.
pub mod traits {
    pub const GREEN_THUMB: &str = "green_thumb";
    pub const CREATIVE: &str = "creative";
    pub const NEAT: &str = "neat";
    pub const LAZY: &str = "lazy";
    pub const INDUSTRIOUS: &str = "industrious";
}

pub(crate) const DEFAULT: &[(Builtin, f64)] = &[
    (Baseline, 0.4),
    (Skill, 0.6),
    (Passion, 0.2),
    (BestAmongPeers, 0.1),
    (OthersDoing, 0.05),
    (Scarcity(Food), -0.1),
    (Hostiles, -0.1),
    (TraitAffinity(traits::INDUSTRIOUS), 0.1),
    (TraitAffinity(traits::LAZY), -0.1),
    (FireEmergency, -0.3),
    (MedicalEmergency, -0.2),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const FIREFIGHTER: &[(Builtin, f64)] = &[
    (Baseline, 0.1),
    (OthersDoing, 0.1),
    (FireEmergency, 0.9),
    (Downed, 1.0),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const PATIENT: &[(Builtin, f64)] = &[
    (Baseline, 0.2),
    (Injury, 0.8),
    (Downed, -1.0),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const BED_REST: &[(Builtin, f64)] = &[
    (Baseline, 0.2),
    (Injury, 0.7),
    (Hostiles, -0.1),
    (Downed, -1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const DOCTOR: &[(Builtin, f64)] = &[
    (Baseline, 0.3),
    (Skill, 0.6),
    (Passion, 0.2),
    (BestAmongPeers, 0.2),
    (OthersDoing, 0.1),
    (ColonyHealth, 0.3),
    (Scarcity(Medicine), -0.05),
    (MedicalEmergency, 0.3),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const HUNTING: &[(Builtin, f64)] = &[
    (Baseline, 0.3),
    (Skill, 0.6),
    (Passion, 0.2),
    (BestAmongPeers, 0.1),
    (OthersDoing, 0.05),
    (Scarcity(Food), 0.2),
    (Hostiles, -0.3),
    (Injury, -0.4),
    (RangeScaling, 0.5),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const COOKING: &[(Builtin, f64)] = &[
    (Baseline, 0.4),
    (Skill, 0.6),
    (Passion, 0.2),
    (BestAmongPeers, 0.15),
    (OthersDoing, 0.05),
    (Scarcity(Food), 0.25),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const GROWING: &[(Builtin, f64)] = &[
    (Baseline, 0.4),
    (Skill, 0.6),
    (Passion, 0.2),
    (BestAmongPeers, 0.1),
    (OthersDoing, 0.05),
    (Scarcity(Food), 0.15),
    (Hostiles, -0.2),
    (Injury, -0.2),
    (TraitAffinity(traits::GREEN_THUMB), 0.1),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const CONSTRUCTION: &[(Builtin, f64)] = &[
    (Baseline, 0.4),
    (Skill, 0.6),
    (Passion, 0.2),
    (BestAmongPeers, 0.1),
    (OthersDoing, 0.05),
    (Scarcity(Food), -0.1),
    (Hostiles, -0.2),
    (Injury, -0.2),
    (TraitAffinity(traits::INDUSTRIOUS), 0.1),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const MINING: &[(Builtin, f64)] = &[
    (Baseline, 0.3),
    (Skill, 0.6),
    (Passion, 0.2),
    (BestAmongPeers, 0.1),
    (OthersDoing, 0.05),
    (Scarcity(Food), -0.1),
    (Hostiles, -0.2),
    (Injury, -0.3),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const CRAFTING: &[(Builtin, f64)] = &[
    (Baseline, 0.4),
    (Skill, 0.6),
    (Passion, 0.2),
    (BestAmongPeers, 0.1),
    (OthersDoing, 0.05),
    (Scarcity(Medicine), 0.15),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const ART: &[(Builtin, f64)] = &[
    (Baseline, 0.3),
    (Skill, 0.6),
    (Passion, 0.3),
    (BestAmongPeers, 0.1),
    (OthersDoing, 0.05),
    (Scarcity(Food), -0.3),
    (ColonyHealth, -0.2),
    (Hostiles, -0.1),
    (TraitAffinity(traits::CREATIVE), 0.1),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const HAULING: &[(Builtin, f64)] = &[
    (Baseline, 0.4),
    (OthersDoing, 0.05),
    (Scarcity(Fuel), 0.15),
    (Deterioration, 0.3),
    (Idle, 0.15),
    (Hostiles, -0.2),
    (Injury, -0.2),
    (TraitAffinity(traits::LAZY), -0.2),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const CLEANING: &[(Builtin, f64)] = &[
    (Baseline, 0.3),
    (OthersDoing, 0.05),
    (RoomOwnership, 0.3),
    (Idle, 0.1),
    (Scarcity(Food), -0.15),
    (Hostiles, -0.1),
    (TraitAffinity(traits::NEAT), 0.15),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];

pub(crate) const RESEARCH: &[(Builtin, f64)] = &[
    (Baseline, 0.4),
    (Skill, 0.6),
    (Passion, 0.2),
    (BestAmongPeers, 0.15),
    (OthersDoing, 0.05),
    (Scarcity(Food), -0.2),
    (ColonyHealth, -0.2),
    (Hostiles, -0.1),
    (Downed, 1.0),
    (MidTask, 0.1),
    (ColonyPolicy, 1.0),
    (Incapable, 1.0),
];
