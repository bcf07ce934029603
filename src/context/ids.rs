//! Identifiers and small value types shared across the engine.

use std::borrow::Cow;
use std::fmt;

/// Stable identity of a simulated agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Identifier of an independently scored task category.
///
/// Well-known ids are `const` (see [`categories`]); hosts may mint their own
/// with [`CategoryId::new`]. Categories without a registered pipeline are
/// scored with the default pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryId(Cow<'static, str>);

impl CategoryId {
    /// Creates a category id from a static name, usable in `const` items.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for CategoryId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// Built-in task categories with dedicated pipelines.
pub mod categories {
    use super::CategoryId;

    pub const FIREFIGHTER: CategoryId = CategoryId::from_static("firefighter");
    pub const PATIENT: CategoryId = CategoryId::from_static("patient");
    pub const DOCTOR: CategoryId = CategoryId::from_static("doctor");
    pub const BED_REST: CategoryId = CategoryId::from_static("bed_rest");
    pub const HUNTING: CategoryId = CategoryId::from_static("hunting");
    pub const COOKING: CategoryId = CategoryId::from_static("cooking");
    pub const GROWING: CategoryId = CategoryId::from_static("growing");
    pub const CONSTRUCTION: CategoryId = CategoryId::from_static("construction");
    pub const MINING: CategoryId = CategoryId::from_static("mining");
    pub const CRAFTING: CategoryId = CategoryId::from_static("crafting");
    pub const ART: CategoryId = CategoryId::from_static("art");
    pub const HAULING: CategoryId = CategoryId::from_static("hauling");
    pub const CLEANING: CategoryId = CategoryId::from_static("cleaning");
    pub const RESEARCH: CategoryId = CategoryId::from_static("research");

    /// Every built-in category, in host display order.
    pub const ALL: [CategoryId; 14] = [
        FIREFIGHTER,
        PATIENT,
        DOCTOR,
        BED_REST,
        HUNTING,
        COOKING,
        GROWING,
        CONSTRUCTION,
        MINING,
        CRAFTING,
        ART,
        HAULING,
        CLEANING,
        RESEARCH,
    ];
}

/// A map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Euclidean distance in cells.
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dz = (self.z - other.z) as f64;
        (dx * dx + dz * dz).sqrt()
    }
}

/// How strongly an agent is drawn to a category's work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Passion {
    #[default]
    None,
    Minor,
    Major,
}

impl Passion {
    /// Bonus multiplier applied by the passion consideration.
    pub fn bonus(self) -> f64 {
        match self {
            Passion::None => 0.0,
            Passion::Minor => 0.5,
            Passion::Major => 1.0,
        }
    }
}
