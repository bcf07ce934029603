//! In-memory host doubles shared by unit tests.

use crate::context::{
    AgentContext, AgentId, AutonomyGate, CategoryId, HazardFlags, HostDispatcher, LocalAggregates,
    MapStateProvider, Passion, Population, Position, ScarcityFlags,
};
use crate::engine::SetupError;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct FakeAgent {
    pub id: AgentId,
    pub skills: HashMap<CategoryId, f64>,
    pub passions: HashMap<CategoryId, Passion>,
    pub mood: f64,
    pub health: f64,
    pub downed: bool,
    pub current_task: Option<CategoryId>,
    pub position: Position,
    pub weapon_range: Option<f64>,
    pub traits: Vec<&'static str>,
    pub disabled: HashSet<CategoryId>,
    pub unsupported: HashSet<CategoryId>,
    pub invalid: bool,
}

impl FakeAgent {
    pub fn new(id: u64) -> Self {
        Self {
            id: AgentId(id),
            skills: HashMap::new(),
            passions: HashMap::new(),
            mood: 0.5,
            health: 1.0,
            downed: false,
            current_task: None,
            position: Position::default(),
            weapon_range: None,
            traits: Vec::new(),
            disabled: HashSet::new(),
            unsupported: HashSet::new(),
            invalid: false,
        }
    }

    pub fn with_skill(mut self, category: CategoryId, skill: f64) -> Self {
        self.skills.insert(category, skill);
        self
    }

    pub fn with_passion(mut self, category: CategoryId, passion: Passion) -> Self {
        self.passions.insert(category, passion);
        self
    }

    pub fn with_disabled(mut self, category: CategoryId) -> Self {
        self.disabled.insert(category);
        self
    }
}

impl AgentContext for FakeAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    fn skill(&self, category: &CategoryId) -> Option<f64> {
        self.skills.get(category).copied()
    }

    fn passion(&self, category: &CategoryId) -> Passion {
        self.passions.get(category).copied().unwrap_or_default()
    }

    fn mood(&self) -> f64 {
        self.mood
    }

    fn health(&self) -> f64 {
        self.health
    }

    fn is_downed(&self) -> bool {
        self.downed
    }

    fn current_task(&self) -> Option<&CategoryId> {
        self.current_task.as_ref()
    }

    fn position(&self) -> Position {
        self.position
    }

    fn weapon_range(&self) -> Option<f64> {
        self.weapon_range
    }

    fn has_trait(&self, tag: &str) -> bool {
        self.traits.contains(&tag)
    }

    fn is_category_disabled(&self, category: &CategoryId) -> bool {
        self.disabled.contains(category)
    }

    fn validate(&self, category: &CategoryId) -> Result<(), SetupError> {
        if self.invalid {
            Err(SetupError::AgentUnavailable(self.id))
        } else if self.unsupported.contains(category) {
            Err(SetupError::CategoryUnsupported(category.clone()))
        } else {
            Ok(())
        }
    }
}

/// Map double that counts how often each lookup is made.
#[derive(Debug, Default)]
pub struct FakeMap {
    pub now: u64,
    pub colony_health: f64,
    pub hazards: HazardFlags,
    pub scarcity: ScarcityFlags,
    pub deterioration: Option<Position>,
    pub idle: HashMap<AgentId, u64>,
    pub peer_best: HashMap<CategoryId, f64>,
    pub others: HashMap<CategoryId, usize>,
    pub locals: HashMap<AgentId, LocalAggregates>,
    pub local_lookups: Cell<usize>,
}

impl FakeMap {
    pub fn new() -> Self {
        Self {
            colony_health: 1.0,
            ..Self::default()
        }
    }
}

impl MapStateProvider for FakeMap {
    fn now(&self) -> u64 {
        self.now
    }

    fn colony_health(&self) -> f64 {
        self.colony_health
    }

    fn hazards(&self) -> HazardFlags {
        self.hazards
    }

    fn scarcity(&self) -> ScarcityFlags {
        self.scarcity
    }

    fn deterioration(&self) -> Option<Position> {
        self.deterioration
    }

    fn idle_memory(&self) -> HashMap<AgentId, u64> {
        self.idle.clone()
    }

    fn peer_best_skill(&self, category: &CategoryId) -> Option<f64> {
        self.peer_best.get(category).copied()
    }

    fn others_doing(&self, category: &CategoryId, _agent: AgentId) -> usize {
        self.others.get(category).copied().unwrap_or(0)
    }

    fn local_aggregates(&self, agent: AgentId) -> Option<LocalAggregates> {
        self.local_lookups.set(self.local_lookups.get() + 1);
        self.locals.get(&agent).copied()
    }
}

/// Host priority table that records every write.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub levels: HashMap<(AgentId, CategoryId), u8>,
    pub unsupported: HashSet<CategoryId>,
    pub writes: usize,
}

impl HostDispatcher for FakeHost {
    fn priority(&self, agent: AgentId, category: &CategoryId) -> Option<u8> {
        if self.unsupported.contains(category) {
            return None;
        }
        Some(
            self.levels
                .get(&(agent, category.clone()))
                .copied()
                .unwrap_or(0),
        )
    }

    fn set_priority(&mut self, agent: AgentId, category: &CategoryId, level: u8) {
        self.writes += 1;
        self.levels.insert((agent, category.clone()), level);
    }
}

/// Population backed by optional slots so tests can vacate agents.
#[derive(Debug, Default)]
pub struct FakePopulation {
    pub slots: Vec<Option<FakeAgent>>,
}

impl FakePopulation {
    pub fn of(count: u64) -> Self {
        Self {
            slots: (0..count).map(|i| Some(FakeAgent::new(i))).collect(),
        }
    }
}

impl Population for FakePopulation {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn agent(&self, index: usize) -> Option<&dyn AgentContext> {
        self.slots
            .get(index)?
            .as_ref()
            .map(|a| a as &dyn AgentContext)
    }
}

/// Gate that keeps the listed agents in manual mode.
#[derive(Debug, Default)]
pub struct ManualFor(pub HashSet<AgentId>);

impl AutonomyGate for ManualFor {
    fn is_autonomous(&self, agent: AgentId) -> bool {
        !self.0.contains(&agent)
    }
}
