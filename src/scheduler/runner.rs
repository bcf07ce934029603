//! The amortized tick loop.

use super::config::{RefreshAction, SchedulerConfig};
use crate::context::{
    AgentId, Aggregates, AutonomyGate, CategoryId, HostDispatcher, LocalAggregates,
    MapStateProvider, Population, WorldStateProvider,
};
use crate::engine::{ConfigError, Environment, Evaluation, PriorityEngine};
use crate::score::Score;
use std::collections::{HashMap, HashSet};

/// Host-side inputs for one tick.
#[derive(Clone, Copy)]
pub struct TickInputs<'a> {
    pub world: &'a dyn WorldStateProvider,
    pub map: &'a dyn MapStateProvider,
    pub population: &'a dyn Population,
    pub gate: &'a dyn AutonomyGate,
}

/// What a tick did.
#[derive(Debug, Clone)]
pub enum TickWork {
    /// One map-wide aggregate was refreshed.
    Refreshed(RefreshAction),
    /// One (agent, category) pair was evaluated.
    Evaluated(Evaluation),
    /// The population slot was empty; nothing happened.
    Vacant { index: usize },
    /// There was nothing to do at all.
    Idle,
}

/// Report for a single tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Zero-based number of this tick.
    pub tick: u64,
    /// Cycle the work belongs to.
    pub cycle: u64,
    /// Whether the cursor wrapped during this tick.
    pub wrapped: bool,
    pub work: TickWork,
}

/// Round-robin, bounded-cost recomputation of every (agent, category) pair on
/// one map.
///
/// Each cycle first runs every refresh action, one per tick, then walks the
/// flattened `agents × categories` product, one pair per tick. When the
/// cursor runs past the end (including because the population or the
/// category list shrank) it wraps and the next cycle starts in the same tick.
///
/// A tick never does more than one refresh action or one pair evaluation,
/// whatever the size of the population, so a pair's score is at most
/// `refresh_actions + agents × categories` ticks old.
///
/// # Examples
///
/// ```ignore
/// let mut scheduler = IncrementalScheduler::new(SchedulerConfig::default(), categories::ALL.to_vec())?;
/// let mut engine = PriorityEngine::with_defaults();
///
/// // inside the host's per-tick callback:
/// let inputs = TickInputs { world: &settings, map: &map, population: &colonists, gate: &gate };
/// let report = scheduler.tick(&mut engine, &inputs, &mut host);
/// ```
#[derive(Debug)]
pub struct IncrementalScheduler {
    config: SchedulerConfig,
    categories: Vec<CategoryId>,
    aggregates: Aggregates,
    cursor: usize,
    ticks: u64,
    cycles: u64,
    local: Option<(AgentId, Option<LocalAggregates>)>,
    /// Latest score per pair, stamped with the cycle that computed it.
    scores: HashMap<(AgentId, CategoryId), (u64, Score)>,
    /// Agents evaluated during the current cycle.
    visited: HashSet<AgentId>,
    /// Agents evaluated during the previous cycle.
    previous: HashSet<AgentId>,
}

impl IncrementalScheduler {
    /// Creates a scheduler positioned at the start of a cycle.
    pub fn new(config: SchedulerConfig, categories: Vec<CategoryId>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            categories,
            aggregates: Aggregates::default(),
            cursor: 0,
            ticks: 0,
            cycles: 0,
            local: None,
            scores: HashMap::new(),
            visited: HashSet::new(),
            previous: HashSet::new(),
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Categories walked for every agent, in order.
    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    /// Replaces the category list. Takes effect immediately; an index that
    /// falls out of range simply wraps the cycle early.
    pub fn set_categories(&mut self, categories: Vec<CategoryId>) {
        self.categories = categories;
    }

    /// Current aggregate snapshot.
    pub fn aggregates(&self) -> &Aggregates {
        &self.aggregates
    }

    /// Position within the current cycle.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Ticks in one full cycle for a population of `agents`.
    pub fn cycle_len(&self, agents: usize) -> usize {
        self.config.refresh_actions.len() + agents * self.categories.len()
    }

    /// Latest score computed for the pair, with its audit trail.
    ///
    /// Scores survive one wrap: a pair not evaluated again during the next
    /// full cycle is dropped.
    pub fn inspect(&self, agent: AgentId, category: &CategoryId) -> Option<&Score> {
        self.scores
            .get(&(agent, category.clone()))
            .map(|(_, score)| score)
    }

    /// Number of retained scores.
    pub fn retained(&self) -> usize {
        self.scores.len()
    }

    /// Drops retained scores of an agent that left the map.
    ///
    /// Agents that stop appearing in the population are dropped on their
    /// own at the next wrap; this only makes it immediate.
    pub fn forget_agent(&mut self, agent: AgentId) {
        self.scores.retain(|(a, _), _| *a != agent);
        self.visited.remove(&agent);
        self.previous.remove(&agent);
        if self.local.as_ref().is_some_and(|(a, _)| *a == agent) {
            self.local = None;
        }
    }

    /// Runs one unit of work.
    pub fn tick(
        &mut self,
        engine: &mut PriorityEngine,
        inputs: &TickInputs<'_>,
        host: &mut dyn HostDispatcher,
    ) -> TickReport {
        let tick = self.ticks;
        self.ticks += 1;

        let mut wrapped = false;
        let work = loop {
            if let Some(work) = self.step(engine, inputs, host) {
                break work;
            }
            if wrapped {
                break TickWork::Idle;
            }
            self.wrap(engine);
            wrapped = true;
        };

        TickReport {
            tick,
            cycle: self.cycles,
            wrapped,
            work,
        }
    }

    /// Work at the cursor, or `None` if the cursor is past the end.
    fn step(
        &mut self,
        engine: &mut PriorityEngine,
        inputs: &TickInputs<'_>,
        host: &mut dyn HostDispatcher,
    ) -> Option<TickWork> {
        let refresh_len = self.config.refresh_actions.len();
        if self.cursor < refresh_len {
            let action = self.config.refresh_actions[self.cursor];
            self.cursor += 1;
            action.apply(&mut self.aggregates, inputs.map);
            tracing::debug!(target: "taskprio", action = ?action, cycle = self.cycles, "aggregate_refreshed");
            return Some(TickWork::Refreshed(action));
        }

        let per_agent = self.categories.len();
        if per_agent == 0 {
            return None;
        }
        let k = self.cursor - refresh_len;
        let index = k / per_agent;
        if index >= inputs.population.len() {
            return None;
        }
        let category_index = k % per_agent;
        self.cursor += 1;

        let Some(agent) = inputs.population.agent(index) else {
            return Some(TickWork::Vacant { index });
        };
        let id = agent.id();
        self.visited.insert(id);

        let cached_for = self.local.as_ref().map(|(a, _)| *a);
        if category_index == 0 || cached_for != Some(id) {
            self.local = Some((id, inputs.map.local_aggregates(id)));
        }

        let category = &self.categories[category_index];
        let env = Environment {
            world: inputs.world,
            map: inputs.map,
            aggregates: &self.aggregates,
            local: self.local.as_ref().and_then(|(_, l)| l.as_ref()),
        };
        let evaluation = engine.evaluate(agent, category, &env, inputs.gate, host);

        if self.config.retain_scores {
            self.scores.insert(
                (id, category.clone()),
                (self.cycles, evaluation.score.clone()),
            );
        }
        Some(TickWork::Evaluated(evaluation))
    }

    /// Starts the next cycle. Pairs not evaluated in the cycle that just
    /// ended are dropped, and agents not seen at all are forgotten by the
    /// engine as well.
    fn wrap(&mut self, engine: &mut PriorityEngine) {
        let finished = self.cycles;
        let visited = std::mem::take(&mut self.visited);

        let departed: HashSet<AgentId> = self
            .previous
            .iter()
            .chain(self.scores.keys().map(|(agent, _)| agent))
            .filter(|agent| !visited.contains(*agent))
            .copied()
            .collect();
        for agent in &departed {
            engine.forget_agent(*agent);
        }
        self.scores.retain(|_, (cycle, _)| *cycle == finished);
        self.previous = visited;

        self.cursor = 0;
        self.cycles += 1;
        tracing::debug!(
            target: "taskprio",
            cycle = self.cycles,
            departed = departed.len(),
            retained = self.scores.len(),
            "cycle_wrapped"
        );
    }
}
