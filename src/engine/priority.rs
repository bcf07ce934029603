//! Pipeline execution, discretization and the autonomy gate.

use super::config::EngineConfig;
use super::error::{ConfigError, SetupError};
use super::limiter::{LogKey, LogLimiter, LogScope};
use crate::consideration::EvalContext;
use crate::context::{
    apply_to_host_scheduler, AgentContext, AgentId, Aggregates, AutonomyGate, CategoryId,
    HostDispatcher, LocalAggregates, MapStateProvider, WorldStateProvider,
};
use crate::registry::StrategyRegistry;
use crate::score::{PriorityScale, Score};
use std::collections::{HashMap, HashSet};

/// Read-only inputs for one computation.
#[derive(Clone, Copy)]
pub struct Environment<'a> {
    pub world: &'a dyn WorldStateProvider,
    pub map: &'a dyn MapStateProvider,
    pub aggregates: &'a Aggregates,
    /// Spatial facts for the agent being scored.
    pub local: Option<&'a LocalAggregates>,
}

/// Where an evaluation's score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Source {
    /// The category's pipeline ran.
    Computed,
    /// Setup failed; the constant fallback score was used.
    Fallback,
    /// The agent is under manual control; the host's level was mirrored.
    Manual,
}

/// Outcome of scoring one (agent, category) pair.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub agent: AgentId,
    pub category: CategoryId,
    pub score: Score,
    pub level: u8,
    pub source: Source,
    /// Whether the host table was changed.
    pub written: bool,
}

impl Evaluation {
    /// `false` when the category could not be set up this tick.
    pub fn is_available(&self) -> bool {
        self.source != Source::Fallback
    }
}

/// Runs category pipelines and turns their scores into host levels.
///
/// The engine owns the only mutable state of the scoring side: which pipeline
/// steps have been zeroed after failing, per-agent setup failure counts, the
/// set of agents whose autonomy was revoked, and the log limiter.
///
/// # Examples
///
/// ```ignore
/// let mut engine = PriorityEngine::with_defaults();
/// let env = Environment { world: &settings, map: &map, aggregates: &aggregates, local: None };
/// let score = engine.compute_score(&agent, &categories::MINING, &env);
/// let level = engine.to_priority_level(&score);
/// ```
pub struct PriorityEngine {
    config: EngineConfig,
    scale: PriorityScale,
    registry: StrategyRegistry,
    zeroed: HashMap<CategoryId, HashSet<usize>>,
    limiter: LogLimiter,
    setup_failures: HashMap<AgentId, u32>,
    revoked: HashSet<AgentId>,
}

impl PriorityEngine {
    /// Creates an engine after validating the configuration and registry.
    pub fn new(config: EngineConfig, registry: StrategyRegistry) -> Result<Self, ConfigError> {
        config.validate()?;
        registry.validate()?;
        Ok(Self {
            scale: PriorityScale::new(config.max_level),
            config,
            registry,
            zeroed: HashMap::new(),
            limiter: LogLimiter::new(),
            setup_failures: HashMap::new(),
            revoked: HashSet::new(),
        })
    }

    /// Default configuration with the built-in registry.
    pub fn with_defaults() -> Self {
        let config = EngineConfig::default();
        Self {
            scale: PriorityScale::new(config.max_level),
            config,
            registry: StrategyRegistry::builtin(),
            zeroed: HashMap::new(),
            limiter: LogLimiter::new(),
            setup_failures: HashMap::new(),
            revoked: HashSet::new(),
        }
    }

    /// The validated configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The host priority scale derived from `max_level`.
    pub fn scale(&self) -> PriorityScale {
        self.scale
    }

    /// The category pipelines.
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Failure-log limiter, for inspecting suppressed repeats.
    pub fn limiter(&self) -> &LogLimiter {
        &self.limiter
    }

    /// Scores `category` for `agent`.
    ///
    /// Never fails: failing considerations are isolated, and an invalid setup
    /// yields the fallback score.
    pub fn compute_score(
        &mut self,
        agent: &dyn AgentContext,
        category: &CategoryId,
        env: &Environment<'_>,
    ) -> Score {
        self.score_pair(agent, category, env).0
    }

    /// Host level for a score.
    pub fn to_priority_level(&self, score: &Score) -> u8 {
        self.scale.to_level(score)
    }

    /// Gate, score, discretize and write one (agent, category) pair.
    ///
    /// Agents outside autonomous control are not scored; their current host
    /// level is mirrored into a display score instead and nothing is written.
    pub fn evaluate(
        &mut self,
        agent: &dyn AgentContext,
        category: &CategoryId,
        env: &Environment<'_>,
        gate: &dyn AutonomyGate,
        host: &mut dyn HostDispatcher,
    ) -> Evaluation {
        let id = agent.id();
        let previous = host.priority(id, category);

        if !self.is_autonomous(id, gate) {
            let level = previous.unwrap_or(0);
            return Evaluation {
                agent: id,
                category: category.clone(),
                score: self.scale.from_level(level, self.config.verbose),
                level,
                source: Source::Manual,
                written: false,
            };
        }

        let (score, source) = match previous {
            Some(_) => self.score_pair(agent, category, env),
            None => {
                let err = SetupError::CategoryUnsupported(category.clone());
                (self.fallback(id, category, &err), Source::Fallback)
            }
        };

        let level = match source {
            Source::Computed => {
                self.scale
                    .level_with_hysteresis(&score, previous, self.config.hysteresis)
            }
            _ => self.scale.to_level(&score),
        };
        let written = previous.is_some() && apply_to_host_scheduler(host, id, category, level);

        Evaluation {
            agent: id,
            category: category.clone(),
            score,
            level,
            source,
            written,
        }
    }

    /// Autonomous per the gate and not revoked by the engine.
    pub fn is_autonomous(&self, agent: AgentId, gate: &dyn AutonomyGate) -> bool {
        gate.is_autonomous(agent) && !self.revoked.contains(&agent)
    }

    /// Whether the engine took this agent out of autonomous control.
    pub fn is_revoked(&self, agent: AgentId) -> bool {
        self.revoked.contains(&agent)
    }

    /// Hands a revoked agent back to the engine. Returns `false` if it was
    /// not revoked.
    pub fn restore_autonomy(&mut self, agent: AgentId) -> bool {
        self.setup_failures.remove(&agent);
        self.revoked.remove(&agent)
    }

    /// Drops everything the engine remembers about an agent that left:
    /// its setup failure streak, any revocation and its log keys.
    pub fn forget_agent(&mut self, agent: AgentId) {
        self.setup_failures.remove(&agent);
        self.revoked.remove(&agent);
        self.limiter.forget_agent(agent);
    }

    /// Whether step `index` of `category`'s pipeline has been zeroed.
    pub fn is_step_zeroed(&self, category: &CategoryId, index: usize) -> bool {
        self.zeroed
            .get(category)
            .is_some_and(|steps| steps.contains(&index))
    }

    /// Re-enables every zeroed step and re-arms failure logging.
    pub fn reinstate_considerations(&mut self) {
        self.zeroed.clear();
        self.limiter.clear();
    }

    fn score_pair(
        &mut self,
        agent: &dyn AgentContext,
        category: &CategoryId,
        env: &Environment<'_>,
    ) -> (Score, Source) {
        match agent.validate(category) {
            Ok(()) => {
                self.setup_failures.remove(&agent.id());
                (self.run_pipeline(agent, category, env), Source::Computed)
            }
            Err(err) => {
                let score = self.fallback(agent.id(), category, &err);
                self.count_setup_failure(agent.id(), &err);
                (score, Source::Fallback)
            }
        }
    }

    fn run_pipeline(
        &mut self,
        agent: &dyn AgentContext,
        category: &CategoryId,
        env: &Environment<'_>,
    ) -> Score {
        let Self {
            config,
            registry,
            zeroed,
            limiter,
            ..
        } = self;

        let ctx = EvalContext {
            agent,
            category,
            world: env.world,
            map: env.map,
            aggregates: env.aggregates,
            local: env.local,
            idle_window: config.idle_window,
        };
        let mut score = Score::new(config.verbose);

        for (index, step) in registry.resolve(category).steps().iter().enumerate() {
            if zeroed
                .get(category)
                .is_some_and(|steps| steps.contains(&index))
            {
                continue;
            }
            let setting = env.world.consideration_setting(step.name());
            if !setting.enabled {
                continue;
            }
            if !setting.weight.is_finite() {
                let key = LogKey::new(
                    format!("setting:{}", step.name()),
                    LogScope::Category(category.clone()),
                );
                if limiter.should_log(key) {
                    tracing::warn!(
                        target: "taskprio",
                        category = %category,
                        consideration = step.name(),
                        weight = setting.weight,
                        "invalid_setting_skipped"
                    );
                }
                continue;
            }

            let checkpoint = score.checkpoint();
            let weight = step.weight() * setting.weight;
            if let Err(err) = step.consideration().evaluate(&mut score, weight, &ctx) {
                score.restore(checkpoint);
                zeroed.entry(category.clone()).or_default().insert(index);
                let key = LogKey::new(
                    step.name().to_string(),
                    LogScope::Category(category.clone()),
                );
                if limiter.should_log(key) {
                    tracing::warn!(
                        target: "taskprio",
                        agent = %agent.id(),
                        category = %category,
                        consideration = step.name(),
                        step = index,
                        error = %err,
                        "consideration_failed_zeroed"
                    );
                }
            }
        }
        score
    }

    fn fallback(&mut self, agent: AgentId, category: &CategoryId, err: &SetupError) -> Score {
        let mut score = Score::new(self.config.verbose);
        score.reset(self.config.fallback_value, "fallback: category unavailable");

        let key = LogKey::new("setup_failed", LogScope::Category(category.clone()));
        if self.limiter.should_log(key) {
            tracing::warn!(
                target: "taskprio",
                agent = %agent,
                category = %category,
                error = %err,
                "setup_failed_fallback"
            );
        }

        score
    }

    /// Unsupported categories are the host's business and never count here.
    fn count_setup_failure(&mut self, agent: AgentId, err: &SetupError) {
        if matches!(err, SetupError::CategoryUnsupported(_)) {
            return;
        }
        let failures = {
            let count = self.setup_failures.entry(agent).or_insert(0);
            *count += 1;
            *count
        };
        if failures >= self.config.max_setup_failures {
            self.setup_failures.remove(&agent);
            self.revoke(agent, err);
        }
    }

    fn revoke(&mut self, agent: AgentId, err: &SetupError) {
        if !self.revoked.insert(agent) {
            return;
        }
        let key = LogKey::new("autonomy_revoked", LogScope::Agent(agent));
        if self.limiter.should_log(key) {
            tracing::error!(
                target: "taskprio",
                agent = %agent,
                error = %err,
                failures = self.config.max_setup_failures,
                "autonomy_revoked"
            );
        }
    }
}
