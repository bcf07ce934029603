//! Scheduler configuration and refresh actions.

use crate::context::{Aggregates, MapStateProvider};

/// One map-wide aggregate update. Each action overwrites exactly one field of
/// [`Aggregates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefreshAction {
    ColonyHealth,
    Hazards,
    Scarcity,
    Deterioration,
    IdleMemory,
}

impl RefreshAction {
    /// Every action, in the default order.
    pub const ALL: [RefreshAction; 5] = [
        RefreshAction::ColonyHealth,
        RefreshAction::Hazards,
        RefreshAction::Scarcity,
        RefreshAction::Deterioration,
        RefreshAction::IdleMemory,
    ];

    /// Pulls the action's fact from the map into `aggregates`.
    pub fn apply(self, aggregates: &mut Aggregates, map: &dyn MapStateProvider) {
        match self {
            RefreshAction::ColonyHealth => aggregates.colony_health = map.colony_health(),
            RefreshAction::Hazards => aggregates.hazards = map.hazards(),
            RefreshAction::Scarcity => aggregates.scarcity = map.scarcity(),
            RefreshAction::Deterioration => aggregates.deterioration = map.deterioration(),
            RefreshAction::IdleMemory => aggregates.idle_memory = map.idle_memory(),
        }
    }
}

/// Configuration for the [`IncrementalScheduler`](super::IncrementalScheduler).
///
/// # Examples
///
/// ```
/// use u_taskprio::scheduler::{RefreshAction, SchedulerConfig};
///
/// let config = SchedulerConfig::default()
///     .with_refresh_actions(vec![RefreshAction::Hazards, RefreshAction::Scarcity]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Refresh actions run one per tick at the start of every cycle.
    pub refresh_actions: Vec<RefreshAction>,

    /// Keep the latest score of every (agent, category) pair for inspection.
    pub retain_scores: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_actions: RefreshAction::ALL.to_vec(),
            retain_scores: true,
        }
    }
}

impl SchedulerConfig {
    /// Sets the refresh actions, in order.
    pub fn with_refresh_actions(mut self, actions: Vec<RefreshAction>) -> Self {
        self.refresh_actions = actions;
        self
    }

    /// Sets whether the latest scores are kept for inspection.
    pub fn with_retain_scores(mut self, retain: bool) -> Self {
        self.retain_scores = retain;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        for (i, action) in self.refresh_actions.iter().enumerate() {
            if self.refresh_actions[..i].contains(action) {
                return Err(format!("refresh action {action:?} listed twice"));
            }
        }
        Ok(())
    }
}
