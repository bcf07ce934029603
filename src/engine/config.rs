//! Engine configuration.

/// Configuration for the [`PriorityEngine`](super::PriorityEngine).
///
/// # Examples
///
/// ```
/// use u_taskprio::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_max_level(9)
///     .with_hysteresis(2)
///     .with_verbose(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Number of active host priority levels (`N`).
    pub max_level: u8,

    /// Record every score operation, including no-op ones.
    pub verbose: bool,

    /// Score used when an (agent, category) pair cannot be set up.
    pub fallback_value: f64,

    /// Consecutive setup failures after which an agent loses autonomy.
    pub max_setup_failures: u32,

    /// Hysteresis margin around the previous level's band, in percentage
    /// points. 0 disables hysteresis.
    pub hysteresis: u32,

    /// How recently an agent must have idled to count as idle, in ticks.
    pub idle_window: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_level: 4,
            verbose: false,
            fallback_value: 0.5,
            max_setup_failures: 3,
            hysteresis: 0,
            idle_window: 2_500,
        }
    }
}

impl EngineConfig {
    /// Sets the number of active host levels.
    pub fn with_max_level(mut self, n: u8) -> Self {
        self.max_level = n;
        self
    }

    /// Sets verbose score recording.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the setup-failure fallback score.
    pub fn with_fallback_value(mut self, v: f64) -> Self {
        self.fallback_value = v;
        self
    }

    /// Sets the failure streak that revokes autonomy.
    pub fn with_max_setup_failures(mut self, n: u32) -> Self {
        self.max_setup_failures = n;
        self
    }

    /// Sets the hysteresis margin in percentage points.
    pub fn with_hysteresis(mut self, margin: u32) -> Self {
        self.hysteresis = margin;
        self
    }

    /// Sets the idle window in ticks.
    pub fn with_idle_window(mut self, ticks: u64) -> Self {
        self.idle_window = ticks;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_level == 0 || self.max_level > 9 {
            return Err(format!("max_level must be in 1..=9, got {}", self.max_level));
        }
        if !(0.0..=1.0).contains(&self.fallback_value) {
            return Err(format!(
                "fallback_value must be in [0, 1], got {}",
                self.fallback_value
            ));
        }
        if self.max_setup_failures == 0 {
            return Err("max_setup_failures must be at least 1".into());
        }
        if self.hysteresis > 50 {
            return Err(format!("hysteresis must be at most 50, got {}", self.hysteresis));
        }
        Ok(())
    }
}
