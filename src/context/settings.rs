//! Global consideration settings and per-category policy.

use super::ids::CategoryId;
use super::providers::WorldStateProvider;
use std::collections::HashMap;

/// Enable flag and weight multiplier for one consideration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsiderationSetting {
    pub enabled: bool,
    pub weight: f64,
}

impl Default for ConsiderationSetting {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: 1.0,
        }
    }
}

/// Table-backed [`WorldStateProvider`].
///
/// Considerations absent from the table use [`ConsiderationSetting::default`];
/// categories absent from the adjustment table get `0.0`.
///
/// # Examples
///
/// ```
/// use u_taskprio::context::{categories, WorldSettings, WorldStateProvider};
///
/// let settings = WorldSettings::default()
///     .with_disabled("passion")
///     .with_weight("skill", 0.5)
///     .with_category_adjustment(categories::ART, -0.2);
///
/// assert!(!settings.consideration_setting("passion").enabled);
/// assert!((settings.category_adjustment(&categories::ART) + 0.2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSettings {
    #[cfg_attr(feature = "serde", serde(default))]
    pub considerations: HashMap<String, ConsiderationSetting>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category_adjustments: HashMap<CategoryId, f64>,
}

impl WorldSettings {
    /// Disables the named consideration everywhere.
    pub fn with_disabled(mut self, name: &str) -> Self {
        self.considerations
            .entry(name.to_string())
            .or_default()
            .enabled = false;
        self
    }

    /// Sets the global weight multiplier of the named consideration.
    pub fn with_weight(mut self, name: &str, weight: f64) -> Self {
        self.considerations
            .entry(name.to_string())
            .or_default()
            .weight = weight;
        self
    }

    /// Sets the colony policy adjustment for a category.
    pub fn with_category_adjustment(mut self, category: CategoryId, adjustment: f64) -> Self {
        self.category_adjustments.insert(category, adjustment);
        self
    }

    /// Validates the settings. Call after loading them from the host; the
    /// engine skips non-finite weights rather than rejecting them.
    pub fn validate(&self) -> Result<(), String> {
        for (name, setting) in &self.considerations {
            if !setting.weight.is_finite() {
                return Err(format!("weight for `{name}` must be finite"));
            }
        }
        for (category, adjustment) in &self.category_adjustments {
            if !adjustment.is_finite() {
                return Err(format!("adjustment for `{category}` must be finite"));
            }
        }
        Ok(())
    }
}

impl WorldStateProvider for WorldSettings {
    fn consideration_setting(&self, name: &str) -> ConsiderationSetting {
        self.considerations.get(name).copied().unwrap_or_default()
    }

    fn category_adjustment(&self, category: &CategoryId) -> f64 {
        self.category_adjustments
            .get(category)
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::categories;

    #[test]
    fn test_unknown_consideration_defaults_enabled() {
        let settings = WorldSettings::default();
        let s = settings.consideration_setting("anything");
        assert!(s.enabled);
        assert!((s.weight - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_weight_and_disable_compose() {
        let settings = WorldSettings::default()
            .with_weight("skill", 0.25)
            .with_disabled("skill");
        let s = settings.consideration_setting("skill");
        assert!(!s.enabled);
        assert!((s.weight - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_missing_adjustment_is_zero() {
        let settings = WorldSettings::default();
        assert_eq!(settings.category_adjustment(&categories::MINING), 0.0);
    }

    #[test]
    fn test_validate_rejects_nan() {
        let settings = WorldSettings::default().with_weight("skill", f64::NAN);
        assert!(settings.validate().is_err());
        let settings = WorldSettings::default().with_category_adjustment(categories::ART, f64::INFINITY);
        assert!(settings.validate().is_err());
    }
}
