//! Strategy registry: which pipeline scores which category.
//!
//! Pipelines are data, not code paths. The registry maps each category to an
//! ordered list of weighted considerations, and falls back to a default
//! pipeline for categories it has never heard of.

mod pipeline;
mod tables;

pub use pipeline::{Pipeline, Step};
pub use tables::traits;

use crate::context::{categories, CategoryId};
use std::collections::HashMap;

/// Category → pipeline lookup.
///
/// # Examples
///
/// ```
/// use u_taskprio::context::{categories, CategoryId};
/// use u_taskprio::registry::StrategyRegistry;
///
/// let registry = StrategyRegistry::builtin();
/// assert_eq!(registry.resolve(&categories::HUNTING).name(), "hunting");
/// assert_eq!(registry.resolve(&CategoryId::new("brewing")).name(), "default");
/// ```
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    default: Pipeline,
    pipelines: HashMap<CategoryId, Pipeline>,
}

impl StrategyRegistry {
    /// Creates a registry with only a default pipeline.
    pub fn new(default: Pipeline) -> Self {
        Self {
            default,
            pipelines: HashMap::new(),
        }
    }

    /// The built-in default pipeline plus one pipeline per built-in category.
    pub fn builtin() -> Self {
        let table = [
            (categories::FIREFIGHTER, tables::FIREFIGHTER),
            (categories::PATIENT, tables::PATIENT),
            (categories::DOCTOR, tables::DOCTOR),
            (categories::BED_REST, tables::BED_REST),
            (categories::HUNTING, tables::HUNTING),
            (categories::COOKING, tables::COOKING),
            (categories::GROWING, tables::GROWING),
            (categories::CONSTRUCTION, tables::CONSTRUCTION),
            (categories::MINING, tables::MINING),
            (categories::CRAFTING, tables::CRAFTING),
            (categories::ART, tables::ART),
            (categories::HAULING, tables::HAULING),
            (categories::CLEANING, tables::CLEANING),
            (categories::RESEARCH, tables::RESEARCH),
        ];
        table.into_iter().fold(
            Self::new(Pipeline::from_table("default", tables::DEFAULT)),
            |registry, (category, steps)| {
                let name = category.to_string();
                registry.with_pipeline(category, Pipeline::from_table(name, steps))
            },
        )
    }

    /// Registers (or replaces) the pipeline for `category`.
    pub fn with_pipeline(mut self, category: CategoryId, pipeline: Pipeline) -> Self {
        self.pipelines.insert(category, pipeline);
        self
    }

    /// Replaces the default pipeline.
    pub fn with_default(mut self, pipeline: Pipeline) -> Self {
        self.default = pipeline;
        self
    }

    /// Pipeline for `category`, or the default one.
    pub fn resolve(&self, category: &CategoryId) -> &Pipeline {
        self.pipelines.get(category).unwrap_or(&self.default)
    }

    pub fn default_pipeline(&self) -> &Pipeline {
        &self.default
    }

    pub fn contains(&self, category: &CategoryId) -> bool {
        self.pipelines.contains_key(category)
    }

    /// Categories with a dedicated pipeline, in no particular order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryId> {
        self.pipelines.keys()
    }

    /// Validates every pipeline.
    pub fn validate(&self) -> Result<(), String> {
        self.default.validate()?;
        for pipeline in self.pipelines.values() {
            pipeline.validate()?;
        }
        Ok(())
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consideration::Builtin;

    #[test]
    fn test_builtin_covers_every_category() {
        let registry = StrategyRegistry::builtin();
        for category in categories::ALL.iter() {
            assert!(registry.contains(category), "missing {category}");
            assert_eq!(registry.resolve(category).name(), category.as_str());
        }
        assert!(registry.validate().is_ok());
    }

    #[test]
    fn test_unknown_category_uses_default() {
        let registry = StrategyRegistry::builtin();
        let p = registry.resolve(&CategoryId::new("brewing"));
        assert_eq!(p.name(), "default");
        assert_eq!(p.step_names()[0], "baseline");
    }

    #[test]
    fn test_every_builtin_pipeline_ends_incapable() {
        let registry = StrategyRegistry::builtin();
        let pipelines = registry
            .categories()
            .map(|c| registry.resolve(c))
            .chain(std::iter::once(registry.default_pipeline()));
        for p in pipelines {
            assert_eq!(p.step_names().last(), Some(&"incapable"), "{}", p.name());
            assert_eq!(p.step_names().first(), Some(&"baseline"), "{}", p.name());
        }
    }

    #[test]
    fn test_scarcity_weight_is_signed_per_category() {
        let registry = StrategyRegistry::builtin();
        let weight = |c: &CategoryId| {
            registry
                .resolve(c)
                .steps()
                .iter()
                .find(|s| s.name() == "scarcity_food")
                .map(|s| s.weight())
        };
        assert!(weight(&categories::COOKING).is_some_and(|w| w > 0.0));
        assert!(weight(&categories::ART).is_some_and(|w| w < 0.0));
    }

    #[test]
    fn test_category_exclusive_considerations() {
        let registry = StrategyRegistry::builtin();
        let has = |c: &CategoryId, name: &str| registry.resolve(c).step_names().contains(&name);
        assert!(has(&categories::HUNTING, "range_scaling"));
        assert!(has(&categories::CLEANING, "room_ownership"));
        assert!(!has(&categories::COOKING, "range_scaling"));
    }

    #[test]
    fn test_with_pipeline_overrides() {
        let registry = StrategyRegistry::builtin().with_pipeline(
            categories::ART,
            Pipeline::new("art_lite").then(Builtin::Baseline, 0.9),
        );
        assert_eq!(registry.resolve(&categories::ART).name(), "art_lite");
    }

    #[test]
    fn test_emergency_overrides_precede_downed() {
        let registry = StrategyRegistry::builtin();
        for category in [
            categories::FIREFIGHTER,
            categories::DOCTOR,
            CategoryId::new("unlisted"),
        ] {
            let names = registry.resolve(&category).step_names();
            let emergency = names
                .iter()
                .position(|n| n.ends_with("_emergency"))
                .unwrap();
            let downed = names.iter().position(|n| *n == "downed").unwrap();
            assert!(emergency < downed);
        }
    }
}
