//! Ordered consideration pipelines.

use crate::consideration::{Builtin, Consideration};
use std::fmt;
use std::sync::Arc;

/// A consideration paired with its signed weight.
#[derive(Clone)]
pub struct Step {
    consideration: Arc<dyn Consideration>,
    weight: f64,
}

impl Step {
    pub fn new(consideration: Arc<dyn Consideration>, weight: f64) -> Self {
        Self {
            consideration,
            weight,
        }
    }

    pub fn consideration(&self) -> &dyn Consideration {
        self.consideration.as_ref()
    }

    pub fn name(&self) -> &str {
        self.consideration.name()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("consideration", &self.name())
            .field("weight", &self.weight)
            .finish()
    }
}

/// Ordered list of considerations for one category.
///
/// Order matters: later steps see the effects of earlier ones, and a later
/// override can undo an earlier one.
///
/// # Examples
///
/// ```
/// use u_taskprio::consideration::Builtin;
/// use u_taskprio::registry::Pipeline;
///
/// let pipeline = Pipeline::new("mining")
///     .then(Builtin::Baseline, 0.4)
///     .then(Builtin::Skill, 0.6)
///     .then(Builtin::Incapable, 1.0);
///
/// assert_eq!(pipeline.step_names(), vec!["baseline", "skill", "incapable"]);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Builds a pipeline from a static table of built-in steps.
    pub fn from_table(name: impl Into<String>, table: &[(Builtin, f64)]) -> Self {
        table
            .iter()
            .fold(Self::new(name), |p, &(rule, weight)| p.then(rule, weight))
    }

    /// Appends a built-in consideration.
    pub fn then(self, rule: Builtin, weight: f64) -> Self {
        self.then_custom(Arc::new(rule), weight)
    }

    /// Appends any consideration.
    pub fn then_custom(mut self, consideration: Arc<dyn Consideration>, weight: f64) -> Self {
        self.steps.push(Step::new(consideration, weight));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Validates the pipeline.
    pub fn validate(&self) -> Result<(), String> {
        if self.steps.is_empty() {
            return Err(format!("pipeline `{}` has no steps", self.name));
        }
        for (i, step) in self.steps.iter().enumerate() {
            if !step.weight.is_finite() {
                return Err(format!(
                    "pipeline `{}` step {i} ({}) has a non-finite weight",
                    self.name,
                    step.name()
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_table_preserves_order() {
        let p = Pipeline::from_table(
            "t",
            &[
                (Builtin::Baseline, 0.3),
                (Builtin::MidTask, 0.1),
                (Builtin::Incapable, 1.0),
            ],
        );
        assert_eq!(p.step_names(), vec!["baseline", "mid_task", "incapable"]);
        assert_eq!(p.len(), 3);
        assert!((p.steps()[1].weight() - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_validate() {
        assert!(Pipeline::new("empty").validate().is_err());
        assert!(Pipeline::new("nan")
            .then(Builtin::Skill, f64::NAN)
            .validate()
            .is_err());
        assert!(Pipeline::new("ok").then(Builtin::Skill, 0.5).validate().is_ok());
    }

    #[test]
    fn test_step_debug_shows_name() {
        let p = Pipeline::new("p").then(Builtin::Idle, 0.2);
        let text = format!("{:?}", p.steps()[0]);
        assert!(text.contains("idle"));
    }
}
