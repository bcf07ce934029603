//! The score value object and its mutation primitives.

use std::borrow::Cow;
use std::fmt;

/// Clamps to [0, 1].
#[inline]
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// What a trail entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrailKind {
    /// Value set outright.
    Reset,
    /// Additive or multiplicative change.
    Delta,
    ForcedOn,
    ForcedOff,
    /// Boundary between resets in verbose mode.
    Separator,
}

/// One audit line: what changed, by how much, and why.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrailEntry {
    pub kind: TrailKind,
    pub delta: f64,
    pub label: Cow<'static, str>,
}

/// Saved state for rolling back a failed step.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    value: f64,
    forced_on: bool,
    forced_off: bool,
    trail_len: usize,
}

/// Normalized desirability of one category for one agent.
///
/// A score is built fresh for every computation and mutated only through
/// [`reset`](Score::reset), [`add`](Score::add), [`multiply`](Score::multiply),
/// [`force_on_if`](Score::force_on_if) and [`force_off_if`](Score::force_off_if).
///
/// Invariants: `value` is always in [0, 1] and the two override flags are
/// never both set. Once forced off, arithmetic is ignored until a later
/// `force_on_if` fires.
///
/// # Examples
///
/// ```
/// use u_taskprio::score::Score;
///
/// let mut score = Score::new(false);
/// score.reset(0.4, "baseline");
/// score.add(0.3, "skilled");
/// score.force_off_if(true, "incapable");
/// score.add(0.3, "ignored");
/// assert!((score.value() - 0.7).abs() < 1e-10);
/// assert!(score.forced_off());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    value: f64,
    forced_on: bool,
    forced_off: bool,
    verbose: bool,
    trail: Vec<TrailEntry>,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Score {
    /// Creates a zero score. In verbose mode every operation is logged and
    /// resets keep earlier history behind a separator.
    pub fn new(verbose: bool) -> Self {
        Self {
            value: 0.0,
            forced_on: false,
            forced_off: false,
            verbose,
            trail: Vec::new(),
        }
    }

    /// Current value in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether an override forced the category on.
    pub fn forced_on(&self) -> bool {
        self.forced_on
    }

    /// Whether an override disabled the category. Magnitude operations are ignored while set.
    pub fn forced_off(&self) -> bool {
        self.forced_off
    }

    /// Whether no-op operations are recorded too.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Every recorded contribution, oldest first.
    pub fn trail(&self) -> &[TrailEntry] {
        &self.trail
    }

    /// Sets the value outright. Non-finite values are ignored.
    pub fn reset(&mut self, v: f64, label: impl Into<Cow<'static, str>>) {
        if !v.is_finite() {
            return;
        }
        if self.verbose {
            if !self.trail.is_empty() {
                self.push(TrailKind::Separator, 0.0, Cow::Borrowed("--"));
            }
        } else {
            self.trail.clear();
        }
        self.value = clamp01(v);
        self.push(TrailKind::Reset, self.value, label.into());
    }

    /// Adds `delta`, clamped to `[0, 1]`. No effect while forced off.
    pub fn add(&mut self, delta: f64, label: impl Into<Cow<'static, str>>) {
        if self.forced_off || !delta.is_finite() {
            return;
        }
        let next = clamp01(self.value + delta);
        let applied = next - self.value;
        self.value = next;
        if applied != 0.0 || self.verbose {
            self.push(TrailKind::Delta, applied, label.into());
        }
    }

    /// Scales the value by `factor`, recorded as the equivalent delta.
    pub fn multiply(&mut self, factor: f64, label: impl Into<Cow<'static, str>>) {
        if self.forced_off || !factor.is_finite() {
            return;
        }
        let delta = clamp01(self.value * factor) - self.value;
        self.add(delta, label);
    }

    /// Forces the category on when `cond` holds, clearing any forced-off.
    pub fn force_on_if(&mut self, cond: bool, label: impl Into<Cow<'static, str>>) {
        if cond && !self.forced_on {
            self.forced_on = true;
            self.forced_off = false;
            self.push(TrailKind::ForcedOn, 0.0, label.into());
        }
    }

    /// Disables the category when `cond` holds, clearing any forced-on.
    pub fn force_off_if(&mut self, cond: bool, label: impl Into<Cow<'static, str>>) {
        if cond && !self.forced_off {
            self.forced_off = true;
            self.forced_on = false;
            self.push(TrailKind::ForcedOff, 0.0, label.into());
        }
    }

    /// Snapshot to roll back to with [`restore`](Self::restore).
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            value: self.value,
            forced_on: self.forced_on,
            forced_off: self.forced_off,
            trail_len: self.trail.len(),
        }
    }

    /// Rolls back every change made since `checkpoint`.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.value = checkpoint.value;
        self.forced_on = checkpoint.forced_on;
        self.forced_off = checkpoint.forced_off;
        self.trail.truncate(checkpoint.trail_len);
    }

    fn push(&mut self, kind: TrailKind, delta: f64, label: Cow<'static, str>) {
        self.trail.push(TrailEntry { kind, delta, label });
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.value * 100.0)?;
        if self.forced_on {
            f.write_str(" (forced on)")?;
        }
        if self.forced_off {
            f.write_str(" (forced off)")?;
        }
        for entry in &self.trail {
            match entry.kind {
                TrailKind::Reset => write!(f, "\n  = {:.0}% {}", entry.delta * 100.0, entry.label)?,
                TrailKind::Delta => write!(f, "\n  {:+.0}% {}", entry.delta * 100.0, entry.label)?,
                TrailKind::ForcedOn => write!(f, "\n  always: {}", entry.label)?,
                TrailKind::ForcedOff => write!(f, "\n  never: {}", entry.label)?,
                TrailKind::Separator => f.write_str("\n  --")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reset_clamps_and_clears_trail() {
        let mut s = Score::new(false);
        s.reset(0.3, "a");
        s.add(0.1, "b");
        s.reset(1.7, "c");
        assert!((s.value() - 1.0).abs() < 1e-10);
        assert_eq!(s.trail().len(), 1);
        assert_eq!(s.trail()[0].label, "c");
    }

    #[test]
    fn test_verbose_reset_keeps_history() {
        let mut s = Score::new(true);
        s.reset(0.3, "a");
        s.reset(0.5, "b");
        let kinds: Vec<TrailKind> = s.trail().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![TrailKind::Reset, TrailKind::Separator, TrailKind::Reset]
        );
    }

    #[test]
    fn test_add_logs_only_on_change() {
        let mut s = Score::new(false);
        s.reset(1.0, "full");
        s.add(0.2, "saturated");
        assert_eq!(s.trail().len(), 1);

        let mut v = Score::new(true);
        v.reset(1.0, "full");
        v.add(0.2, "saturated");
        assert_eq!(v.trail().len(), 2);
        assert_eq!(v.trail()[1].delta, 0.0);
    }

    #[test]
    fn test_multiply_matches_add() {
        let mut s = Score::new(false);
        s.reset(0.6, "base");
        s.multiply(0.5, "half");
        assert!((s.value() - 0.3).abs() < 1e-10);
        assert!((s.trail()[1].delta + 0.3).abs() < 1e-10);
    }

    #[test]
    fn test_force_flags_are_exclusive_last_writer_wins() {
        let mut s = Score::new(false);
        s.force_off_if(true, "off");
        s.force_on_if(true, "on");
        assert!(s.forced_on() && !s.forced_off());
        s.force_off_if(true, "off again");
        assert!(!s.forced_on() && s.forced_off());
    }

    #[test]
    fn test_force_on_logs_transition_once() {
        let mut s = Score::new(false);
        s.force_on_if(true, "on");
        s.force_on_if(true, "on again");
        s.force_on_if(false, "not taken");
        assert_eq!(s.trail().len(), 1);
        assert_eq!(s.trail()[0].kind, TrailKind::ForcedOn);
    }

    #[test]
    fn test_forced_on_reenables_arithmetic() {
        let mut s = Score::new(false);
        s.reset(0.2, "base");
        s.force_off_if(true, "off");
        s.add(0.5, "ignored");
        assert!((s.value() - 0.2).abs() < 1e-10);
        s.force_on_if(true, "emergency");
        s.add(0.5, "counted");
        assert!((s.value() - 0.7).abs() < 1e-10);
    }

    #[test]
    fn test_non_finite_inputs_are_ignored() {
        let mut s = Score::new(false);
        s.reset(0.5, "base");
        s.add(f64::NAN, "nan");
        s.multiply(f64::INFINITY, "inf");
        s.reset(f64::NAN, "nan reset");
        assert!((s.value() - 0.5).abs() < 1e-10);
        assert_eq!(s.trail().len(), 1);
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut s = Score::new(false);
        s.reset(0.5, "base");
        let cp = s.checkpoint();
        s.add(0.2, "x");
        s.force_off_if(true, "y");
        s.restore(cp);
        assert!((s.value() - 0.5).abs() < 1e-10);
        assert!(!s.forced_off());
        assert_eq!(s.trail().len(), 1);
    }

    #[test]
    fn test_display_lists_trail() {
        let mut s = Score::new(false);
        s.reset(0.4, "baseline");
        s.add(0.1, "skilled");
        s.force_on_if(true, "fire");
        let text = s.to_string();
        assert!(text.starts_with("50% (forced on)"));
        assert!(text.contains("+10% skilled"));
        assert!(text.contains("always: fire"));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Reset(f64),
        Add(f64),
        Multiply(f64),
        ForceOn(bool),
        ForceOff(bool),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-2.0f64..3.0).prop_map(Op::Reset),
            (-2.0f64..2.0).prop_map(Op::Add),
            (-3.0f64..3.0).prop_map(Op::Multiply),
            any::<bool>().prop_map(Op::ForceOn),
            any::<bool>().prop_map(Op::ForceOff),
        ]
    }

    fn apply(s: &mut Score, op: &Op) {
        match *op {
            Op::Reset(v) => s.reset(v, "reset"),
            Op::Add(d) => s.add(d, "add"),
            Op::Multiply(f) => s.multiply(f, "mul"),
            Op::ForceOn(c) => s.force_on_if(c, "on"),
            Op::ForceOff(c) => s.force_off_if(c, "off"),
        }
    }

    proptest! {
        #[test]
        fn prop_value_stays_clamped(ops in prop::collection::vec(op(), 0..64), verbose in any::<bool>()) {
            let mut s = Score::new(verbose);
            for op in &ops {
                apply(&mut s, op);
                prop_assert!((0.0..=1.0).contains(&s.value()));
                prop_assert!(!(s.forced_on() && s.forced_off()));
            }
        }

        #[test]
        fn prop_forced_off_is_sticky(
            base in 0.0f64..1.0,
            deltas in prop::collection::vec(-1.5f64..1.5, 1..32),
        ) {
            let mut s = Score::new(false);
            s.reset(base, "base");
            s.force_off_if(true, "off");
            let frozen = s.value();
            for (i, d) in deltas.iter().enumerate() {
                if i % 2 == 0 {
                    s.add(*d, "add");
                } else {
                    s.multiply(*d, "mul");
                }
                prop_assert_eq!(s.value(), frozen);
            }
        }
    }
}
