//! Discretization of scores into host priority levels.

use super::types::{clamp01, Score};

/// The host's priority scale: `0` means "never", `1..=max_level` are active
/// levels with `1` the most urgent.
///
/// Scores at or below the low cutoff collapse to `0` unless forced on, in
/// which case they take the least urgent active level.
///
/// # Examples
///
/// ```
/// use u_taskprio::score::{PriorityScale, Score};
///
/// let scale = PriorityScale::new(4);
/// assert_eq!(scale.low_cutoff(), 20);
///
/// let mut score = Score::new(false);
/// score.reset(1.0, "eager");
/// assert_eq!(scale.to_level(&score), 1);
///
/// score.reset(0.2, "barely");
/// assert_eq!(scale.to_level(&score), 0);
/// score.force_on_if(true, "emergency");
/// assert_eq!(scale.to_level(&score), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriorityScale {
    max_level: u8,
}

impl Default for PriorityScale {
    fn default() -> Self {
        Self { max_level: 4 }
    }
}

impl PriorityScale {
    /// Creates a scale with `max_level` active levels (at least 1).
    pub fn new(max_level: u8) -> Self {
        Self {
            max_level: max_level.max(1),
        }
    }

    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    /// Integer percentage at or below which a score is inactive.
    pub fn low_cutoff(&self) -> u32 {
        100 / (self.max_level as u32 + 1)
    }

    fn span(&self) -> u32 {
        100 - self.low_cutoff()
    }

    /// Width of one level's band, in percentage points.
    fn unit(&self) -> f64 {
        self.span() as f64 / self.max_level as f64
    }

    /// Score value as an integer percentage in [0, 100].
    pub fn percent(value: f64) -> u32 {
        (clamp01(value) * 100.0).round() as u32
    }

    /// Maps a score to a host level.
    pub fn to_level(&self, score: &Score) -> u8 {
        if score.forced_off() {
            return 0;
        }
        let int_val = Self::percent(score.value());
        let low_cutoff = self.low_cutoff();
        if int_val <= low_cutoff {
            return if score.forced_on() { self.max_level } else { 0 };
        }
        let inverted = (self.span() - (int_val - low_cutoff)) as f64;
        let level = (inverted / self.unit()).floor() as i64 + 1;
        level.clamp(1, self.max_level as i64) as u8
    }

    /// Like [`to_level`](Self::to_level), but sticks to `previous` while the
    /// score stays within `margin` percentage points of `previous`'s band.
    ///
    /// The forced-off and low-cutoff rules are never overridden.
    pub fn level_with_hysteresis(&self, score: &Score, previous: Option<u8>, margin: u32) -> u8 {
        let raw = self.to_level(score);
        let Some(prev) = previous else {
            return raw;
        };
        let int_val = Self::percent(score.value());
        if margin == 0
            || raw == prev
            || score.forced_off()
            || int_val <= self.low_cutoff()
            || prev == 0
            || prev > self.max_level
        {
            return raw;
        }
        // Band of `prev` is (100 - prev*unit, 100 - (prev-1)*unit].
        let unit = self.unit();
        let upper = 100.0 - (prev as f64 - 1.0) * unit + margin as f64;
        let lower = 100.0 - prev as f64 * unit - margin as f64;
        let v = int_val as f64;
        if v > lower && v <= upper {
            prev
        } else {
            raw
        }
    }

    /// Representative value for a manually assigned level.
    ///
    /// This is lossy on purpose and only meant for showing a manual
    /// priority on the same scale as computed scores.
    pub fn value_for_level(&self, level: u8) -> f64 {
        if level == 0 {
            return 0.0;
        }
        let p = level.min(self.max_level) as f64;
        (100.0 - self.unit() * (p - 1.0)) / 100.0
    }

    /// Builds a display score from a manually assigned level.
    pub fn from_level(&self, level: u8, verbose: bool) -> Score {
        let mut score = Score::new(verbose);
        score.reset(self.value_for_level(level), "manual priority");
        score.force_off_if(level == 0, "manually disabled");
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score(value: f64) -> Score {
        let mut s = Score::new(false);
        s.reset(value, "test");
        s
    }

    #[test]
    fn test_boundary_example() {
        let scale = PriorityScale::new(4);
        assert_eq!(scale.low_cutoff(), 20);
        assert_eq!(scale.to_level(&score(0.20)), 0);

        let mut forced = score(0.20);
        forced.force_on_if(true, "on");
        assert_eq!(scale.to_level(&forced), 4);

        assert_eq!(scale.to_level(&score(1.0)), 1);
    }

    #[test]
    fn test_band_edges_n4() {
        let scale = PriorityScale::new(4);
        assert_eq!(scale.to_level(&score(0.21)), 4);
        assert_eq!(scale.to_level(&score(0.40)), 4);
        assert_eq!(scale.to_level(&score(0.41)), 3);
        assert_eq!(scale.to_level(&score(0.60)), 3);
        assert_eq!(scale.to_level(&score(0.61)), 2);
        assert_eq!(scale.to_level(&score(0.80)), 2);
        assert_eq!(scale.to_level(&score(0.81)), 1);
    }

    #[test]
    fn test_forced_off_dominates() {
        let scale = PriorityScale::new(4);
        let mut s = score(1.0);
        s.force_on_if(true, "on");
        s.force_off_if(true, "off");
        assert_eq!(scale.to_level(&s), 0);
    }

    #[test]
    fn test_forced_on_in_active_band_keeps_value_level() {
        let scale = PriorityScale::new(4);
        let mut s = score(0.9);
        s.force_on_if(true, "on");
        assert_eq!(scale.to_level(&s), 1);
    }

    #[test]
    fn test_larger_scale() {
        let scale = PriorityScale::new(9);
        assert_eq!(scale.low_cutoff(), 10);
        assert_eq!(scale.to_level(&score(1.0)), 1);
        assert_eq!(scale.to_level(&score(0.11)), 9);
        assert_eq!(scale.to_level(&score(0.10)), 0);
    }

    #[test]
    fn test_zero_max_level_is_raised_to_one() {
        let scale = PriorityScale::new(0);
        assert_eq!(scale.max_level(), 1);
        assert_eq!(scale.low_cutoff(), 50);
        assert_eq!(scale.to_level(&score(0.51)), 1);
    }

    #[test]
    fn test_from_level_values() {
        let scale = PriorityScale::new(4);
        assert!((scale.value_for_level(1) - 1.0).abs() < 1e-10);
        assert!((scale.value_for_level(4) - 0.4).abs() < 1e-10);
        assert_eq!(scale.value_for_level(0), 0.0);

        let disabled = scale.from_level(0, false);
        assert!(disabled.forced_off());
        assert_eq!(scale.to_level(&disabled), 0);
    }

    #[test]
    fn test_from_level_maps_back_for_n4() {
        let scale = PriorityScale::new(4);
        for p in 0..=4 {
            assert_eq!(scale.to_level(&scale.from_level(p, false)), p);
        }
    }

    #[test]
    fn test_hysteresis_holds_previous_level_near_edge() {
        let scale = PriorityScale::new(4);
        // Band of level 1 is (80, 100].
        assert_eq!(scale.to_level(&score(0.79)), 2);
        assert_eq!(scale.level_with_hysteresis(&score(0.79), Some(1), 3), 1);
        assert_eq!(scale.level_with_hysteresis(&score(0.76), Some(1), 3), 2);
        assert_eq!(scale.level_with_hysteresis(&score(0.79), Some(1), 0), 2);
        assert_eq!(scale.level_with_hysteresis(&score(0.79), None, 3), 2);
    }

    #[test]
    fn test_hysteresis_never_overrides_cutoff_or_forced_off() {
        let scale = PriorityScale::new(4);
        assert_eq!(scale.level_with_hysteresis(&score(0.19), Some(4), 5), 0);
        let mut off = score(0.5);
        off.force_off_if(true, "off");
        assert_eq!(scale.level_with_hysteresis(&off, Some(3), 5), 0);
    }

    proptest! {
        #[test]
        fn prop_urgency_is_monotonic(max_level in 1u8..10, a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let scale = PriorityScale::new(max_level);
            let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
            prop_assume!(PriorityScale::percent(lo) > scale.low_cutoff());
            let l_hi = scale.to_level(&score(hi));
            let l_lo = scale.to_level(&score(lo));
            prop_assert!(l_hi >= 1 && l_hi <= max_level);
            prop_assert!(l_hi <= l_lo);
        }

        #[test]
        fn prop_forced_off_always_zero(v in 0.0f64..=1.0, on_first in any::<bool>()) {
            let scale = PriorityScale::default();
            let mut s = score(v);
            if on_first {
                s.force_on_if(true, "on");
            }
            s.force_off_if(true, "off");
            prop_assert_eq!(scale.to_level(&s), 0);
        }
    }
}
