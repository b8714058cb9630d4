#![forbid(unsafe_code)]

//! Eased transitions for a single pixel offset.
//!
//! When a sibling row is reflowed its rank changes immediately, but its
//! visual offset glides from where it was to where the new rank puts it.
//! An [`OffsetTransition`] is that glide: it is ticked with elapsed time by
//! the host's frame loop and reports the offset to draw.
//!
//! # Invariants
//!
//! 1. `value()` equals `from` before the first tick and `to` once complete.
//! 2. Progress is clamped to `[0.0, 1.0]`; ticking past the end is harmless.
//! 3. Zero duration is clamped to 1ns to avoid division by zero, so a
//!    zero-length transition completes on its first non-zero tick.
//! 4. Retargeting keeps the current visual value as the new start, so a
//!    row that is reflowed twice in quick succession never jumps.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, gentle landing (cubic).
    #[default]
    EaseOut,
    /// Gentle start and landing (cubic).
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

const MIN_DURATION: Duration = Duration::from_nanos(1);

/// A time-driven glide of one offset from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTransition {
    from: i32,
    to: i32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl OffsetTransition {
    /// Create a transition that has not started yet.
    #[must_use]
    pub fn new(from: i32, to: i32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: duration.max(MIN_DURATION),
            easing,
        }
    }

    /// Advance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    /// Linear progress in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
    }

    /// Offset to draw right now.
    #[must_use]
    pub fn value(&self) -> i32 {
        if self.is_complete() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        let span = f64::from(self.to) - f64::from(self.from);
        (f64::from(self.from) + span * eased).round() as i32
    }

    /// Final offset.
    #[must_use]
    pub const fn target(&self) -> i32 {
        self.to
    }

    /// Whether the glide has reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Restart toward `to` from the current visual value.
    pub fn retarget(&mut self, to: i32) {
        *self = Self::new(self.value(), to, self.duration, self.easing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_150: Duration = Duration::from_millis(150);

    #[test]
    fn starts_at_from_and_lands_on_to() {
        let mut tr = OffsetTransition::new(20, 60, MS_150, Easing::EaseOut);
        assert_eq!(tr.value(), 20);
        tr.tick(MS_150);
        assert!(tr.is_complete());
        assert_eq!(tr.value(), 60);
    }

    #[test]
    fn ease_out_is_ahead_of_linear_midway() {
        let mut eased = OffsetTransition::new(0, 100, MS_150, Easing::EaseOut);
        let mut linear = OffsetTransition::new(0, 100, MS_150, Easing::Linear);
        eased.tick(Duration::from_millis(75));
        linear.tick(Duration::from_millis(75));
        assert_eq!(linear.value(), 50);
        assert!(eased.value() > linear.value());
    }

    #[test]
    fn moving_upward_interpolates_downward_values() {
        let mut tr = OffsetTransition::new(80, 40, MS_150, Easing::Linear);
        tr.tick(Duration::from_millis(75));
        assert_eq!(tr.value(), 60);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut tr = OffsetTransition::new(0, 10, Duration::ZERO, Easing::EaseInOut);
        tr.tick(Duration::from_millis(1));
        assert!(tr.is_complete());
        assert_eq!(tr.value(), 10);
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut tr = OffsetTransition::new(0, 100, MS_150, Easing::Linear);
        tr.tick(Duration::from_millis(75));
        tr.retarget(0);
        assert_eq!(tr.value(), 50);
        assert_eq!(tr.target(), 0);
        assert!(!tr.is_complete());
    }

    #[test]
    fn easing_curves_are_pinned_at_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            assert_eq!(easing.apply(-3.0), 0.0);
        }
    }
}
