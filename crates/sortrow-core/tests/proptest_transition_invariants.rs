//! Property-based invariant tests for offset transitions and input routing.
//!
//! 1. A transition's value never leaves the segment between its endpoints
//!    (no overshoot for any easing curve).
//! 2. Ticking in any number of steps that sum past the duration lands
//!    exactly on the target.
//! 3. Every subscription is released by exactly one unsubscribe.

use std::time::Duration;

use proptest::prelude::*;
use sortrow_core::input::{InputChannels, InputRouter, InputSource, ListenerId};
use sortrow_core::transition::{Easing, OffsetTransition};

// ── Strategies ──────────────────────────────────────────────────────────

fn easing_strategy() -> impl Strategy<Value = Easing> {
    prop_oneof![Just(Easing::Linear), Just(Easing::EaseOut), Just(Easing::EaseInOut)]
}

fn ticks() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..80, 1..40)
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2. Transitions stay bounded and land on target
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn value_stays_between_endpoints(
        from in -5_000i32..5_000,
        to in -5_000i32..5_000,
        duration_ms in 0u64..500,
        easing in easing_strategy(),
        steps in ticks(),
    ) {
        let mut tr = OffsetTransition::new(from, to, Duration::from_millis(duration_ms), easing);
        let (low, high) = (from.min(to), from.max(to));
        for step in steps {
            tr.tick(Duration::from_millis(step));
            let value = tr.value();
            prop_assert!(value >= low && value <= high, "{} outside [{}, {}]", value, low, high);
            prop_assert!((0.0..=1.0).contains(&tr.progress()));
        }
    }

    #[test]
    fn enough_ticks_land_on_target(
        from in -5_000i32..5_000,
        to in -5_000i32..5_000,
        duration_ms in 1u64..300,
        easing in easing_strategy(),
        step_ms in 1u64..50,
    ) {
        let mut tr = OffsetTransition::new(from, to, Duration::from_millis(duration_ms), easing);
        let mut elapsed = 0;
        while elapsed < duration_ms {
            tr.tick(Duration::from_millis(step_ms));
            elapsed += step_ms;
        }
        prop_assert!(tr.is_complete());
        prop_assert_eq!(tr.value(), to);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Subscriptions are released exactly once
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn each_subscription_releases_once(listeners in prop::collection::vec(1u64..20, 0..30)) {
        let mut router = InputRouter::new();
        let ids: Vec<_> = listeners
            .iter()
            .map(|raw| router.subscribe(ListenerId(*raw), InputChannels::MOVE | InputChannels::END))
            .collect();
        prop_assert_eq!(router.len(), listeners.len());

        for id in &ids {
            prop_assert!(router.unsubscribe(*id));
            prop_assert!(!router.unsubscribe(*id));
        }
        prop_assert!(router.is_empty());
    }
}
