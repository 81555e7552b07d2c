//! Property-based invariant tests for the scroll and pointer trackers.
//!
//! 1. Scroll progress is always within [0, 1]
//! 2. progress(0) = 0 and progress(max_scroll) = 1
//! 3. Element visibility is always within [0, 1]
//! 4. Any pointer farther than the radius yields a zero offset, not hovered
//! 5. Pointer leave always yields a zero offset
//! 6. Throttling never accepts two samples inside one window

use proptest::prelude::*;
use showroom_core::geometry::{Bounds, DocumentMetrics, Point, Viewport};
use showroom_core::pointer::{PointerConfig, PointerOffset, PointerTarget, PointerTracker};
use showroom_core::scroll::{
    ScrollConfig, ScrollOutcome, ScrollTracker, element_visibility, progress_for,
};
use web_time::{Duration, Instant};

// ── Strategies ──────────────────────────────────────────────────────────

fn metrics_strategy() -> impl Strategy<Value = DocumentMetrics> {
    (0.0f64..20_000.0, 1.0f64..2_000.0)
        .prop_map(|(doc, vh)| DocumentMetrics::new(doc, Viewport::new(1280.0, vh)))
}

fn bounds_strategy() -> impl Strategy<Value = Bounds> {
    (-2_000.0f64..2_000.0, -2_000.0f64..2_000.0, 0.0f64..800.0, 0.0f64..800.0)
        .prop_map(|(l, t, w, h)| Bounds::new(l, t, w, h))
}

proptest! {
    #[test]
    fn progress_is_clamped(offset in -1e6f64..1e6, m in metrics_strategy()) {
        let p = progress_for(offset, &m);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn progress_endpoints(m in metrics_strategy()) {
        prop_assert!(progress_for(0.0, &m).abs() < f64::EPSILON);
        if m.max_scroll() > 0.0 {
            prop_assert!((progress_for(m.max_scroll(), &m) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn visibility_is_clamped(vh in 0.0f64..3_000.0, b in bounds_strategy()) {
        let v = element_visibility(vh, &b);
        prop_assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn beyond_radius_is_zero(
        b in bounds_strategy(),
        radius in 1.0f64..500.0,
        angle in 0.0f64..std::f64::consts::TAU,
        extra in 0.001f64..1_000.0,
    ) {
        let mut t = PointerTracker::new(
            PointerTarget::Element(b),
            PointerConfig { radius, strength: 0.3 },
        );
        let c = b.center();
        let d = radius + extra;
        let off = t.on_move(Point::new(c.x + d * angle.cos(), c.y + d * angle.sin()));
        prop_assert!(off.is_zero());
        prop_assert!(!t.is_hovered());
    }

    #[test]
    fn leave_is_always_zero(b in bounds_strategy(), x in -3_000.0f64..3_000.0, y in -3_000.0f64..3_000.0) {
        let mut t = PointerTracker::new(PointerTarget::Element(b), PointerConfig::default());
        t.on_move(Point::new(x, y));
        prop_assert_eq!(t.on_leave(), PointerOffset::ZERO);
        prop_assert!(!t.is_hovered());
    }

    #[test]
    fn throttle_window_holds(
        gaps in proptest::collection::vec(0u64..40, 1..60),
        m in metrics_strategy(),
    ) {
        let base = Instant::now();
        let mut tracker = ScrollTracker::new(ScrollConfig::default(), m, 0.0);
        let mut now = base;
        let mut last_accepted: Option<Instant> = None;
        for (i, gap) in gaps.iter().enumerate() {
            now += Duration::from_millis(*gap);
            if let ScrollOutcome::Accepted(sample) = tracker.on_scroll(i as f64 * 10.0, now) {
                if let Some(prev) = last_accepted {
                    prop_assert!(now.duration_since(prev) >= Duration::from_millis(16));
                }
                prop_assert!((0.0..=1.0).contains(&sample.ratio));
                last_accepted = Some(now);
            }
        }
    }
}
