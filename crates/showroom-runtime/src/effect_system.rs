#![forbid(unsafe_code)]

//! Host observability: listener and timer lifecycle counters.
//!
//! The host records every listener attach/detach and every timer
//! schedule/fire/cancel here. The counters are process-wide and monotonic;
//! tests compare deltas rather than absolute values.
//!
//! Each recording also emits a `tracing` event under the `showroom.host`
//! target with the component label that owns the resource.

use std::sync::atomic::{AtomicU64, Ordering};

use showroom_core::ListenerKinds;

// ---------------------------------------------------------------------------
// Monotonic counters
// ---------------------------------------------------------------------------

static LISTENERS_ATTACHED_TOTAL: AtomicU64 = AtomicU64::new(0);
static LISTENERS_DETACHED_TOTAL: AtomicU64 = AtomicU64::new(0);
static TIMERS_SCHEDULED_TOTAL: AtomicU64 = AtomicU64::new(0);
static TIMERS_FIRED_TOTAL: AtomicU64 = AtomicU64::new(0);
static TIMERS_CANCELLED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Total listeners attached (monotonic counter).
#[must_use]
pub fn listeners_attached_total() -> u64 {
    LISTENERS_ATTACHED_TOTAL.load(Ordering::Relaxed)
}

/// Total listeners detached (monotonic counter).
#[must_use]
pub fn listeners_detached_total() -> u64 {
    LISTENERS_DETACHED_TOTAL.load(Ordering::Relaxed)
}

/// Total timers scheduled (monotonic counter).
#[must_use]
pub fn timers_scheduled_total() -> u64 {
    TIMERS_SCHEDULED_TOTAL.load(Ordering::Relaxed)
}

/// Total timer firings, counting each interval period separately.
#[must_use]
pub fn timers_fired_total() -> u64 {
    TIMERS_FIRED_TOTAL.load(Ordering::Relaxed)
}

/// Total timers cancelled before completing (monotonic counter).
#[must_use]
pub fn timers_cancelled_total() -> u64 {
    TIMERS_CANCELLED_TOTAL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Listener instrumentation
// ---------------------------------------------------------------------------

/// Record a listener registration.
pub(crate) fn record_listener_attached(owner: &str, id: u64, kinds: ListenerKinds) {
    LISTENERS_ATTACHED_TOTAL.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(
        target: "showroom.host",
        owner = %owner,
        listener_id = id,
        kinds = ?kinds,
        "listener attached"
    );
}

/// Record a listener deregistration.
pub(crate) fn record_listener_detached(owner: &str, id: u64) {
    LISTENERS_DETACHED_TOTAL.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(
        target: "showroom.host",
        owner = %owner,
        listener_id = id,
        "listener detached"
    );
}

// ---------------------------------------------------------------------------
// Timer instrumentation
// ---------------------------------------------------------------------------

/// Record a timer being scheduled.
pub(crate) fn record_timer_scheduled(owner: &str, id: u64, repeating: bool) {
    TIMERS_SCHEDULED_TOTAL.fetch_add(1, Ordering::Relaxed);
    tracing::trace!(
        target: "showroom.host",
        owner = %owner,
        timer_id = id,
        repeating,
        "timer scheduled"
    );
}

/// Record a timer firing.
pub(crate) fn record_timer_fired(owner: &str, id: u64) {
    TIMERS_FIRED_TOTAL.fetch_add(1, Ordering::Relaxed);
    let _span = tracing::trace_span!("host.timer", owner = %owner, timer_id = id).entered();
    tracing::trace!(target: "showroom.host", owner = %owner, timer_id = id, "timer fired");
}

/// Record a timer cancellation.
pub(crate) fn record_timer_cancelled(owner: &str, id: u64) {
    TIMERS_CANCELLED_TOTAL.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(
        target: "showroom.host",
        owner = %owner,
        timer_id = id,
        "timer cancelled"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_counters_are_monotonic() {
        let attached = listeners_attached_total();
        let detached = listeners_detached_total();
        record_listener_attached("test", 1, ListenerKinds::SCROLL);
        record_listener_detached("test", 1);
        assert!(listeners_attached_total() > attached);
        assert!(listeners_detached_total() > detached);
    }

    #[test]
    fn timer_counters_are_monotonic() {
        let scheduled = timers_scheduled_total();
        let fired = timers_fired_total();
        let cancelled = timers_cancelled_total();
        record_timer_scheduled("test", 7, true);
        record_timer_fired("test", 7);
        record_timer_cancelled("test", 7);
        assert!(timers_scheduled_total() > scheduled);
        assert!(timers_fired_total() > fired);
        assert!(timers_cancelled_total() > cancelled);
    }
}
