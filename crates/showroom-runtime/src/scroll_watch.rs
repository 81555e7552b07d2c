#![forbid(unsafe_code)]

//! Scroll tracker bound to the host.
//!
//! [`ScrollWatch`] owns a [`ScrollTracker`] together with the resources it
//! needs from the event loop: one listener for scroll and resize, a one-shot
//! timer for the trailing edge of a throttled burst, and a one-shot timer for
//! quiet detection. Each accepted sample re-arms the quiet timer.
//!
//! # Invariants
//!
//! 1. At most one flush timer and one quiet timer are pending at a time.
//! 2. After [`Component::dispose`] the watch holds no listener and no timer.

use showroom_core::geometry::DocumentMetrics;
use showroom_core::scroll::{ScrollConfig, ScrollOutcome, ScrollSample, ScrollTracker};
use showroom_core::{Bounds, ListenerKinds};
use web_time::Instant;

use crate::host::{Component, Host, ListenerId, TimerId, release_listener, release_timer};

/// Scroll tracker with its listener and timers.
#[derive(Debug)]
pub struct ScrollWatch {
    tracker: ScrollTracker,
    listener: Option<ListenerId>,
    flush_timer: Option<TimerId>,
    quiet_timer: Option<TimerId>,
}

impl ScrollWatch {
    /// Create an unmounted watch with an initial sample at `offset`.
    #[must_use]
    pub fn new(config: ScrollConfig, metrics: DocumentMetrics, offset: f64) -> Self {
        Self {
            tracker: ScrollTracker::new(config, metrics, offset),
            listener: None,
            flush_timer: None,
            quiet_timer: None,
        }
    }

    /// Underlying tracker.
    #[must_use]
    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    /// Current sample.
    #[must_use]
    pub fn sample(&self) -> ScrollSample {
        self.tracker.sample()
    }

    /// Normalized progress in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.tracker.progress()
    }

    /// Visibility ratio of an element against the viewport.
    #[must_use]
    pub fn element_visibility(&self, element: &Bounds) -> f64 {
        self.tracker.element_visibility(element)
    }

    /// Whether the watch holds a live listener.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Feed a scroll event. Returns the new sample if one was accepted.
    pub fn on_scroll(&mut self, host: &mut Host, offset: f64, now: Instant) -> Option<ScrollSample> {
        if !self.is_mounted() {
            return None;
        }
        match self.tracker.on_scroll(offset, now) {
            ScrollOutcome::Accepted(sample) => {
                self.rearm_quiet(host);
                Some(sample)
            }
            ScrollOutcome::Throttled { flush_at } => {
                if self.flush_timer.is_none() {
                    self.flush_timer = Some(host.timers.schedule_once(self.name(), flush_at));
                }
                None
            }
        }
    }

    /// Document or viewport extents changed.
    pub fn on_resize(&mut self, metrics: DocumentMetrics) {
        if self.is_mounted() {
            self.tracker.resize(metrics);
        }
    }

    /// Flush timer fired. Returns the trailing sample if one was accepted.
    fn on_flush(&mut self, host: &mut Host, at: Instant) -> Option<ScrollSample> {
        self.flush_timer = None;
        let sample = self.tracker.flush(at)?;
        self.rearm_quiet(host);
        Some(sample)
    }

    fn rearm_quiet(&mut self, host: &mut Host) {
        release_timer(host, &mut self.quiet_timer);
        if let Some(deadline) = self.tracker.quiet_at() {
            self.quiet_timer = Some(host.timers.schedule_once(self.name(), deadline));
        }
    }

    /// Timer routing that also reports a trailing sample.
    ///
    /// Returns `None` if the timer does not belong to this watch, otherwise
    /// `Some` with the trailing sample accepted by a flush (if any).
    pub fn handle_timer(
        &mut self,
        host: &mut Host,
        timer: TimerId,
        at: Instant,
    ) -> Option<Option<ScrollSample>> {
        if self.flush_timer == Some(timer) {
            return Some(self.on_flush(host, at));
        }
        if self.quiet_timer == Some(timer) {
            self.quiet_timer = None;
            if !self.tracker.settle(at) {
                self.rearm_quiet(host);
            }
            return Some(None);
        }
        None
    }
}

impl Component for ScrollWatch {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn mount(&mut self, host: &mut Host, _now: Instant) {
        if self.listener.is_none() {
            self.listener = Some(
                host.listeners
                    .register(self.name(), ListenerKinds::SCROLL | ListenerKinds::RESIZE),
            );
        }
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId, at: Instant) -> bool {
        self.handle_timer(host, timer, at).is_some()
    }

    fn dispose(&mut self, host: &mut Host) {
        release_listener(host, &mut self.listener);
        release_timer(host, &mut self.flush_timer);
        release_timer(host, &mut self.quiet_timer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_core::geometry::Viewport;
    use web_time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn metrics() -> DocumentMetrics {
        // max scroll 2000
        DocumentMetrics::new(2800.0, Viewport::new(1280.0, 800.0))
    }

    fn drain(host: &mut Host, watch: &mut ScrollWatch, now: Instant) -> Vec<ScrollSample> {
        let mut out = Vec::new();
        while let Some(fired) = host.timers.pop_due(now) {
            if let Some(Some(sample)) = watch.handle_timer(host, fired.id, fired.deadline) {
                out.push(sample);
            }
        }
        out
    }

    #[test]
    fn unmounted_watch_ignores_events() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut watch = ScrollWatch::new(ScrollConfig::default(), metrics(), 0.0);
        assert_eq!(watch.on_scroll(&mut host, 500.0, t0), None);
        assert!(host.is_idle());
    }

    #[test]
    fn burst_flushes_trailing_offset() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut watch = ScrollWatch::new(ScrollConfig::default(), metrics(), 0.0);
        watch.mount(&mut host, t0);

        assert!(watch.on_scroll(&mut host, 100.0, t0).is_some());
        assert!(watch.on_scroll(&mut host, 200.0, t0 + ms(5)).is_none());
        assert!(watch.on_scroll(&mut host, 300.0, t0 + ms(10)).is_none());

        let flushed = drain(&mut host, &mut watch, t0 + ms(16));
        assert_eq!(flushed.len(), 1);
        assert!((flushed[0].raw_offset - 300.0).abs() < 1e-9);
        assert!((watch.progress() - 0.15).abs() < 1e-9);
    }

    #[test]
    fn quiet_timer_clears_activity() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut watch = ScrollWatch::new(ScrollConfig::default(), metrics(), 0.0);
        watch.mount(&mut host, t0);

        watch.on_scroll(&mut host, 100.0, t0);
        assert!(watch.sample().is_active);
        drain(&mut host, &mut watch, t0 + ms(149));
        assert!(watch.sample().is_active);
        drain(&mut host, &mut watch, t0 + ms(150));
        assert!(!watch.sample().is_active);
        assert_eq!(host.timers.len(), 0);
    }

    #[test]
    fn new_sample_rearms_quiet_timer() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut watch = ScrollWatch::new(ScrollConfig::default(), metrics(), 0.0);
        watch.mount(&mut host, t0);

        watch.on_scroll(&mut host, 100.0, t0);
        watch.on_scroll(&mut host, 150.0, t0 + ms(100));
        drain(&mut host, &mut watch, t0 + ms(200));
        assert!(watch.sample().is_active);
        drain(&mut host, &mut watch, t0 + ms(250));
        assert!(!watch.sample().is_active);
    }

    #[test]
    fn dispose_releases_everything() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut watch = ScrollWatch::new(ScrollConfig::default(), metrics(), 0.0);
        watch.mount(&mut host, t0);
        watch.on_scroll(&mut host, 100.0, t0);
        watch.on_scroll(&mut host, 120.0, t0 + ms(1));
        assert_eq!(host.timers.len(), 2);

        watch.dispose(&mut host);
        assert!(host.is_idle());
        assert!(!watch.is_mounted());
    }

    #[test]
    fn resize_recomputes_progress() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut watch = ScrollWatch::new(ScrollConfig::default(), metrics(), 1000.0);
        watch.mount(&mut host, t0);
        assert!((watch.progress() - 0.5).abs() < 1e-9);
        watch.on_resize(DocumentMetrics::new(4800.0, Viewport::new(1280.0, 800.0)));
        assert!((watch.progress() - 0.25).abs() < 1e-9);
    }
}
