#![forbid(unsafe_code)]

//! Scroll sampling: throttled offsets, normalized progress, and activity.
//!
//! [`ScrollTracker`] turns raw scroll offsets into [`ScrollSample`]s. It is a
//! pure state machine over explicit timestamps; the runtime owns the listener
//! registration and the two timers it needs (trailing flush and quiet
//! detection) and calls back into the tracker when they fire.
//!
//! # Invariants
//!
//! 1. `ratio` is always within [0.0, 1.0], whatever the document size.
//! 2. A document that fits in the viewport has progress 0.
//! 3. At most one sample is accepted per throttle window; a sample dropped by
//!    the throttle is kept as pending and accepted by [`ScrollTracker::flush`]
//!    once the window has passed, so the final offset is never lost.
//! 4. `is_active` turns false only after a full quiet period without an
//!    accepted sample.

use web_time::{Duration, Instant};

use crate::geometry::{Bounds, DocumentMetrics};

/// Default throttle window between accepted samples.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(16);

/// Default quiet period after which scrolling is considered finished.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(150);

/// Tuning for a [`ScrollTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Minimum time between accepted samples.
    pub throttle: Duration,
    /// Silence after which `is_active` clears.
    pub quiet: Duration,
    /// Minimum progress change before the published ratio moves.
    pub progress_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            throttle: DEFAULT_THROTTLE,
            quiet: DEFAULT_QUIET,
            progress_threshold: 0.0,
        }
    }
}

/// One observation of the scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Normalized progress in [0, 1].
    pub ratio: f64,
    /// Raw offset in pixels (never negative).
    pub raw_offset: f64,
    /// Whether scrolling happened within the last quiet period.
    pub is_active: bool,
}

/// Result of feeding a scroll event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    /// The event produced a new sample.
    Accepted(ScrollSample),
    /// The event fell inside the throttle window; its offset is pending and
    /// should be flushed at the given instant.
    Throttled { flush_at: Instant },
}

/// Normalized progress for a raw offset: `offset / max_scroll`, clamped.
/// Zero when nothing is scrollable.
#[must_use]
pub fn progress_for(offset: f64, metrics: &DocumentMetrics) -> f64 {
    let max = metrics.max_scroll();
    if max <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / max).clamp(0.0, 1.0)
}

/// How far an element has traveled through the viewport, in [0, 1].
///
/// 0 while the element is still below the fold, 1 once it has fully left
/// through the top: `clamp((vh - top) / (vh + height), 0, 1)`.
#[must_use]
pub fn element_visibility(viewport_height: f64, element: &Bounds) -> f64 {
    let travel = viewport_height + element.height;
    if travel <= 0.0 {
        return 0.0;
    }
    ((viewport_height - element.top) / travel).clamp(0.0, 1.0)
}

/// Throttled scroll sampler.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    config: ScrollConfig,
    metrics: DocumentMetrics,
    offset: f64,
    ratio: f64,
    active: bool,
    last_accepted: Option<Instant>,
    pending: Option<f64>,
}

impl ScrollTracker {
    /// Create a tracker and take the initial sample at `offset`.
    ///
    /// The initial sample is inactive: nothing has scrolled yet.
    #[must_use]
    pub fn new(config: ScrollConfig, metrics: DocumentMetrics, offset: f64) -> Self {
        let offset = offset.max(0.0);
        Self {
            config,
            metrics,
            offset,
            ratio: progress_for(offset, &metrics),
            active: false,
            last_accepted: None,
            pending: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Current document metrics.
    #[must_use]
    pub fn metrics(&self) -> &DocumentMetrics {
        &self.metrics
    }

    /// Normalized progress in [0, 1].
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.ratio
    }

    /// Last accepted raw offset.
    #[inline]
    #[must_use]
    pub fn raw_offset(&self) -> f64 {
        self.offset
    }

    /// Whether scrolling is in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a throttled offset is waiting to be flushed.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn sample(&self) -> ScrollSample {
        ScrollSample {
            ratio: self.ratio,
            raw_offset: self.offset,
            is_active: self.active,
        }
    }

    /// Visibility ratio of an element against the current viewport.
    #[must_use]
    pub fn element_visibility(&self, element: &Bounds) -> f64 {
        element_visibility(self.metrics.viewport.height, element)
    }

    /// Feed a scroll event.
    pub fn on_scroll(&mut self, offset: f64, now: Instant) -> ScrollOutcome {
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        if let Some(last) = self.last_accepted {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.config.throttle {
                self.pending = Some(offset);
                let flush_at = last + self.config.throttle;
                tracing::trace!(
                    target: "showroom.scroll",
                    offset,
                    "scroll sample throttled"
                );
                return ScrollOutcome::Throttled { flush_at };
            }
        }
        ScrollOutcome::Accepted(self.accept(offset, now))
    }

    /// Accept the pending throttled offset if the throttle window has passed.
    pub fn flush(&mut self, now: Instant) -> Option<ScrollSample> {
        let offset = self.pending?;
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < self.config.throttle
        {
            return None;
        }
        Some(self.accept(offset, now))
    }

    /// Instant at which scrolling becomes quiet, if currently active.
    #[must_use]
    pub fn quiet_at(&self) -> Option<Instant> {
        if !self.active {
            return None;
        }
        self.last_accepted.map(|t| t + self.config.quiet)
    }

    /// Clear the active flag if a full quiet period has passed.
    ///
    /// Returns `true` if the flag changed.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.quiet_at() {
            Some(deadline) if now >= deadline && self.pending.is_none() => {
                self.active = false;
                tracing::trace!(target: "showroom.scroll", "scrolling settled");
                true
            }
            _ => false,
        }
    }

    /// Document or viewport extents changed; progress is recomputed.
    pub fn resize(&mut self, metrics: DocumentMetrics) {
        self.metrics = metrics;
        self.ratio = progress_for(self.offset, &self.metrics);
    }

    fn accept(&mut self, offset: f64, now: Instant) -> ScrollSample {
        self.pending = None;
        self.last_accepted = Some(now);
        self.offset = offset;
        self.active = true;

        let ratio = progress_for(offset, &self.metrics);
        if (ratio - self.ratio).abs() > self.config.progress_threshold
            || ratio == 0.0
            || ratio == 1.0
        {
            self.ratio = ratio;
        }
        self.sample()
    }
}
