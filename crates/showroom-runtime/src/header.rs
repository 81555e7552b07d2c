#![forbid(unsafe_code)]

//! Collapsible header state machine.
//!
//! The header shows a full navigation bar near the top of the page and
//! collapses to a small icon trigger once the page has scrolled past the
//! collapse threshold. The trigger reopens the bar on demand; scrolling back
//! to the top always restores the expanded bar.
//!
//! ```text
//!                offset > threshold            toggle
//!   EXPANDED ──────────────────────▶ COLLAPSED_IDLE ◀────────▶ COLLAPSED_REOPENED
//!       ▲                                  │          toggle/close       │
//!       └───────── offset ≤ threshold ─────┴─────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `CollapsedReopened` is reachable only from `CollapsedIdle` by user
//!    action.
//! 2. Any offset at or below the threshold yields `Expanded`, whatever the
//!    previous mode or toggles.
//! 3. The submenu is closed on every mode transition and can only be opened
//!    while the full bar is shown.
//!
//! Besides the mode, the header carries scroll-linked chrome (a "scrolled"
//! flag, backdrop blur and background opacity) and an entrance slide driven
//! by a spring.

use showroom_core::animation::{RangeMap, Spring, SpringConfig};
use web_time::Duration;

/// Collapse threshold in pixels.
pub const DEFAULT_COLLAPSE_THRESHOLD: f64 = 150.0;

/// Offset past which the header counts as "scrolled".
pub const DEFAULT_SCROLLED_THRESHOLD: f64 = 50.0;

/// Header mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderMode {
    #[default]
    Expanded,
    CollapsedIdle,
    CollapsedReopened,
}

impl HeaderMode {
    /// What the rendering layer should draw for this mode.
    #[must_use]
    pub const fn layout(self) -> HeaderLayout {
        match self {
            Self::Expanded => HeaderLayout::FullBar,
            Self::CollapsedIdle => HeaderLayout::IconTrigger,
            Self::CollapsedReopened => HeaderLayout::FullBarWithClose,
        }
    }

    /// Whether the full navigation bar is visible.
    #[must_use]
    pub const fn shows_full_bar(self) -> bool {
        !matches!(self, Self::CollapsedIdle)
    }

    /// Lowercase label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expanded => "expanded",
            Self::CollapsedIdle => "collapsed_idle",
            Self::CollapsedReopened => "collapsed_reopened",
        }
    }
}

/// Rendering contract for each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderLayout {
    /// Full navigation bar.
    FullBar,
    /// Only the small icon trigger.
    IconTrigger,
    /// Full bar plus an explicit close control.
    FullBarWithClose,
}

/// Header tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderConfig {
    pub collapse_threshold: f64,
    pub scrolled_threshold: f64,
    /// Offset range over which blur and opacity interpolate.
    pub chrome_range: (f64, f64),
    /// Backdrop blur in pixels across `chrome_range`.
    pub blur: (f64, f64),
    /// Background opacity across `chrome_range`.
    pub opacity: (f64, f64),
    /// Initial vertical offset of the entrance slide.
    pub entrance_offset: f64,
    pub entrance_spring: SpringConfig,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            collapse_threshold: DEFAULT_COLLAPSE_THRESHOLD,
            scrolled_threshold: DEFAULT_SCROLLED_THRESHOLD,
            chrome_range: (0.0, 100.0),
            blur: (8.0, 20.0),
            opacity: (0.4, 0.8),
            entrance_offset: -100.0,
            entrance_spring: SpringConfig::entrance(),
        }
    }
}

/// Scroll-linked header chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderChrome {
    pub scrolled: bool,
    pub blur_px: f64,
    pub background_opacity: f64,
    /// Current entrance slide offset (0 once settled).
    pub entrance_y: f64,
}

/// Declarative header state for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderView {
    pub mode: HeaderMode,
    pub layout: HeaderLayout,
    pub submenu_open: bool,
    pub chrome: HeaderChrome,
}

/// The header state machine.
#[derive(Debug, Clone)]
pub struct HeaderController {
    config: HeaderConfig,
    mode: HeaderMode,
    submenu_open: bool,
    offset: f64,
    blur: RangeMap,
    opacity: RangeMap,
    entrance: Spring,
}

impl Default for HeaderController {
    fn default() -> Self {
        Self::new(HeaderConfig::default())
    }
}

impl HeaderController {
    /// Create an expanded header at offset 0, entrance slide pending.
    #[must_use]
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            mode: HeaderMode::Expanded,
            submenu_open: false,
            offset: 0.0,
            blur: RangeMap::new(config.chrome_range, config.blur),
            opacity: RangeMap::new(config.chrome_range, config.opacity),
            entrance: Spring::new(config.entrance_offset, 0.0).with_config(config.entrance_spring),
            config,
        }
    }

    #[must_use]
    pub fn mode(&self) -> HeaderMode {
        self.mode
    }

    #[must_use]
    pub fn is_submenu_open(&self) -> bool {
        self.submenu_open
    }

    #[must_use]
    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// Apply a new raw scroll offset.
    pub fn on_scroll(&mut self, offset: f64) {
        self.offset = offset.max(0.0);
        let collapsed = self.offset > self.config.collapse_threshold;
        let next = match (self.mode, collapsed) {
            (HeaderMode::Expanded, true) => HeaderMode::CollapsedIdle,
            (HeaderMode::CollapsedIdle | HeaderMode::CollapsedReopened, false) => {
                HeaderMode::Expanded
            }
            (mode, _) => mode,
        };
        self.transition(next, "scroll");
    }

    /// The collapsed trigger (or the reopened bar's toggle) was clicked.
    ///
    /// Returns `true` if the mode changed. A no-op while expanded.
    pub fn toggle(&mut self) -> bool {
        let next = match self.mode {
            HeaderMode::Expanded => return false,
            HeaderMode::CollapsedIdle => HeaderMode::CollapsedReopened,
            HeaderMode::CollapsedReopened => HeaderMode::CollapsedIdle,
        };
        self.transition(next, "toggle")
    }

    /// The reopened bar's close control was clicked.
    pub fn close(&mut self) -> bool {
        if self.mode == HeaderMode::CollapsedReopened {
            self.transition(HeaderMode::CollapsedIdle, "close")
        } else {
            false
        }
    }

    /// Flip the submenu. Returns the new visibility.
    ///
    /// Ignored while only the icon trigger is shown.
    pub fn toggle_submenu(&mut self) -> bool {
        if self.mode.shows_full_bar() {
            self.submenu_open = !self.submenu_open;
            tracing::trace!(
                target: "showroom.header",
                open = self.submenu_open,
                "submenu toggled"
            );
        }
        self.submenu_open
    }

    /// Close the submenu.
    pub fn close_submenu(&mut self) {
        self.submenu_open = false;
    }

    /// Advance the entrance slide by one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.entrance.advance(dt);
    }

    /// Scroll-linked chrome at the current offset.
    #[must_use]
    pub fn chrome(&self) -> HeaderChrome {
        HeaderChrome {
            scrolled: self.offset > self.config.scrolled_threshold,
            blur_px: self.blur.apply(self.offset),
            background_opacity: self.opacity.apply(self.offset),
            entrance_y: self.entrance.position(),
        }
    }

    /// Declarative view.
    #[must_use]
    pub fn view(&self) -> HeaderView {
        HeaderView {
            mode: self.mode,
            layout: self.mode.layout(),
            submenu_open: self.submenu_open,
            chrome: self.chrome(),
        }
    }

    fn transition(&mut self, next: HeaderMode, cause: &'static str) -> bool {
        if next == self.mode {
            return false;
        }
        tracing::debug!(
            target: "showroom.header",
            from = self.mode.as_str(),
            to = next.as_str(),
            cause,
            offset = self.offset,
            "header mode changed"
        );
        self.mode = next;
        self.submenu_open = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_expanded_with_full_bar() {
        let h = HeaderController::default();
        assert_eq!(h.mode(), HeaderMode::Expanded);
        assert_eq!(h.view().layout, HeaderLayout::FullBar);
        assert!(!h.is_submenu_open());
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut h = HeaderController::default();
        h.on_scroll(150.0);
        assert_eq!(h.mode(), HeaderMode::Expanded);
        h.on_scroll(150.5);
        assert_eq!(h.mode(), HeaderMode::CollapsedIdle);
        assert_eq!(h.view().layout, HeaderLayout::IconTrigger);
    }

    #[test]
    fn toggle_reopens_and_scroll_overrides() {
        let mut h = HeaderController::default();
        h.on_scroll(400.0);
        assert!(h.toggle());
        assert_eq!(h.mode(), HeaderMode::CollapsedReopened);
        assert_eq!(h.view().layout, HeaderLayout::FullBarWithClose);

        h.on_scroll(600.0);
        assert_eq!(h.mode(), HeaderMode::CollapsedReopened);

        h.on_scroll(100.0);
        assert_eq!(h.mode(), HeaderMode::Expanded);
    }

    #[test]
    fn toggle_is_noop_when_expanded() {
        let mut h = HeaderController::default();
        assert!(!h.toggle());
        assert!(!h.close());
        assert_eq!(h.mode(), HeaderMode::Expanded);
    }

    #[test]
    fn close_returns_to_idle() {
        let mut h = HeaderController::default();
        h.on_scroll(400.0);
        h.toggle();
        assert!(h.close());
        assert_eq!(h.mode(), HeaderMode::CollapsedIdle);
        assert!(!h.close());
    }

    #[test]
    fn submenu_closes_on_mode_change() {
        let mut h = HeaderController::default();
        assert!(h.toggle_submenu());
        h.on_scroll(400.0);
        assert!(!h.is_submenu_open());

        // Icon trigger only: submenu cannot open.
        assert!(!h.toggle_submenu());

        h.toggle();
        assert!(h.toggle_submenu());
        h.on_scroll(0.0);
        assert_eq!(h.mode(), HeaderMode::Expanded);
        assert!(!h.is_submenu_open());
    }

    #[test]
    fn chrome_interpolates_with_offset() {
        let mut h = HeaderController::default();
        let c = h.chrome();
        assert!(!c.scrolled);
        assert!((c.blur_px - 8.0).abs() < 1e-9);
        assert!((c.background_opacity - 0.4).abs() < 1e-9);

        h.on_scroll(50.0);
        let c = h.chrome();
        assert!(!c.scrolled);
        assert!((c.blur_px - 14.0).abs() < 1e-9);
        assert!((c.background_opacity - 0.6).abs() < 1e-9);

        h.on_scroll(500.0);
        let c = h.chrome();
        assert!(c.scrolled);
        assert!((c.blur_px - 20.0).abs() < 1e-9);
        assert!((c.background_opacity - 0.8).abs() < 1e-9);
    }

    #[test]
    fn entrance_slides_in() {
        let mut h = HeaderController::default();
        assert!((h.chrome().entrance_y + 100.0).abs() < 1e-9);
        for _ in 0..240 {
            h.tick(Duration::from_millis(16));
        }
        assert!(h.chrome().entrance_y.abs() < 0.01);
    }

    #[test]
    fn negative_offset_is_clamped() {
        let mut h = HeaderController::default();
        h.on_scroll(-40.0);
        assert!((h.chrome().blur_px - 8.0).abs() < 1e-9);
        assert_eq!(h.mode(), HeaderMode::Expanded);
    }
}
