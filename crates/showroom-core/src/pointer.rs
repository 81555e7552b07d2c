#![forbid(unsafe_code)]

//! Pointer sampling relative to a target element.
//!
//! [`PointerTracker`] computes the vector from a target's center to the
//! pointer on every move and scales it for magnetic effects:
//!
//! - distance ≥ radius → offset forced to zero, `hovered` cleared
//! - distance < radius → offset = vector · strength · (1 − distance/radius),
//!   `hovered` set
//! - pointer leave → offset zeroed immediately, whatever the last position
//!
//! An infinite radius gives the element-local variant used by nav links:
//! the offset is simply `vector · strength` while the pointer is tracked.

use crate::geometry::{Bounds, Point, Viewport};

/// Default effect radius in pixels.
pub const DEFAULT_RADIUS: f64 = 200.0;

/// Default magnetic strength.
pub const DEFAULT_STRENGTH: f64 = 0.3;

/// What the pointer is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    /// A specific element.
    Element(Bounds),
    /// The whole viewport (measured from its center).
    Viewport(Viewport),
}

impl PointerTarget {
    /// Bounds of the target.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Element(b) => *b,
            Self::Viewport(v) => v.bounds(),
        }
    }
}

/// Radius and strength of the pointer pull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerConfig {
    /// Effective radius; `f64::INFINITY` disables the cutoff.
    pub radius: f64,
    /// Fraction of the pointer vector applied as offset.
    pub strength: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            strength: DEFAULT_STRENGTH,
        }
    }
}

/// Scaled pointer offset from a target's center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerOffset {
    pub dx: f64,
    pub dy: f64,
    /// Raw distance from the target's center (≥ 0).
    pub distance: f64,
}

impl PointerOffset {
    /// No offset.
    pub const ZERO: Self = Self {
        dx: 0.0,
        dy: 0.0,
        distance: 0.0,
    };

    /// Whether both components are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Stateful pointer tracker for one target.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    target: PointerTarget,
    config: PointerConfig,
    offset: PointerOffset,
    hovered: bool,
    last_position: Option<Point>,
}

impl PointerTracker {
    /// Create a tracker for `target`.
    #[must_use]
    pub fn new(target: PointerTarget, config: PointerConfig) -> Self {
        Self {
            target,
            config: PointerConfig {
                radius: if config.radius.is_nan() { 0.0 } else { config.radius.max(0.0) },
                strength: config.strength,
            },
            offset: PointerOffset::ZERO,
            hovered: false,
            last_position: None,
        }
    }

    /// Current target.
    #[must_use]
    pub fn target(&self) -> PointerTarget {
        self.target
    }

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> PointerConfig {
        self.config
    }

    /// Replace the target (layout changed). The next move recomputes.
    pub fn set_target(&mut self, target: PointerTarget) {
        self.target = target;
    }

    /// Latest scaled offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> PointerOffset {
        self.offset
    }

    /// Whether the pointer is within the effect radius.
    #[inline]
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Last pointer position seen by [`Self::on_move`], cleared on leave.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    /// Pointer moved to `p` (viewport coordinates).
    pub fn on_move(&mut self, p: Point) -> PointerOffset {
        self.last_position = Some(p);
        let center = self.target.bounds().center();
        let vx = p.x - center.x;
        let vy = p.y - center.y;
        let distance = p.distance_to(center);

        if distance < self.config.radius {
            let factor = if self.config.radius.is_infinite() {
                1.0
            } else {
                1.0 - distance / self.config.radius
            };
            self.offset = PointerOffset {
                dx: vx * self.config.strength * factor,
                dy: vy * self.config.strength * factor,
                distance,
            };
            if !self.hovered {
                tracing::trace!(target: "showroom.pointer", distance, "pointer entered radius");
            }
            self.hovered = true;
        } else {
            self.offset = PointerOffset {
                dx: 0.0,
                dy: 0.0,
                distance,
            };
            self.hovered = false;
        }
        self.offset
    }

    /// Pointer left the surface: reset immediately.
    pub fn on_leave(&mut self) -> PointerOffset {
        self.offset = PointerOffset::ZERO;
        self.hovered = false;
        self.last_position = None;
        self.offset
    }
}
