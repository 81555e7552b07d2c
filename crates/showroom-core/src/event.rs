#![forbid(unsafe_code)]

//! Canonical ambient input events.
//!
//! These are the only environment readings the interaction layer consumes.
//! A host (browser glue, a test, a replay) translates its native events into
//! [`Event`] values and hands them to the runtime; discrete user intents such
//! as "next slide" or "submit" are page messages and live in the runtime.
//!
//! # Design Notes
//!
//! - Scroll offsets are raw document offsets in pixels, never normalized.
//! - Pointer coordinates are viewport-relative.
//! - [`ListenerKinds`] describes which of these a component subscribes to,
//!   so the host can account for every registration.

use bitflags::bitflags;

use crate::geometry::{DocumentMetrics, Point};

/// Canonical ambient input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The document scrolled to a new vertical offset.
    Scroll {
        /// Raw vertical scroll offset in pixels.
        offset: f64,
    },

    /// Document or viewport extents changed.
    Resize(DocumentMetrics),

    /// Pointer moved to a viewport position.
    PointerMove(Point),

    /// Pointer left the tracked surface.
    PointerLeave,
}

impl Event {
    /// The listener kind that must be registered to receive this event.
    #[must_use]
    pub const fn kind(&self) -> ListenerKinds {
        match self {
            Self::Scroll { .. } => ListenerKinds::SCROLL,
            Self::Resize(_) => ListenerKinds::RESIZE,
            Self::PointerMove(_) => ListenerKinds::POINTER_MOVE,
            Self::PointerLeave => ListenerKinds::POINTER_LEAVE,
        }
    }
}

bitflags! {
    /// Set of ambient event kinds a component listens to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ListenerKinds: u8 {
        /// Passive scroll listener.
        const SCROLL        = 0b0001;
        /// Pointer-move listener.
        const POINTER_MOVE  = 0b0010;
        /// Pointer-leave listener.
        const POINTER_LEAVE = 0b0100;
        /// Resize listener.
        const RESIZE        = 0b1000;

        /// Both pointer listeners.
        const POINTER = Self::POINTER_MOVE.bits() | Self::POINTER_LEAVE.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;

    #[test]
    fn event_kinds() {
        assert_eq!(Event::Scroll { offset: 3.0 }.kind(), ListenerKinds::SCROLL);
        assert_eq!(
            Event::Resize(DocumentMetrics::new(10.0, Viewport::new(1.0, 1.0))).kind(),
            ListenerKinds::RESIZE
        );
        assert_eq!(Event::PointerMove(Point::ZERO).kind(), ListenerKinds::POINTER_MOVE);
        assert_eq!(Event::PointerLeave.kind(), ListenerKinds::POINTER_LEAVE);
    }

    #[test]
    fn pointer_is_union() {
        assert!(ListenerKinds::POINTER.contains(ListenerKinds::POINTER_MOVE));
        assert!(ListenerKinds::POINTER.contains(ListenerKinds::POINTER_LEAVE));
        assert!(!ListenerKinds::POINTER.contains(ListenerKinds::SCROLL));
    }
}
