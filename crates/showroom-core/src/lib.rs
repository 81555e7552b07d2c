// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, ambient input events, springs, and the scroll/pointer trackers.
//!
//! # Role in Showroom
//! `showroom-core` is the input layer. It owns the only two components that
//! read the ambient environment (scroll offset and pointer position) and turns
//! those readings into normalized samples that the rest of the system derives
//! UI state from.
//!
//! # Primary responsibilities
//! - **Event**: canonical ambient input (scroll, resize, pointer move/leave).
//! - **Geometry**: points, element bounds, and viewport/document metrics.
//! - **Animation**: damped springs and clamped range interpolation.
//! - **Trackers**: [`scroll::ScrollTracker`] and [`pointer::PointerTracker`].
//!
//! # How it fits in the system
//! The runtime (`showroom-runtime`) feeds [`event::Event`] values into the
//! trackers, owns their listener registrations and timers, and derives the
//! header, carousel, effect and form state from the tracker outputs. Nothing
//! in this crate schedules work or holds a clock; every time-dependent call
//! takes the current [`web_time::Instant`] explicitly.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod pointer;
pub mod scroll;

pub use event::{Event, ListenerKinds};
pub use geometry::{Bounds, DocumentMetrics, Point, Viewport};
