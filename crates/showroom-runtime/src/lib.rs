#![forbid(unsafe_code)]

//! Cooperative runtime for the Showroom interaction layer.
//!
//! # Role in Showroom
//! `showroom-runtime` turns the normalized scroll and pointer readings from
//! `showroom-core` into UI state: header mode, carousel and lightbox
//! positions, spring-eased effect poses, and form status. It owns the
//! single-threaded [`host::Host`] through which every component acquires and
//! releases its listeners and timers.
//!
//! # Primary responsibilities
//! - **Host**: deadline-ordered timer queue and ambient listener registry.
//! - **Header**: collapse/reopen state machine with scroll-linked chrome.
//! - **Navigator**: wraparound cursor, lightbox, auto-advancing carousel,
//!   category-filtered collections.
//! - **Effects**: magnetic, tilt and cursor-follower springs.
//! - **Form**: validation and simulated submission.
//! - **Page**: composition of all of the above into one declarative view.
//!
//! # How it fits in the system
//! The embedding layer (a browser host or a test) forwards events into
//! [`page::ShowroomPage`], advances it with explicit timestamps, and renders
//! the resulting [`page::PageView`]. Nothing here blocks, spawns threads, or
//! reads a clock on its own.

pub mod config;
pub mod effect_system;
pub mod effects;
pub mod form;
pub mod header;
pub mod host;
pub mod logging;
pub mod navigator;
pub mod page;
pub mod product;
pub mod scroll_watch;

pub use config::{ConfigError, InteractionConfig};
pub use effects::{CursorFollower, EffectPose, MagneticEffect, MotionState, TiltEffect, step_pose};
pub use form::{
    AlwaysSucceed, ContactForm, FieldSpec, FormDraft, FormSchema, FormStatus, SubmissionHook,
    SubmitError, ValidationError,
};
pub use header::{HeaderController, HeaderLayout, HeaderMode, HeaderView};
pub use host::{Component, Host, ListenerId, TimerId};
pub use navigator::{
    Carousel, Categorized, Direction, Filter, FilteredCollection, Lightbox, Navigator,
    NavigatorState,
};
pub use page::{PageMsg, PageView, ShowroomPage};
pub use product::ProductDetail;
pub use scroll_watch::ScrollWatch;
