#![forbid(unsafe_code)]

//! Showroom public facade crate.
//!
//! This crate provides the stable surface area for embedders. It re-exports
//! common types from the internal crates, exposes the unified [`Error`] with
//! its [`RecoveryAction`] mapping, and offers a lightweight prelude.

pub mod error;

pub use error::{Error, RecoveryAction, Result};

// --- Core re-exports -------------------------------------------------------

pub use showroom_core::animation::{RangeMap, Spring, SpringConfig};
pub use showroom_core::pointer::{PointerConfig, PointerOffset, PointerTarget, PointerTracker};
pub use showroom_core::scroll::{ScrollConfig, ScrollSample, ScrollTracker};
pub use showroom_core::{Bounds, DocumentMetrics, Event, ListenerKinds, Point, Viewport};

// --- Runtime re-exports ----------------------------------------------------

pub use showroom_runtime::config::{ConfigError, InteractionConfig};
pub use showroom_runtime::effects::{EffectPose, MagneticEffect, TiltEffect};
pub use showroom_runtime::form::{
    AlwaysSucceed, ContactForm, FormSchema, FormStatus, SubmissionHook, SubmitError,
    ValidationError,
};
pub use showroom_runtime::header::{HeaderController, HeaderLayout, HeaderMode, HeaderView};
pub use showroom_runtime::host::Host;
pub use showroom_runtime::navigator::{
    Carousel, Direction, Filter, FilteredCollection, Lightbox, Navigator,
};
pub use showroom_runtime::page::{
    CatalogItem, PageContent, PageLayout, PageMsg, PageView, ParallaxLayer, ShowroomPage,
};
pub use showroom_runtime::product::ProductDetail;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Bounds, DocumentMetrics, Error, Event, Filter, FormStatus, HeaderMode, InteractionConfig,
        PageContent, PageLayout, PageMsg, PageView, Point, RecoveryAction, Result, ShowroomPage,
        Viewport,
    };

    pub use crate::{core, runtime};
}

pub use showroom_core as core;
pub use showroom_runtime as runtime;
