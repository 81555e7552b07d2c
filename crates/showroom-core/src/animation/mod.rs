#![forbid(unsafe_code)]

//! Animation primitives.
//!
//! Everything here is a pure function of explicit inputs: no clocks, no
//! scheduling. The rendering layer advances springs once per frame with the
//! frame delta; tests feed synthetic deltas.
//!
//! - [`spring`]: damped harmonic oscillator used for every pointer-following
//!   effect and the header entrance.
//! - [`transform`]: clamped range interpolation for scroll-linked values.

pub mod spring;
pub mod transform;

pub use spring::{Spring, SpringConfig};
pub use transform::RangeMap;
