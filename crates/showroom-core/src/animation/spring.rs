#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Every hover-responsive effect on the site eases toward its target through
//! a spring, so that releasing the pointer relaxes the element back to rest
//! instead of snapping it there. The classical damped spring equation:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): Restoring force strength. Higher = faster response.
//! - **damping** (c): Velocity drag. Higher = less oscillation.
//!   - Underdamped (c < 2√k): overshoots before settling
//!   - Critically damped (c = 2√k): fastest convergence without overshoot
//!   - Overdamped (c > 2√k): slow convergence, no overshoot
//!
//! # Integration
//!
//! [`integrate`] is the pure stepping function: `(position, velocity, target,
//! dt, config) → (position, velocity)`. It uses semi-implicit Euler and splits
//! any delta larger than 4ms into sub-steps, so a stalled frame cannot make a
//! stiff spring explode. [`Spring`] wraps it with rest detection.
//!
//! # Invariants
//!
//! 1. Stiffness is always ≥ 0.1 and damping ≥ 0 (clamped on construction).
//! 2. A spring at rest does not move until its target changes.
//! 3. Integration is deterministic: identical inputs give identical outputs.

use web_time::Duration;

/// Maximum dt per integration step.
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring is considered at rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity below which (together with the position threshold) the spring is at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// Stiffness/damping pair governing how a value eases toward its target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringConfig {
    /// Create a config, clamping stiffness to ≥ 0.1 and damping to ≥ 0.
    #[must_use]
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness: stiffness.max(MIN_STIFFNESS),
            damping: damping.max(0.0),
        }
    }

    /// Critically damped config for the given stiffness.
    #[must_use]
    pub fn critical(stiffness: f64) -> Self {
        let k = stiffness.max(MIN_STIFFNESS);
        Self::new(k, 2.0 * k.sqrt())
    }

    /// Damping coefficient that would make this spring critically damped.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.max(MIN_STIFFNESS).sqrt()
    }

    /// Whether this config overshoots its target.
    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Magnetic buttons and nav links (150 / 15).
    #[must_use]
    pub const fn magnetic() -> Self {
        Self {
            stiffness: 150.0,
            damping: 15.0,
        }
    }

    /// Tilt cards (300 / 30).
    #[must_use]
    pub const fn tilt() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
        }
    }

    /// Smooth cursor follower (500 / 50).
    #[must_use]
    pub const fn cursor() -> Self {
        Self {
            stiffness: 500.0,
            damping: 50.0,
        }
    }

    /// Header slide-in on first paint (100 / 20).
    #[must_use]
    pub const fn entrance() -> Self {
        Self {
            stiffness: 100.0,
            damping: 20.0,
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(170.0, 26.0)
    }
}

/// Advance a spring-driven value by `dt`.
///
/// Pure function: the caller owns position and velocity. Deltas larger than
/// the 4ms step are subdivided. A zero or negative `dt` returns the inputs
/// unchanged.
#[must_use]
pub fn integrate(
    position: f64,
    velocity: f64,
    target: f64,
    dt: Duration,
    config: SpringConfig,
) -> (f64, f64) {
    let mut position = position;
    let mut velocity = velocity;
    let mut remaining = dt.as_secs_f64();
    while remaining > 0.0 {
        let step = remaining.min(MAX_STEP_SECS);
        let acceleration =
            -config.stiffness * (position - target) - config.damping * velocity;
        velocity += acceleration * step;
        position += velocity * step;
        remaining -= step;
    }
    (position, velocity)
}

/// A damped spring with rest detection.
///
/// # Example
///
/// ```
/// use showroom_core::animation::{Spring, SpringConfig};
/// use web_time::Duration;
///
/// let mut spring = Spring::new(0.0, 1.0).with_config(SpringConfig::tilt());
/// for _ in 0..120 {
///     spring.advance(Duration::from_millis(16));
/// }
/// assert!((spring.position() - 1.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and heading for `target`.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            config: SpringConfig::default(),
            at_rest: false,
        }
    }

    /// Create a spring already at rest on `value`.
    #[must_use]
    pub fn resting(value: f64) -> Self {
        Self {
            at_rest: true,
            ..Self::new(value, value)
        }
    }

    /// Set stiffness and damping (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: SpringConfig) -> Self {
        self.config = SpringConfig::new(config.stiffness, config.damping);
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Stiffness/damping in use.
    #[inline]
    #[must_use]
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > DEFAULT_REST_THRESHOLD {
            self.target = target;
            self.at_rest = false;
        } else if !self.at_rest {
            self.target = target;
        }
    }

    /// Whether the spring has settled on its target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Advance the spring by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest || dt.is_zero() {
            return;
        }

        let (position, velocity) =
            integrate(self.position, self.velocity, self.target, dt, self.config);
        self.position = position;
        self.velocity = velocity;

        if (self.position - self.target).abs() < DEFAULT_REST_THRESHOLD
            && self.velocity.abs() < DEFAULT_VELOCITY_THRESHOLD
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}
