#![forbid(unsafe_code)]

//! Magnetic, tilt and cursor-follower effects.
//!
//! Every effect turns pointer input into a target [`EffectPose`] and eases
//! the displayed pose toward it with a spring. [`step_pose`] is the pure
//! per-frame function `(state, target, dt, spring) → state`; the widgets
//! below only decide the target.
//!
//! - [`MagneticEffect`]: translation toward the pointer, scaled by the
//!   pointer tracker's strength and radius falloff.
//! - [`TiltEffect`]: rotation from the pointer's position inside the element
//!   plus a hover scale.
//! - [`CursorFollower`]: a point that trails the raw pointer position.
//!
//! # Invariants
//!
//! 1. On pointer leave the target becomes [`EffectPose::NEUTRAL`] and the
//!    pose relaxes there through the spring; it never snaps.
//! 2. A zero-size element produces zero tilt.

use showroom_core::animation::spring::{SpringConfig, integrate};
use showroom_core::animation::Spring;
use showroom_core::pointer::{PointerConfig, PointerOffset, PointerTarget, PointerTracker};
use showroom_core::{Bounds, ListenerKinds, Point};
use web_time::{Duration, Instant};

use crate::host::{Component, Host, ListenerId, release_listener};

/// Distance below which a channel counts as settled.
const SETTLE_EPSILON: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Pose
// ---------------------------------------------------------------------------

/// Transform applied to a hover-responsive element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectPose {
    pub translate_x: f64,
    pub translate_y: f64,
    /// Degrees.
    pub rotate_x: f64,
    /// Degrees.
    pub rotate_y: f64,
    pub scale: f64,
}

impl EffectPose {
    /// Identity transform.
    pub const NEUTRAL: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// Pure translation.
    #[must_use]
    pub const fn translation(x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::NEUTRAL
        }
    }

    /// Largest per-channel absolute difference to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        [
            self.translate_x - other.translate_x,
            self.translate_y - other.translate_y,
            self.rotate_x - other.rotate_x,
            self.rotate_y - other.rotate_y,
            self.scale - other.scale,
        ]
        .into_iter()
        .fold(0.0, |acc, d| acc.max(d.abs()))
    }

    fn channels(&self) -> [f64; 5] {
        [
            self.translate_x,
            self.translate_y,
            self.rotate_x,
            self.rotate_y,
            self.scale,
        ]
    }

    fn from_channels(c: [f64; 5]) -> Self {
        Self {
            translate_x: c[0],
            translate_y: c[1],
            rotate_x: c[2],
            rotate_y: c[3],
            scale: c[4].max(0.0),
        }
    }
}

impl Default for EffectPose {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Displayed pose plus per-channel velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub pose: EffectPose,
    velocity: [f64; 5],
}

impl MotionState {
    /// At rest on `pose`.
    #[must_use]
    pub const fn at_rest(pose: EffectPose) -> Self {
        Self {
            pose,
            velocity: [0.0; 5],
        }
    }

    /// Largest channel speed.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Whether the pose sits on `target` with no residual motion.
    #[must_use]
    pub fn is_settled_on(&self, target: &EffectPose) -> bool {
        self.pose.distance(target) < SETTLE_EPSILON && self.speed() < SETTLE_EPSILON
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::at_rest(EffectPose::NEUTRAL)
    }
}

/// Advance `state` toward `target` by one frame of `dt`.
///
/// Each channel is an independent spring. Once every channel is within the
/// settle epsilon the pose is placed exactly on the target.
#[must_use]
pub fn step_pose(
    state: MotionState,
    target: EffectPose,
    dt: Duration,
    spring: SpringConfig,
) -> MotionState {
    let from = state.pose.channels();
    let to = target.channels();
    let mut pose = [0.0; 5];
    let mut velocity = [0.0; 5];
    for i in 0..5 {
        let (p, v) = integrate(from[i], state.velocity[i], to[i], dt, spring);
        pose[i] = p;
        velocity[i] = v;
    }
    let next = MotionState {
        pose: EffectPose::from_channels(pose),
        velocity,
    };
    if next.is_settled_on(&target) {
        MotionState::at_rest(target)
    } else {
        next
    }
}

// ---------------------------------------------------------------------------
// Magnetic
// ---------------------------------------------------------------------------

/// Magnetic pull tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticConfig {
    pub pointer: PointerConfig,
    pub spring: SpringConfig,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            pointer: PointerConfig::default(),
            spring: SpringConfig::magnetic(),
        }
    }
}

impl MagneticConfig {
    /// Element-local variant for navigation links: no radius cutoff.
    #[must_use]
    pub fn nav_link(strength: f64) -> Self {
        Self {
            pointer: PointerConfig {
                radius: f64::INFINITY,
                strength,
            },
            spring: SpringConfig::magnetic(),
        }
    }
}

/// Element translated toward the pointer.
#[derive(Debug, Clone)]
pub struct MagneticEffect {
    tracker: PointerTracker,
    spring: SpringConfig,
    target: EffectPose,
    motion: MotionState,
    listener: Option<ListenerId>,
}

impl MagneticEffect {
    #[must_use]
    pub fn new(bounds: Bounds, config: MagneticConfig) -> Self {
        Self {
            tracker: PointerTracker::new(PointerTarget::Element(bounds), config.pointer),
            spring: config.spring,
            target: EffectPose::NEUTRAL,
            motion: MotionState::default(),
            listener: None,
        }
    }

    /// Element moved (layout change).
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.tracker.set_target(PointerTarget::Element(bounds));
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.tracker.target().bounds()
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.tracker.is_hovered()
    }

    #[must_use]
    pub fn pointer_offset(&self) -> PointerOffset {
        self.tracker.offset()
    }

    pub fn on_pointer_move(&mut self, p: Point) {
        let off = self.tracker.on_move(p);
        self.target = EffectPose::translation(off.dx, off.dy);
    }

    pub fn on_pointer_leave(&mut self) {
        self.tracker.on_leave();
        self.target = EffectPose::NEUTRAL;
        tracing::trace!(target: "showroom.effect", "magnetic released");
    }

    /// Advance one frame and return the displayed pose.
    pub fn step(&mut self, dt: Duration) -> EffectPose {
        self.motion = step_pose(self.motion, self.target, dt, self.spring);
        self.motion.pose
    }

    #[must_use]
    pub fn pose(&self) -> EffectPose {
        self.motion.pose
    }

    #[must_use]
    pub fn target(&self) -> EffectPose {
        self.target
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.motion.is_settled_on(&self.target)
    }
}

impl Component for MagneticEffect {
    fn name(&self) -> &'static str {
        "magnetic"
    }

    fn mount(&mut self, host: &mut Host, _now: Instant) {
        if self.listener.is_none() {
            self.listener = Some(host.listeners.register(self.name(), ListenerKinds::POINTER));
        }
    }

    fn dispose(&mut self, host: &mut Host) {
        release_listener(host, &mut self.listener);
        self.tracker.on_leave();
        self.target = EffectPose::NEUTRAL;
    }
}

// ---------------------------------------------------------------------------
// Tilt
// ---------------------------------------------------------------------------

/// Tilt tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltConfig {
    /// Maximum rotation in degrees at the element's edges.
    pub max_tilt: f64,
    /// CSS perspective distance in pixels, passed through to the view.
    pub perspective: f64,
    pub hover_scale: f64,
    pub spring: SpringConfig,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_tilt: 15.0,
            perspective: 1000.0,
            hover_scale: 1.02,
            spring: SpringConfig::tilt(),
        }
    }
}

/// Element rotated toward the pointer.
#[derive(Debug, Clone)]
pub struct TiltEffect {
    bounds: Bounds,
    config: TiltConfig,
    hovered: bool,
    target: EffectPose,
    motion: MotionState,
    listener: Option<ListenerId>,
}

impl TiltEffect {
    #[must_use]
    pub fn new(bounds: Bounds, config: TiltConfig) -> Self {
        Self {
            bounds,
            config,
            hovered: false,
            target: EffectPose::NEUTRAL,
            motion: MotionState::default(),
            listener: None,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    #[must_use]
    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Target rotation for a pointer at `p` (viewport coordinates).
    #[must_use]
    pub fn tilt_for(&self, p: Point) -> (f64, f64) {
        let local = self.bounds.local(p);
        let cx = self.bounds.width / 2.0;
        let cy = self.bounds.height / 2.0;
        if cx <= 0.0 || cy <= 0.0 {
            return (0.0, 0.0);
        }
        let tilt_x = -(local.y - cy) / cy * self.config.max_tilt;
        let tilt_y = (local.x - cx) / cx * self.config.max_tilt;
        (tilt_x, tilt_y)
    }

    /// Pointer moved over the element.
    pub fn on_pointer_move(&mut self, p: Point) {
        let (rotate_x, rotate_y) = self.tilt_for(p);
        if !self.hovered {
            tracing::trace!(target: "showroom.effect", "tilt engaged");
        }
        self.hovered = true;
        self.target = EffectPose {
            rotate_x,
            rotate_y,
            scale: self.config.hover_scale,
            ..EffectPose::NEUTRAL
        };
    }

    pub fn on_pointer_leave(&mut self) {
        self.hovered = false;
        self.target = EffectPose::NEUTRAL;
        tracing::trace!(target: "showroom.effect", "tilt released");
    }

    pub fn step(&mut self, dt: Duration) -> EffectPose {
        self.motion = step_pose(self.motion, self.target, dt, self.config.spring);
        self.motion.pose
    }

    #[must_use]
    pub fn pose(&self) -> EffectPose {
        self.motion.pose
    }

    #[must_use]
    pub fn target(&self) -> EffectPose {
        self.target
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.motion.is_settled_on(&self.target)
    }
}

impl Component for TiltEffect {
    fn name(&self) -> &'static str {
        "tilt"
    }

    fn mount(&mut self, host: &mut Host, _now: Instant) {
        if self.listener.is_none() {
            self.listener = Some(host.listeners.register(self.name(), ListenerKinds::POINTER));
        }
    }

    fn dispose(&mut self, host: &mut Host) {
        release_listener(host, &mut self.listener);
        self.hovered = false;
        self.target = EffectPose::NEUTRAL;
    }
}

// ---------------------------------------------------------------------------
// Cursor follower
// ---------------------------------------------------------------------------

/// A point that trails the pointer through a spring.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    x: Spring,
    y: Spring,
    visible: bool,
    listener: Option<ListenerId>,
}

impl CursorFollower {
    #[must_use]
    pub fn new(spring: SpringConfig) -> Self {
        Self {
            x: Spring::resting(0.0).with_config(spring),
            y: Spring::resting(0.0).with_config(spring),
            visible: false,
            listener: None,
        }
    }

    /// First sighting jumps to the pointer; later moves are eased.
    pub fn on_pointer_move(&mut self, p: Point) {
        if !self.visible {
            let config = self.x.config();
            self.x = Spring::resting(p.x).with_config(config);
            self.y = Spring::resting(p.y).with_config(config);
            self.visible = true;
            return;
        }
        self.x.set_target(p.x);
        self.y.set_target(p.y);
    }

    pub fn on_pointer_leave(&mut self) {
        self.visible = false;
    }

    pub fn step(&mut self, dt: Duration) {
        self.x.advance(dt);
        self.y.advance(dt);
    }

    /// Displayed position while the pointer is on the page.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.visible
            .then(|| Point::new(self.x.position(), self.y.position()))
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new(SpringConfig::cursor())
    }
}

impl Component for CursorFollower {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn mount(&mut self, host: &mut Host, _now: Instant) {
        if self.listener.is_none() {
            self.listener = Some(host.listeners.register(self.name(), ListenerKinds::POINTER));
        }
    }

    fn dispose(&mut self, host: &mut Host) {
        release_listener(host, &mut self.listener);
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn card() -> Bounds {
        Bounds::new(100.0, 100.0, 200.0, 100.0)
    }

    #[test]
    fn step_pose_converges_and_snaps() {
        let mut state = MotionState::default();
        let target = EffectPose::translation(10.0, -5.0);
        for _ in 0..300 {
            state = step_pose(state, target, FRAME, SpringConfig::magnetic());
        }
        assert_eq!(state.pose, target);
        assert!(state.is_settled_on(&target));
    }

    #[test]
    fn step_pose_zero_dt_is_identity() {
        let state = MotionState::at_rest(EffectPose::translation(3.0, 4.0));
        let next = step_pose(state, EffectPose::NEUTRAL, Duration::ZERO, SpringConfig::tilt());
        assert_eq!(next, state);
    }

    #[test]
    fn magnetic_follows_pointer_inside_radius() {
        let mut m = MagneticEffect::new(card(), MagneticConfig::default());
        // center (200, 150); pointer 100 px right → 100 * 0.3 * 0.5
        m.on_pointer_move(Point::new(300.0, 150.0));
        assert!((m.target().translate_x - 15.0).abs() < 1e-9);
        assert!(m.is_hovered());
        m.on_pointer_move(Point::new(1000.0, 150.0));
        assert_eq!(m.target(), EffectPose::NEUTRAL);
        assert!(!m.is_hovered());
    }

    #[test]
    fn magnetic_leave_relaxes_without_snapping() {
        let mut m = MagneticEffect::new(card(), MagneticConfig::default());
        m.on_pointer_move(Point::new(300.0, 150.0));
        for _ in 0..200 {
            m.step(FRAME);
        }
        let engaged = m.pose().translate_x;
        assert!((engaged - 15.0).abs() < 0.01);

        m.on_pointer_leave();
        let first = m.step(FRAME).translate_x;
        assert!(first > 0.0 && first < engaged);
        for _ in 0..300 {
            m.step(FRAME);
        }
        assert_eq!(m.pose(), EffectPose::NEUTRAL);
    }

    #[test]
    fn tilt_angles_follow_formula() {
        let t = TiltEffect::new(card(), TiltConfig::default());
        // local (200, 0): right edge, top edge.
        let (x, y) = t.tilt_for(Point::new(300.0, 100.0));
        assert!((x - 15.0).abs() < 1e-9);
        assert!((y - 15.0).abs() < 1e-9);
        let (x, y) = t.tilt_for(Point::new(200.0, 150.0));
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn tilt_zero_size_is_flat() {
        let t = TiltEffect::new(Bounds::new(10.0, 10.0, 0.0, 0.0), TiltConfig::default());
        assert_eq!(t.tilt_for(Point::new(50.0, 50.0)), (0.0, 0.0));
    }

    #[test]
    fn tilt_hover_scales_and_leave_resets_target() {
        let mut t = TiltEffect::new(card(), TiltConfig::default());
        t.on_pointer_move(Point::new(250.0, 120.0));
        assert!((t.target().scale - 1.02).abs() < 1e-12);
        t.on_pointer_leave();
        assert_eq!(t.target(), EffectPose::NEUTRAL);
        assert!(!t.is_hovered());
    }

    #[test]
    fn cursor_jumps_then_eases() {
        let mut c = CursorFollower::default();
        assert_eq!(c.position(), None);
        c.on_pointer_move(Point::new(100.0, 100.0));
        assert_eq!(c.position(), Some(Point::new(100.0, 100.0)));
        c.on_pointer_move(Point::new(200.0, 100.0));
        c.step(FRAME);
        let p = c.position().unwrap();
        assert!(p.x > 100.0 && p.x < 200.0);
        for _ in 0..120 {
            c.step(FRAME);
        }
        assert!((c.position().unwrap().x - 200.0).abs() < 0.01);
        c.on_pointer_leave();
        assert_eq!(c.position(), None);
    }

    #[test]
    fn effects_register_and_release_listeners() {
        let t0 = Instant::now();
        let mut host = Host::new();
        let mut m = MagneticEffect::new(card(), MagneticConfig::default());
        let mut t = TiltEffect::new(card(), TiltConfig::default());
        let mut c = CursorFollower::default();
        m.mount(&mut host, t0);
        t.mount(&mut host, t0);
        c.mount(&mut host, t0);
        assert_eq!(host.listeners.count(ListenerKinds::POINTER_MOVE), 3);
        m.dispose(&mut host);
        t.dispose(&mut host);
        c.dispose(&mut host);
        assert!(host.is_idle());
    }
}
