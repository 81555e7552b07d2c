#![forbid(unsafe_code)]

//! Clamped range interpolation for scroll-linked values.
//!
//! A [`RangeMap`] maps an input interval onto an output interval linearly,
//! clamping outside the input interval. Header blur, hero fade and parallax
//! offsets are all one of these applied to a scroll reading.

/// Linear map from `input` to `output`, clamped at both ends.
#[derive(Debug, Clone, Copy)]
pub struct RangeMap {
    input: (f64, f64),
    output: (f64, f64),
}

impl RangeMap {
    /// Create a map from `input.0..input.1` onto `output.0..output.1`.
    ///
    /// The output interval may be descending (e.g. opacity 1 → 0).
    #[must_use]
    pub fn new(input: (f64, f64), output: (f64, f64)) -> Self {
        Self { input, output }
    }

    /// Map a value. A degenerate input interval yields the output start for
    /// values below it and the output end otherwise.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let (in_lo, in_hi) = self.input;
        let (out_lo, out_hi) = self.output;
        let span = in_hi - in_lo;
        let t = if span.abs() < f64::EPSILON {
            if value < in_lo { 0.0 } else { 1.0 }
        } else {
            ((value - in_lo) / span).clamp(0.0, 1.0)
        };
        out_lo + (out_hi - out_lo) * t
    }
}

/// Parallax offset for a layer moving at `speed` relative to the scroll:
/// `100·speed` at ratio 0, `−100·speed` at ratio 1.
#[must_use]
pub fn parallax(speed: f64) -> RangeMap {
    RangeMap::new((0.0, 1.0), (100.0 * speed, -100.0 * speed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_linearly_inside_range() {
        let blur = RangeMap::new((0.0, 100.0), (8.0, 20.0));
        assert!((blur.apply(0.0) - 8.0).abs() < 1e-12);
        assert!((blur.apply(50.0) - 14.0).abs() < 1e-12);
        assert!((blur.apply(100.0) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn clamps_outside_range() {
        let opacity = RangeMap::new((0.0, 0.4), (1.0, 0.0));
        assert!((opacity.apply(-1.0) - 1.0).abs() < 1e-12);
        assert!(opacity.apply(0.9).abs() < 1e-12);
    }

    #[test]
    fn descending_output() {
        let opacity = RangeMap::new((0.0, 0.4), (1.0, 0.0));
        assert!((opacity.apply(0.2) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_input_is_a_step() {
        let step = RangeMap::new((5.0, 5.0), (0.0, 1.0));
        assert!(step.apply(4.0).abs() < 1e-12);
        assert!((step.apply(5.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn parallax_runs_from_positive_to_negative() {
        let p = parallax(0.5);
        assert!((p.apply(0.0) - 50.0).abs() < 1e-12);
        assert!((p.apply(1.0) + 50.0).abs() < 1e-12);
    }
}
