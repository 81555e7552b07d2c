#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are CSS pixels as floats, with the origin at the top-left
//! of the viewport. Element bounds are viewport-relative (what a host gets
//! from a bounding-box query), so `top` goes negative once an element has
//! scrolled above the fold.

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Viewport-relative bounding box of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width (never negative once constructed through [`Bounds::new`]).
    pub width: f64,
    /// Height (never negative once constructed through [`Bounds::new`]).
    pub height: f64,
}

impl Bounds {
    /// Create bounds. Negative sizes are clamped to zero.
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Geometric center.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Check if the bounds have zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the bounds (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    /// Translate a viewport point into element-local coordinates.
    #[inline]
    pub fn local(&self, p: Point) -> Point {
        Point::new(p.x - self.left, p.y - self.top)
    }

    /// Same bounds shifted vertically (e.g. after the page scrolled by `dy`).
    #[inline]
    #[must_use]
    pub fn offset_y(&self, dy: f64) -> Bounds {
        Bounds {
            top: self.top + dy,
            ..*self
        }
    }
}

/// Visible viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a new viewport.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The viewport as bounds anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }
}

/// Document and viewport extents needed to normalize a scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentMetrics {
    /// Total scrollable document height.
    pub document_height: f64,
    /// Visible viewport.
    pub viewport: Viewport,
}

impl DocumentMetrics {
    /// Create document metrics.
    #[inline]
    pub const fn new(document_height: f64, viewport: Viewport) -> Self {
        Self {
            document_height,
            viewport,
        }
    }

    /// Maximum scroll offset. Zero when the document fits in the viewport.
    #[inline]
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }
}
