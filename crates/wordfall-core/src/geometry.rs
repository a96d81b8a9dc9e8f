#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are stage-local CSS pixels: origin at the top-left corner,
//! `x` growing right and `y` growing down. Values are `f32` because random
//! placement and pointer deltas are fractional.

use crate::error::CoreError;

/// A point in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Per-axis displacement from `origin` to `self`.
    #[inline]
    #[must_use]
    pub fn delta_from(self, origin: Point) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// A width/height pair, e.g. the stage bounds or an item footprint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a size without validation.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Create a size, rejecting negative or non-finite extents.
    pub fn checked(width: f32, height: f32) -> Result<Self, CoreError> {
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            Ok(Self { width, height })
        } else {
            Err(CoreError::InvalidExtent { width, height })
        }
    }
}

/// An axis-aligned rectangle used for footprints, exclusion zones, and hit
/// testing.
///
/// Edges are half-open: a rectangle covers `[x, x + width) × [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at `origin` with the given size.
    #[inline]
    #[must_use]
    pub const fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Horizontal midpoint.
    #[inline]
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Half-open overlap test: two rectangles overlap iff their intervals
    /// overlap on both axes. Rectangles that merely touch do not overlap.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Move the rectangle so it lies inside `bounds` where possible.
    ///
    /// A rectangle larger than `bounds` on an axis is pinned to the
    /// bounds' origin on that axis.
    #[must_use]
    pub fn clamped_within(&self, bounds: Size) -> Rect {
        let max_x = (bounds.width - self.width).max(0.0);
        let max_y = (bounds.height - self.height).max(0.0);
        Rect::new(
            self.x.clamp(0.0, max_x),
            self.y.clamp(0.0, max_y),
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn overlap_on_one_axis_only_is_not_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(14.9, 14.9)));
        assert!(!r.contains(Point::new(15.0, 12.0)));
        assert!(!r.contains(Point::new(12.0, 15.0)));
    }

    #[test]
    fn clamped_within_keeps_rect_inside() {
        let bounds = Size::new(100.0, 50.0);
        let r = Rect::new(95.0, -3.0, 20.0, 10.0).clamped_within(bounds);
        assert_eq!(r, Rect::new(80.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn clamped_within_oversized_rect_pins_to_origin() {
        let bounds = Size::new(10.0, 10.0);
        let r = Rect::new(4.0, 4.0, 30.0, 5.0).clamped_within(bounds);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 4.0);
    }

    #[test]
    fn center_x_is_midpoint() {
        assert_eq!(Rect::new(10.0, 0.0, 20.0, 5.0).center_x(), 20.0);
    }

    #[test]
    fn checked_size_rejects_bad_extents() {
        assert!(Size::checked(10.0, 10.0).is_ok());
        assert!(Size::checked(0.0, 0.0).is_ok());
        assert!(Size::checked(-1.0, 10.0).is_err());
        assert!(Size::checked(f32::NAN, 10.0).is_err());
        assert!(Size::checked(10.0, f32::INFINITY).is_err());
    }
}
