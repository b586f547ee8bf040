//! Geometry types shared by the placement calculator and the overlay host.
//!
//! # Logical Pixels (Points)
//!
//! All values are **logical pixels** (points/dp) in absolute screen
//! coordinates: the origin is the top-left corner of the window's root view,
//! `x` grows to the right and `y` grows downwards. Native backends convert to
//! physical pixels; nothing in this crate knows about screen density.
//!
//! ```ignore
//! // An anchor button 80pt wide, 30pt tall, at (100, 50) on screen.
//! let anchor = Rect::from_xywh(100.0, 50.0, 80.0, 30.0);
//! assert_eq!(anchor.max_y(), 80.0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Axis
// ============================================================================

/// One of the two screen axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// The x axis (left to right).
    Horizontal,
    /// The y axis (top to bottom).
    Vertical,
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle in absolute screen coordinates.
///
/// Rectangles are plain snapshots. A new measurement always produces a new
/// `Rect`; nothing mutates one in place.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// Creates a new [`Rect`] with the provided `origin` and `size`.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Creates a rectangle from its four scalar components.
    #[must_use]
    pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    /// Returns the rectangle's origin (top-left corner).
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the rectangle's size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns the rectangle's x-coordinate (left edge).
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.origin.x
    }

    /// Returns the rectangle's y-coordinate (top edge).
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.origin.y
    }

    /// Returns the rectangle's width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.size.width
    }

    /// Returns the rectangle's height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.size.height
    }

    /// Returns the maximum x-coordinate (right edge).
    #[must_use]
    pub const fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Returns the maximum y-coordinate (bottom edge).
    #[must_use]
    pub const fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Leading edge along `axis` (`x` for horizontal, `y` for vertical).
    #[must_use]
    pub const fn start(&self, axis: Axis) -> f32 {
        self.origin.along(axis)
    }

    /// Trailing edge along `axis`.
    #[must_use]
    pub const fn end(&self, axis: Axis) -> f32 {
        self.start(axis) + self.size.along(axis)
    }

    /// Extent along `axis`.
    #[must_use]
    pub const fn length(&self, axis: Axis) -> f32 {
        self.size.along(axis)
    }

    /// Midpoint along `axis`.
    #[must_use]
    pub const fn mid(&self, axis: Axis) -> f32 {
        self.start(axis) + self.length(axis) / 2.0
    }

    /// Returns true if either dimension is zero (or negative).
    ///
    /// An empty rectangle is what a platform reports for an anchor that is
    /// hidden, collapsed, or not laid out yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Returns true if `point` lies inside the rectangle.
    ///
    /// The left/top edges are inclusive, the right/bottom edges exclusive, so
    /// two abutting rectangles never both contain the same point.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x() && point.x < self.max_x() && point.y >= self.y() && point.y < self.max_y()
    }
}

// ============================================================================
// Size
// ============================================================================

/// Two-dimensional size expressed in points.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// The width in points.
    pub width: f32,
    /// The height in points.
    pub height: f32,
}

impl Size {
    /// Constructs a [`Size`] with the given `width` and `height`.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero (or negative).
    ///
    /// A surface reporting an empty size has not been laid out yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Extent along `axis`.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

// ============================================================================
// Point
// ============================================================================

/// Absolute screen coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// The x-coordinate in points.
    pub x: f32,
    /// The y-coordinate in points.
    pub y: f32,
}

impl Point {
    /// Constructs a [`Point`] at the given `x` and `y`.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);

        assert_eq!(rect.x(), 10.0);
        assert_eq!(rect.y(), 20.0);
        assert_eq!(rect.max_x(), 110.0);
        assert_eq!(rect.max_y(), 70.0);
        assert_eq!(rect.mid(Axis::Horizontal), 60.0);
        assert_eq!(rect.mid(Axis::Vertical), 45.0);
    }

    #[test]
    fn test_rect_axis_accessors() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);

        assert_eq!(rect.start(Axis::Horizontal), 10.0);
        assert_eq!(rect.end(Axis::Horizontal), 110.0);
        assert_eq!(rect.start(Axis::Vertical), 20.0);
        assert_eq!(rect.length(Axis::Vertical), 50.0);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::from_xywh(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(Rect::from_xywh(5.0, 5.0, 10.0, 0.0).is_empty());
        assert!(!Rect::from_xywh(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);

        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(9.9, 9.9)));
        assert!(!rect.contains(Point::new(10.0, 5.0)));
        assert!(!rect.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_size_empty() {
        assert!(Size::default().is_empty());
        assert!(Size::new(0.0, 40.0).is_empty());
        assert!(Size::new(160.0, -1.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }
}
