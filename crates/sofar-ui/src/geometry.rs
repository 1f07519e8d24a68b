//! Integer pixel geometry.

/// A point in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    pub const fn offset(self, by: Point) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Zero extent.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grow both axes by `margin` on each side.
    pub const fn with_margin(self, margin: i32) -> Self {
        Self {
            width: self.width + margin * 2,
            height: self.height + margin * 2,
        }
    }

    /// True if either axis is zero or negative.
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Top-left corner.
    pub const fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Extent.
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Centre, rounded towards the origin.
    pub const fn center(self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Strict interior containment: a point on any edge is outside.
    pub const fn contains(self, p: Point) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// True if `x` lies strictly between the left and right edges.
    pub const fn contains_x(self, x: i32) -> bool {
        x > self.x && x < self.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_strict_on_every_edge() {
        let r = Rect::from_origin_size(Point::new(10, 20), Size::new(30, 40));
        assert!(!r.contains(Point::new(10, 30)), "left edge");
        assert!(!r.contains(Point::new(20, 20)), "top edge");
        assert!(!r.contains(Point::new(40, 30)), "right edge");
        assert!(!r.contains(Point::new(20, 60)), "bottom edge");
        assert!(r.contains(Point::new(11, 21)));
        assert!(r.contains(Point::new(39, 59)));
    }

    #[test]
    fn margin_grows_both_sides() {
        assert_eq!(Size::new(100, 50).with_margin(8), Size::new(116, 66));
    }

    #[test]
    fn empty_size() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }
}
