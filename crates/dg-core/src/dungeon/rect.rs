//! Grid rectangles
//!
//! `Rectangle` is the plain value embedded in containers, corridors and
//! placed rooms. Derived geometry (center, right and bottom edges) is always
//! computed from the four stored fields.

use serde::{Deserialize, Serialize};

/// A point with fractional coordinates, used for rectangle centers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in grid coordinates
///
/// `x`/`y` is the top-left cell; the rectangle covers
/// `x..x + width` by `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Geometric midpoint
    pub fn center(&self) -> Point {
        Point::new(
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn down(&self) -> i32 {
        self.y + self.height
    }

    /// Number of cells covered
    pub const fn surface(&self) -> i32 {
        self.width * self.height
    }

    /// True when the rectangle covers no cell
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if this rectangle fully contains another
    pub const fn contains(&self, other: &Rectangle) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.down() >= other.down()
    }

    /// Check if the cell at (x, y) lies inside the rectangle
    pub const fn contains_cell(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.down()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_edges() {
        let r = Rectangle::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.down(), 7);
        assert_eq!(r.surface(), 40);
        assert_eq!(r.center(), Point::new(7.0, 5.0));
    }

    #[test]
    fn test_center_is_fractional() {
        let r = Rectangle::new(0, 0, 5, 3);
        assert_eq!(r.center(), Point::new(2.5, 1.5));
    }

    #[test]
    fn test_contains() {
        let outer = Rectangle::new(0, 0, 10, 10);
        assert!(outer.contains(&Rectangle::new(0, 0, 10, 10)));
        assert!(outer.contains(&Rectangle::new(2, 2, 3, 3)));
        assert!(!outer.contains(&Rectangle::new(8, 8, 3, 3)));
        assert!(!outer.contains(&Rectangle::new(-1, 0, 2, 2)));
    }

    #[test]
    fn test_contains_cell_is_half_open() {
        let r = Rectangle::new(1, 1, 2, 2);
        assert!(r.contains_cell(1, 1));
        assert!(r.contains_cell(2, 2));
        assert!(!r.contains_cell(3, 2));
        assert!(!r.contains_cell(0, 1));
    }

    #[test]
    fn test_empty() {
        assert!(Rectangle::new(0, 0, 0, 5).is_empty());
        assert!(Rectangle::new(0, 0, 5, -1).is_empty());
        assert!(!Rectangle::new(0, 0, 1, 1).is_empty());
    }
}
