//! Axis-aligned rectangle used for the playing field and team halves.

use serde::{Serialize, Deserialize};

use super::vec2::Vec2;

/// Axis-aligned rectangle in screen coordinates (y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (minimum x)
    pub left: f64,
    /// Top edge (minimum y)
    pub top: f64,
    /// Right edge (maximum x)
    pub right: f64,
    /// Bottom edge (maximum y)
    pub bottom: f64,
}

impl Rect {
    /// Create a rectangle from its four edges.
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Check if a point lies strictly inside every edge.
    #[inline]
    pub fn contains_strict(&self, point: Vec2) -> bool {
        point.x > self.left
            && point.x < self.right
            && point.y > self.top
            && point.y < self.bottom
    }

    /// Left half of the rectangle.
    pub fn left_half(&self) -> Self {
        Self { right: self.center().x, ..*self }
    }

    /// Right half of the rectangle.
    pub fn right_half(&self) -> Self {
        Self { left: self.center().x, ..*self }
    }

    /// Shrink every edge inwards by `margin`.
    ///
    /// Collapses to the center line on an axis narrower than `2 * margin`.
    pub fn inset(&self, margin: f64) -> Self {
        let mx = margin.min(self.width() * 0.5).max(0.0);
        let my = margin.min(self.height() * 0.5).max(0.0);
        Self {
            left: self.left + mx,
            top: self.top + my,
            right: self.right - mx,
            bottom: self.bottom - my,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_halves() {
        let field = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(field.center(), Vec2::new(50.0, 25.0));
        assert_eq!(field.left_half(), Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(field.right_half(), Rect::new(50.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_contains_strict_excludes_edges() {
        let field = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(field.contains_strict(Vec2::new(5.0, 5.0)));
        assert!(!field.contains_strict(Vec2::new(0.0, 5.0)));
        assert!(!field.contains_strict(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_inset_clamps_to_center() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0).inset(3.0);
        assert_eq!(r, Rect::new(3.0, 2.0, 7.0, 2.0));
    }
}
