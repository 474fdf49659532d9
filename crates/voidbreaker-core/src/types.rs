//! Core types used throughout Voidbreaker

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in screen space (y grows downward).
///
/// All overlap tests in the game use inclusive edges: two boxes that share
/// exactly one edge are considered touching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Create a box from its four edges
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Create a box from a top-left position and a size
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self {
            left: position.x,
            right: position.x + size.x,
            top: position.y,
            bottom: position.y + size.y,
        }
    }

    /// Create a box centered on a point
    pub fn from_center_half_extents(center: Vec2, half: Vec2) -> Self {
        Self {
            left: center.x - half.x,
            right: center.x + half.x,
            top: center.y - half.y,
            bottom: center.y + half.y,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Top-left corner
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Center point of the box
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Inclusive overlap test.
    ///
    /// Boxes overlap unless one lies entirely to one side of the other on X
    /// or entirely to one side on Y.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }

    /// Inclusive point containment
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Aabb {
        Aabb {
            left: self.left - margin,
            right: self.right + margin,
            top: self.top - margin,
            bottom: self.bottom + margin,
        }
    }
}

/// RGBA color with floating point components (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);

    /// Create a color from RGB values (alpha = 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_edge_counts_as_overlap() {
        let a = Aabb::new(0.0, 10.0, 0.0, 10.0);
        let b = Aabb::new(10.0, 20.0, 0.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn separated_on_either_axis() {
        let a = Aabb::new(0.0, 10.0, 0.0, 10.0);
        assert!(!a.overlaps(&Aabb::new(10.5, 20.0, 0.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 10.0, 10.5, 20.0)));
        assert!(!a.overlaps(&Aabb::new(-20.0, -0.5, 0.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 10.0, -20.0, -0.5)));
    }

    #[test]
    fn from_position_size() {
        let b = Aabb::from_position_size(Vec2::new(5.0, 8.0), Vec2::new(10.0, 4.0));
        assert_eq!(b, Aabb::new(5.0, 15.0, 8.0, 12.0));
        assert_eq!(b.center(), Vec2::new(10.0, 10.0));
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 4.0);
    }

    #[test]
    fn contains_point_inclusive() {
        let b = Aabb::new(0.0, 10.0, 0.0, 10.0);
        assert!(b.contains_point(Vec2::new(10.0, 10.0)));
        assert!(!b.contains_point(Vec2::new(10.1, 5.0)));
    }

    #[test]
    fn color_lerp_endpoints() {
        assert_eq!(Color::lerp(&Color::RED, &Color::WHITE, 0.0), Color::RED);
        assert_eq!(Color::lerp(&Color::RED, &Color::WHITE, 1.0), Color::WHITE);
        let mid = Color::lerp(&Color::RED, &Color::WHITE, 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (1.0, 0.5, 0.5));
    }
}
