//! Axis-aligned collision tests
//!
//! Everything in the arena is treated as a box in screen space (y grows
//! downward). Both tests are strict: touching edges do not count as contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Playfield extents, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if the point is on or inside the bounds (edges count as inside)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Same center, each side scaled by `factor`
    pub fn shrunk(&self, factor: f32) -> Self {
        Self::centered(self.center(), self.size * factor)
    }
}

/// Point strictly inside a rectangle
#[inline]
pub fn intersects(point: Vec2, rect: &Rect) -> bool {
    let max = rect.max();
    point.x > rect.min.x && point.x < max.x && point.y > rect.min.y && point.y < max.y
}

/// Any positive-area overlap between two rectangles
#[inline]
pub fn intersects_rect(a: &Rect, b: &Rect) -> bool {
    let a_max = a.max();
    let b_max = b.max();
    a_max.x > b.min.x && a.min.x < b_max.x && a_max.y > b.min.y && a.min.y < b_max.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hostile_box() -> Rect {
        Rect::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0))
    }

    #[test]
    fn test_point_inside_rect() {
        assert!(intersects(Vec2::new(150.0, 150.0), &hostile_box()));
        assert!(!intersects(Vec2::new(250.0, 150.0), &hostile_box()));
    }

    #[test]
    fn test_point_on_edge_is_outside() {
        let rect = hostile_box();
        assert!(!intersects(Vec2::new(100.0, 150.0), &rect));
        assert!(!intersects(Vec2::new(150.0, 200.0), &rect));
    }

    #[test]
    fn test_rect_overlap() {
        let a = hostile_box();
        let b = Rect::new(Vec2::new(190.0, 190.0), Vec2::new(20.0, 20.0));
        assert!(intersects_rect(&a, &b));
        assert!(intersects_rect(&b, &a));

        // Edge-touching boxes do not overlap
        let c = Rect::new(Vec2::new(200.0, 100.0), Vec2::new(20.0, 20.0));
        assert!(!intersects_rect(&a, &c));
    }

    #[test]
    fn test_shrunk_hitbox_is_forgiving() {
        // Actor box reaches into the hostile by 5px, but the 60% hitbox doesn't
        let actor = Rect::centered(Vec2::new(85.0, 150.0), Vec2::new(40.0, 80.0));
        assert!(intersects_rect(&actor, &hostile_box()));
        assert!(!intersects_rect(&actor.shrunk(0.6), &hostile_box()));
    }

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = Bounds::new(800.0, 600.0);
        assert!(bounds.contains(Vec2::new(0.0, 0.0)));
        assert!(bounds.contains(Vec2::new(800.0, 600.0)));
        assert!(!bounds.contains(Vec2::new(800.1, 10.0)));
        assert!(!bounds.contains(Vec2::new(10.0, -0.1)));
        assert!(Bounds::new(0.0, 600.0).is_degenerate());
    }

    proptest! {
        #[test]
        fn prop_rect_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Rect::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Rect::new(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(intersects_rect(&a, &b), intersects_rect(&b, &a));
        }

        #[test]
        fn prop_center_is_inside(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let rect = Rect::new(Vec2::new(x, y), Vec2::new(w, h));
            prop_assert!(intersects(rect.center(), &rect));
        }
    }
}
