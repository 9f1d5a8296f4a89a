//! Axis-aligned rectangle geometry
//!
//! Every entity in the simulation is boxed by one of these: the paddle,
//! the falling stars and bombs, and the play area itself. Identity is
//! positional, not referential.

use glam::Vec2;

/// An axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect of the given size centered on `center`
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Move the rect so its center lands on `center`, keeping its size
    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    /// Strict overlap test: true only for a non-zero-area intersection.
    /// Rects that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Return a copy grown by `amount` on every side (negative shrinks)
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            w: self.w + amount * 2.0,
            h: self.h + amount * 2.0,
        }
    }

    /// Return a copy translated fully inside `bounds`. A rect larger
    /// than the bounds is pinned to the bounds' top-left edge.
    pub fn clamped_to(&self, bounds: &Rect) -> Self {
        let x = self
            .x
            .min(bounds.right() - self.w)
            .max(bounds.left());
        let y = self
            .y
            .min(bounds.bottom() - self.h)
            .max(bounds.top());
        Self { x, y, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_hit() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_overlap_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        // Touching edges have zero intersection area
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_containment_is_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_from_center_round_trip() {
        let r = Rect::from_center(Vec2::new(50.0, 30.0), 20.0, 10.0);
        assert_eq!(r.x, 40.0);
        assert_eq!(r.y, 25.0);
        assert_eq!(r.center(), Vec2::new(50.0, 30.0));
    }

    #[test]
    fn test_clamp_moves_rect_inside() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r = Rect::new(-5.0, 95.0, 10.0, 10.0).clamped_to(&bounds);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 90.0);
        assert_eq!((r.w, r.h), (10.0, 10.0));
    }

    #[test]
    fn test_clamp_leaves_inner_rect_alone() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r = Rect::new(20.0, 30.0, 10.0, 10.0);
        assert_eq!(r.clamped_to(&bounds), r);
    }

    proptest! {
        #[test]
        fn clamped_rect_always_inside_bounds(
            x in -500.0f32..1500.0,
            y in -500.0f32..1500.0,
        ) {
            let bounds = Rect::new(0.0, 0.0, 1280.0, 720.0);
            let r = Rect::new(x, y, 50.0, 50.0).clamped_to(&bounds);
            prop_assert!(r.left() >= bounds.left());
            prop_assert!(r.top() >= bounds.top());
            prop_assert!(r.right() <= bounds.right());
            prop_assert!(r.bottom() <= bounds.bottom());
        }
    }
}
