//! Plane geometry helpers used by the simulation
//!
//! Coordinates are screen-style: x grows right, y grows down. Angles are in
//! degrees and rotate counterclockwise in the mathematical sense.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rotate `point` counterclockwise about `origin` by `angle_degrees`
pub fn rotate_point(origin: Vec2, point: Vec2, angle_degrees: f32) -> Vec2 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let d = point - origin;
    Vec2::new(
        origin.x + cos * d.x - sin * d.y,
        origin.y + sin * d.x + cos * d.y,
    )
}

/// Unit vector pointing from `from` to `to`, or `None` if they coincide
#[inline]
pub fn unit_toward(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Axis-aligned square: top-left corner plus side length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub pos: Vec2,
    pub size: f32,
}

impl Square {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Move the square so its center lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - Vec2::splat(self.size / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let origin = Vec2::new(10.0, 10.0);
        let p = Vec2::new(20.0, 10.0);
        assert!(approx(rotate_point(origin, p, 90.0), Vec2::new(10.0, 20.0)));
        assert!(approx(rotate_point(origin, p, 180.0), Vec2::new(0.0, 10.0)));
        assert!(approx(rotate_point(origin, p, 360.0), p));
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let origin = Vec2::new(400.0, 300.0);
        let p = Vec2::new(400.0, 270.0);
        assert!(approx(rotate_point(origin, p, 0.0), p));
    }

    #[test]
    fn test_unit_toward_guards_zero_length() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(unit_toward(p, p), None);
        let dir = unit_toward(Vec2::ZERO, p).unwrap();
        assert!(approx(dir, Vec2::new(0.6, 0.8)));
    }

    #[test]
    fn test_square_contains_half_open() {
        let sq = Square::new(0.0, 0.0, 40.0);
        assert!(sq.contains(Vec2::new(0.0, 0.0)));
        assert!(sq.contains(Vec2::new(39.9, 39.9)));
        assert!(!sq.contains(Vec2::new(40.0, 10.0)));
        assert!(!sq.contains(Vec2::new(10.0, 40.0)));
        assert!(!sq.contains(Vec2::new(-0.1, 10.0)));
    }

    #[test]
    fn test_square_center_roundtrip() {
        let mut sq = Square::new(-40.0, -40.0, 40.0);
        assert_eq!(sq.center(), Vec2::new(-20.0, -20.0));
        sq.set_center(Vec2::new(100.0, 50.0));
        assert_eq!(sq.pos, Vec2::new(80.0, 30.0));
    }

    proptest! {
        #[test]
        fn rotation_preserves_distance(
            ox in -1000.0f32..1000.0,
            oy in -1000.0f32..1000.0,
            r in 0.0f32..500.0,
            start in 0.0f32..360.0,
            angle in -720.0f32..720.0,
        ) {
            let origin = Vec2::new(ox, oy);
            let point = origin + Vec2::new(r * start.to_radians().cos(), r * start.to_radians().sin());
            let rotated = rotate_point(origin, point, angle);
            let dist = rotated.distance(origin);
            prop_assert!((dist - r).abs() <= 1e-3 * (1.0 + r));
        }
    }
}
