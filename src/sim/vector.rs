//! 2D vector value type used by the projectile integrator
//!
//! Every operation returns a new vector except `apply_friction`, which
//! rescales in place. All operations are total: dividing by zero or
//! normalizing the zero vector yields the zero vector.

use std::ops::{Add, Div, Mul, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D vector in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(self, v: Vector2D) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }

    pub fn subtract(self, v: Vector2D) -> Self {
        Self::new(self.x - v.x, self.y - v.y)
    }

    pub fn multiply(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    /// Divide by a scalar; dividing by zero gives the zero vector
    pub fn divide(self, scalar: f32) -> Self {
        if scalar == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / scalar, self.y / scalar)
    }

    /// Euclidean length
    pub fn magnitude(self) -> f32 {
        Vec2::from(self).length()
    }

    /// Unit vector in the same direction, or zero for the zero vector
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            Self::ZERO
        } else {
            self.divide(mag)
        }
    }

    /// Scale speed by `factor` in place, keeping direction
    pub fn apply_friction(&mut self, factor: f32) {
        let speed = self.magnitude();
        if speed > 0.0 {
            let new_speed = (speed * factor).max(0.0);
            let dir = self.normalize();
            self.x = dir.x * new_speed;
            self.y = dir.y * new_speed;
        }
    }

    pub fn distance_to(self, v: Vector2D) -> f32 {
        Vec2::from(self).distance(Vec2::from(v))
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::add(self, rhs)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        self.subtract(rhs)
    }
}

impl Mul<f32> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f32) -> Vector2D {
        self.multiply(rhs)
    }
}

impl Div<f32> for Vector2D {
    type Output = Vector2D;

    fn div(self, rhs: f32) -> Vector2D {
        self.divide(rhs)
    }
}

impl From<Vec2> for Vector2D {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for Vec2 {
    fn from(v: Vector2D) -> Self {
        Vec2::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_divide_by_zero_is_zero() {
        assert_eq!(Vector2D::new(3.0, -4.0).divide(0.0), Vector2D::ZERO);
        assert_eq!(Vector2D::new(3.0, -4.0) / 0.0, Vector2D::ZERO);
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vector2D::ZERO.normalize(), Vector2D::ZERO);
    }

    #[test]
    fn test_magnitude_and_distance() {
        let a = Vector2D::new(3.0, 4.0);
        assert!((a.magnitude() - 5.0).abs() < EPS);
        assert!((a.distance_to(Vector2D::new(0.0, 8.0)) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_operators_do_not_mutate() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(0.5, -1.0);
        assert_eq!(a + b, Vector2D::new(1.5, 1.0));
        assert_eq!(a - b, Vector2D::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(a, Vector2D::new(1.0, 2.0));
    }

    #[test]
    fn test_friction_on_zero_vector_is_noop() {
        let mut v = Vector2D::ZERO;
        v.apply_friction(0.5);
        assert_eq!(v, Vector2D::ZERO);
    }

    #[test]
    fn test_negative_friction_clamps_to_zero() {
        let mut v = Vector2D::new(2.0, 0.0);
        v.apply_friction(-1.0);
        assert!(v.magnitude() < EPS);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_unit(x in -1e3f32..1e3, y in -1e3f32..1e3) {
            let v = Vector2D::new(x, y);
            prop_assume!(v.magnitude() > 1e-3);
            prop_assert!((v.normalize().magnitude() - 1.0).abs() < EPS);
        }

        #[test]
        fn prop_friction_shrinks_and_keeps_direction(
            x in -1e3f32..1e3,
            y in -1e3f32..1e3,
            f in 0.01f32..0.99,
        ) {
            let before = Vector2D::new(x, y);
            prop_assume!(before.magnitude() > 1e-2);
            let mut after = before;
            after.apply_friction(f);
            prop_assert!(after.magnitude() < before.magnitude());
            let (d0, d1) = (before.normalize(), after.normalize());
            prop_assert!((d0.x - d1.x).abs() < EPS && (d0.y - d1.y).abs() < EPS);
        }

        #[test]
        fn prop_unit_friction_keeps_magnitude(x in -1e3f32..1e3, y in -1e3f32..1e3) {
            let before = Vector2D::new(x, y);
            let mut after = before;
            after.apply_friction(1.0);
            prop_assert!((after.magnitude() - before.magnitude()).abs() <= before.magnitude() * 1e-5 + EPS);
        }
    }
}
