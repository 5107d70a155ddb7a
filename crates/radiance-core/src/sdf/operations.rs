//! Scene field operations

use super::SceneField;
use glam::Vec2;

/// Union of two scene fields
#[derive(Debug, Clone)]
pub struct Union<A: SceneField, B: SceneField> {
    pub a: A,
    pub b: B,
}

impl<A: SceneField, B: SceneField> Union<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: SceneField, B: SceneField> SceneField for Union<A, B> {
    fn signed_distance(&self, p: Vec2) -> f32 {
        self.a.signed_distance(p).min(self.b.signed_distance(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::primitives::{box2, circle};
    use approx::assert_relative_eq;

    #[test]
    fn union_takes_minimum_distance() {
        let a = circle(Vec2::ZERO, 1.0);
        let b = box2(Vec2::ZERO, Vec2::splat(2.0));
        let u = Union::new(a, b);

        assert_relative_eq!(u.signed_distance(Vec2::ZERO), -2.0, epsilon = 1e-6);
    }

    #[test]
    fn union_inside_either_is_inside() {
        let u = Union::new(circle(Vec2::ZERO, 0.5), circle(Vec2::new(2.0, 0.0), 0.5));

        assert!(u.signed_distance(Vec2::ZERO) < 0.0);
        assert!(u.signed_distance(Vec2::new(2.0, 0.0)) < 0.0);
        assert!(u.signed_distance(Vec2::new(1.0, 0.0)) > 0.0);
    }
}
