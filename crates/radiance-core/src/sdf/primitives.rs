//! Scene primitives
//!
//! Unlike a modeling library, scene primitives carry their own position so a
//! scene is just a flat union of shapes in scene coordinates.

use super::SceneField;
use glam::Vec2;

/// Create a circle
pub fn circle(center: Vec2, radius: f32) -> Circle {
    Circle::new(center, radius)
}

/// Create an axis-aligned box from its center and half-extents
pub fn box2(center: Vec2, half_extents: Vec2) -> Box2 {
    Box2::new(center, half_extents)
}

/// Filled circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl SceneField for Circle {
    fn signed_distance(&self, p: Vec2) -> f32 {
        (p - self.center).length() - self.radius
    }
}

/// Filled axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box2 {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Box2 {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }
}

impl SceneField for Box2 {
    fn signed_distance(&self, p: Vec2) -> f32 {
        let q = (p - self.center).abs() - self.half_extents;
        q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0)
    }
}
