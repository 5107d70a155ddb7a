//! Data-driven scenes
//!
//! A [`Scene`] is a flat list of primitives that can be loaded from JSON:
//!
//! ```json
//! { "shapes": [
//!     { "type": "circle", "center": [320.0, 200.0], "radius": 40.0 },
//!     { "type": "box", "center": [640.0, 500.0], "half_extents": [120.0, 16.0] }
//! ] }
//! ```

use super::{Box2, Circle, SceneField};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single scene primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Box { center: Vec2, half_extents: Vec2 },
}

impl SceneField for Shape {
    fn signed_distance(&self, p: Vec2) -> f32 {
        match *self {
            Shape::Circle { center, radius } => Circle::new(center, radius).signed_distance(p),
            Shape::Box {
                center,
                half_extents,
            } => Box2::new(center, half_extents).signed_distance(p),
        }
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle {
            center: c.center,
            radius: c.radius,
        }
    }
}

impl From<Box2> for Shape {
    fn from(b: Box2) -> Self {
        Shape::Box {
            center: b.center,
            half_extents: b.half_extents,
        }
    }
}

/// Union of any number of primitives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive (builder style)
    pub fn with(mut self, shape: impl Into<Shape>) -> Self {
        self.shapes.push(shape.into());
        self
    }

    pub fn push(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl SceneField for Scene {
    /// An empty scene has no surface anywhere.
    fn signed_distance(&self, p: Vec2) -> f32 {
        self.shapes
            .iter()
            .map(|s| s.signed_distance(p))
            .fold(f32::INFINITY, f32::min)
    }
}
