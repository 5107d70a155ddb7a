//! Signed distance fields describing the 2D scene
//!
//! A scene is a function returning the distance from any point to the nearest
//! surface. Negative values are inside, positive values are outside, and zero
//! is exactly on the surface. The radiance cascades only ever ask a scene for
//! [`SceneField::signed_distance`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use radiance_core::prelude::*;
//!
//! let room = circle(Vec2::new(200.0, 200.0), 40.0)
//!     .union(box2(Vec2::new(500.0, 300.0), Vec2::new(60.0, 20.0)));
//!
//! assert!(room.signed_distance(Vec2::new(200.0, 200.0)) < 0.0);
//! ```

pub mod operations;
pub mod primitives;
pub mod scene;

use glam::Vec2;
use std::sync::Arc;

/// A scene that can report the signed distance to its nearest surface
pub trait SceneField: Send + Sync {
    /// Signed distance from `p` to the nearest surface, negative inside.
    fn signed_distance(&self, p: Vec2) -> f32;
}

impl<F: SceneField + ?Sized> SceneField for &F {
    fn signed_distance(&self, p: Vec2) -> f32 {
        (**self).signed_distance(p)
    }
}

impl<F: SceneField + ?Sized> SceneField for Arc<F> {
    fn signed_distance(&self, p: Vec2) -> f32 {
        (**self).signed_distance(p)
    }
}

/// Axis-aligned rectangle in scene space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb2 {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle spanning `[0, size]` on both axes
    pub fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    /// Whether `p` lies inside the rectangle (edges included)
    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// A type-erased scene field that can be cloned and shared between threads
#[derive(Clone)]
pub struct SceneNode {
    inner: Arc<dyn SceneField>,
}

impl SceneNode {
    pub fn new<F: SceneField + 'static>(field: F) -> Self {
        Self {
            inner: Arc::new(field),
        }
    }
}

impl SceneField for SceneNode {
    fn signed_distance(&self, p: Vec2) -> f32 {
        self.inner.signed_distance(p)
    }
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode").finish_non_exhaustive()
    }
}

/// Chainable composition of scene fields
pub trait SceneFieldExt: SceneField + Sized + 'static {
    /// Union: combine two shapes (pointwise minimum)
    fn union<F: SceneField + 'static>(self, other: F) -> SceneNode {
        SceneNode::new(operations::Union::new(self, other))
    }
}

impl<T: SceneField + 'static> SceneFieldExt for T {}

/// Central-difference gradient of the field, normalized.
///
/// Returns zero where the field is flat across `eps`.
pub fn gradient<F: SceneField + ?Sized>(field: &F, p: Vec2, eps: f32) -> Vec2 {
    let dx = field.signed_distance(p + Vec2::X * eps) - field.signed_distance(p - Vec2::X * eps);
    let dy = field.signed_distance(p + Vec2::Y * eps) - field.signed_distance(p - Vec2::Y * eps);
    Vec2::new(dx, dy).normalize_or_zero()
}

pub use operations::*;
pub use primitives::*;
pub use scene::{Scene, Shape};
