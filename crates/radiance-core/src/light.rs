//! Dynamic point light illuminating the scene

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Omnidirectional light at a point in scene space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    pub position: Vec2,
    /// Linear RGB color
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

impl PointLight {
    pub fn new(position: Vec2, color: Vec3, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Radiance leaving a surface at `point` with outward `normal`, ignoring
    /// occlusion.
    ///
    /// Lambertian term against the light direction scaled by
    /// `intensity / (1 + attenuation * distance)`.
    pub fn unshadowed(&self, point: Vec2, normal: Vec2, attenuation: f32) -> Vec3 {
        let to_light = self.position - point;
        let distance = to_light.length();
        if distance <= f32::EPSILON {
            return self.color * self.intensity;
        }
        let lambert = normal.dot(to_light / distance).max(0.0);
        let falloff = self.intensity / (1.0 + attenuation * distance);
        self.color * (lambert * falloff)
    }
}
