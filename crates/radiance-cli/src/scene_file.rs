//! Scene description files
//!
//! ```json
//! {
//!   "size": [1280.0, 720.0],
//!   "light": { "position": [640.0, 120.0], "color": [1.0, 0.9, 0.7], "intensity": 4.0 },
//!   "shapes": [
//!     { "type": "circle", "center": [400.0, 300.0], "radius": 40.0 }
//!   ],
//!   "config": { "base_interval": 16.0 }
//! }
//! ```

use anyhow::{Context, Result};
use radiance_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything needed to run one lighting update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    /// Scene extent; the scene spans `[0, size]`
    pub size: Vec2,
    #[serde(default)]
    pub light: PointLight,
    #[serde(flatten)]
    pub scene: Scene,
    #[serde(default)]
    pub config: CascadeConfig,
}

impl SceneFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse scene file {}", path.display()))
    }

    /// Load `path` if given, otherwise the built-in demo sized `width` x `height`
    pub fn load_or_demo(path: Option<&Path>, width: f32, height: f32) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("Loading scene: {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::demo(Vec2::new(width, height))),
        }
    }

    /// A few occluders around a warm light, scaled to the scene size
    pub fn demo(size: Vec2) -> Self {
        let at = |x: f32, y: f32| Vec2::new(x, y) * size;
        let unit = size.min_element();

        let scene = Scene::new()
            .with(circle(at(0.3, 0.45), unit * 0.08))
            .with(circle(at(0.72, 0.6), unit * 0.05))
            .with(box2(at(0.5, 0.75), Vec2::new(size.x * 0.18, unit * 0.02)))
            .with(box2(at(0.85, 0.3), Vec2::new(unit * 0.03, size.y * 0.15)));

        Self {
            size,
            light: PointLight::new(at(0.5, 0.2), Vec3::new(1.0, 0.85, 0.6), 6.0),
            scene,
            config: CascadeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parses_minimal_file() {
        let json = r#"{
            "size": [640.0, 360.0],
            "shapes": [{ "type": "circle", "center": [100.0, 100.0], "radius": 10.0 }]
        }"#;
        let file: SceneFile = serde_json::from_str(json).unwrap();

        assert_eq!(file.size, Vec2::new(640.0, 360.0));
        assert_eq!(file.scene.shapes.len(), 1);
        assert_eq!(file.light, PointLight::default());
        assert_eq!(file.config, CascadeConfig::default());
    }

    #[test]
    fn config_overrides_are_partial() {
        let json = r#"{
            "size": [640.0, 360.0],
            "shapes": [],
            "light": { "position": [10.0, 20.0], "intensity": 3.0 },
            "config": { "base_directions": 8, "march": { "max_steps": 32 } }
        }"#;
        let file: SceneFile = serde_json::from_str(json).unwrap();

        assert_eq!(file.light.position, Vec2::new(10.0, 20.0));
        assert_eq!(file.light.color, Vec3::ONE);
        assert_eq!(file.config.base_directions, 8);
        assert_eq!(file.config.base_interval, 32.0);
        assert_eq!(file.config.march.max_steps, 32);
        assert_eq!(file.config.march.step_scale, 0.8);
    }

    #[test]
    fn demo_fits_in_scene() {
        let demo = SceneFile::demo(Vec2::new(1280.0, 720.0));
        let bounds = Aabb2::from_size(demo.size);
        assert!(bounds.contains(demo.light.position));
        assert!(demo.scene.signed_distance(demo.light.position) > 0.0);
        assert!(!demo.scene.is_empty());
    }
}
