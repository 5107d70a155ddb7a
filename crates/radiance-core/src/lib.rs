//! # Radiance Core
//!
//! 2D global illumination with radiance cascades, computed on the CPU.
//!
//! A [`CascadeHierarchy`] covers a rectangular scene with several grids of
//! light probes. Fine cascades have many probes that trace few directions over
//! short distances; coarse cascades have few probes that trace many directions
//! over long distances. Tracing every level against a signed distance field and
//! merging them from coarse to fine yields occlusion-aware irradiance anywhere
//! in the scene.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use radiance_core::prelude::*;
//!
//! let scene = Scene::new()
//!     .with(circle(Vec2::new(400.0, 300.0), 40.0))
//!     .with(box2(Vec2::new(800.0, 420.0), Vec2::new(120.0, 12.0)));
//! let light = PointLight::new(Vec2::new(640.0, 120.0), Vec3::new(1.0, 0.9, 0.7), 4.0);
//!
//! let mut gi = CascadeHierarchy::new(Vec2::new(1280.0, 720.0), CascadeConfig::default())?;
//! gi.update(&scene, &light);
//! let irradiance = gi.sample_irradiance(Vec2::new(640.0, 600.0));
//! ```
//!
//! ## Units and Conventions
//!
//! - **Distances**: scene units, typically pixels. The scene spans `[0, width] x [0, height]`
//! - **Angles**: radians, direction `d` of `n` points at `2π(d + 0.5) / n`
//! - **Color**: linear RGB in `f32`

pub mod cascade;
pub mod config;
pub mod hierarchy;
pub mod light;
pub mod sdf;

mod error;

pub use cascade::{CascadeLayout, RadianceCascade, RadianceProbe, RadianceSample};
pub use config::{CascadeConfig, MarchConfig};
pub use error::{Error, Result};
pub use hierarchy::{CascadeHierarchy, UpdateStats};
pub use light::PointLight;

/// Prelude module for convenient imports
pub mod prelude {
    // Scene description
    pub use crate::sdf::{Aabb2, Scene, SceneField, SceneFieldExt, SceneNode, Shape, primitives::*};

    // Cascades
    pub use crate::cascade::{CascadeLayout, RadianceCascade, RadianceProbe, RadianceSample};
    pub use crate::hierarchy::{CascadeHierarchy, UpdateStats};

    // Configuration and lighting
    pub use crate::config::{CascadeConfig, MarchConfig};
    pub use crate::light::PointLight;

    // Math (re-export glam)
    pub use glam::{UVec2, Vec2, Vec3, Vec4};

    // Error handling
    pub use crate::{Error, Result};
}
