//! The cascade hierarchy and its update cycle
//!
//! Topology is built once per scene size. Each [`CascadeHierarchy::update`]
//! traces every cascade into fresh buffers, merges them from the coarsest level
//! down to cascade 0, and only then swaps them in, so readers never observe a
//! half-finished cycle.

use crate::cascade::{
    CascadeLayout, CastStats, RadianceCascade, RayCaster, build_layouts, merge_levels,
    sample_irradiance,
};
use crate::config::CascadeConfig;
use crate::light::PointLight;
use crate::sdf::{Aabb2, SceneField};
use crate::{Error, Result};
use glam::{Vec2, Vec3};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Summary of one update cycle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UpdateStats {
    /// Probe rays traced across all cascades
    pub rays_traced: u64,
    /// Rays that ended on a surface
    pub hits: u64,
    /// Rays that left the scene bounds
    pub escapes: u64,
    pub duration: Duration,
}

/// Multi-resolution probe hierarchy covering a rectangular scene
#[derive(Debug, Clone)]
pub struct CascadeHierarchy {
    config: CascadeConfig,
    scene_size: Vec2,
    layouts: Vec<CascadeLayout>,
    cascades: Vec<RadianceCascade>,
}

impl CascadeHierarchy {
    /// Build the topology for a scene spanning `[0, scene_size]`.
    ///
    /// Fails with [`Error::InvalidConfig`] for degenerate sizes or parameters.
    pub fn new(scene_size: Vec2, config: CascadeConfig) -> Result<Self> {
        let layouts = build_layouts(scene_size, &config)?;
        let cascades = layouts.iter().copied().map(RadianceCascade::new).collect();

        tracing::debug!(
            width = scene_size.x,
            height = scene_size.y,
            cascades = layouts.len(),
            "built cascade hierarchy"
        );

        Ok(Self {
            config,
            scene_size,
            layouts,
            cascades,
        })
    }

    /// Rebuild the topology if the scene size changed.
    ///
    /// Returns `true` when a rebuild happened; previous radiance is discarded.
    pub fn resize(&mut self, scene_size: Vec2) -> Result<bool> {
        if scene_size == self.scene_size {
            return Ok(false);
        }
        *self = Self::new(scene_size, self.config)?;
        Ok(true)
    }

    /// Run a full cycle: cast every cascade, then merge coarsest to finest
    pub fn update<F: SceneField + ?Sized>(&mut self, scene: &F, light: &PointLight) -> UpdateStats {
        let _span = tracing::debug_span!("radiance_update", cascades = self.layouts.len()).entered();
        let started = Instant::now();

        let caster = RayCaster::new(scene, light, &self.config, self.bounds());
        let (mut cascades, stats): (Vec<RadianceCascade>, Vec<CastStats>) = self
            .layouts
            .par_iter()
            .map(|layout| caster.cast_cascade(layout))
            .unzip();
        let cast: CastStats = stats.into_iter().sum();

        // Each step reads the already merged far cascade
        for i in (0..cascades.len().saturating_sub(1)).rev() {
            cascades[i] = merge_levels(&cascades[i], &cascades[i + 1]);
        }

        self.cascades = cascades;

        let stats = UpdateStats {
            rays_traced: cast.rays,
            hits: cast.hits,
            escapes: cast.escapes,
            duration: started.elapsed(),
        };
        tracing::debug!(
            rays = stats.rays_traced,
            hits = stats.hits,
            escapes = stats.escapes,
            elapsed_ms = stats.duration.as_secs_f64() * 1000.0,
            "radiance cascades updated"
        );
        stats
    }

    /// Cascade at `index`, 0 being the finest
    pub fn cascade(&self, index: usize) -> Option<&RadianceCascade> {
        self.cascades.get(index)
    }

    pub fn cascade_count(&self) -> usize {
        self.cascades.len()
    }

    pub fn cascades(&self) -> &[RadianceCascade] {
        &self.cascades
    }

    pub fn layouts(&self) -> &[CascadeLayout] {
        &self.layouts
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    pub fn scene_size(&self) -> Vec2 {
        self.scene_size
    }

    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_size(self.scene_size)
    }

    /// Irradiance at a scene point from the merged cascade 0
    pub fn sample_irradiance(&self, point: Vec2) -> Vec3 {
        self.cascades
            .first()
            .map_or(Vec3::ZERO, |c| sample_irradiance(c, point))
    }

    /// Irradiance at the pixel centers of a `width` x `height` image stretched
    /// over the scene, row-major
    pub fn irradiance_map(&self, width: u32, height: u32) -> Result<Vec<Vec3>> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter(format!(
                "irradiance map must have a non-zero size, got {width}x{height}"
            )));
        }
        let texel = self.scene_size / Vec2::new(width as f32, height as f32);
        let map = (0..width as usize * height as usize)
            .into_par_iter()
            .map(|i| {
                let x = (i % width as usize) as f32;
                let y = (i / width as usize) as f32;
                self.sample_irradiance((Vec2::new(x, y) + 0.5) * texel)
            })
            .collect();
        Ok(map)
    }
}
