//! Cascade topology
//!
//! The layout of every cascade follows from the scene size and two base
//! parameters. Each level quarters the probe count, quadruples the direction
//! count and traces a band four times longer than the previous one, starting
//! exactly where the previous band ended.

use crate::{CascadeConfig, Error, Result};
use glam::{UVec2, Vec2};
use std::f32::consts::TAU;

/// Immutable description of one cascade's probe grid and interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeLayout {
    pub index: u32,
    /// Probes along each axis
    pub probe_count: UVec2,
    /// Distance between neighboring probes along each axis
    pub spacing: Vec2,
    /// Distance from the probe at which its rays start
    pub interval_start: f32,
    /// Distance each ray travels past `interval_start`
    pub interval_length: f32,
    pub directions: u32,
}

impl CascadeLayout {
    pub fn interval_end(&self) -> f32 {
        self.interval_start + self.interval_length
    }

    pub fn probe_total(&self) -> usize {
        self.probe_count.x as usize * self.probe_count.y as usize
    }

    /// Scene position of the probe at grid index `coord`; probes sit at cell centers
    pub fn probe_position(&self, coord: UVec2) -> Vec2 {
        (coord.as_vec2() + 0.5) * self.spacing
    }

    /// All grid indices in row-major order
    pub fn probe_coords(&self) -> impl Iterator<Item = UVec2> + use<> {
        let count = self.probe_count;
        (0..count.y).flat_map(move |y| (0..count.x).map(move |x| UVec2::new(x, y)))
    }

    /// Continuous grid coordinate of a scene point, probe `(i, j)` at `(i, j)`
    pub fn grid_coord(&self, point: Vec2) -> Vec2 {
        point / self.spacing - 0.5
    }

    /// Angle of direction `d`, offset half a step from the axes
    pub fn direction_angle(&self, d: u32) -> f32 {
        TAU * (d as f32 + 0.5) / self.directions as f32
    }

    pub fn direction(&self, d: u32) -> Vec2 {
        Vec2::from_angle(self.direction_angle(d))
    }
}

/// Number of cascades needed for intervals to span the scene diagonal
pub fn cascade_count(scene_size: Vec2, base_interval: f32, max_cascades: u32) -> u32 {
    let diagonal = scene_size.length();
    // log4(x) = log2(x) / 2
    let levels = ((diagonal / base_interval).log2() * 0.5).ceil() as i64 + 1;
    levels.clamp(1, i64::from(max_cascades.max(1))) as u32
}

/// Build the layouts of every cascade for a scene of the given size
pub fn build_layouts(scene_size: Vec2, config: &CascadeConfig) -> Result<Vec<CascadeLayout>> {
    config.validate()?;
    if !(scene_size.is_finite() && scene_size.cmpgt(Vec2::ZERO).all()) {
        return Err(Error::InvalidConfig(format!(
            "scene size must be positive, got {}x{}",
            scene_size.x, scene_size.y
        )));
    }

    let base = config.base_interval;
    let base_probes = (scene_size / base).floor();
    let count = cascade_count(scene_size, base, config.max_cascades);

    let layouts: Vec<CascadeLayout> = (0..count)
        .map(|i| {
            let probe_count = UVec2::new(
                (base_probes.x as u32 >> i).max(2),
                (base_probes.y as u32 >> i).max(2),
            );
            let scale = 4.0_f32.powi(i as i32);
            let interval_start = if i == 0 {
                0.0
            } else {
                base * (1.0 - scale) / (1.0 - 4.0)
            };

            CascadeLayout {
                index: i,
                probe_count,
                spacing: scene_size / probe_count.as_vec2(),
                interval_start,
                interval_length: base * scale,
                directions: config.base_directions << (2 * i),
            }
        })
        .collect();

    for layout in &layouts {
        tracing::debug!(
            cascade = layout.index,
            probes_x = layout.probe_count.x,
            probes_y = layout.probe_count.y,
            directions = layout.directions,
            interval_start = layout.interval_start,
            interval_end = layout.interval_end(),
            "cascade layout"
        );
    }

    Ok(layouts)
}
