//! Continuous irradiance from the finest cascade

use super::RadianceCascade;
use super::bilinear::BilinearTaps;
use glam::{Vec2, Vec3};

/// Irradiance at `point`, blended bilinearly from the direction-averaged
/// radiance of the surrounding probes. Black where no probe is in reach.
pub fn sample_irradiance(cascade: &RadianceCascade, point: Vec2) -> Vec3 {
    let layout = cascade.layout();
    BilinearTaps::new(layout.grid_coord(point), layout.probe_count)
        .blend(|cell| {
            cascade
                .probe(cell.x, cell.y)
                .map_or(Vec3::ZERO, |p| p.irradiance())
                .extend(0.0)
        })
        .map_or(Vec3::ZERO, |v| v.truncate())
}
