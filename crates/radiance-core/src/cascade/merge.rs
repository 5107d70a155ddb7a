//! Folding a coarser cascade into a finer one
//!
//! For each near probe and near direction, the far cascade is sampled
//! bilinearly in space and averaged over the block of far directions that the
//! near direction covers, then composed behind the near interval.

use super::bilinear::BilinearTaps;
use super::{RadianceCascade, RadianceProbe, RadianceSample};
use crate::{Error, Result};
use glam::{UVec2, Vec2};
use rayon::prelude::*;

/// Merge the finished `far` cascade into `near`, returning the merged near
/// cascade.
///
/// Fails with [`Error::InvalidParameter`] unless `far` is a coarser level of
/// `near`, i.e. its direction count is a non-zero multiple of the near one.
pub fn merge_cascades(near: &RadianceCascade, far: &RadianceCascade) -> Result<RadianceCascade> {
    let near_dirs = near.layout().directions;
    let far_dirs = far.layout().directions;
    if near_dirs == 0 || far_dirs < near_dirs || far_dirs % near_dirs != 0 {
        return Err(Error::InvalidParameter(format!(
            "cannot merge cascade {} ({far_dirs} directions) into cascade {} ({near_dirs} directions)",
            far.layout().index,
            near.layout().index,
        )));
    }
    Ok(merge_levels(near, far))
}

/// Merge two adjacent levels of a hierarchy built by `build_layouts`
pub(crate) fn merge_levels(near: &RadianceCascade, far: &RadianceCascade) -> RadianceCascade {
    let near_layout = near.layout();
    let far_layout = far.layout();
    let scale = far_layout.probe_count.as_vec2() / near_layout.probe_count.as_vec2();
    let direction_scale = (far_layout.directions / near_layout.directions.max(1)) as usize;

    tracing::trace!(
        near = near_layout.index,
        far = far_layout.index,
        direction_scale,
        "merging cascade"
    );

    let probes: Vec<RadianceProbe> = near
        .probes()
        .par_iter()
        .enumerate()
        .map(|(i, probe)| {
            let coord = UVec2::new(
                i as u32 % near_layout.probe_count.x,
                i as u32 / near_layout.probe_count.x,
            );
            let far_coord = (coord.as_vec2() + 0.5) * scale - Vec2::splat(0.5);
            let taps = BilinearTaps::new(far_coord, far_layout.probe_count);

            let samples: Box<[RadianceSample]> = probe
                .samples()
                .iter()
                .enumerate()
                .map(|(d, near_sample)| {
                    let block = d * direction_scale..(d + 1) * direction_scale;
                    let far_sample = taps
                        .blend(|cell| {
                            far.probe(cell.x, cell.y)
                                .map_or(RadianceSample::TRANSPARENT.to_vec4(), |p| {
                                    p.mean(block.clone())
                                })
                        })
                        .map_or(RadianceSample::TRANSPARENT, RadianceSample::from_vec4);
                    near_sample.merge_far(far_sample)
                })
                .collect();

            RadianceProbe::from_samples(probe.position, samples)
        })
        .collect();

    RadianceCascade::from_probes(*near_layout, probes)
}
