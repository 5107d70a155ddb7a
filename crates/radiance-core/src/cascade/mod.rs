//! Radiance cascades: probe grids, ray casting, merging and irradiance
//!
//! A cascade is a grid of probes that each store one [`RadianceSample`] per
//! traced direction. Cascade `i` covers the distance band
//! `[interval_start, interval_start + interval_length)` from each probe; higher
//! cascades have fewer probes, more directions and farther bands.
//!
//! An update cycle runs in three phases:
//!
//! 1. [`RayCaster`] traces every cascade independently against the scene
//! 2. [`merge_cascades`] folds cascade `i + 1` into cascade `i`, coarsest first
//! 3. [`sample_irradiance`] reads the merged cascade 0

mod bilinear;
mod irradiance;
mod layout;
mod merge;
mod raycast;

use glam::{UVec2, Vec2, Vec3, Vec4};
use std::ops::Range;

pub use irradiance::sample_irradiance;
pub use layout::{CascadeLayout, build_layouts, cascade_count};
pub use merge::merge_cascades;
pub(crate) use merge::merge_levels;
pub use raycast::{CastStats, RayCaster, RayOutcome};

/// Radiance arriving from one direction plus the visibility of the rest of
/// the ray beyond the traced interval
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct RadianceSample {
    pub radiance: [f32; 3],
    /// 1.0 when the interval was fully transparent, 0.0 when it was blocked
    pub visibility: f32,
}

impl RadianceSample {
    /// Blocked interval with no light
    pub const OCCLUDED: Self = Self {
        radiance: [0.0; 3],
        visibility: 0.0,
    };

    /// Empty interval, light from farther away passes through
    pub const TRANSPARENT: Self = Self {
        radiance: [0.0; 3],
        visibility: 1.0,
    };

    pub fn new(radiance: Vec3, visibility: f32) -> Self {
        Self {
            radiance: radiance.to_array(),
            visibility,
        }
    }

    pub fn rgb(&self) -> Vec3 {
        Vec3::from_array(self.radiance)
    }

    pub fn to_vec4(self) -> Vec4 {
        self.rgb().extend(self.visibility)
    }

    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.truncate(), v.w)
    }

    /// Compose this near interval with the interval behind it.
    ///
    /// Near light is always visible; far light only arrives through the
    /// transparent part of the near interval.
    pub fn merge_far(self, far: Self) -> Self {
        Self::new(
            self.rgb() + far.rgb() * self.visibility,
            self.visibility * far.visibility,
        )
    }
}

/// A probe at a fixed scene position with one sample per direction
#[derive(Debug, Clone, PartialEq)]
pub struct RadianceProbe {
    pub position: Vec2,
    samples: Box<[RadianceSample]>,
}

impl RadianceProbe {
    /// Probe with every direction zeroed
    pub fn new(position: Vec2, directions: u32) -> Self {
        Self {
            position,
            samples: vec![RadianceSample::default(); directions as usize].into_boxed_slice(),
        }
    }

    pub fn from_samples(position: Vec2, samples: Box<[RadianceSample]>) -> Self {
        Self { position, samples }
    }

    pub fn samples(&self) -> &[RadianceSample] {
        &self.samples
    }

    pub fn sample(&self, direction: u32) -> Option<&RadianceSample> {
        self.samples.get(direction as usize)
    }

    pub fn direction_count(&self) -> u32 {
        self.samples.len() as u32
    }

    /// Samples as `[r, g, b, visibility]` floats, one group per direction
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.samples)
    }

    /// Mean of the samples in `directions`, radiance and visibility alike
    ///
    /// A range that is empty or runs past the last direction yields zero.
    pub fn mean(&self, directions: Range<usize>) -> Vec4 {
        let Some(slice) = self.samples.get(directions) else {
            return Vec4::ZERO;
        };
        if slice.is_empty() {
            return Vec4::ZERO;
        }
        let sum: Vec4 = slice.iter().map(|s| s.to_vec4()).sum();
        sum / slice.len() as f32
    }

    /// Arithmetic mean of the radiance over every direction
    pub fn irradiance(&self) -> Vec3 {
        self.mean(0..self.samples.len()).truncate()
    }
}

/// One level of the hierarchy: a layout and its probe grid
#[derive(Debug, Clone, PartialEq)]
pub struct RadianceCascade {
    layout: CascadeLayout,
    /// Row-major, `y * probe_count.x + x`
    probes: Vec<RadianceProbe>,
}

impl RadianceCascade {
    /// Cascade with all probes in place and no light recorded yet
    pub fn new(layout: CascadeLayout) -> Self {
        let probes = layout
            .probe_coords()
            .map(|c| RadianceProbe::new(layout.probe_position(c), layout.directions))
            .collect();
        Self { layout, probes }
    }

    /// Assemble a cascade from probes in row-major order
    pub(crate) fn from_probes(layout: CascadeLayout, probes: Vec<RadianceProbe>) -> Self {
        debug_assert_eq!(probes.len(), layout.probe_total());
        Self { layout, probes }
    }

    pub fn layout(&self) -> &CascadeLayout {
        &self.layout
    }

    pub fn probe_count(&self) -> UVec2 {
        self.layout.probe_count
    }

    pub fn probes(&self) -> &[RadianceProbe] {
        &self.probes
    }

    /// Every probe's samples packed back to back in row-major probe order,
    /// four floats per direction
    pub fn to_floats(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.probes.len() * self.layout.directions as usize * 4);
        for probe in &self.probes {
            data.extend_from_slice(probe.as_floats());
        }
        data
    }

    /// Probe at grid index `(x, y)`
    pub fn probe(&self, x: u32, y: u32) -> Option<&RadianceProbe> {
        let count = self.layout.probe_count;
        if x >= count.x || y >= count.y {
            return None;
        }
        self.probes.get((y * count.x + x) as usize)
    }
}
