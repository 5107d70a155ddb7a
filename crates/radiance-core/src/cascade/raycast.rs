//! Sphere-traced ray casting of cascade intervals
//!
//! Every (cascade, probe, direction) triple is traced on its own and only reads
//! the scene and the light, so tracing is spread across all cores with Rayon.

use super::{CascadeLayout, RadianceCascade, RadianceProbe, RadianceSample};
use crate::config::CascadeConfig;
use crate::light::PointLight;
use crate::sdf::{Aabb2, SceneField, gradient};
use glam::{Vec2, Vec3};
use rayon::prelude::*;
use std::ops::Add;

/// Where a single march ended
#[derive(Debug, Clone, Copy, PartialEq)]
enum March {
    /// Surface reached at this point
    Hit(Vec2),
    /// Left the scene bounds
    Escaped,
    /// Ran out of distance or steps without touching anything
    Exhausted,
}

/// Classification of a traced probe ray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayOutcome {
    Hit,
    Escaped,
    Transparent,
}

/// Ray counts gathered while casting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastStats {
    pub rays: u64,
    pub hits: u64,
    pub escapes: u64,
}

impl CastStats {
    fn record(&mut self, outcome: RayOutcome) {
        self.rays += 1;
        match outcome {
            RayOutcome::Hit => self.hits += 1,
            RayOutcome::Escaped => self.escapes += 1,
            RayOutcome::Transparent => {}
        }
    }
}

impl Add for CastStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            rays: self.rays + rhs.rays,
            hits: self.hits + rhs.hits,
            escapes: self.escapes + rhs.escapes,
        }
    }
}

impl std::iter::Sum for CastStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Traces probe rays against a scene lit by a single point light
pub struct RayCaster<'a, F: SceneField + ?Sized> {
    scene: &'a F,
    light: &'a PointLight,
    config: &'a CascadeConfig,
    bounds: Aabb2,
}

impl<'a, F: SceneField + ?Sized> RayCaster<'a, F> {
    pub fn new(scene: &'a F, light: &'a PointLight, config: &'a CascadeConfig, bounds: Aabb2) -> Self {
        Self {
            scene,
            light,
            config,
            bounds,
        }
    }

    /// Trace every probe and direction of one cascade into a fresh cascade
    pub fn cast_cascade(&self, layout: &CascadeLayout) -> (RadianceCascade, CastStats) {
        let coords: Vec<_> = layout.probe_coords().collect();
        let (probes, stats): (Vec<RadianceProbe>, Vec<CastStats>) = coords
            .into_par_iter()
            .map(|coord| self.cast_probe(layout, layout.probe_position(coord)))
            .unzip();

        (
            RadianceCascade::from_probes(*layout, probes),
            stats.into_iter().sum(),
        )
    }

    fn cast_probe(&self, layout: &CascadeLayout, position: Vec2) -> (RadianceProbe, CastStats) {
        let mut stats = CastStats::default();
        let samples: Box<[RadianceSample]> = (0..layout.directions)
            .map(|d| {
                let (sample, outcome) = self.trace(
                    position,
                    layout.direction(d),
                    layout.interval_start,
                    layout.interval_length,
                );
                stats.record(outcome);
                sample
            })
            .collect();

        (RadianceProbe::from_samples(position, samples), stats)
    }

    /// Trace one interval of a probe ray.
    ///
    /// The ray starts `start` units from `origin` along `dir` and travels at
    /// most `length` units further.
    pub fn trace(&self, origin: Vec2, dir: Vec2, start: f32, length: f32) -> (RadianceSample, RayOutcome) {
        match self.march(origin + dir * start, dir, length) {
            March::Escaped => (RadianceSample::OCCLUDED, RayOutcome::Escaped),
            March::Exhausted => (RadianceSample::TRANSPARENT, RayOutcome::Transparent),
            March::Hit(p) => (RadianceSample::new(self.shade(p), 0.0), RayOutcome::Hit),
        }
    }

    fn march(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> March {
        let march = &self.config.march;
        let mut t = 0.0;
        for _ in 0..march.max_steps {
            let p = origin + dir * t;
            if !self.bounds.contains(p) {
                return March::Escaped;
            }
            if t >= max_distance {
                return March::Exhausted;
            }
            let d = self.scene.signed_distance(p);
            if d <= march.hit_epsilon {
                return March::Hit(p);
            }
            // Land exactly on the interval end so its bounds are still checked
            t = (t + march.step(d)).min(max_distance);
        }
        March::Exhausted
    }

    /// Direct light leaving the surface at `p`
    fn shade(&self, p: Vec2) -> Vec3 {
        let normal = gradient(self.scene, p, self.config.normal_epsilon);
        let direct = self.light.unshadowed(p, normal, self.config.attenuation);
        if direct == Vec3::ZERO || self.in_shadow(p, normal) {
            return Vec3::ZERO;
        }
        direct
    }

    fn in_shadow(&self, p: Vec2, normal: Vec2) -> bool {
        let origin = p + normal * (2.0 * self.config.march.hit_epsilon);
        let to_light = self.light.position - origin;
        let distance = to_light.length();
        if distance <= f32::EPSILON {
            return false;
        }
        matches!(self.march(origin, to_light / distance, distance), March::Hit(_))
    }
}
