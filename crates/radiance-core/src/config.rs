//! Hierarchy and ray marching configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Sphere tracing parameters shared by probe rays and shadow rays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchConfig {
    /// Upper bound on marching iterations per ray
    pub max_steps: u32,
    /// Distance at or below which a ray counts as hitting a surface
    pub hit_epsilon: f32,
    /// Fraction of the SDF value advanced per step
    pub step_scale: f32,
    /// Smallest step taken, in scene units
    pub min_step: f32,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            max_steps: 64,
            hit_epsilon: 0.5,
            step_scale: 0.8,
            min_step: 1.0,
        }
    }
}

impl MarchConfig {
    /// Distance advanced when the nearest surface is `distance` away
    #[inline]
    pub fn step(&self, distance: f32) -> f32 {
        self.min_step.max(distance * self.step_scale)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(Error::InvalidConfig("max_steps must be at least 1".into()));
        }
        if !(self.hit_epsilon.is_finite() && self.hit_epsilon > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "hit_epsilon must be positive, got {}",
                self.hit_epsilon
            )));
        }
        if !(self.step_scale.is_finite() && self.step_scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "step_scale must be positive, got {}",
                self.step_scale
            )));
        }
        // A zero minimum step would let a ray stall on a grazing surface forever
        if !(self.min_step.is_finite() && self.min_step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_step must be positive, got {}",
                self.min_step
            )));
        }
        Ok(())
    }
}

/// Parameters that define a cascade hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Probe spacing of cascade 0 and length of its distance interval
    pub base_interval: f32,
    /// Directions traced per probe in cascade 0
    pub base_directions: u32,
    /// Hard cap on the number of cascades
    pub max_cascades: u32,
    /// Ray marching parameters
    pub march: MarchConfig,
    /// Offset used for central-difference surface normals
    pub normal_epsilon: f32,
    /// Linear falloff coefficient for point light attenuation
    pub attenuation: f32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            base_interval: 32.0,
            base_directions: 16,
            max_cascades: 6,
            march: MarchConfig::default(),
            normal_epsilon: 1.0,
            attenuation: 0.01,
        }
    }
}

impl CascadeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_interval(mut self, base_interval: f32) -> Self {
        self.base_interval = base_interval;
        self
    }

    pub fn with_base_directions(mut self, base_directions: u32) -> Self {
        self.base_directions = base_directions;
        self
    }

    pub fn with_max_cascades(mut self, max_cascades: u32) -> Self {
        self.max_cascades = max_cascades;
        self
    }

    pub fn with_march(mut self, march: MarchConfig) -> Self {
        self.march = march;
        self
    }

    pub fn with_attenuation(mut self, attenuation: f32) -> Self {
        self.attenuation = attenuation;
        self
    }

    /// Reject parameters that cannot produce a usable hierarchy
    pub fn validate(&self) -> Result<()> {
        if !(self.base_interval.is_finite() && self.base_interval > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "base_interval must be positive, got {}",
                self.base_interval
            )));
        }
        if self.base_directions == 0 {
            return Err(Error::InvalidConfig(
                "base_directions must be at least 1".into(),
            ));
        }
        if self.max_cascades == 0 {
            return Err(Error::InvalidConfig("max_cascades must be at least 1".into()));
        }
        // Directions grow 4x per cascade and must stay addressable
        let top = u64::from(self.base_directions) << (2 * (self.max_cascades.min(16) - 1));
        if self.max_cascades > 16 || top > u64::from(u32::MAX) {
            return Err(Error::InvalidConfig(format!(
                "{} base directions over {} cascades overflows the direction count",
                self.base_directions, self.max_cascades
            )));
        }
        if !(self.normal_epsilon.is_finite() && self.normal_epsilon > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "normal_epsilon must be positive, got {}",
                self.normal_epsilon
            )));
        }
        if !(self.attenuation.is_finite() && self.attenuation >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "attenuation must be non-negative, got {}",
                self.attenuation
            )));
        }
        self.march.validate()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CascadeConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_interval() {
        for interval in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            let config = CascadeConfig::new().with_base_interval(interval);
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn rejects_zero_directions() {
        let config = CascadeConfig::new().with_base_directions(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_direction_overflow() {
        let config = CascadeConfig::new()
            .with_base_directions(1 << 20)
            .with_max_cascades(8);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_march() {
        let march = MarchConfig {
            min_step: 0.0,
            ..MarchConfig::default()
        };
        assert!(CascadeConfig::new().with_march(march).validate().is_err());
    }

    #[test]
    fn step_never_below_minimum() {
        let march = MarchConfig::default();
        assert_eq!(march.step(0.1), 1.0);
        assert_eq!(march.step(10.0), 8.0);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: CascadeConfig = serde_json::from_str(r#"{ "base_interval": 16.0 }"#).unwrap();
        assert_eq!(config.base_interval, 16.0);
        assert_eq!(config.base_directions, 16);
        assert_eq!(config.march, MarchConfig::default());
    }
}
