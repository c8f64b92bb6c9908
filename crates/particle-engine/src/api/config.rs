use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::{ParticleError, Result};

/// Configuration for the particle world, usually loaded from JSON.
/// Missing fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// System acceleration applied to every particle, as `[x, y]`.
    pub gravity: Vec2,
    /// Fixed update interval in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum fixed updates run for one browser frame.
    pub max_steps_per_frame: u32,
    /// Radius of the ball that stands in for a particle against rectangles.
    pub proxy_radius: f32,
    /// Push-out direction for a particle sitting exactly on a circle's center.
    pub fallback_push_dir: Vec2,
    /// RNG seed for emitters and dye packs.
    pub seed: u64,
    /// Maximum number of draw instances exported per frame.
    pub max_instances: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -50.0),
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 8,
            proxy_radius: 0.3,
            fallback_push_dir: Vec2::Y,
            seed: 42,
            max_instances: 4096,
        }
    }
}

impl ParticleConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(ParticleError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        if !(self.fixed_dt > 0.0 && self.fixed_dt.is_finite()) {
            return Err(ParticleError::InvalidConfig(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if !(self.proxy_radius > 0.0 && self.proxy_radius.is_finite()) {
            return Err(ParticleError::InvalidConfig(format!(
                "proxy_radius must be positive, got {}",
                self.proxy_radius
            )));
        }
        if self.max_instances == 0 {
            return Err(ParticleError::InvalidConfig(
                "max_instances must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ParticleConfig::default();
        assert_eq!(c.gravity, Vec2::new(0.0, -50.0));
        assert!((c.proxy_radius - 0.3).abs() < 1e-6);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let c = ParticleConfig::from_json(r#"{ "gravity": [0.0, -100.0], "seed": 7 }"#).unwrap();
        assert_eq!(c.gravity, Vec2::new(0.0, -100.0));
        assert_eq!(c.seed, 7);
        assert_eq!(c.max_instances, ParticleConfig::default().max_instances);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ParticleConfig::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, ParticleError::Config(_)));
    }

    #[test]
    fn non_positive_proxy_radius_is_rejected() {
        let err = ParticleConfig::from_json(r#"{ "proxy_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ParticleError::InvalidConfig(_)));
    }
}
