//! Configuration types for sph2d simulations.
//!
//! A [`SimConfig`] is built once, validated, and then handed to
//! [`Simulation::new`](crate::Simulation::new). It never changes while the
//! simulation runs. Configs round-trip through JSON so the runner can load
//! them from disk.

mod physics;
mod spawn;
mod visuals;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::kernels::Kernels;

pub use physics::PhysicsConfig;
pub use spawn::{SpawnConfig, SpawnLayout};
pub use visuals::VisualConfig;

/// Complete simulation configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub visuals: VisualConfig,
}

impl SimConfig {
    pub fn new(physics: PhysicsConfig, spawn: SpawnConfig) -> Self {
        Self {
            physics,
            spawn,
            visuals: VisualConfig::default(),
        }
    }

    pub fn with_visuals(mut self, visuals: VisualConfig) -> Self {
        self.visuals = visuals;
        self
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is usable by the solver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;

        finite("physics.particle_radius", p.particle_radius)?;
        finite("physics.smoothing_radius", p.smoothing_radius)?;
        finite("physics.particle_mass", p.particle_mass)?;
        finite("physics.stiffness", p.stiffness)?;
        finite("physics.base_density", p.base_density)?;
        finite("physics.damping", p.damping)?;
        finite("physics.viscosity", p.viscosity)?;
        finite("physics.gravity", p.gravity.x)?;
        finite("physics.gravity", p.gravity.y)?;
        finite("physics.domain_width", p.domain_width)?;
        finite("physics.domain_height", p.domain_height)?;

        positive("physics.particle_radius", p.particle_radius)?;
        positive("physics.smoothing_radius", p.smoothing_radius)?;
        positive("physics.particle_mass", p.particle_mass)?;
        non_negative("physics.stiffness", p.stiffness)?;
        non_negative("physics.base_density", p.base_density)?;
        non_negative("physics.viscosity", p.viscosity)?;

        if p.time_step_ms == 0 {
            return Err(ConfigError::invalid("physics.time_step_ms", "must be at least 1 ms"));
        }
        if !(-1.0..=0.0).contains(&p.damping) {
            return Err(ConfigError::invalid(
                "physics.damping",
                format!("{} is outside [-1, 0]", p.damping),
            ));
        }
        let min_extent = 2.0 * p.smoothing_radius;
        if p.domain_width <= min_extent {
            return Err(ConfigError::invalid(
                "physics.domain_width",
                format!("must exceed twice the smoothing radius ({})", min_extent),
            ));
        }
        if p.domain_height <= min_extent {
            return Err(ConfigError::invalid(
                "physics.domain_height",
                format!("must exceed twice the smoothing radius ({})", min_extent),
            ));
        }

        if !Kernels::new(p).is_representable() {
            return Err(ConfigError::invalid(
                "physics.smoothing_radius",
                format!(
                    "kernels for h={} and mass={} do not fit in f32",
                    p.smoothing_radius, p.particle_mass
                ),
            ));
        }

        let s = &self.spawn;
        finite("spawn.initial_velocity", s.initial_velocity.x)?;
        finite("spawn.initial_velocity", s.initial_velocity.y)?;
        if s.max_particles == 0 {
            return Err(ConfigError::invalid("spawn.max_particles", "must be at least 1"));
        }
        if s.interval_ms == 0 {
            return Err(ConfigError::invalid("spawn.interval_ms", "must be at least 1 ms"));
        }

        match &s.layout {
            SpawnLayout::Grid {
                origin,
                columns,
                rows,
                spacing,
            } => {
                finite("spawn.layout.origin", origin.x)?;
                finite("spawn.layout.origin", origin.y)?;
                finite("spawn.layout.spacing", *spacing)?;
                non_negative("spawn.layout.spacing", *spacing)?;
                if *columns == 0 || *rows == 0 {
                    return Err(ConfigError::invalid(
                        "spawn.layout",
                        "grid needs at least one column and one row",
                    ));
                }
            }
            SpawnLayout::RandomBatch { origin } => {
                finite("spawn.layout.origin", origin.x)?;
                finite("spawn.layout.origin", origin.y)?;
                if s.batch_size == 0 {
                    return Err(ConfigError::invalid("spawn.batch_size", "must be at least 1"));
                }
            }
        }

        debug!(
            "config ok: h={} mass={} dt={}ms cap={}",
            p.smoothing_radius, p.particle_mass, p.time_step_ms, s.max_particles
        );
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} is not finite", value)))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} must be positive", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} must not be negative", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn field_of(err: ConfigError) -> &'static str {
        match err {
            ConfigError::Invalid { field, .. } => field,
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let mut config = SimConfig::default();
        config.physics.particle_mass = 0.0;
        assert_eq!(field_of(config.validate().unwrap_err()), "physics.particle_mass");
    }

    #[test]
    fn test_rejects_positive_damping() {
        let mut config = SimConfig::default();
        config.physics.damping = 0.5;
        assert_eq!(field_of(config.validate().unwrap_err()), "physics.damping");
    }

    #[test]
    fn test_rejects_domain_smaller_than_support() {
        let mut config = SimConfig::default();
        config.physics.domain_height = 100.0;
        assert_eq!(field_of(config.validate().unwrap_err()), "physics.domain_height");
    }

    #[test]
    fn test_accepts_large_smoothing_radius() {
        let mut config = SimConfig::default();
        config.physics = config
            .physics
            .with_smoothing_radius(2.0e4)
            .with_domain(1.0e5, 1.0e5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unrepresentable_kernels() {
        let mut config = SimConfig::default();
        config.physics = config
            .physics
            .with_smoothing_radius(1.0e30)
            .with_domain(1.0e31, 1.0e31);
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "physics.smoothing_radius"
        );
    }

    #[test]
    fn test_rejects_nan_gravity() {
        let mut config = SimConfig::default();
        config.physics.gravity = Vec2::new(0.0, f32::NAN);
        assert_eq!(field_of(config.validate().unwrap_err()), "physics.gravity");
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = SimConfig::new(
            PhysicsConfig::default(),
            SpawnConfig::grid(Vec2::new(200.0, 200.0), 0, 4, 10.0).with_max_particles(4),
        );
        assert_eq!(field_of(config.validate().unwrap_err()), "spawn.layout");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "physics": { "stiffness": 40.0 } }"#;
        let config: SimConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.physics.stiffness, 40.0);
        assert_eq!(config.physics.smoothing_radius, 60.0);
        assert_eq!(config.spawn, SpawnConfig::default());
    }
}
