//! Physical parameters of the fluid and its container.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::forces::DensityConvention;
use crate::kernels::KernelProfile;

/// Physical configuration shared by every solver pass.
///
/// Units follow the screen-space setup the defaults were tuned for:
/// lengths in pixels, time in seconds (the step itself is given in
/// milliseconds), mass and density dimensionless.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Render radius of a particle.
    pub particle_radius: f32,
    /// Kernel support radius `h`. Also the wall offset for boundary reflection.
    pub smoothing_radius: f32,
    /// Mass of every particle.
    pub particle_mass: f32,
    /// Stiffness of the linear equation of state.
    pub stiffness: f32,
    /// Density at which pressure is zero.
    pub base_density: f32,
    /// Velocity multiplier on wall contact. Negative: flips and attenuates.
    pub damping: f32,
    /// Dynamic viscosity `μ`.
    pub viscosity: f32,
    /// Gravitational acceleration.
    pub gravity: Vec2,
    /// Fixed timestep in milliseconds.
    pub time_step_ms: u32,
    /// Domain width; valid x range is `[h, width - h]`.
    pub domain_width: f32,
    /// Domain height; valid y range is `[h, height - h]`.
    pub domain_height: f32,
    /// Pressure gradient kernel shape.
    pub kernel_profile: KernelProfile,
    /// Which density divides the pairwise force terms.
    pub density_convention: DensityConvention,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let particle_radius = 30.0;
        Self {
            particle_radius,
            smoothing_radius: 2.0 * particle_radius,
            particle_mass: 1.0,
            stiffness: 20.0,
            base_density: 1.0,
            damping: -0.6,
            viscosity: 0.5,
            gravity: Vec2::new(0.0, 0.1),
            time_step_ms: 10,
            domain_width: 800.0,
            domain_height: 600.0,
            kernel_profile: KernelProfile::default(),
            density_convention: DensityConvention::default(),
        }
    }
}

impl PhysicsConfig {
    /// Timestep in seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time_step_ms as f32 / 1000.0
    }

    /// Lower corner of the region particles are kept in.
    #[inline]
    pub fn bounds_min(&self) -> Vec2 {
        Vec2::splat(self.smoothing_radius)
    }

    /// Upper corner of the region particles are kept in.
    #[inline]
    pub fn bounds_max(&self) -> Vec2 {
        Vec2::new(
            self.domain_width - self.smoothing_radius,
            self.domain_height - self.smoothing_radius,
        )
    }

    /// Defaults with the older force normalization: spiky gradient and the
    /// neighbor's density in the force denominator.
    pub fn legacy() -> Self {
        Self {
            kernel_profile: KernelProfile::Spiky,
            density_convention: DensityConvention::Neighbor,
            ..Self::default()
        }
    }

    pub fn with_particle_radius(mut self, radius: f32) -> Self {
        self.particle_radius = radius;
        self
    }

    pub fn with_smoothing_radius(mut self, h: f32) -> Self {
        self.smoothing_radius = h;
        self
    }

    pub fn with_particle_mass(mut self, mass: f32) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_base_density(mut self, density: f32) -> Self {
        self.base_density = density;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_viscosity(mut self, viscosity: f32) -> Self {
        self.viscosity = viscosity;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step_ms(mut self, ms: u32) -> Self {
        self.time_step_ms = ms;
        self
    }

    /// Set the domain size (width, height).
    pub fn with_domain(mut self, width: f32, height: f32) -> Self {
        self.domain_width = width;
        self.domain_height = height;
        self
    }

    pub fn with_kernel_profile(mut self, profile: KernelProfile) -> Self {
        self.kernel_profile = profile;
        self
    }

    pub fn with_density_convention(mut self, convention: DensityConvention) -> Self {
        self.density_convention = convention;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dt_from_millis() {
        let physics = PhysicsConfig::default().with_time_step_ms(10);
        assert!((physics.dt() - 0.01).abs() < 1e-7);
    }

    #[test]
    fn test_bounds_inset_by_smoothing_radius() {
        let physics = PhysicsConfig::default();
        assert_eq!(physics.bounds_min(), Vec2::splat(60.0));
        assert_eq!(physics.bounds_max(), Vec2::new(740.0, 540.0));
    }

    #[test]
    fn test_legacy_profile() {
        let legacy = PhysicsConfig::legacy();
        assert_eq!(legacy.density_convention, DensityConvention::Neighbor);
        assert_eq!(legacy.kernel_profile, KernelProfile::Spiky);

        let default = PhysicsConfig::default();
        assert_eq!(default.density_convention, DensityConvention::Mean);
        assert_eq!(default.kernel_profile, KernelProfile::Cubic);
    }
}
