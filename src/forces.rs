//! Force pass: gravity plus pairwise pressure and viscosity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;
use crate::kernels::Kernels;
use crate::particle::Particle;

/// Which density normalizes a pair's pressure and viscosity terms.
///
/// Only [`DensityConvention::Mean`] gives equal and opposite forces within
/// a pair. The other two reproduce older solver behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityConvention {
    /// `(ρ_i + ρ_j) / 2`
    #[default]
    Mean,
    /// `ρ_j`
    Neighbor,
    /// `ρ_i`
    Own,
}

impl DensityConvention {
    /// Denominator for the pair `(own, neighbor)`.
    #[inline]
    pub fn density(self, own: f32, neighbor: f32) -> f32 {
        match self {
            DensityConvention::Mean => 0.5 * (own + neighbor),
            DensityConvention::Neighbor => neighbor,
            DensityConvention::Own => own,
        }
    }
}

/// Force that `other` exerts on `particle` at separation `r`.
///
/// `r` must be the distance between the two and lie in `(0, h)`; the caller
/// skips every other pair. Positive pressures push the particles apart.
pub fn pair_force(
    particle: &Particle,
    other: &Particle,
    r: f32,
    kernels: &Kernels,
    convention: DensityConvention,
) -> Vec2 {
    let rho = convention.density(particle.density, other.density);
    let direction = (particle.position - other.position) / r;

    let pressure = direction * kernels.pressure_gradient(r) * (particle.pressure + other.pressure)
        / (2.0 * rho);
    let viscosity = kernels.viscosity_laplacian(r) * (other.velocity - particle.velocity) / rho;

    pressure + viscosity
}

/// Recompute `force` for every particle.
///
/// Each force starts from `mass · gravity`, so gravity acts as an
/// acceleration regardless of particle mass.
pub fn compute_forces(particles: &mut [Particle], kernels: &Kernels, physics: &PhysicsConfig) {
    let h = kernels.smoothing_radius();
    let convention = physics.density_convention;
    let n = particles.len();

    for i in 0..n {
        let particle = &particles[i];
        let mut force = particle.mass() * physics.gravity;

        for j in 0..n {
            if i == j {
                continue;
            }
            let other = &particles[j];
            let r = particle.position.distance(other.position);
            // Coincident particles have no direction.
            if r == 0.0 || r >= h {
                continue;
            }
            force += pair_force(particle, other, r, kernels, convention);
        }

        particles[i].force = force;
    }
}
