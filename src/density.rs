//! Density and pressure passes.
//!
//! Both passes overwrite their field on every particle. The force pass reads
//! the results of *all* particles, so they must finish before it starts.

use crate::config::PhysicsConfig;
use crate::kernels::Kernels;
use crate::particle::Particle;

/// Density given to a particle with no neighbor inside the support radius.
///
/// Keeps the force pass free of divisions by zero.
pub const DENSITY_EPSILON: f32 = 1.0e-6;

/// Linear equation of state: `k · (ρ - ρ₀)`.
///
/// Negative results mean the particle is below rest density.
#[inline]
pub fn pressure_from_density(density: f32, physics: &PhysicsConfig) -> f32 {
    physics.stiffness * (density - physics.base_density)
}

/// Recompute `density` for every particle from an all-pairs scan.
pub fn compute_densities(particles: &mut [Particle], kernels: &Kernels) {
    let h = kernels.smoothing_radius();
    let n = particles.len();

    for i in 0..n {
        let position = particles[i].position;
        let mut density = 0.0;

        for j in 0..n {
            if i == j {
                continue;
            }
            let other = &particles[j];
            let r = position.distance(other.position);
            if r >= h {
                continue;
            }
            density += other.mass() * kernels.density(r);
        }

        particles[i].density = if density == 0.0 {
            DENSITY_EPSILON
        } else {
            density
        };
    }
}

/// Recompute `pressure` for every particle from its current density.
pub fn compute_pressures(particles: &mut [Particle], physics: &PhysicsConfig) {
    for particle in particles.iter_mut() {
        particle.pressure = pressure_from_density(particle.density, physics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleStore;
    use glam::Vec2;

    fn store_with(positions: &[Vec2]) -> ParticleStore {
        let mut store = ParticleStore::with_capacity(positions.len());
        for &p in positions {
            store.spawn(p, Vec2::ZERO, 1.0);
        }
        store
    }

    #[test]
    fn test_isolated_particle_gets_epsilon() {
        let physics = PhysicsConfig::default();
        let kernels = Kernels::new(&physics);
        let mut store = store_with(&[Vec2::new(100.0, 100.0), Vec2::new(400.0, 100.0)]);

        compute_densities(store.as_mut_slice(), &kernels);
        compute_pressures(store.as_mut_slice(), &physics);

        for p in store.iter() {
            assert_eq!(p.density, DENSITY_EPSILON);
            let expected = physics.stiffness * (DENSITY_EPSILON - physics.base_density);
            assert_eq!(p.pressure, expected);
            assert!(p.pressure < 0.0);
        }
    }

    #[test]
    fn test_pair_density_excludes_self() {
        let physics = PhysicsConfig::default();
        let kernels = Kernels::new(&physics);
        let d = 25.0;
        let mut store = store_with(&[Vec2::new(200.0, 200.0), Vec2::new(200.0 + d, 200.0)]);

        compute_densities(store.as_mut_slice(), &kernels);

        let expected = 1.0 * kernels.density(d);
        for p in store.iter() {
            assert_eq!(p.density, expected);
        }
    }

    #[test]
    fn test_large_support_still_sees_neighbors() {
        let physics = PhysicsConfig::default()
            .with_smoothing_radius(2.0e4)
            .with_domain(1.0e5, 1.0e5);
        let kernels = Kernels::new(&physics);
        let mut store = store_with(&[Vec2::new(3.0e4, 3.0e4), Vec2::new(4.0e4, 3.0e4)]);

        compute_densities(store.as_mut_slice(), &kernels);

        let expected = kernels.density(1.0e4);
        assert!(expected > DENSITY_EPSILON);
        for p in store.iter() {
            assert_eq!(p.density, expected);
        }
    }

    #[test]
    fn test_density_is_overwritten() {
        let physics = PhysicsConfig::default();
        let kernels = Kernels::new(&physics);
        let mut store = store_with(&[Vec2::new(100.0, 100.0)]);
        store.as_mut_slice()[0].density = 42.0;

        compute_densities(store.as_mut_slice(), &kernels);

        assert_eq!(store.as_slice()[0].density, DENSITY_EPSILON);
    }

    #[test]
    fn test_pressure_zero_at_rest_density() {
        let physics = PhysicsConfig::default().with_base_density(3.0);
        assert_eq!(pressure_from_density(3.0, &physics), 0.0);
        assert!(pressure_from_density(4.0, &physics) > 0.0);
    }
}
