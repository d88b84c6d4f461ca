//! Semi-implicit Euler integration with reflective walls.

use glam::Vec2;

use crate::config::PhysicsConfig;
use crate::particle::Particle;

/// Advance one particle by `dt`: velocity first, then position from the new
/// velocity.
#[inline]
pub fn step_particle(particle: &mut Particle, dt: f32) {
    particle.velocity += dt * particle.force / particle.mass();
    particle.position += dt * particle.velocity;
}

/// Clamp `position` into `[min, max]` per axis, scaling the velocity
/// component on every axis that was clamped by `damping`.
///
/// `damping` is expected to be negative so a hit both reverses and slows the
/// particle.
pub fn reflect(position: &mut Vec2, velocity: &mut Vec2, min: Vec2, max: Vec2, damping: f32) {
    for axis in 0..2 {
        if position[axis] < min[axis] {
            position[axis] = min[axis];
            velocity[axis] *= damping;
        } else if position[axis] > max[axis] {
            position[axis] = max[axis];
            velocity[axis] *= damping;
        }
    }
}

/// Integration pass over every particle.
pub fn integrate(particles: &mut [Particle], physics: &PhysicsConfig) {
    let dt = physics.dt();
    let min = physics.bounds_min();
    let max = physics.bounds_max();

    for particle in particles.iter_mut() {
        step_particle(particle, dt);
        reflect(
            &mut particle.position,
            &mut particle.velocity,
            min,
            max,
            physics.damping,
        );
    }
}
