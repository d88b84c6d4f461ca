//! Particle records and the arena that owns them.
//!
//! Particles are plain data. Nothing here knows how a particle is drawn; the
//! renderer gets a separate [`ParticleView`](crate::ParticleView) per particle.
//!
//! Particles are never removed, so a particle's id doubles as its index in
//! the arena and stays valid for the whole run.

use glam::Vec2;
use std::fmt;

/// Stable identifier of a particle. Assigned in creation order, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u32);

impl ParticleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One simulated fluid sample.
///
/// `density`, `pressure` and `force` are scratch values owned by the solver
/// passes: each pass overwrites them completely every step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    id: ParticleId,
    mass: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub force: Vec2,
    pub density: f32,
    pub pressure: f32,
}

impl Particle {
    pub(crate) fn new(id: ParticleId, position: Vec2, velocity: Vec2, mass: f32) -> Self {
        Self {
            id,
            mass,
            position,
            velocity,
            force: Vec2::ZERO,
            density: 0.0,
            pressure: 0.0,
        }
    }

    #[inline]
    pub fn id(&self) -> ParticleId {
        self.id
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Kinetic energy `½ m |v|²`.
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

/// Growable, capped collection of particles.
#[derive(Clone, Debug)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticleStore {
    /// Create an empty store that will hold at most `capacity` particles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a particle. Returns `None` once the store is full.
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2, mass: f32) -> Option<ParticleId> {
        if self.is_full() {
            return None;
        }
        let id = ParticleId(self.particles.len() as u32);
        self.particles.push(Particle::new(id, position, velocity, mass));
        Some(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Maximum number of particles.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many more particles fit.
    #[inline]
    pub fn capacity_left(&self) -> usize {
        self.capacity - self.particles.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for the solver passes. Length cannot change through it.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
