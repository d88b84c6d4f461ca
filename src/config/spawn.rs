//! Spawn configuration types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Where new particles are placed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SpawnLayout {
    /// A block of `columns × rows` particles, placed once at time zero.
    Grid {
        origin: Vec2,
        columns: u32,
        rows: u32,
        spacing: f32,
    },
    /// `batch_size` particles every `interval_ms`, scattered over
    /// `[0, batch_size · radius) × [0, radius)` whole-unit offsets from `origin`.
    RandomBatch { origin: Vec2 },
}

impl Default for SpawnLayout {
    fn default() -> Self {
        SpawnLayout::RandomBatch {
            origin: Vec2::new(100.0, 0.0),
        }
    }
}

impl SpawnLayout {
    pub fn name(&self) -> &'static str {
        match self {
            SpawnLayout::Grid { .. } => "Grid",
            SpawnLayout::RandomBatch { .. } => "Random Batch",
        }
    }
}

/// Configuration for the spawn schedule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub layout: SpawnLayout,
    /// Particles per batch (random batch layout only).
    pub batch_size: u32,
    /// Simulated time between batches, in milliseconds.
    pub interval_ms: u32,
    /// Hard cap on the particle count.
    pub max_particles: u32,
    /// Velocity given to every new particle.
    pub initial_velocity: Vec2,
    /// RNG seed. `None` seeds from the system clock.
    pub seed: Option<u64>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            layout: SpawnLayout::default(),
            batch_size: 3,
            interval_ms: 500,
            max_particles: 45,
            initial_velocity: Vec2::new(-0.5, 0.0),
            seed: None,
        }
    }
}

impl SpawnConfig {
    /// A one-shot grid block with zero initial velocity.
    pub fn grid(origin: Vec2, columns: u32, rows: u32, spacing: f32) -> Self {
        Self {
            layout: SpawnLayout::Grid {
                origin,
                columns,
                rows,
                spacing,
            },
            max_particles: columns.saturating_mul(rows),
            initial_velocity: Vec2::ZERO,
            ..Self::default()
        }
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_max_particles(mut self, max: u32) -> Self {
        self.max_particles = max;
        self
    }

    pub fn with_initial_velocity(mut self, velocity: Vec2) -> Self {
        self.initial_velocity = velocity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
