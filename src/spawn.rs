//! Spawn schedule.
//!
//! The [`Spawner`] decides *when* particles appear and *where*. It owns the
//! random number generator so a seeded run always produces the same layout.
//!
//! Two layouts are supported (see [`SpawnLayout`]):
//!
//! - **Grid**: one block at time zero.
//! - **Random batch**: `batch_size` particles whenever simulated time hits a
//!   multiple of the spawn interval, until the cap is reached.
//!
//! ```ignore
//! let mut spawner = Spawner::new(&config);
//! if spawner.due(&clock) {
//!     spawner.spawn_into(&mut store);
//! }
//! ```

use glam::Vec2;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{SimConfig, SpawnConfig};
use crate::particle::ParticleStore;
use crate::time::SimClock;

pub use crate::config::SpawnLayout;

/// Places new particles according to a [`SpawnConfig`].
#[derive(Clone, Debug)]
pub struct Spawner {
    config: SpawnConfig,
    particle_radius: f32,
    particle_mass: f32,
    rng: SmallRng,
}

impl Spawner {
    /// Build a spawner. Uses the configured seed, or the system clock when
    /// none is given.
    pub fn new(config: &SimConfig) -> Self {
        let seed = config.spawn.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        Self {
            config: config.spawn.clone(),
            particle_radius: config.physics.particle_radius,
            particle_mass: config.physics.particle_mass,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Whether the schedule wants a spawn at the clock's current time.
    ///
    /// Says nothing about free capacity; [`Spawner::spawn_into`] handles the
    /// cap.
    pub fn due(&self, clock: &SimClock) -> bool {
        match self.config.layout {
            SpawnLayout::Grid { .. } => clock.step_count() == 0,
            SpawnLayout::RandomBatch { .. } => clock.is_multiple_of(self.config.interval_ms),
        }
    }

    /// Spawn one batch (or the whole grid) into `store`.
    ///
    /// The batch is cut short when the store fills up. Returns the number of
    /// particles actually added; zero once the store is full.
    pub fn spawn_into(&mut self, store: &mut ParticleStore) -> usize {
        let wanted = match self.config.layout {
            SpawnLayout::Grid { columns, rows, .. } => columns as usize * rows as usize,
            SpawnLayout::RandomBatch { .. } => self.config.batch_size as usize,
        };
        let count = wanted.min(store.capacity_left());
        if count == 0 {
            return 0;
        }
        if count < wanted {
            warn!(
                "spawn batch truncated to {} of {} particles (cap {})",
                count,
                wanted,
                store.capacity()
            );
        }

        let velocity = self.config.initial_velocity;
        let mut first = None;
        for index in 0..count {
            let position = self.position(index);
            let id = store.spawn(position, velocity, self.particle_mass);
            first = first.or(id);
        }

        if let Some(first) = first {
            debug!(
                "spawned {} particles ({}) from {}, total {}",
                count,
                self.config.layout.name(),
                first,
                store.len()
            );
        }
        count
    }

    /// Position of the `index`-th particle of the current batch.
    fn position(&mut self, index: usize) -> Vec2 {
        match self.config.layout {
            SpawnLayout::Grid {
                origin,
                columns,
                spacing,
                ..
            } => {
                let columns = columns.max(1) as usize;
                let col = (index % columns) as f32;
                let row = (index / columns) as f32;
                origin + Vec2::new(col, row) * spacing
            }
            SpawnLayout::RandomBatch { origin } => {
                // Whole-unit offsets across the batch width and one radius tall.
                let width = (self.config.batch_size as f32 * self.particle_radius).max(1.0) as u32;
                let height = self.particle_radius.max(1.0) as u32;
                let dx = self.rng.gen_range(0..width);
                let dy = self.rng.gen_range(0..height);
                origin + Vec2::new(dx as f32, dy as f32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;

    fn batch_config(seed: u64) -> SimConfig {
        SimConfig::new(PhysicsConfig::default(), SpawnConfig::default().with_seed(seed))
    }

    #[test]
    fn test_random_batch_positions_in_range() {
        let config = batch_config(7);
        let mut spawner = Spawner::new(&config);
        let mut store = ParticleStore::with_capacity(45);

        let added = spawner.spawn_into(&mut store);

        assert_eq!(added, 3);
        for p in store.iter() {
            assert!(p.position.x >= 100.0 && p.position.x < 190.0);
            assert!(p.position.y >= 0.0 && p.position.y < 30.0);
            assert_eq!(p.position.x.fract(), 0.0);
            assert_eq!(p.velocity, Vec2::new(-0.5, 0.0));
        }
    }

    #[test]
    fn test_seeded_spawns_repeat() {
        let config = batch_config(1234);
        let mut a = ParticleStore::with_capacity(9);
        let mut b = ParticleStore::with_capacity(9);
        let mut spawner_a = Spawner::new(&config);
        let mut spawner_b = Spawner::new(&config);
        for _ in 0..3 {
            spawner_a.spawn_into(&mut a);
            spawner_b.spawn_into(&mut b);
        }
        let pa: Vec<_> = a.iter().map(|p| p.position).collect();
        let pb: Vec<_> = b.iter().map(|p| p.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_batch_truncated_at_cap() {
        let config = batch_config(3);
        let mut spawner = Spawner::new(&config);
        let mut store = ParticleStore::with_capacity(4);

        assert_eq!(spawner.spawn_into(&mut store), 3);
        assert_eq!(spawner.spawn_into(&mut store), 1);
        assert_eq!(spawner.spawn_into(&mut store), 0);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_grid_layout() {
        let spawn = SpawnConfig::grid(Vec2::new(200.0, 100.0), 3, 2, 10.0);
        let config = SimConfig::new(PhysicsConfig::default(), spawn);
        let mut spawner = Spawner::new(&config);
        let mut store = ParticleStore::with_capacity(6);

        assert_eq!(spawner.spawn_into(&mut store), 6);
        let positions: Vec<_> = store.iter().map(|p| p.position).collect();
        assert_eq!(positions[0], Vec2::new(200.0, 100.0));
        assert_eq!(positions[2], Vec2::new(220.0, 100.0));
        assert_eq!(positions[3], Vec2::new(200.0, 110.0));
        assert_eq!(positions[5], Vec2::new(220.0, 110.0));
    }

    #[test]
    fn test_due_schedule() {
        let batch = Spawner::new(&batch_config(0));
        let grid = Spawner::new(&SimConfig::new(
            PhysicsConfig::default(),
            SpawnConfig::grid(Vec2::splat(100.0), 2, 2, 10.0),
        ));
        let mut clock = SimClock::new(10);

        assert!(batch.due(&clock));
        assert!(grid.due(&clock));

        clock.advance();
        assert!(!batch.due(&clock));
        assert!(!grid.due(&clock));

        for _ in 1..50 {
            clock.advance();
        }
        assert!(batch.due(&clock));
        assert!(!grid.due(&clock));
    }
}
