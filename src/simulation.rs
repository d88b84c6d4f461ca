//! Simulation driver.
//!
//! One [`Simulation::step`] runs the fixed pipeline
//!
//! ```text
//! spawn → density → pressure → force → integrate → views → clock
//! ```
//!
//! Every pass covers the whole particle set before the next one starts.

use glam::Vec2;
use log::{debug, log_enabled, trace, Level};
use std::ops::ControlFlow;
use std::time::Duration;

use crate::config::SimConfig;
use crate::density::{compute_densities, compute_pressures};
use crate::error::ConfigError;
use crate::forces::compute_forces;
use crate::integrate::integrate;
use crate::kernels::Kernels;
use crate::particle::{ParticleId, ParticleStore};
use crate::spawn::Spawner;
use crate::time::SimClock;
use crate::view::{Frame, FrameSink, ParticleView};

/// Summary of one completed step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Steps completed, including this one.
    pub step: u64,
    /// Simulated time after this step.
    pub elapsed: Duration,
    /// Particles added by the spawn stage of this step.
    pub spawned: usize,
    pub particle_count: usize,
    /// Smallest density this step. Zero with no particles.
    pub min_density: f32,
    /// Largest density this step. Zero with no particles.
    pub max_density: f32,
    /// Total kinetic energy after integration.
    pub kinetic_energy: f32,
}

/// A 2D SPH simulation.
///
/// Owns the particles exclusively; a step never runs concurrently with
/// anything else touching them.
///
/// ```ignore
/// let mut sim = Simulation::new(SimConfig::default())?;
/// let steps = sim.run(|frame: &Frame<'_>| {
///     if frame.report.step >= 1000 {
///         ControlFlow::Break(())
///     } else {
///         ControlFlow::Continue(())
///     }
/// });
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimConfig,
    kernels: Kernels,
    particles: ParticleStore,
    spawner: Spawner,
    clock: SimClock,
    views: Vec<ParticleView>,
}

impl Simulation {
    /// Validate `config` and set up an empty simulation at time zero.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let capacity = config.spawn.max_particles as usize;
        Ok(Self {
            kernels: Kernels::new(&config.physics),
            particles: ParticleStore::with_capacity(capacity),
            spawner: Spawner::new(&config),
            clock: SimClock::new(config.physics.time_step_ms),
            views: Vec::with_capacity(capacity),
            config,
        })
    }

    /// Run one fixed step and return its summary.
    pub fn step(&mut self) -> StepReport {
        let spawned = if self.spawner.due(&self.clock) {
            self.spawner.spawn_into(&mut self.particles)
        } else {
            0
        };

        let physics = &self.config.physics;
        let particles = self.particles.as_mut_slice();
        compute_densities(particles, &self.kernels);
        compute_pressures(particles, physics);
        compute_forces(particles, &self.kernels, physics);
        integrate(particles, physics);

        self.rebuild_views();
        self.clock.advance();

        if log_enabled!(Level::Trace) {
            for p in self.particles.iter() {
                trace!(
                    "{} pos={:?} vel={:?} rho={} p={} f={:?}",
                    p.id(),
                    p.position,
                    p.velocity,
                    p.density,
                    p.pressure,
                    p.force
                );
            }
        }

        let report = self.report(spawned);
        debug!(
            "step {} t={:?} n={} (+{}) rho=[{}, {}] ke={}",
            report.step,
            report.elapsed,
            report.particle_count,
            report.spawned,
            report.min_density,
            report.max_density,
            report.kinetic_energy
        );
        report
    }

    /// Step and hand each frame to `sink` until it returns
    /// [`ControlFlow::Break`]. Returns the number of steps run.
    pub fn run<S: FrameSink>(&mut self, mut sink: S) -> u64 {
        let mut steps = 0;
        loop {
            let report = self.step();
            steps += 1;
            let frame = Frame {
                report: &report,
                views: &self.views,
                particles: self.particles.as_slice(),
            };
            if let ControlFlow::Break(()) = sink.present(&frame) {
                debug!("stopped after {} steps", steps);
                return steps;
            }
        }
    }

    /// Add a particle outside the spawn schedule. `None` once the cap is hit.
    ///
    /// It joins the next step's passes; views are refreshed then.
    pub fn spawn_at(&mut self, position: Vec2, velocity: Vec2) -> Option<ParticleId> {
        self.particles
            .spawn(position, velocity, self.config.physics.particle_mass)
    }

    /// Render views from the last completed step.
    pub fn views(&self) -> &[ParticleView] {
        &self.views
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn kernels(&self) -> &Kernels {
        &self.kernels
    }

    fn rebuild_views(&mut self) {
        let radius = self.config.physics.particle_radius;
        let mode = &self.config.visuals.color_mode;
        self.views.clear();
        self.views.extend(
            self.particles
                .iter()
                .map(|p| ParticleView::new(p, radius, mode.color_for(p))),
        );
    }

    fn report(&self, spawned: usize) -> StepReport {
        let mut report = StepReport {
            step: self.clock.step_count(),
            elapsed: self.clock.elapsed(),
            spawned,
            particle_count: self.particles.len(),
            ..StepReport::default()
        };
        if self.particles.is_empty() {
            return report;
        }

        report.min_density = f32::INFINITY;
        report.max_density = f32::NEG_INFINITY;
        for p in self.particles.iter() {
            report.min_density = report.min_density.min(p.density);
            report.max_density = report.max_density.max(p.density);
            report.kinetic_energy += p.kinetic_energy();
        }
        report
    }
}
