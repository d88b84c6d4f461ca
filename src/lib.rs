//! # sph2d - 2D Smoothed Particle Hydrodynamics
//!
//! A small, deterministic SPH fluid solver with a fixed-step driver.
//!
//! sph2d owns the physics only. Drawing, windowing and frame pacing belong to
//! whoever consumes the per-step [`ParticleView`]s through a [`FrameSink`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use sph2d::prelude::*;
//! use std::ops::ControlFlow;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = SimConfig::load("fluid.json")?;
//!     let mut sim = Simulation::new(config)?;
//!
//!     sim.run(|frame: &Frame<'_>| {
//!         for view in frame.views {
//!             draw_circle(view.position, view.radius, view.color);
//!         }
//!         if frame.report.step >= 5_000 {
//!             ControlFlow::Break(())
//!         } else {
//!             ControlFlow::Continue(())
//!         }
//!     });
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Each [`Simulation::step`] runs, in order and over every particle:
//!
//! | Stage | Module | Writes |
//! |-------|--------|--------|
//! | Spawn | [`spawn`] | new particles |
//! | Density | [`density`] | `density` |
//! | Pressure | [`density`] | `pressure` |
//! | Force | [`forces`] | `force` |
//! | Integrate | [`integrate`] | `velocity`, `position` |
//!
//! The force pass reads the density and pressure of *all* neighbors, so no
//! stage may start before the previous one has finished everywhere.
//!
//! ## Configuration
//!
//! All parameters live in one immutable [`SimConfig`]. Defaults reproduce the
//! classic 800 × 600 screen-space demo:
//!
//! ```ignore
//! let config = SimConfig::new(
//!     PhysicsConfig::default()
//!         .with_viscosity(1.0)
//!         .with_density_convention(DensityConvention::Mean),
//!     SpawnConfig::grid(Vec2::new(200.0, 100.0), 10, 5, 12.0),
//! );
//! config.save("fluid.json")?;
//! ```
//!
//! ## Logging
//!
//! sph2d logs through the [`log`] facade and never installs a logger. Spawns
//! and per-step summaries are `debug`, per-particle state is `trace`.

pub mod config;
pub mod density;
mod error;
pub mod forces;
pub mod integrate;
pub mod kernels;
pub mod particle;
mod simulation;
pub mod spawn;
pub mod time;
pub mod view;

pub use bytemuck;
pub use config::{PhysicsConfig, SimConfig, SpawnConfig, SpawnLayout, VisualConfig};
pub use density::DENSITY_EPSILON;
pub use error::ConfigError;
pub use forces::DensityConvention;
pub use glam::{Vec2, Vec3};
pub use kernels::{KernelProfile, Kernels};
pub use particle::{Particle, ParticleId, ParticleStore};
pub use simulation::{Simulation, StepReport};
pub use spawn::Spawner;
pub use time::SimClock;
pub use view::{ColorMode, Frame, FrameSink, ParticleView};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use sph2d::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{PhysicsConfig, SimConfig, SpawnConfig, SpawnLayout, VisualConfig};
    pub use crate::error::ConfigError;
    pub use crate::forces::DensityConvention;
    pub use crate::kernels::KernelProfile;
    pub use crate::simulation::{Simulation, StepReport};
    pub use crate::view::{ColorMode, Frame, FrameSink, ParticleView};
    pub use crate::{Vec2, Vec3};
}
