//! Render-facing view of the particle set.
//!
//! The solver never draws anything. After each step it builds one
//! [`ParticleView`] per particle and hands the slice to a [`FrameSink`],
//! which presents it however it likes and tells the driver whether to keep
//! going.
//!
//! `ParticleView` is `#[repr(C)]` and [`Pod`](bytemuck::Pod), so a GPU
//! renderer can upload the slice with `bytemuck::cast_slice` directly.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

use crate::particle::Particle;
use crate::simulation::StepReport;

/// What a renderer needs to draw one particle.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleView {
    pub id: u32,
    pub radius: f32,
    pub position: Vec2,
    pub color: Vec3,
}

impl ParticleView {
    pub fn new(particle: &Particle, radius: f32, color: Vec3) -> Self {
        Self {
            id: particle.id().0,
            radius,
            position: particle.position,
            color,
        }
    }
}

/// How particle colors are chosen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColorMode {
    /// Every particle gets the same RGB color.
    Uniform { color: [f32; 3] },
    /// Blue at rest, shading through green to red at `max_speed` and above.
    BySpeed { max_speed: f32 },
    /// Blue at `min` pressure, red at `max`.
    ByPressure { min: f32, max: f32 },
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Uniform {
            color: [0.0, 0.0, 1.0],
        }
    }
}

impl ColorMode {
    pub fn color_for(&self, particle: &Particle) -> Vec3 {
        match *self {
            ColorMode::Uniform { color } => Vec3::from_array(color),
            ColorMode::BySpeed { max_speed } => {
                heat(normalized(particle.velocity.length(), 0.0, max_speed))
            }
            ColorMode::ByPressure { min, max } => heat(normalized(particle.pressure, min, max)),
        }
    }
}

/// Map `value` from `[min, max]` to `[0, 1]`, clamped. A degenerate range maps to 0.
fn normalized(value: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if span <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Blue (0) to red (1) along the hue wheel.
fn heat(t: f32) -> Vec3 {
    hsv_to_rgb((1.0 - t) * 2.0 / 3.0, 1.0, 1.0)
}

/// Convert HSV to RGB.
///
/// * `h` - 0.0 to 1.0 (wraps: red → yellow → green → cyan → blue → magenta → red)
/// * `s` - 0.0 (gray) to 1.0 (vivid)
/// * `v` - 0.0 (black) to 1.0 (bright)
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// Everything handed to the renderer after one step.
///
/// `views` and `particles` are parallel: entry `i` of both describes the
/// same particle.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub report: &'a StepReport,
    pub views: &'a [ParticleView],
    /// Full solver state (density, pressure, force, velocity) for dumps.
    pub particles: &'a [Particle],
}

/// Consumer of simulation frames.
///
/// Returning [`ControlFlow::Break`] stops [`Simulation::run`](crate::Simulation::run).
/// Any `FnMut(&Frame) -> ControlFlow<()>` closure is a sink.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame<'_>) -> ControlFlow<()>;
}

impl<F> FrameSink for F
where
    F: FnMut(&Frame<'_>) -> ControlFlow<()>,
{
    fn present(&mut self, frame: &Frame<'_>) -> ControlFlow<()> {
        self(frame)
    }
}
