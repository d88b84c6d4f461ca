//! SPH smoothing kernels.
//!
//! Three kernels share one smoothing radius `h`:
//!
//! | Kernel | Used for | Shape |
//! |--------|----------|-------|
//! | [`Kernels::density`] | density summation | `(h² - r²)³` (poly6) |
//! | [`Kernels::pressure_gradient`] | pressure force magnitude | `(h - r)³` or `(h - r)²` |
//! | [`Kernels::viscosity_laplacian`] | velocity diffusion | `(h - r)` |
//!
//! All of them are zero for `r >= h`. Normalization is folded together with
//! the particle mass (and viscosity, for the Laplacian) once in
//! [`Kernels::new`], in `f64`.
//!
//! Each kernel is evaluated on the dimensionless falloff (`(h² - r²) / h²`,
//! `(h - r) / h`) times a scale carrying the remaining powers of `h`. The raw
//! `h⁹` of the poly6 normalization never appears in `f32`, so large smoothing
//! radii stay representable.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::PhysicsConfig;

/// Shape of the pressure gradient kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelProfile {
    /// Cubic falloff: `45 m / (π h⁷) · (h - r)³`.
    #[default]
    Cubic,
    /// Gradient of the spiky kernel: `45 m / (π h⁶) · (h - r)²`.
    ///
    /// Stiffer near the support edge than [`KernelProfile::Cubic`]; both
    /// agree at `r = 0`.
    Spiky,
}

/// Precomputed kernel scales for one smoothing radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kernels {
    profile: KernelProfile,
    h: f32,
    h_sq: f32,
    inv_h: f32,
    inv_h_sq: f32,
    density_coeff: f32,
    /// `315 m / (64 π h³)`, the value of `W(0)`.
    density_scale: f32,
    /// `45 m / (π h⁴)`, the gradient magnitude at `r = 0`.
    gradient_scale: f32,
    /// `45 m μ / (π h⁵)`, the Laplacian at `r = 0`.
    viscosity_scale: f32,
}

impl Kernels {
    /// Build the kernel set from the physical parameters.
    pub fn new(physics: &PhysicsConfig) -> Self {
        let h = physics.smoothing_radius as f64;
        let mass = physics.particle_mass as f64;
        let mu = physics.viscosity as f64;

        Self {
            profile: physics.kernel_profile,
            h: physics.smoothing_radius,
            h_sq: (h * h) as f32,
            inv_h: (1.0 / h) as f32,
            inv_h_sq: (1.0 / (h * h)) as f32,
            density_coeff: (315.0 * mass / (64.0 * PI * h.powi(9))) as f32,
            density_scale: (315.0 * mass / (64.0 * PI * h.powi(3))) as f32,
            gradient_scale: (45.0 * mass / (PI * h.powi(4))) as f32,
            viscosity_scale: (45.0 * mass * mu / (PI * h.powi(5))) as f32,
        }
    }

    /// Whether every scale survived the conversion to `f32`.
    ///
    /// False when `h` is so large (or the mass so small) that a kernel would
    /// collapse to zero or overflow.
    pub fn is_representable(&self) -> bool {
        let usable = |x: f32| x.is_finite() && x > 0.0;
        usable(self.density_scale)
            && usable(self.gradient_scale)
            && self.viscosity_scale.is_finite()
            && self.inv_h_sq > 0.0
            && self.h_sq.is_finite()
    }

    /// Smoothing radius `h`.
    #[inline]
    pub fn smoothing_radius(&self) -> f32 {
        self.h
    }

    /// Active gradient profile.
    #[inline]
    pub fn profile(&self) -> KernelProfile {
        self.profile
    }

    /// Classic poly6 coefficient `315 m / (64 π h⁹)`, so that
    /// `W(0) = coefficient · h⁶`.
    ///
    /// Reporting only; it underflows for large `h` while [`Kernels::density`]
    /// does not.
    #[inline]
    pub fn density_coefficient(&self) -> f32 {
        self.density_coeff
    }

    /// Density kernel `W(r)`. Non-negative on `[0, h)`, zero beyond.
    #[inline]
    pub fn density(&self, r: f32) -> f32 {
        if r >= self.h {
            return 0.0;
        }
        let q = (self.h_sq - r * r) * self.inv_h_sq;
        self.density_scale * q * q * q
    }

    /// Magnitude of the pressure gradient kernel.
    ///
    /// The caller supplies the direction (unit vector between the pair).
    #[inline]
    pub fn pressure_gradient(&self, r: f32) -> f32 {
        if r >= self.h {
            return 0.0;
        }
        let q = (self.h - r) * self.inv_h;
        match self.profile {
            KernelProfile::Cubic => self.gradient_scale * q * q * q,
            KernelProfile::Spiky => self.gradient_scale * q * q,
        }
    }

    /// Viscosity Laplacian `∇²W(r)`.
    #[inline]
    pub fn viscosity_laplacian(&self, r: f32) -> f32 {
        if r >= self.h {
            return 0.0;
        }
        self.viscosity_scale * (self.h - r) * self.inv_h
    }
}
