//! Time-stepping parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - base frame step `h` and substep count (`dt = h / substeps`),
//! - whether positions/velocities are checked for non-finite values

/// What to do when a particle position or velocity stops being finite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FiniteCheck {
    /// Never inspect values, divergence flows through to the output
    #[default]
    Permissive,
    /// Check after every substep and stop on the first non-finite particle
    Strict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub h: f64, // frame step
    pub substeps: u32, // substeps per frame
    pub finite_check: FiniteCheck,
}

impl Parameters {
    pub fn new(h: f64, substeps: u32) -> Self {
        Self { h, substeps, finite_check: FiniteCheck::Permissive }
    }

    pub fn with_finite_check(mut self, finite_check: FiniteCheck) -> Self {
        self.finite_check = finite_check;
        self
    }

    /// Size of one substep
    pub fn dt(&self) -> f64 {
        self.h / f64::from(self.substeps)
    }
}
