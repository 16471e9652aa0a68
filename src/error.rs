//! Error types for the simulation core.
//!
//! Configuration problems are reported before the first step; numerical
//! divergence is only reported when strict finite checking is enabled.

use std::fmt;

/// A scenario or parameter set that cannot be simulated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The scenario has no particles to simulate.
    NoParticles,
    /// A particle mass is zero, negative or not finite.
    InvalidMass { index: usize, mass: f64 },
    /// The frame step is zero, negative or not finite.
    InvalidTimeStep(f64),
    /// Substep count of zero.
    ZeroSubsteps,
    /// A named scalar parameter is outside its allowed range.
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoParticles => write!(f, "Scenario must contain at least one particle"),
            ConfigError::InvalidMass { index, mass } => {
                write!(f, "Particle {} has invalid mass {} (must be positive and finite)", index, mass)
            }
            ConfigError::InvalidTimeStep(h) => write!(f, "Time step {} must be positive and finite", h),
            ConfigError::ZeroSubsteps => write!(f, "Substep count must be at least 1"),
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "Parameter `{}` has invalid value {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime failures surfaced by [`crate::SimulationLoop::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A position or velocity became NaN or infinite.
    NonFinite { index: usize, step: u64 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::NonFinite { index, step } => {
                write!(f, "Particle {} became non-finite at substep {}", index, step)
            }
        }
    }
}

impl std::error::Error for SimulationError {}
