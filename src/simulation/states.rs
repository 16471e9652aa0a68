//! Core state types for the particle simulation.
//!
//! `ParticleState` keeps position, velocity, acceleration and mass as flat
//! arrays indexed `0..n`. A force pass reads positions/velocities/masses
//! through a [`StateView`] and writes only the acceleration slice, which is
//! how the split borrow in [`ParticleState::split_for_forces`] enforces the
//! read-others/write-own-slot discipline.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Initial description of one particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub fixed: bool, // never integrated (chain anchor)
}

impl Particle {
    pub fn new(x: NVec2, v: NVec2, m: f64) -> Self {
        Self { x, v, m, fixed: false }
    }

    pub fn anchor(x: NVec2, m: f64) -> Self {
        Self { x, v: NVec2::zeros(), m, fixed: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    pub x: Vec<NVec2>, // positions
    pub v: Vec<NVec2>, // velocities
    pub a: Vec<NVec2>, // accelerations, rebuilt by every force pass
    pub m: Vec<f64>, // masses
    pub fixed: Vec<bool>, // skipped by the integrator
    pub t: f64, // elapsed simulated time
}

/// Read-only snapshot handed to acceleration terms
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub x: &'a [NVec2],
    pub v: &'a [NVec2],
    pub m: &'a [f64],
    pub fixed: &'a [bool],
}

impl<'a> StateView<'a> {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl ParticleState {
    pub fn from_particles(particles: &[Particle]) -> Self {
        let n = particles.len();
        Self {
            x: particles.iter().map(|p| p.x).collect(),
            v: particles.iter().map(|p| p.v).collect(),
            a: vec![NVec2::zeros(); n],
            m: particles.iter().map(|p| p.m).collect(),
            fixed: particles.iter().map(|p| p.fixed).collect(),
            t: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Borrow the state as (immutable snapshot, acceleration buffer)
    pub fn split_for_forces(&mut self) -> (StateView<'_>, &mut [NVec2]) {
        let Self { x, v, a, m, fixed, .. } = self;
        (StateView { x, v, m, fixed }, a.as_mut_slice())
    }

    pub fn view(&self) -> StateView<'_> {
        StateView { x: &self.x, v: &self.v, m: &self.m, fixed: &self.fixed }
    }

    /// Sum of 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        self.v.iter().zip(&self.m).map(|(v, m)| 0.5 * m * v.norm_squared()).sum()
    }

    /// Sum of m v
    pub fn momentum(&self) -> NVec2 {
        self.v.iter().zip(&self.m).fold(NVec2::zeros(), |acc, (v, m)| acc + *m * *v)
    }

    /// Index of the first particle whose position or velocity is not finite
    pub fn first_non_finite(&self) -> Option<usize> {
        self.x
            .iter()
            .zip(&self.v)
            .position(|(x, v)| !(x.iter().all(|c| c.is_finite()) && v.iter().all(|c| c.is_finite())))
    }
}
