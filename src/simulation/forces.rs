//! Force / acceleration contributors for the particle engine
//!
//! Defines the acceleration trait, the [`AccelSet`] force model that sums
//! terms into a cleared buffer, and the two scenario force laws: all-pairs
//! Newtonian gravity and the fixed-head elastic chain.

use crate::simulation::states::{NVec2, StateView};

/// Collection of acceleration terms (gravity, springs, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per particle
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations at time `t` for all particles in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &StateView<'_>, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

/// Trait for acceleration sources operating on a [`StateView`]
/// Implementations add their contribution into `out[i]` for each particle
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &StateView<'_>, out: &mut [NVec2]);
}

/// Run `f` once per acceleration slot.
///
/// `f` may read anything it captured but only writes the slot it is given,
/// so slots are processed in parallel when the `parallel` feature is on.
fn for_each_slot<F>(out: &mut [NVec2], f: F)
where
    F: Fn(usize, &mut NVec2) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_iter_mut().enumerate().for_each(|(i, a)| f(i, a));
    }

    #[cfg(not(feature = "parallel"))]
    for (i, a) in out.iter_mut().enumerate() {
        f(i, a);
    }
}

// =========================================================================================
// N-body gravity
// =========================================================================================

/// How the pair distance is protected against vanishing separations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Softening {
    /// `max(|d|, eps)`
    Floor(f64),
    /// `sqrt(|d|^2 + eps)`
    Plummer(f64),
}

impl Softening {
    pub fn distance(&self, d: &NVec2) -> f64 {
        match *self {
            Softening::Floor(eps) => d.norm().max(eps),
            Softening::Plummer(eps) => (d.norm_squared() + eps).sqrt(),
        }
    }

    pub fn epsilon(&self) -> f64 {
        match *self {
            Softening::Floor(eps) | Softening::Plummer(eps) => eps,
        }
    }
}

/// All-pairs Newtonian gravity with softening.
///
/// Every particle sums over every other particle (both `(i, j)` and
/// `(j, i)` are evaluated), so each slot is written by exactly one worker.
pub struct NBodyGravity {
    pub g: f64, // gravitational constant
    pub softening: Softening,
}

impl Acceleration for NBodyGravity {
    fn acceleration(&self, _t: f64, sys: &StateView<'_>, out: &mut [NVec2]) {
        let n = sys.len();
        if n == 0 { // No particles, return
            return;
        }

        for_each_slot(out, |i, a| {
            let xi = sys.x[i];
            let mut acc = NVec2::zeros();

            for j in 0..n {
                if i == j {
                    continue;
                }
                // diff points from j to i, so -diff pulls i toward j
                let diff = xi - sys.x[j];
                let r = self.softening.distance(&diff);
                let inv_r = r.recip();

                // a_i += -G * m_j * diff / r^3
                let coef = -self.g * sys.m[j] * inv_r * inv_r * inv_r;
                acc += coef * diff;
            }

            *a += acc;
        });
    }
}

// =========================================================================================
// Fixed-head elastic chain
// =========================================================================================

/// Unit-stiffness spring pull toward rest length along `pv`, scaled by 1/mass.
///
/// `pv` is `neighbor - self`. Without `min_distance` coincident neighbours
/// divide by zero and produce non-finite values.
pub fn spring_acc(pv: NVec2, rest_length: f64, mass: f64, min_distance: Option<f64>) -> NVec2 {
    let mut d = pv.norm();
    if let Some(floor) = min_distance {
        d = d.max(floor);
    }
    let zero_force = pv * (rest_length / d);
    (pv - zero_force) / mass
}

/// Quadratic drag `cd * v * |v|`, to be subtracted from the acceleration
pub fn drag_acc(v: NVec2, cd: f64) -> NVec2 {
    cd * v * v.norm()
}

/// Hanging chain: particle 0 is the anchor, every other particle feels a
/// uniform downward pull, springs to its neighbours and quadratic drag.
pub struct FixedHeadChain {
    pub gravity: f64, // plain downward acceleration
    pub rest_length: f64, // L0 per segment
    pub drag: f64, // cd
    pub min_distance: Option<f64>, // optional spring distance floor
}

impl Acceleration for FixedHeadChain {
    fn acceleration(&self, _t: f64, sys: &StateView<'_>, out: &mut [NVec2]) {
        let n = sys.len();
        if n == 0 {
            return;
        }

        for_each_slot(out, |i, a| {
            if i == 0 {
                *a = NVec2::zeros();
                return;
            }

            let p = sys.x[i];
            let m = sys.m[i];
            let mut acc = NVec2::new(0.0, -self.gravity);

            acc += spring_acc(sys.x[i - 1] - p, self.rest_length, m, self.min_distance);
            if i + 1 < n {
                acc += spring_acc(sys.x[i + 1] - p, self.rest_length, m, self.min_distance);
            }
            acc -= drag_acc(sys.v[i], self.drag);

            *a += acc;
        });
    }
}
