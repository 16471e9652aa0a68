use std::time::Instant;

use crate::simulation::forces::{AccelSet, FixedHeadChain, NBodyGravity, Softening};
use crate::simulation::integrator::symplectic_euler;
use crate::simulation::states::{NVec2, Particle, ParticleState};

/// Deterministic scattered layout, no rand needed
fn make_cloud(n: usize) -> ParticleState {
    let particles: Vec<Particle> = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new((i_f * 0.37).sin() * 0.5 + 0.5, (i_f * 0.13).cos() * 0.5 + 0.5);
            Particle::new(x, NVec2::zeros(), 1.0)
        })
        .collect();
    ParticleState::from_particles(&particles)
}

/// Horizontal chain of `n` segments with the anchor at the origin
fn make_chain(n: usize) -> ParticleState {
    let m = 100.0 / (n as f64 * n as f64);
    let particles: Vec<Particle> = (0..=n)
        .map(|i| {
            let x = NVec2::new(i as f64 * 0.4 / n as f64, 0.0);
            if i == 0 { Particle::anchor(x, m) } else { Particle::new(x, NVec2::zeros(), m) }
        })
        .collect();
    ParticleState::from_particles(&particles)
}

/// Average seconds per (force pass + integration) over `steps` substeps
fn time_substeps(sys: &mut ParticleState, forces: &AccelSet, steps: usize, dt: f64) -> f64 {
    // Warm up
    let (view, out) = sys.split_for_forces();
    forces.accumulate_accels(0.0, &view, out);

    let t0 = Instant::now();
    for _ in 0..steps {
        let t = sys.t;
        let (view, out) = sys.split_for_forces();
        forces.accumulate_accels(t, &view, out);
        symplectic_euler(sys, dt);
    }
    t0.elapsed().as_secs_f64() / steps as f64
}

/// Time both force models for growing particle counts
pub fn bench_force_pass() {
    let ns = [200, 400, 800, 1600, 3200];

    for n in ns {
        let gravity = AccelSet::new().with(NBodyGravity {
            g: 1.0,
            softening: Softening::Floor(1e-5),
        });
        let mut cloud = make_cloud(n);
        let per_gravity = time_substeps(&mut cloud, &gravity, 3, 1e-6);

        let chain = AccelSet::new().with(FixedHeadChain {
            gravity: 0.001,
            rest_length: 0.4 / n as f64,
            drag: 0.001,
            min_distance: None,
        });
        let mut rope = make_chain(n);
        let per_chain = time_substeps(&mut rope, &chain, 100, 1e-2);

        log::info!("N = {n:5}, gravity substep = {:10.6} s, chain substep = {:10.6} s", per_gravity, per_chain);
    }
}
