//! Fixed-step time integrator for the particle system
//!
//! Semi-implicit (symplectic) Euler: every non-fixed particle first takes a
//! velocity kick from the acceleration of the preceding force pass, then
//! drifts with the *updated* velocity.

use super::states::ParticleState;

/// Advance `sys` by one substep of size `dt` using the accelerations stored
/// in `sys.a`, and advance `sys.t`
pub fn symplectic_euler(sys: &mut ParticleState, dt: f64) {
    let ParticleState { x, v, a, fixed, t, .. } = sys;

    for (((xi, vi), ai), pinned) in x.iter_mut().zip(v.iter_mut()).zip(a.iter()).zip(fixed.iter()) {
        if *pinned {
            continue;
        }
        // Kick: v_n+1 = v_n + dt * a_n
        *vi += dt * *ai;
        // Drift: x_n+1 = x_n + dt * v_n+1
        *xi += dt * *vi;
    }

    *t += dt;
}
