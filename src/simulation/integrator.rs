//! Fixed-step integrator for the bubble world
//!
//! One call advances every body by one display frame: gravity kick,
//! uniform damping, then an explicit Euler drift

use super::states::World;
use super::params::Parameters;

/// Advance every body by one frame
/// Updates velocities then positions in-place; `world.frame` is left to the caller
pub fn euler_integrator(world: &mut World, params: &Parameters) {
    if world.bodies.is_empty() { // no bodies, return
        return;
    }

    for b in world.bodies.iter_mut() {
        // Kick: vy_n+1 = vy_n + g
        b.v.y += params.gravity;

        // Damping: v_n+1 = d * v_n+1
        b.v *= params.damping;

        // Drift: x_n+1 = x_n + v_n+1
        b.x += b.v;
    }
}
