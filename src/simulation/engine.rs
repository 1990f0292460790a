//! One frame of the bubble world as a plain state transition
//!
//! Order: integrate → walls → pairs → walls. The closing wall pass keeps
//! bodies inside the surface after pair separation pushed them out

use super::collision::{resolve_boundaries, resolve_pairs};
use super::integrator::euler_integrator;
use super::params::Parameters;
use super::states::World;

/// Summary of what happened during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub frame: u64, // frame index after the step
    pub wall_contacts: usize, // (body, axis) wall hits over both wall passes
    pub pair_contacts: usize, // overlapping pairs resolved
    pub kinetic_energy: f64, // total after the step
}

/// Advance `world` by one frame
pub fn step_world(world: &mut World, params: &Parameters) -> StepReport {
    euler_integrator(world, params);

    let mut wall_contacts = resolve_boundaries(world, params);
    let pair_contacts = resolve_pairs(world, params);
    wall_contacts += resolve_boundaries(world, params);

    world.frame += 1;

    StepReport {
        frame: world.frame,
        wall_contacts,
        pair_contacts,
        kinetic_energy: world.kinetic_energy(),
    }
}
