//! Contact resolution for the bubble world
//!
//! Two passes, both operating in-place on a [`World`]:
//! - wall contacts: clamp inside the surface and reflect with restitution
//! - pair contacts: push overlapping pairs apart along the contact normal and
//!   exchange normal velocity in the rotated contact frame (equal masses)
//!
//! The pair pass is a direct O(n^2) sweep over unordered pairs

use nalgebra::Rotation2;

use super::params::Parameters;
use super::states::{Body, NVec2, World};

/// Clamp every body inside `[radius, extent - radius]` on both axes and
/// reflect the outward velocity component scaled by `params.restitution`
/// Returns the number of (body, axis) wall contacts
pub fn resolve_boundaries(world: &mut World, params: &Parameters) -> usize {
    let (w, h) = (world.width, world.height);
    let e = params.restitution;
    let mut contacts = 0;

    for b in world.bodies.iter_mut() {
        if reflect_axis(&mut b.x.x, &mut b.v.x, b.radius, w, e) {
            contacts += 1;
        }
        if reflect_axis(&mut b.x.y, &mut b.v.y, b.radius, h, e) {
            contacts += 1;
        }
    }
    contacts
}

/// Single-axis wall response, returns true when the body touched a wall
fn reflect_axis(pos: &mut f64, vel: &mut f64, radius: f64, extent: f64, restitution: f64) -> bool {
    // Surface narrower than the body: no valid interval, park it in the middle
    if extent <= 2.0 * radius {
        *pos = 0.5 * extent;
        *vel = 0.0;
        return true;
    }

    if *pos <= radius {
        *pos = radius;
        // Only reflect while still moving into the wall, a resting body keeps v = 0
        if *vel < 0.0 {
            *vel = -*vel * restitution;
        }
        true
    } else if *pos >= extent - radius {
        *pos = extent - radius;
        if *vel > 0.0 {
            *vel = -*vel * restitution;
        }
        true
    } else {
        false
    }
}

/// Resolve one pair contact. Returns true when the pair was in contact
///
/// After this call the centers are at least `(a.radius + b.radius) * params.slop`
/// apart. Coincident centers fall back to the +x normal instead of dividing
/// by a zero distance
pub fn resolve_pair(a: &mut Body, b: &mut Body, params: &Parameters) -> bool {
    // d points from a to b
    let d = b.x - a.x;
    let dist = d.norm();
    let min_dist = (a.radius + b.radius) * params.slop;

    if dist >= min_dist {
        return false;
    }

    // Unit contact normal from a to b
    let n = if dist > params.min_separation {
        d / dist
    } else {
        NVec2::x()
    };

    // Positional correction: each body moves half the overlap
    let overlap = min_dist - dist;
    let sep = 0.5 * overlap * n;
    a.x -= sep;
    b.x += sep;

    // Rotate velocities into the contact frame: x along n, y tangential
    let rot = Rotation2::new(n.y.atan2(n.x));
    let inv = rot.inverse();
    let va = inv * a.v;
    let vb = inv * b.v;

    // Already separating along the normal, keep velocities
    if va.x - vb.x <= 0.0 {
        return true;
    }

    // Equal-mass exchange of the normal components:
    // e = 1 swaps them, e < 1 bleeds off the relative normal speed
    let e = params.pair_restitution;
    let mean = 0.5 * (va.x + vb.x);
    let half_rel = 0.5 * (va.x - vb.x);
    let na = mean - e * half_rel;
    let nb = mean + e * half_rel;

    // Rotate back to surface coordinates, tangential parts untouched
    a.v = rot * NVec2::new(na, va.y);
    b.v = rot * NVec2::new(nb, vb.y);

    true
}

/// Sweep all unordered pairs (i, j) with i < j
/// Returns the number of pairs that were in contact
pub fn resolve_pairs(world: &mut World, params: &Parameters) -> usize {
    let n = world.bodies.len();
    let mut contacts = 0;

    for i in 0..n {
        // Split so bodies[i] and bodies[j] can be borrowed mutably together
        let (head, tail) = world.bodies.split_at_mut(i + 1);
        let bi = &mut head[i];
        for bj in tail.iter_mut() {
            if resolve_pair(bi, bj, params) {
                contacts += 1;
            }
        }
    }
    contacts
}
