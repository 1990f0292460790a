//! Point placement on a sphere
//!
//! - `fibonacci_sphere`: deterministic near-uniform coverage using the golden angle
//! - `random_on_sphere`: uniform random direction (area-preserving in `cos θ`)
//! - `project_to_sphere`: push an arbitrary position out/in to the surface

use std::f64::consts::PI;

use rand::Rng;

use crate::simulation::states::NVec3;

/// N points of a Fibonacci lattice on a sphere of `radius`, north pole first
///
/// y runs linearly from +1 to -1, each step turns by 2π/φ around the y axis
pub fn fibonacci_sphere(count: usize, radius: f64) -> Vec<NVec3> {
    let golden_ratio = (1.0 + 5.0_f64.sqrt()) / 2.0;
    // A single point has no spacing to divide by, it sits on the pole
    let denom = count.saturating_sub(1).max(1) as f64;

    (0..count).map(|i| {
        let i_f = i as f64;
        let y = 1.0 - (i_f / denom) * 2.0; // from 1 to -1
        let ring = (1.0 - y * y).max(0.0).sqrt(); // ring radius at height y
        let theta = 2.0 * PI * i_f / golden_ratio; // golden angle increment

        NVec3::new(theta.cos() * ring, y, theta.sin() * ring) * radius
    }).collect()
}

/// Uniformly distributed point on the sphere surface
pub fn random_on_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> NVec3 {
    let phi = rng.random::<f64>() * PI * 2.0;
    let theta = (2.0 * rng.random::<f64>() - 1.0).acos();

    NVec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
    )
}

/// Scale `p` onto the sphere surface. `None` for the origin, which has no direction
pub fn project_to_sphere(p: &NVec3, radius: f64) -> Option<NVec3> {
    p.try_normalize(f64::EPSILON).map(|dir| dir * radius)
}
