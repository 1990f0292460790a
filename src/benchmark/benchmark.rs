use std::time::Instant;
use crate::simulation::states::{Body, World, NVec2};
use crate::simulation::params::Parameters;
use crate::simulation::collision::resolve_pairs;
use crate::simulation::engine::step_world;

/// Helper to build a packed world of `n` bodies on a surface sized to hold them
fn make_world(n: usize) -> World {
    let side = ((n as f64).sqrt().ceil() * 60.0).max(200.0);
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            (0.5 + 0.45 * (i_f * 0.37).sin()) * side,
            (0.5 + 0.45 * (i_f * 0.13).cos()) * side,
        );
        let v = NVec2::new((i_f * 0.07).sin(), (i_f * 0.11).cos());
        bodies.push(Body::at(x, v, 20.0));
    }

    World::new(bodies, side, side)
}

/// Time the pair pass alone for growing body counts
pub fn bench_collisions() {
    let ns = [16, 64, 256, 1024, 4096];
    let params = Parameters::default();

    for n in ns {
        let mut world = make_world(n);

        // Warm up
        resolve_pairs(&mut world, &params);

        let t0 = Instant::now();
        let contacts = resolve_pairs(&mut world, &params);
        let dt = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, pair pass = {dt:8.6} s, contacts = {contacts}");
    }
}

/// Full step cost per body count
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,step_ms");

    let params = Parameters::default();
    for n in (16..=2048).step_by(64) {
        // Small n: average over more steps to smooth noise
        let steps = if n <= 512 { 20 } else { 3 };
        let mut world = make_world(n);

        let t0 = Instant::now();
        for _ in 0..steps {
            step_world(&mut world, &params);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
