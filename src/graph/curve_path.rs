//! Cosmetic curve geometry
//!
//! A curve is drawn as a quadratic Bézier from start to end whose control
//! point is the chord midpoint plus a random offset (`bend`). The offset is
//! drawn once per curve, the path is not a geodesic and may dip inside the sphere.

use rand::Rng;

use crate::simulation::states::NVec3;

/// Random control offset, each component uniform in `[-1, 1) * radius * curvature`
pub fn random_bend<R: Rng + ?Sized>(rng: &mut R, radius: f64, curvature: f64) -> NVec3 {
    NVec3::new(
        (rng.random::<f64>() - 0.5) * 2.0,
        (rng.random::<f64>() - 0.5) * 2.0,
        (rng.random::<f64>() - 0.5) * 2.0,
    ) * (radius * curvature)
}

/// B(t) = (1-t)^2 p0 + 2(1-t)t p1 + t^2 p2
pub fn quadratic_bezier(p0: &NVec3, p1: &NVec3, p2: &NVec3, t: f64) -> NVec3 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

pub fn control_point(start: &NVec3, end: &NVec3, bend: &NVec3) -> NVec3 {
    start.lerp(end, 0.5) + bend
}

/// `samples` evenly spaced points along the curve, both endpoints included
pub fn sample_curve(start: &NVec3, end: &NVec3, bend: &NVec3, samples: usize) -> Vec<NVec3> {
    if samples < 2 {
        return vec![*start, *end];
    }
    let control = control_point(start, end, bend);
    let last = (samples - 1) as f64;

    (0..samples)
        .map(|i| quadratic_bezier(start, &control, end, i as f64 / last))
        .collect()
}

/// Where a curve's title is anchored: the curve's own midpoint
pub fn label_anchor(start: &NVec3, end: &NVec3, bend: &NVec3) -> NVec3 {
    quadratic_bezier(start, &control_point(start, end, bend), end, 0.5)
}
