use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bubblegraph::simulation::collision::{resolve_boundaries, resolve_pair, resolve_pairs};
use bubblegraph::simulation::integrator::euler_integrator;
use bubblegraph::visualization::icons::icon_outline;
use bubblegraph::{step_world, Body, BubbleConfig, BubbleScenario, DemoError, DemoKind, Hsl, IconKind, NVec2, Parameters, ScenarioConfig, SurfaceConfig, World};

/// Build a body with no label at (x, y) moving with (vx, vy)
pub fn body(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Body {
    Body::at(NVec2::new(x, y), NVec2::new(vx, vy), radius)
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters::default()
}

/// Every body fully inside its world, within floating tolerance
pub fn assert_inside(world: &World) {
    for (i, b) in world.bodies.iter().enumerate() {
        assert!(b.x.x.is_finite() && b.x.y.is_finite(), "body {i} position is not finite: {:?}", b.x);
        assert!(b.x.x >= b.radius - 1e-9 && b.x.x <= world.width - b.radius + 1e-9, "body {i} x out of bounds: {}", b.x.x);
        assert!(b.x.y >= b.radius - 1e-9 && b.x.y <= world.height - b.radius + 1e-9, "body {i} y out of bounds: {}", b.x.y);
    }
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn integrator_applies_gravity_then_damping_then_drift() {
    let mut world = World::new(vec![body(100.0, 100.0, 1.0, 0.0, 10.0)], 500.0, 500.0);
    let p = test_params();

    euler_integrator(&mut world, &p);

    let b = &world.bodies[0];
    assert_abs_diff_eq!(b.v.x, 0.99, epsilon = 1e-12);
    assert_abs_diff_eq!(b.v.y, 0.1 * 0.99, epsilon = 1e-12);
    assert_abs_diff_eq!(b.x.x, 100.99, epsilon = 1e-12);
    assert_abs_diff_eq!(b.x.y, 100.099, epsilon = 1e-12);
}

// ==================================================================================
// Boundary tests
// ==================================================================================

#[test]
fn boundary_clamps_every_body_inside() {
    let mut world = World::new(
        vec![
            body(-5.0, 50.0, -2.0, 0.0, 10.0),
            body(250.0, 50.0, 3.0, 0.0, 10.0),
            body(100.0, -40.0, 0.0, -1.0, 20.0),
            body(100.0, 130.0, 0.0, 4.0, 15.0),
            body(100.0, 50.0, 0.5, 0.5, 10.0),
        ],
        200.0,
        100.0,
    );

    let contacts = resolve_boundaries(&mut world, &test_params());

    assert_eq!(contacts, 4);
    assert_inside(&world);
}

#[test]
fn boundary_reflects_with_restitution() {
    let mut world = World::new(vec![body(-5.0, 50.0, -2.0, 0.0, 10.0)], 200.0, 100.0);

    resolve_boundaries(&mut world, &test_params());

    let b = &world.bodies[0];
    assert_abs_diff_eq!(b.x.x, 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.v.x, 1.4, epsilon = 1e-12);
}

#[test]
fn boundary_does_not_flip_a_body_already_leaving_the_wall() {
    // Touching the floor but moving up: velocity must survive untouched
    let mut world = World::new(vec![body(50.0, 90.0, 0.0, -0.5, 10.0)], 200.0, 100.0);

    resolve_boundaries(&mut world, &test_params());

    assert_abs_diff_eq!(world.bodies[0].v.y, -0.5, epsilon = 1e-12);
}

#[test]
fn boundary_surface_smaller_than_body_parks_it_in_the_middle() {
    let mut world = World::new(vec![body(3.0, 3.0, 1.0, 1.0, 30.0)], 40.0, 200.0);

    resolve_boundaries(&mut world, &test_params());

    let b = &world.bodies[0];
    assert_abs_diff_eq!(b.x.x, 20.0, epsilon = 1e-12);
    assert_eq!(b.v.x, 0.0);
    assert!(b.x.y >= 30.0);
}

// ==================================================================================
// Pair collision tests
// ==================================================================================

#[test]
fn pair_overlap_is_separated_to_contact_distance() {
    let p = test_params();
    let mut a = body(0.0, 0.0, 0.0, 0.0, 10.0);
    let mut b = body(5.0, 0.0, 0.0, 0.0, 10.0);

    assert!(resolve_pair(&mut a, &mut b, &p));

    let dist = (b.x - a.x).norm();
    assert!(dist >= 20.0, "pair still overlapping: {dist}");
    assert_abs_diff_eq!(dist, 20.0 * p.slop, epsilon = 1e-9);
    // Split evenly around the old midpoint
    assert_abs_diff_eq!(0.5 * (a.x.x + b.x.x), 2.5, epsilon = 1e-9);
}

#[test]
fn pair_at_identical_positions_does_not_divide_by_zero() {
    let p = test_params();
    let mut a = body(50.0, 50.0, 0.0, 0.0, 10.0);
    let mut b = body(50.0, 50.0, 0.0, 0.0, 12.0);

    assert!(resolve_pair(&mut a, &mut b, &p));

    for v in [a.x, b.x, a.v, b.v] {
        assert!(v.x.is_finite() && v.y.is_finite(), "non-finite component in {v:?}");
    }
    assert!((b.x - a.x).norm() >= 22.0);
}

#[test]
fn pair_head_on_equal_masses_swap_velocities() {
    let p = test_params();
    let mut a = body(0.0, 0.0, 1.0, 0.0, 10.0);
    let mut b = body(19.0, 0.0, -1.0, 0.0, 10.0);

    resolve_pair(&mut a, &mut b, &p);

    assert_abs_diff_eq!(a.v.x, -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.v.x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a.v.y, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.v.y, 0.0, epsilon = 1e-12);
}

#[test]
fn pair_exchange_keeps_tangential_component() {
    let p = test_params();
    // Contact normal along +y, a moves diagonally into b
    let mut a = body(0.0, 0.0, 1.0, 1.0, 10.0);
    let mut b = body(0.0, 19.0, 0.0, 0.0, 10.0);

    resolve_pair(&mut a, &mut b, &p);

    assert_abs_diff_eq!(a.v.x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a.v.y, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.v.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.v.y, 1.0, epsilon = 1e-12);
}

#[test]
fn pair_already_separating_keeps_velocities() {
    let p = test_params();
    let mut a = body(0.0, 0.0, -1.0, 0.0, 10.0);
    let mut b = body(19.0, 0.0, 1.0, 0.0, 10.0);

    assert!(resolve_pair(&mut a, &mut b, &p));

    assert_eq!(a.v, NVec2::new(-1.0, 0.0));
    assert_eq!(b.v, NVec2::new(1.0, 0.0));
}

#[test]
fn pair_momentum_is_conserved() {
    let p = Parameters { pair_restitution: 0.5, ..test_params() };
    let mut a = body(0.0, 0.0, 2.0, 0.3, 10.0);
    let mut b = body(12.0, 9.0, -0.7, -1.1, 10.0);
    let before = a.v + b.v;

    resolve_pair(&mut a, &mut b, &p);

    let after = a.v + b.v;
    assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-12);
    assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-12);
}

#[test]
fn pair_restitution_below_one_bleeds_normal_speed() {
    let p = Parameters { pair_restitution: 0.5, ..test_params() };
    let mut a = body(0.0, 0.0, 1.0, 0.0, 10.0);
    let mut b = body(19.0, 0.0, -1.0, 0.0, 10.0);

    resolve_pair(&mut a, &mut b, &p);

    // mean 0, half relative speed 1, scaled by 0.5
    assert_abs_diff_eq!(a.v.x, -0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(b.v.x, 0.5, epsilon = 1e-12);
}

#[test]
fn random_overlapping_pairs_end_at_contact_distance() {
    let p = test_params();
    let mut rng = StdRng::seed_from_u64(2024);

    for case in 0..1000 {
        let ra: f64 = rng.random_range(5.0..70.0);
        let rb: f64 = rng.random_range(5.0..70.0);
        let center = NVec2::new(rng.random_range(0.0..1280.0), rng.random_range(0.0..720.0));
        // every tenth case starts with coincident centers
        let dist = if case % 10 == 0 { 0.0 } else { rng.random_range(0.0..(ra + rb)) };
        let angle = rng.random_range(0.0..std::f64::consts::TAU);
        let offset = NVec2::new(angle.cos(), angle.sin()) * dist;

        let mut a = Body::at(center, NVec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)), ra);
        let mut b = Body::at(center + offset, NVec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)), rb);

        assert!(resolve_pair(&mut a, &mut b, &p), "case {case} should be in contact");

        let after = (b.x - a.x).norm();
        assert!(after >= ra + rb - 1e-9, "case {case}: distance {after} below {}", ra + rb);
        assert!(a.v.x.is_finite() && a.v.y.is_finite() && b.v.x.is_finite() && b.v.y.is_finite(), "case {case}: velocity not finite");
    }
}

#[test]
fn pair_sweep_counts_only_touching_pairs() {
    let mut world = World::new(
        vec![
            body(100.0, 100.0, 0.0, 0.0, 10.0),
            body(115.0, 100.0, 0.0, 0.0, 10.0),
            body(400.0, 400.0, 0.0, 0.0, 10.0),
        ],
        500.0,
        500.0,
    );

    let contacts = resolve_pairs(&mut world, &test_params());

    assert_eq!(contacts, 1);
    assert!((world.bodies[1].x - world.bodies[0].x).norm() >= 20.0);
    assert_eq!(world.bodies[2].x, NVec2::new(400.0, 400.0));
}

// ==================================================================================
// Step / scenario tests
// ==================================================================================

fn default_scenario() -> BubbleScenario {
    BubbleScenario::build_scenario(&BubbleConfig::default(), &SurfaceConfig::default())
}

#[test]
fn scenario_initial_bodies_match_config_ranges() {
    let cfg = BubbleConfig::default();
    let scenario = default_scenario();

    assert_eq!(scenario.world.bodies.len(), cfg.count);
    for b in &scenario.world.bodies {
        assert!(b.radius >= cfg.radius_min && b.radius < cfg.radius_max);
        assert!(b.v.x.abs() <= 0.5 * cfg.speed && b.v.y.abs() <= 0.5 * cfg.speed);
        assert!(b.score.map_or(true, |s| s < 100));
    }
    assert_inside(&scenario.world);
}

#[test]
fn scenario_is_reproducible_from_seed() {
    let a = default_scenario();
    let b = default_scenario();

    for (ba, bb) in a.world.bodies.iter().zip(b.world.bodies.iter()) {
        assert_eq!(ba.x, bb.x);
        assert_eq!(ba.v, bb.v);
        assert_eq!(ba.score, bb.score);
    }
}

#[test]
fn scenario_steps_keep_bodies_inside_and_finite() {
    let mut scenario = default_scenario();

    for frame in 1..=600 {
        let report = scenario.step().expect("live scenario must step");
        assert_eq!(report.frame, frame);
        assert!(report.kinetic_energy.is_finite());
    }
    assert_inside(&scenario.world);
}

#[test]
fn scenario_step_is_deterministic() {
    let mut a = default_scenario();
    let mut b = default_scenario();

    for _ in 0..100 {
        assert_eq!(a.step(), b.step());
    }
}

#[test]
fn scenario_resize_pulls_bodies_into_new_surface() {
    let mut scenario = default_scenario();
    scenario.resize(600.0, 400.0);

    scenario.step();

    assert_eq!(scenario.world.width, 600.0);
    assert_inside(&scenario.world);
}

#[test]
fn scenario_without_surface_does_not_step() {
    let mut scenario = default_scenario();
    scenario.resize(0.0, 400.0);

    assert!(scenario.step().is_none());
    assert_eq!(scenario.world.frame, 0);
}

#[test]
fn scenario_dispose_clears_and_stops_stepping() {
    let mut scenario = default_scenario();
    scenario.step();

    scenario.dispose();

    assert!(scenario.is_disposed());
    assert!(scenario.world.bodies.is_empty());
    assert!(scenario.step().is_none());
}

#[test]
fn step_world_reports_contacts() {
    // Two overlapping bodies resting on the floor
    let mut world = World::new(
        vec![body(100.0, 90.0, 0.0, 0.0, 10.0), body(110.0, 90.0, 0.0, 0.0, 10.0)],
        300.0,
        100.0,
    );

    let report = step_world(&mut world, &test_params());

    assert_eq!(report.frame, 1);
    assert_eq!(report.pair_contacts, 1);
    assert!(report.wall_contacts >= 2);
    assert_inside(&world);
}

// ==================================================================================
// Color and configuration tests
// ==================================================================================

#[test]
fn hsl_primary_hues_convert_to_rgb() {
    let red = Hsl::new(0.0, 1.0, 0.5).to_rgb();
    let green = Hsl::new(120.0, 1.0, 0.5).to_rgb();
    let grey = Hsl::new(200.0, 0.0, 0.25).to_rgb();

    for (got, want) in [(red, [1.0, 0.0, 0.0]), (green, [0.0, 1.0, 0.0]), (grey, [0.25, 0.25, 0.25])] {
        for k in 0..3 {
            assert_abs_diff_eq!(got[k], want[k], epsilon = 1e-12);
        }
    }
}

#[test]
fn config_partial_yaml_falls_back_to_defaults() {
    let yaml = "demo: graph\ngraph:\n  initial_points: 12\n";
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("valid yaml");

    assert_eq!(cfg.demo, DemoKind::Graph);
    assert_eq!(cfg.graph.initial_points, 12);
    assert_eq!(cfg.graph.sphere_radius, 5.0);
    assert_eq!(cfg.bubble.count, 16);
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_rejects_slop_below_one() {
    let yaml = "bubble:\n  slop: 0.9\n";
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("valid yaml");

    assert!(matches!(cfg.validate(), Err(DemoError::InvalidConfig(_))));
}

#[test]
fn config_shipped_scenarios_load_and_validate() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for (file, demo) in [("bubble.yaml", DemoKind::Bubble), ("graph.yaml", DemoKind::Graph), ("flow.yaml", DemoKind::Flow)] {
        let text = std::fs::read_to_string(dir.join(file)).expect("scenario file exists");
        let cfg: ScenarioConfig = serde_yaml::from_str(&text).expect("scenario parses");
        assert_eq!(cfg.demo, demo, "{file}");
        assert!(cfg.validate().is_ok(), "{file}");
    }
}

// ==================================================================================
// Icon outline tests
// ==================================================================================

#[test]
fn icon_outlines_fit_the_pictogram_box() {
    for kind in IconKind::ALL {
        let strokes = icon_outline(kind);
        assert!(!strokes.is_empty(), "{} has no strokes", kind.label());
        for stroke in &strokes {
            assert!(stroke.len() >= 2);
            for pt in stroke {
                assert!(pt.x.abs() <= 10.0 + 1e-9 && pt.y.abs() <= 10.0 + 1e-9, "{} point {pt:?} outside the icon box", kind.label());
            }
        }
    }
}

#[test]
fn icon_outline_shapes() {
    // Cpu: two closed nested squares
    let cpu = icon_outline(IconKind::Cpu);
    assert_eq!(cpu.len(), 2);
    for sq in &cpu {
        assert_eq!(sq.first(), sq.last());
    }
    assert_eq!(cpu[0][0], NVec2::new(-8.0, -8.0));
    assert_eq!(cpu[1][0], NVec2::new(-4.0, -4.0));

    // Brain: closed ellipse with half-axes 10 x 8
    let brain = &icon_outline(IconKind::Brain)[0];
    assert_abs_diff_eq!(brain[0].x, 10.0, epsilon = 1e-12);
    let top = brain.iter().map(|p| p.y.abs()).fold(0.0, f64::max);
    assert_abs_diff_eq!(top, 8.0, epsilon = 1e-9);
    assert!((brain[0] - brain[brain.len() - 1]).norm() < 1e-9);

    // Database: two stacked ellipses joined by a side line
    let db = icon_outline(IconKind::Database);
    assert_eq!(db.len(), 3);
    assert_eq!(db[1], vec![NVec2::new(-8.0, -6.0), NVec2::new(-8.0, 6.0)]);

    // Network: circle plus a closed triangle
    let net = icon_outline(IconKind::Network);
    assert_eq!(net.len(), 2);
    assert_eq!(net[1].len(), 4);
    assert_eq!(net[1].first(), net[1].last());
}
