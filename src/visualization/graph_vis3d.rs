use bevy::prelude::*;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::math::primitives::Sphere;

use crate::graph::editor::CausalGraph;
use crate::graph::points::PointId;
use crate::graph::selection::{Selection, ViewToggles};
use super::{hsl_color, to_vec3, viewer_plugins};

/// Component tagging each marker sphere with the point it stands for
#[derive(Component)]
struct PointMarker(pub PointId);

/// Orbit-style camera rig looking at the origin
#[derive(Component)]
struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
}

#[derive(Resource)]
struct MarkerMesh(Handle<Mesh>);

/// Samples per rendered curve and the size of a fresh lattice on regenerate
#[derive(Resource, Clone, Copy)]
pub struct GraphStyle {
    pub curve_samples: usize,
    pub lattice_points: usize,
}

const CAMERA_DISTANCE: f32 = 15.0;
const MARKER_RADIUS: f32 = 0.1;
const ORBIT_SPEED: f32 = 0.005; // radians per pixel of mouse motion
const PENDING_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
const HOVER_CURVE_COLOR: Color = Color::WHITE;

/// Controls:
/// - left drag: orbit, wheel: zoom
/// - Tab / Q: hover next point / curve
/// - Space: pick the hovered point as a curve endpoint (two picks make a curve)
/// - N: add a random point, Delete: delete hovered point, Backspace: delete hovered curve
/// - 1 / 2 / 3: toggle axes / points / curves, R: regenerate the lattice
pub fn run_graph(graph: CausalGraph, toggles: ViewToggles, style: GraphStyle, width: f64, height: f64) {
    log::info!("run_graph: starting Bevy 3D viewer with {} points and {} curves", graph.points().len(), graph.curves().len());

    App::new()
        .insert_resource(graph)
        .insert_resource(toggles)
        .insert_resource(style)
        .insert_resource(Selection::default())
        .insert_resource(ClearColor(Color::srgb(0.0, 0.0, 0.0)))
        .add_plugins(viewer_plugins("Causal graph", width, height))
        .add_systems(Startup, setup_3d)
        .add_systems(Update, (orbit_camera_system, edit_keys_system, rebuild_markers_system, sync_markers_system, draw_scene_system).chain())
        .run();
}

/// Startup system: spawn camera, light, and the shared marker mesh
fn setup_3d(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
            ..Default::default()
        },
        OrbitCamera {
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_DISTANCE,
        },
    ));

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 2_000_000.0,
            range: 100.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(10.0, 10.0, 10.0),
        ..Default::default()
    });

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    commands.insert_resource(MarkerMesh(meshes.add(Sphere::new(MARKER_RADIUS).mesh())));
}

fn orbit_camera_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut query: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let delta: Vec2 = motion.read().map(|ev| ev.delta).sum();
    let scroll: f32 = wheel.read().map(|ev| ev.y).sum();

    for (mut orbit, mut transform) in &mut query {
        if buttons.pressed(MouseButton::Left) {
            orbit.yaw -= delta.x * ORBIT_SPEED;
            // stop short of the poles so look_at keeps a valid up vector
            orbit.pitch = (orbit.pitch - delta.y * ORBIT_SPEED).clamp(-1.5, 1.5);
        }
        if scroll != 0.0 {
            orbit.distance = (orbit.distance * (1.0 - 0.1 * scroll)).clamp(2.0, 100.0);
        }

        let rotation = Quat::from_euler(EulerRot::YXZ, orbit.yaw, orbit.pitch, 0.0);
        transform.translation = rotation * Vec3::new(0.0, 0.0, orbit.distance);
        transform.look_at(Vec3::ZERO, Vec3::Y);
    }
}

/// Step through `ids` after `current`, wrapping around
fn next_after<T: Copy + PartialEq>(ids: &[T], current: Option<T>) -> Option<T> {
    let idx = current.and_then(|c| ids.iter().position(|id| *id == c));
    match idx {
        Some(i) => ids.get((i + 1) % ids.len()).copied(),
        None => ids.first().copied(),
    }
}

fn edit_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    style: Res<GraphStyle>,
    mut graph: ResMut<CausalGraph>,
    mut selection: ResMut<Selection>,
    mut toggles: ResMut<ViewToggles>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let ids: Vec<PointId> = graph.points().iter().map(|p| p.id).collect();
        selection.hovered_point = next_after(&ids, selection.hovered_point);
        if let Some(p) = selection.hovered_point.and_then(|id| graph.point(id)) {
            log::info!("point {}: {}", p.id, p.title);
        }
    }
    if keys.just_pressed(KeyCode::KeyQ) {
        let ids: Vec<_> = graph.curves().iter().map(|c| c.id).collect();
        selection.hovered_curve = next_after(&ids, selection.hovered_curve);
        if let Some(c) = selection.hovered_curve.and_then(|id| graph.curve(id)) {
            let at = graph.curve_label_anchor(c.id).unwrap_or_default();
            log::info!("curve {}: {} ({} -> {}) near ({:.2}, {:.2}, {:.2})", c.id, c.title, c.start, c.end, at.x, at.y, at.z);
        }
    }

    if keys.just_pressed(KeyCode::Space) {
        if let Some(id) = selection.hovered_point {
            match selection.click_point(&mut graph, id) {
                Ok(Some(curve)) => log::info!("added curve {curve}"),
                Ok(None) => {}
                Err(e) => log::warn!("{e}"),
            }
        }
    }
    if keys.just_pressed(KeyCode::KeyN) {
        let id = graph.add_point(None);
        log::info!("added point {id}");
    }
    if keys.just_pressed(KeyCode::Delete) {
        if let Some(id) = selection.hovered_point.take() {
            if let Err(e) = graph.delete_point(id) {
                log::warn!("{e}");
            }
        }
    }
    if keys.just_pressed(KeyCode::Backspace) {
        if let Some(id) = selection.hovered_curve.take() {
            if let Err(e) = graph.delete_curve(id) {
                log::warn!("{e}");
            }
        }
    }
    if keys.just_pressed(KeyCode::KeyR) {
        graph.regenerate(style.lattice_points);
        selection.clear();
    }

    if keys.just_pressed(KeyCode::Digit1) {
        toggles.axes = !toggles.axes;
    }
    if keys.just_pressed(KeyCode::Digit2) {
        toggles.points = !toggles.points;
    }
    if keys.just_pressed(KeyCode::Digit3) {
        toggles.curves = !toggles.curves;
    }

    selection.prune(&graph);
}

/// Respawn the marker spheres whenever the graph or the point toggle changed
fn rebuild_markers_system(
    mut commands: Commands,
    graph: Res<CausalGraph>,
    toggles: Res<ViewToggles>,
    mesh: Res<MarkerMesh>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    markers: Query<Entity, With<PointMarker>>,
    mut seen: Local<Option<(u64, bool)>>,
) {
    let state = (graph.revision(), toggles.points);
    if *seen == Some(state) {
        return;
    }
    *seen = Some(state);

    for e in &markers {
        commands.entity(e).despawn();
    }
    if !toggles.points {
        return;
    }

    for p in graph.points() {
        commands.spawn((
            PbrBundle {
                mesh: mesh.0.clone(),
                material: materials.add(StandardMaterial {
                    base_color: hsl_color(&p.color),
                    metallic: 0.1,
                    perceptual_roughness: 0.5,
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_vec3(&p.position)),
                ..Default::default()
            },
            PointMarker(p.id),
        ));
    }
}

/// Pending endpoints turn yellow, the hovered point is drawn larger
fn sync_markers_system(
    graph: Res<CausalGraph>,
    selection: Res<Selection>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&PointMarker, &mut Transform, &Handle<StandardMaterial>)>,
) {
    for (PointMarker(id), mut transform, handle) in &mut query {
        let Some(p) = graph.point(*id) else {
            continue;
        };
        transform.scale = Vec3::splat(if selection.hovered_point == Some(*id) { 1.8 } else { 1.0 });

        if let Some(mat) = materials.get_mut(handle) {
            mat.base_color = if selection.is_pending(*id) { PENDING_COLOR } else { hsl_color(&p.color) };
        }
    }
}

fn draw_scene_system(mut gizmos: Gizmos, graph: Res<CausalGraph>, selection: Res<Selection>, toggles: Res<ViewToggles>, style: Res<GraphStyle>) {
    let r = graph.sphere_radius() as f32;

    if toggles.axes {
        gizmos.line(Vec3::new(-r, 0.0, 0.0), Vec3::new(r, 0.0, 0.0), Color::srgb(1.0, 0.0, 0.0));
        gizmos.line(Vec3::new(0.0, -r, 0.0), Vec3::new(0.0, r, 0.0), Color::srgb(0.0, 1.0, 0.0));
        gizmos.line(Vec3::new(0.0, 0.0, -r), Vec3::new(0.0, 0.0, r), Color::srgb(0.0, 0.0, 1.0));
    }

    if !toggles.curves {
        return;
    }
    for curve in graph.curves() {
        let Some(path) = graph.curve_path(curve.id, style.curve_samples) else {
            continue;
        };
        let color = if selection.hovered_curve == Some(curve.id) { HOVER_CURVE_COLOR } else { hsl_color(&curve.color) };
        gizmos.linestrip(path.iter().map(to_vec3), color);
    }
}
