use bevy::prelude::*;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::window::PrimaryWindow;

use crate::flow::diagram::{FlowDiagram, NodeKind};
use crate::flow::viewport::Viewport;
use crate::simulation::states::NVec2;
use super::viewer_plugins;

/// Text label following a node
#[derive(Component)]
struct NodeLabel(pub String);

/// What the left mouse button is currently dragging
#[derive(Resource, Default)]
enum Drag {
    #[default]
    Idle,
    Node { id: String, grab: NVec2 }, // grab: cursor minus node corner, diagram units
    Pan,
}

/// First endpoint of a right-click connection
#[derive(Resource, Default)]
struct PendingSource(Option<String>);

const INPUT_COLOR: Color = Color::srgb(0.58, 0.77, 0.99);
const PROCESS_COLOR: Color = Color::srgb(0.53, 0.94, 0.67);
const OUTPUT_COLOR: Color = Color::srgb(0.99, 0.64, 0.69);
const EDGE_IN_COLOR: Color = Color::srgb(0.58, 0.77, 0.99);
const EDGE_OUT_COLOR: Color = Color::srgb(0.53, 0.94, 0.67);
const PENDING_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
const ZOOM_STEP: f64 = 1.1; // per wheel notch

/// Controls: left drag a node to move it (snaps to the grid), left drag the
/// background to pan, wheel to zoom, right-click two nodes to connect them
pub fn run_flow(diagram: FlowDiagram, viewport: Viewport, width: f64, height: f64) {
    log::info!("run_flow: starting Bevy 2D viewer with {} nodes and {} edges", diagram.nodes().len(), diagram.edges().len());

    App::new()
        .insert_resource(diagram)
        .insert_resource(viewport)
        .init_resource::<Drag>()
        .init_resource::<PendingSource>()
        .insert_resource(ClearColor(Color::srgb(0.97, 0.97, 0.97)))
        .add_plugins(viewer_plugins("Flow", width, height))
        .add_systems(Startup, setup_flow)
        .add_systems(Update, (mouse_system, sync_labels_system, draw_flow_system).chain())
        .run();
}

fn setup_flow(mut commands: Commands, diagram: Res<FlowDiagram>, mut viewport: ResMut<Viewport>) {
    commands.spawn(Camera2dBundle::default());

    // Center the layout: put the middle of the node bounding box on screen center
    let (mut lo, mut hi) = (NVec2::repeat(f64::MAX), NVec2::repeat(f64::MIN));
    for n in diagram.nodes() {
        lo = lo.inf(&n.position);
        hi = hi.sup(&(n.position + n.kind.size()));
    }
    if !diagram.nodes().is_empty() {
        viewport.offset = -0.5 * (lo + hi) * viewport.zoom();
    }

    for n in diagram.nodes() {
        commands.spawn((
            Text2dBundle {
                text: Text::from_section(n.label.clone(), TextStyle {
                    font_size: 14.0,
                    color: Color::BLACK,
                    ..Default::default()
                }),
                ..Default::default()
            },
            NodeLabel(n.id.clone()),
        ));
    }
}

/// Screen frame used by `Viewport`: origin at window center, y down
fn cursor_screen(window: &Window) -> Option<NVec2> {
    let c = window.cursor_position()?;
    Some(NVec2::new((c.x - 0.5 * window.width()) as f64, (c.y - 0.5 * window.height()) as f64))
}

/// Diagram point → Bevy world (y up)
fn to_world(viewport: &Viewport, p: NVec2) -> Vec2 {
    let s = viewport.to_screen(p);
    Vec2::new(s.x as f32, -s.y as f32)
}

#[allow(clippy::too_many_arguments)]
fn mouse_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut diagram: ResMut<FlowDiagram>,
    mut viewport: ResMut<Viewport>,
    mut drag: ResMut<Drag>,
    mut pending: ResMut<PendingSource>,
) {
    let delta: Vec2 = motion.read().map(|ev| ev.delta).sum();
    let scroll: f32 = wheel.read().map(|ev| ev.y).sum();
    let Some(cursor) = windows.get_single().ok().and_then(cursor_screen) else {
        return;
    };
    let at = viewport.to_diagram(cursor);

    if scroll != 0.0 {
        viewport.zoom_by(ZOOM_STEP.powf(scroll as f64), cursor);
    }

    if buttons.just_pressed(MouseButton::Left) {
        *drag = match diagram.node_at(&at) {
            Some(n) => Drag::Node { id: n.id.clone(), grab: at - n.position },
            None => Drag::Pan,
        };
    }
    if buttons.just_released(MouseButton::Left) {
        *drag = Drag::Idle;
    }
    if buttons.pressed(MouseButton::Left) {
        match &*drag {
            Drag::Node { id, grab } => {
                if let Err(e) = diagram.move_node(id, at - grab) {
                    log::warn!("{e}");
                }
            }
            Drag::Pan => viewport.pan(NVec2::new(delta.x as f64, delta.y as f64)),
            Drag::Idle => {}
        }
    }

    if buttons.just_pressed(MouseButton::Right) {
        let hit = diagram.node_at(&at).map(|n| n.id.clone());
        match (pending.0.take(), hit) {
            (None, Some(id)) => pending.0 = Some(id),
            (Some(source), Some(target)) => match diagram.connect(&source, &target) {
                Ok(edge) => log::info!("edge {}: {} -> {}", edge.id, edge.source, edge.target),
                Err(e) => log::warn!("{e}"),
            },
            // right-click on empty space cancels
            (_, None) => {}
        }
    }
}

fn sync_labels_system(diagram: Res<FlowDiagram>, viewport: Res<Viewport>, mut query: Query<(&NodeLabel, &mut Transform)>) {
    for (NodeLabel(id), mut transform) in &mut query {
        if let Some(n) = diagram.node(id) {
            transform.translation = to_world(&viewport, n.center()).extend(1.0);
            transform.scale = Vec3::splat(viewport.zoom() as f32);
        }
    }
}

fn draw_flow_system(mut gizmos: Gizmos, diagram: Res<FlowDiagram>, viewport: Res<Viewport>, pending: Res<PendingSource>) {
    let zoom = viewport.zoom() as f32;

    for edge in diagram.edges() {
        let Some((a, b)) = diagram.edge_endpoints(&edge.id) else {
            continue;
        };
        let into_process = diagram.node(&edge.target).is_some_and(|n| n.kind == NodeKind::Process);
        let color = if into_process { EDGE_IN_COLOR } else { EDGE_OUT_COLOR };
        gizmos.line_2d(to_world(&viewport, a), to_world(&viewport, b), color);
    }

    for n in diagram.nodes() {
        let center = to_world(&viewport, n.center());
        let size = n.kind.size();
        let color = if pending.0.as_deref() == Some(n.id.as_str()) {
            PENDING_COLOR
        } else {
            match n.kind {
                NodeKind::Input => INPUT_COLOR,
                NodeKind::Process => PROCESS_COLOR,
                NodeKind::Output => OUTPUT_COLOR,
            }
        };

        match n.kind {
            NodeKind::Process => {
                gizmos.circle_2d(center, 0.5 * size.x as f32 * zoom, color);
            }
            _ => {
                gizmos.rect_2d(center, 0.0, Vec2::new(size.x as f32, size.y as f32) * zoom, color);
            }
        }
    }
}
