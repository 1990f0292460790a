use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::WindowResized;

use crate::simulation::scenario::BubbleScenario;
use crate::simulation::states::NVec2;
use super::icons::{icon_outline, ICON_OFFSET};
use super::{hsl_color, viewer_plugins};

#[derive(Component)]
struct BodyIndex(pub usize);

const RIM_COLOR: Color = Color::srgb(0.47, 0.47, 0.47);
const LOG_EVERY: u64 = 600; // frames between energy reports

pub fn run_bubbles(scenario: BubbleScenario) {
    log::info!("run_bubbles: starting Bevy 2D viewer with {} bubbles", scenario.world.bodies.len());

    let (w, h) = (scenario.world.width, scenario.world.height);
    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.03)))
        .add_plugins(viewer_plugins("Bubbles", w, h))
        .add_systems(Startup, setup_bubbles_system)
        .add_systems(Update, (resize_system, physics_step_system, sync_transforms_system, draw_icons_system).chain())
        .add_systems(Last, dispose_on_exit_system)
        .run();
}

fn setup_bubbles_system(mut commands: Commands, scenario: Res<BubbleScenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let rim = materials.add(ColorMaterial::from(RIM_COLOR));

    for (i, body) in scenario.world.bodies.iter().enumerate() {
        let r = body.radius as f32;

        // Rim circle carries the index, the fill and labels ride along as children
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(r))),
                material: rim.clone(),
                ..Default::default()
            },
            BodyIndex(i),
        )).with_children(|parent| {
            parent.spawn(MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(r - 1.0))),
                material: materials.add(ColorMaterial::from(hsl_color(&body.color))),
                transform: Transform::from_xyz(0.0, 0.0, 0.1),
                ..Default::default()
            });

            if scenario.show_icons {
                parent.spawn(Text2dBundle {
                    text: Text::from_section(body.icon.label(), TextStyle {
                        font_size: 14.0,
                        color: hsl_color(&body.icon_color),
                        ..Default::default()
                    }),
                    transform: Transform::from_xyz(0.0, -15.0, 0.2),
                    ..Default::default()
                });
            }

            if let (true, Some(score)) = (scenario.show_scores, body.score) {
                parent.spawn(Text2dBundle {
                    text: Text::from_section(format!("{score}%"), TextStyle {
                        font_size: 16.0,
                        color: Color::WHITE,
                        ..Default::default()
                    }),
                    transform: Transform::from_xyz(0.0, -35.0, 0.2),
                    ..Default::default()
                });
            }
        });
    }
}

fn resize_system(mut events: EventReader<WindowResized>, mut scenario: ResMut<BubbleScenario>) {
    for ev in events.read() {
        scenario.resize(ev.width as f64, ev.height as f64);
    }
}

fn physics_step_system(mut scenario: ResMut<BubbleScenario>) {
    if let Some(report) = scenario.step() {
        if report.frame % LOG_EVERY == 0 {
            log::debug!(
                "frame {}: kinetic energy {:.3}, {} wall / {} pair contacts",
                report.frame, report.kinetic_energy, report.wall_contacts, report.pair_contacts
            );
        }
    }
}

/// Surface coordinates (origin top-left, y down) → Bevy world (origin center, y up)
fn sync_transforms_system(scenario: Res<BubbleScenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let half_w = (scenario.world.width * 0.5) as f32;
    let half_h = (scenario.world.height * 0.5) as f32;

    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.world.bodies.get(*i) {
            transform.translation.x = b.x.x as f32 - half_w;
            transform.translation.y = half_h - b.x.y as f32;
        }
    }
}

/// Icon pictograms are stroked with gizmos every frame, above the bubble center
fn draw_icons_system(mut gizmos: Gizmos, scenario: Res<BubbleScenario>) {
    if !scenario.show_icons {
        return;
    }
    let half_w = scenario.world.width * 0.5;
    let half_h = scenario.world.height * 0.5;

    for b in &scenario.world.bodies {
        let origin = b.x + NVec2::new(0.0, ICON_OFFSET);
        let color = hsl_color(&b.icon_color);
        for stroke in icon_outline(b.icon) {
            let points = stroke.iter().map(|p| {
                let s = origin + p;
                Vec2::new((s.x - half_w) as f32, (half_h - s.y) as f32)
            });
            gizmos.linestrip_2d(points, color);
        }
    }
}

fn dispose_on_exit_system(mut exits: EventReader<AppExit>, mut scenario: ResMut<BubbleScenario>) {
    if exits.read().next().is_some() {
        scenario.dispose();
    }
}
