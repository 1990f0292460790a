pub mod bubble_vis2d;
pub mod graph_vis3d;
pub mod flow_vis2d;
pub mod icons;

use bevy::app::PluginGroupBuilder;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::simulation::states::{Hsl, NVec3};

/// Default plugins with one titled window. Bevy's `LogPlugin` is left out so
/// `log` records keep going to the logger the binary installed
pub(crate) fn viewer_plugins(title: &str, width: f64, height: f64) -> PluginGroupBuilder {
    DefaultPlugins
        .build()
        .disable::<LogPlugin>()
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: title.to_string(),
                resolution: (width.max(1.0) as f32, height.max(1.0) as f32).into(),
                ..Default::default()
            }),
            ..Default::default()
        })
}

pub(crate) fn hsl_color(c: &Hsl) -> Color {
    let [r, g, b] = c.to_rgb();
    Color::srgb(r as f32, g as f32, b as f32)
}

pub(crate) fn to_vec3(p: &NVec3) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}
