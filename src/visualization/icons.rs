//! Stroke outlines of the bubble pictograms
//!
//! Each icon is a list of polylines in surface pixels (y down) around the
//! icon origin. Closed shapes repeat their first vertex at the end.

use std::f64::consts::TAU;

use crate::simulation::states::{IconKind, NVec2};

/// Vertical offset of the icon origin from the bubble center (above it)
pub const ICON_OFFSET: f64 = -10.0;

const ELLIPSE_SEGMENTS: usize = 24;

fn ellipse(center: NVec2, half: NVec2) -> Vec<NVec2> {
    (0..=ELLIPSE_SEGMENTS)
        .map(|i| {
            let t = TAU * i as f64 / ELLIPSE_SEGMENTS as f64;
            center + NVec2::new(half.x * t.cos(), half.y * t.sin())
        })
        .collect()
}

fn square(half: f64) -> Vec<NVec2> {
    vec![
        NVec2::new(-half, -half),
        NVec2::new(half, -half),
        NVec2::new(half, half),
        NVec2::new(-half, half),
        NVec2::new(-half, -half),
    ]
}

pub fn icon_outline(kind: IconKind) -> Vec<Vec<NVec2>> {
    match kind {
        IconKind::Brain => vec![ellipse(NVec2::zeros(), NVec2::new(10.0, 8.0))],
        IconKind::Cpu => vec![square(8.0), square(4.0)],
        IconKind::Database => vec![
            ellipse(NVec2::new(0.0, -6.0), NVec2::new(8.0, 4.0)),
            vec![NVec2::new(-8.0, -6.0), NVec2::new(-8.0, 6.0)],
            ellipse(NVec2::new(0.0, 6.0), NVec2::new(8.0, 4.0)),
        ],
        IconKind::Network => vec![
            ellipse(NVec2::zeros(), NVec2::new(8.0, 8.0)),
            vec![NVec2::new(0.0, -8.0), NVec2::new(8.0, 8.0), NVec2::new(-8.0, 8.0), NVec2::new(0.0, -8.0)],
        ],
    }
}
