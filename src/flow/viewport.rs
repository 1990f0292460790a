//! Pan/zoom state of the flow diagram view

use bevy::prelude::Resource;

use crate::configuration::config::FlowConfig;
use crate::simulation::states::NVec2;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Viewport {
    pub offset: NVec2, // screen position of the diagram origin
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    pub fn new(cfg: &FlowConfig) -> Self {
        Self {
            offset: NVec2::zeros(),
            zoom: clamp_zoom(1.0, cfg.min_zoom, cfg.max_zoom),
            min_zoom: cfg.min_zoom,
            max_zoom: cfg.max_zoom,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Multiply the zoom by `factor`, keeping the diagram point under `anchor` fixed
    pub fn zoom_by(&mut self, factor: f64, anchor: NVec2) -> f64 {
        let before = self.to_diagram(anchor);
        self.zoom = clamp_zoom(self.zoom * factor, self.min_zoom, self.max_zoom);
        self.offset = anchor - before * self.zoom;
        self.zoom
    }

    pub fn pan(&mut self, delta: NVec2) {
        self.offset += delta;
    }

    pub fn to_diagram(&self, screen: NVec2) -> NVec2 {
        (screen - self.offset) / self.zoom
    }

    pub fn to_screen(&self, diagram: NVec2) -> NVec2 {
        diagram * self.zoom + self.offset
    }
}

/// Like `f64::clamp` but total: an inverted range resolves to `max`, a NaN
/// bound is ignored, and anything that is not a positive finite scale becomes 1
fn clamp_zoom(zoom: f64, min: f64, max: f64) -> f64 {
    let z = zoom.max(min).min(max);
    if z.is_finite() && z > 0.0 { z } else { 1.0 }
}
