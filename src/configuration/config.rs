//! Configuration types for loading demo scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`DemoKind`]      – which demo the binary opens
//! - [`SurfaceConfig`] – initial size of the drawing surface
//! - [`BubbleConfig`]  – bubble count, size/speed ranges and physical constants
//! - [`GraphConfig`]   – sphere radius, lattice size and curve styling
//! - [`FlowConfig`]    – grid snapping and zoom limits of the flow diagram
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so a file only needs to name what it changes.
//!
//! # YAML format
//!
//! ```yaml
//! demo: bubble              # bubble | graph | flow
//!
//! surface:
//!   width: 1280.0
//!   height: 720.0
//!
//! bubble:
//!   count: 16
//!   radius_min: 40.0
//!   radius_max: 70.0
//!   speed: 0.8              # velocity components drawn from [-speed/2, speed/2)
//!   gravity: 0.1
//!   damping: 0.99
//!   restitution: 0.7
//!   slop: 1.02
//!   seed: 42
//!
//! graph:
//!   sphere_radius: 5.0
//!   initial_points: 30
//!   neighbors: 3
//!   curvature: 0.3
//!
//! flow:
//!   snap_grid: 20.0
//! ```

use serde::Deserialize;

use crate::error::DemoError;

/// Which demo to open
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    #[default]
    Bubble, // 2D bubble physics
    Graph, // 3D sphere point/curve graph
    Flow, // node-link flow diagram
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f64, // pixels
    pub height: f64, // pixels
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Bubble demo settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BubbleConfig {
    pub count: usize, // number of bubbles
    pub radius_min: f64, // smallest radius, inclusive
    pub radius_max: f64, // largest radius, exclusive
    pub speed: f64, // width of the initial velocity range per component
    pub gravity: f64, // vy increment per frame
    pub damping: f64, // per-frame velocity multiplier
    pub restitution: f64, // wall bounce
    pub pair_restitution: f64, // bubble-bubble bounce, 1.0 is a clean swap
    pub slop: f64, // contact distance factor on r1 + r2
    pub score_chance: f64, // probability that a bubble carries a score label
    pub show_icons: bool, // draw icon labels
    pub show_scores: bool, // draw score labels
    pub seed: u64, // deterministic seed
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            count: 16,
            radius_min: 40.0,
            radius_max: 70.0,
            speed: 0.8,
            gravity: 0.1,
            damping: 0.99,
            restitution: 0.7,
            pair_restitution: 1.0,
            slop: 1.02,
            score_chance: 0.5,
            show_icons: true,
            show_scores: true,
            seed: 42,
        }
    }
}

/// Sphere graph settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GraphConfig {
    pub sphere_radius: f64, // radius every point is projected onto
    pub initial_points: usize, // size of the initial Fibonacci lattice
    pub neighbors: usize, // nearest points a new point is connected to
    pub curvature: f64, // control point offset as a fraction of the radius
    pub curve_segments: usize, // samples per rendered curve
    pub seed: u64, // deterministic seed
    pub show_axes: bool,
    pub show_points: bool,
    pub show_curves: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 5.0,
            initial_points: 30,
            neighbors: 3,
            curvature: 0.3,
            curve_segments: 100,
            seed: 7,
            show_axes: true,
            show_points: true,
            show_curves: true,
        }
    }
}

/// Flow diagram settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FlowConfig {
    pub snap_to_grid: bool,
    pub snap_grid: f64, // grid pitch in diagram units
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            snap_grid: 20.0,
            min_zoom: 0.2,
            max_zoom: 4.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub demo: DemoKind, // which demo to open
    pub surface: SurfaceConfig, // initial drawing surface
    pub bubble: BubbleConfig,
    pub graph: GraphConfig,
    pub flow: FlowConfig,
}

impl ScenarioConfig {
    /// Reject values the simulations cannot run with
    pub fn validate(&self) -> Result<(), DemoError> {
        let bad = |msg: String| Err(DemoError::InvalidConfig(msg));

        if !(self.surface.width >= 0.0 && self.surface.height >= 0.0) {
            return bad(format!("surface size must be non-negative, got {}x{}", self.surface.width, self.surface.height));
        }

        let b = &self.bubble;
        if !(b.radius_min > 0.0 && b.radius_min <= b.radius_max) {
            return bad(format!("bubble radius range [{}, {}) is empty or non-positive", b.radius_min, b.radius_max));
        }
        if !(0.0..=1.0).contains(&b.damping) {
            return bad(format!("bubble damping {} outside [0, 1]", b.damping));
        }
        if !(0.0..=1.0).contains(&b.restitution) || !(0.0..=1.0).contains(&b.pair_restitution) {
            return bad("restitution must be within [0, 1]".to_string());
        }
        if b.slop < 1.0 {
            return bad(format!("bubble slop {} would let bubbles overlap", b.slop));
        }
        if !(0.0..=1.0).contains(&b.score_chance) {
            return bad(format!("score_chance {} outside [0, 1]", b.score_chance));
        }

        let g = &self.graph;
        if g.sphere_radius <= 0.0 {
            return bad(format!("sphere radius must be positive, got {}", g.sphere_radius));
        }
        if g.curve_segments < 2 {
            return bad("a curve needs at least 2 samples".to_string());
        }

        let f = &self.flow;
        if f.snap_grid <= 0.0 {
            return bad(format!("snap grid must be positive, got {}", f.snap_grid));
        }
        if !(f.min_zoom > 0.0 && f.min_zoom <= f.max_zoom) {
            return bad(format!("zoom range [{}, {}] is invalid", f.min_zoom, f.max_zoom));
        }

        Ok(())
    }
}
