//! Build a fully-initialized bubble session from configuration
//!
//! Takes a `BubbleConfig` and `SurfaceConfig` (YAML-facing) and produces the
//! runtime bundle `BubbleScenario` containing:
//! - physical parameters (`Parameters`)
//! - world state (`World` with bodies at frame 0)
//! - label visibility toggles
//!
//! The scenario is inserted into Bevy as a `Resource` and stepped once per
//! frame by the viewer, or driven directly in headless runs and tests

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BubbleConfig, SurfaceConfig};
use crate::simulation::engine::{step_world, StepReport};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Hsl, IconKind, NVec2, World};

/// Bevy resource holding one bubble session
///
/// Lifecycle: [`BubbleScenario::build_scenario`] → [`BubbleScenario::step`]
/// once per frame (with [`BubbleScenario::resize`] whenever the window
/// changes) → [`BubbleScenario::dispose`]
#[derive(Resource, Debug, Clone)]
pub struct BubbleScenario {
    pub parameters: Parameters,
    pub world: World,
    pub show_icons: bool,
    pub show_scores: bool,
    disposed: bool,
}

impl BubbleScenario {
    pub fn build_scenario(cfg: &BubbleConfig, surface: &SurfaceConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        // One bright stroke color per icon kind, shared by every bubble of that kind
        let icon_colors: Vec<Hsl> = IconKind::ALL
            .iter()
            .map(|_| Hsl::random(&mut rng, 0.8..1.0, 0.5..0.7))
            .collect();

        let (w, h) = (surface.width, surface.height);
        let bodies: Vec<Body> = (0..cfg.count).map(|_| {
            let radius = cfg.radius_min + rng.random::<f64>() * (cfg.radius_max - cfg.radius_min);
            let icon_idx = rng.random_range(0..IconKind::ALL.len());

            // Place fully inside the surface: x in [r, w - r)
            let x = NVec2::new(
                rng.random::<f64>() * (w - 2.0 * radius) + radius,
                rng.random::<f64>() * (h - 2.0 * radius) + radius,
            );
            let v = NVec2::new(
                (rng.random::<f64>() - 0.5) * cfg.speed,
                (rng.random::<f64>() - 0.5) * cfg.speed,
            );
            let score = if rng.random::<f64>() < cfg.score_chance {
                Some(rng.random_range(0..100))
            } else {
                None
            };

            Body {
                x,
                v,
                radius,
                color: Hsl::BLACK,
                icon: IconKind::ALL[icon_idx],
                icon_color: icon_colors[icon_idx],
                score,
            }
        }).collect();

        // Parameters (runtime) from BubbleConfig
        let parameters = Parameters {
            gravity: cfg.gravity,
            damping: cfg.damping,
            restitution: cfg.restitution,
            pair_restitution: cfg.pair_restitution,
            slop: cfg.slop,
            ..Default::default()
        };

        log::debug!("bubble scenario: {} bodies on a {w}x{h} surface (seed {})", bodies.len(), cfg.seed);

        Self {
            parameters,
            world: World::new(bodies, w, h),
            show_icons: cfg.show_icons,
            show_scores: cfg.show_scores,
            disposed: false,
        }
    }

    /// Wrap an already-built world, used by tests and benchmarks
    pub fn from_world(world: World, parameters: Parameters) -> Self {
        Self {
            parameters,
            world,
            show_icons: false,
            show_scores: false,
            disposed: false,
        }
    }

    /// Advance one frame. Returns `None` when there is nothing to step:
    /// the session was disposed or the surface has no area
    pub fn step(&mut self) -> Option<StepReport> {
        if self.disposed || self.world.width <= 0.0 || self.world.height <= 0.0 {
            return None;
        }
        Some(step_world(&mut self.world, &self.parameters))
    }

    /// Change the surface size; bodies left outside are pulled back in by the next step
    pub fn resize(&mut self, width: f64, height: f64) {
        log::trace!("bubble surface resized to {width}x{height}");
        self.world.width = width.max(0.0);
        self.world.height = height.max(0.0);
    }

    /// Drop every body; later steps are no-ops
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::debug!("bubble scenario disposed after {} frames", self.world.frame);
        self.world.bodies.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
