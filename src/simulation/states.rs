//! Core state types for the bubble simulation.
//!
//! Defines the circular `Body` and the `World` that holds the bodies together
//! with the size of the drawing surface they bounce around in.
//!
//! Coordinates are surface pixels with the origin in the top-left corner and
//! `y` pointing down, so gravity is a positive `vy` increment.

use std::ops::Range;

use nalgebra::{Vector2, Vector3};
use rand::Rng;

pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

/// Hue/saturation/lightness color, hue in degrees `[0, 360)`,
/// saturation and lightness in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const BLACK: Hsl = Hsl { h: 0.0, s: 0.0, l: 0.0 };

    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Random hue with saturation and lightness drawn from the given ranges
    pub fn random<R: Rng + ?Sized>(rng: &mut R, s: Range<f64>, l: Range<f64>) -> Self {
        let h = rng.random::<f64>() * 360.0;
        let s = s.start + rng.random::<f64>() * (s.end - s.start);
        let l = l.start + rng.random::<f64>() * (l.end - l.start);
        Self::new(h, s, l)
    }

    /// Convert to sRGB components in `[0, 1]`
    pub fn to_rgb(&self) -> [f64; 3] {
        let c = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let hp = self.h / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = self.l - c / 2.0;
        [r + m, g + m, b + m]
    }
}

/// Pictogram drawn inside a bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Brain,
    Cpu,
    Database,
    Network,
}

impl IconKind {
    pub const ALL: [IconKind; 4] = [IconKind::Brain, IconKind::Cpu, IconKind::Database, IconKind::Network];

    pub fn label(&self) -> &'static str {
        match self {
            IconKind::Brain => "Brain",
            IconKind::Cpu => "Cpu",
            IconKind::Database => "Database",
            IconKind::Network => "Network",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity, pixels per frame
    pub radius: f64, // radius
    pub color: Hsl, // fill
    pub icon: IconKind, // pictogram kind
    pub icon_color: Hsl, // pictogram stroke
    pub score: Option<u32>, // optional percentage label
}

impl Body {
    /// A plain body with no label, used by tests and benchmarks
    pub fn at(x: NVec2, v: NVec2, radius: f64) -> Self {
        Self {
            x,
            v,
            radius,
            color: Hsl::BLACK,
            icon: IconKind::Brain,
            icon_color: Hsl::BLACK,
            score: None,
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.v.norm_squared()
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub bodies: Vec<Body>, // collection of bodies
    pub width: f64, // surface width
    pub height: f64, // surface height
    pub frame: u64, // frames stepped so far
}

impl World {
    pub fn new(bodies: Vec<Body>, width: f64, height: f64) -> Self {
        Self {
            bodies,
            width,
            height,
            frame: 0,
        }
    }

    /// Sum of per-body kinetic energy, all bodies have unit mass
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}
