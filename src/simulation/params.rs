//! Numerical and physical parameters for the bubble simulation
//!
//! `Parameters` holds per-frame settings:
//! - gravity and damping applied during integration,
//! - wall and pair restitution,
//! - the contact slop ratio used by the pair pass,
//! - the distance below which a contact normal is considered degenerate

#[derive(Debug, Clone)]
pub struct Parameters {
    pub gravity: f64, // vy increment per frame
    pub damping: f64, // velocity multiplier per frame
    pub restitution: f64, // fraction of velocity kept on a wall bounce
    pub pair_restitution: f64, // fraction of exchanged normal velocity kept on a pair bounce
    pub slop: f64, // contact distance = (r1 + r2) * slop
    pub min_separation: f64, // below this, the fallback normal is used
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: 0.1,
            damping: 0.99,
            restitution: 0.7,
            pair_restitution: 1.0,
            slop: 1.02,
            min_separation: 1.0e-9,
        }
    }
}
