//! Point and curve records of the sphere graph
//!
//! Curves name their endpoints by [`PointId`]; positions are always resolved
//! through the owning [`CausalGraph`](super::editor::CausalGraph), so moving a
//! point drags its curves along with it.

use std::fmt;

use crate::simulation::states::{Hsl, NVec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub position: NVec3, // always on the sphere
    pub title: String,
    pub color: Hsl,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub id: CurveId,
    pub start: PointId,
    pub end: PointId,
    pub title: String,
    pub color: Hsl,
    pub bend: NVec3, // control point offset from the chord midpoint
}

impl Curve {
    pub fn touches(&self, point: PointId) -> bool {
        self.start == point || self.end == point
    }
}
