//! Hover and click-to-connect state layered over a [`CausalGraph`]

use bevy::prelude::Resource;

use crate::error::DemoError;
use crate::graph::editor::CausalGraph;
use crate::graph::points::{CurveId, PointId};

#[derive(Resource, Debug, Clone, Default)]
pub struct Selection {
    pub hovered_point: Option<PointId>,
    pub hovered_curve: Option<CurveId>,
    pending: Vec<PointId>, // endpoints picked so far, at most one between clicks
}

impl Selection {
    pub fn pending(&self) -> &[PointId] {
        &self.pending
    }

    pub fn is_pending(&self, id: PointId) -> bool {
        self.pending.contains(&id)
    }

    /// Pick a point as a curve endpoint
    ///
    /// Clicking a pending point again un-picks it. The second distinct pick
    /// creates the curve and clears the pending list
    pub fn click_point(&mut self, graph: &mut CausalGraph, id: PointId) -> Result<Option<CurveId>, DemoError> {
        if graph.point(id).is_none() {
            return Err(DemoError::UnknownPoint(id));
        }

        if let Some(pos) = self.pending.iter().position(|p| *p == id) {
            self.pending.remove(pos);
            return Ok(None);
        }

        self.pending.push(id);
        if self.pending.len() < 2 {
            return Ok(None);
        }

        let (start, end) = (self.pending[0], self.pending[1]);
        self.pending.clear();
        graph.add_curve(start, end, None).map(Some)
    }

    pub fn clear(&mut self) {
        self.hovered_point = None;
        self.hovered_curve = None;
        self.pending.clear();
    }

    /// Forget points and curves that are no longer in `graph`
    pub fn prune(&mut self, graph: &CausalGraph) {
        if self.hovered_point.is_some_and(|id| graph.point(id).is_none()) {
            self.hovered_point = None;
        }
        if self.hovered_curve.is_some_and(|id| graph.curve(id).is_none()) {
            self.hovered_curve = None;
        }
        self.pending.retain(|id| graph.point(*id).is_some());
    }
}

/// Which layers of the graph scene are drawn
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToggles {
    pub axes: bool,
    pub points: bool,
    pub curves: bool,
}

impl Default for ViewToggles {
    fn default() -> Self {
        Self {
            axes: true,
            points: true,
            curves: true,
        }
    }
}
