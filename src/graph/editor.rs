//! In-memory editor for the sphere point/curve graph
//!
//! `CausalGraph` owns every point and curve, hands out monotonically
//! increasing ids, and keeps the graph consistent: a curve always names two
//! existing, distinct points, and removing a point removes its curves.
//!
//! Randomness (point placement, colors, curve bends) comes from a seeded
//! `StdRng`, so a graph built from the same config is reproducible.

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::GraphConfig;
use crate::error::DemoError;
use crate::graph::curve_path::{label_anchor, random_bend, sample_curve};
use crate::graph::lattice::{fibonacci_sphere, project_to_sphere, random_on_sphere};
use crate::graph::points::{Curve, CurveId, Point, PointId};
use crate::simulation::states::{Hsl, NVec3};

#[derive(Resource, Debug, Clone)]
pub struct CausalGraph {
    points: Vec<Point>,
    curves: Vec<Curve>,
    sphere_radius: f64,
    neighbors: usize, // auto-connect fan-out for new points
    curvature: f64, // bend size relative to the radius
    next_point: u64,
    next_curve: u64,
    revision: u64, // bumped on every mutation
    rng: StdRng,
}

impl CausalGraph {
    /// Empty graph using the sphere and styling settings of `cfg`
    pub fn new(cfg: &GraphConfig) -> Self {
        Self {
            points: Vec::new(),
            curves: Vec::new(),
            sphere_radius: cfg.sphere_radius,
            neighbors: cfg.neighbors,
            curvature: cfg.curvature,
            next_point: 0,
            next_curve: 0,
            revision: 0,
            rng: StdRng::seed_from_u64(cfg.seed),
        }
    }

    /// Graph pre-populated with `cfg.initial_points` lattice points
    pub fn build_graph(cfg: &GraphConfig) -> Self {
        let mut graph = Self::new(cfg);
        graph.populate(cfg.initial_points);
        graph
    }

    /// Discard every point and curve and lay out a fresh lattice of `count` points
    /// Ids keep counting up from where they were
    pub fn regenerate(&mut self, count: usize) {
        self.points.clear();
        self.curves.clear();
        self.populate(count);
    }

    /// Append a Fibonacci lattice. Each point is wired to its nearest
    /// predecessors from this batch once at least `neighbors` of them exist
    fn populate(&mut self, count: usize) {
        let first = self.points.len();
        for position in fibonacci_sphere(count, self.sphere_radius) {
            let placed: Vec<PointId> = self.points[first..].iter().map(|p| p.id).collect();
            let id = self.insert_point(position, None);
            self.connect_to_nearest(id, &placed);
        }
        log::debug!("lattice of {count} points produced {} curves", self.curves.len());
    }

    // =====================================================================================
    // Points
    // =====================================================================================

    /// Add a point at a uniformly random spot on the sphere
    /// When enough points exist it is connected to its nearest neighbours
    pub fn add_point(&mut self, title: Option<&str>) -> PointId {
        let position = random_on_sphere(&mut self.rng, self.sphere_radius);
        self.add_point_projected(position, title)
    }

    /// Add a point at `position` projected onto the sphere
    pub fn add_point_at(&mut self, position: NVec3, title: Option<&str>) -> Result<PointId, DemoError> {
        let position = project_to_sphere(&position, self.sphere_radius).ok_or(DemoError::ZeroPosition)?;
        Ok(self.add_point_projected(position, title))
    }

    fn add_point_projected(&mut self, position: NVec3, title: Option<&str>) -> PointId {
        let existing: Vec<PointId> = self.points.iter().map(|p| p.id).collect();
        let id = self.insert_point(position, title);
        self.connect_to_nearest(id, &existing);
        id
    }

    fn insert_point(&mut self, position: NVec3, title: Option<&str>) -> PointId {
        let id = PointId(self.next_point);
        self.next_point += 1;

        let title = match title {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!("Point {}", self.next_point),
        };
        let color = Hsl::random(&mut self.rng, 0.85..1.0, 0.7..0.9);

        self.points.push(Point { id, position, title, color });
        self.revision += 1;
        id
    }

    /// Wire `id` to its nearest points among `candidates`
    fn connect_to_nearest(&mut self, id: PointId, candidates: &[PointId]) {
        if self.neighbors == 0 || candidates.len() < self.neighbors {
            return;
        }
        let Some(position) = self.point(id).map(|p| p.position) else {
            return;
        };

        let nearest = self.rank_by_distance(&position, candidates);
        for near in nearest.into_iter().take(self.neighbors) {
            self.insert_curve(near, id, None);
        }
    }

    /// Remove a point and every curve touching it, returns the removed curve ids
    pub fn delete_point(&mut self, id: PointId) -> Result<Vec<CurveId>, DemoError> {
        let idx = self.point_index(id)?;
        self.points.remove(idx);

        let removed: Vec<CurveId> = self.curves.iter().filter(|c| c.touches(id)).map(|c| c.id).collect();
        self.curves.retain(|c| !c.touches(id));
        self.revision += 1;

        log::debug!("deleted point {id} and {} curves", removed.len());
        Ok(removed)
    }

    /// Move a point (re-projected onto the sphere); its curves follow
    pub fn move_point(&mut self, id: PointId, position: NVec3) -> Result<(), DemoError> {
        let position = project_to_sphere(&position, self.sphere_radius).ok_or(DemoError::ZeroPosition)?;
        let idx = self.point_index(id)?;
        self.points[idx].position = position;
        self.revision += 1;
        Ok(())
    }

    pub fn rename_point(&mut self, id: PointId, title: &str) -> Result<(), DemoError> {
        let idx = self.point_index(id)?;
        self.points[idx].title = title.to_string();
        self.revision += 1;
        Ok(())
    }

    // =====================================================================================
    // Curves
    // =====================================================================================

    /// Connect two distinct existing points
    pub fn add_curve(&mut self, start: PointId, end: PointId, title: Option<&str>) -> Result<CurveId, DemoError> {
        self.point_index(start)?;
        self.point_index(end)?;
        if start == end {
            return Err(DemoError::DegenerateCurve(start));
        }
        Ok(self.insert_curve(start, end, title))
    }

    fn insert_curve(&mut self, start: PointId, end: PointId, title: Option<&str>) -> CurveId {
        let id = CurveId(self.next_curve);
        self.next_curve += 1;

        let title = match title {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!("Curve {}", self.next_curve),
        };
        let color = Hsl::random(&mut self.rng, 0.6..0.8, 0.5..0.7);
        let bend = random_bend(&mut self.rng, self.sphere_radius, self.curvature);

        self.curves.push(Curve { id, start, end, title, color, bend });
        self.revision += 1;
        id
    }

    pub fn delete_curve(&mut self, id: CurveId) -> Result<Curve, DemoError> {
        let idx = self.curve_index(id)?;
        self.revision += 1;
        Ok(self.curves.remove(idx))
    }

    pub fn rename_curve(&mut self, id: CurveId, title: &str) -> Result<(), DemoError> {
        let idx = self.curve_index(id)?;
        self.curves[idx].title = title.to_string();
        self.revision += 1;
        Ok(())
    }

    // =====================================================================================
    // Queries
    // =====================================================================================

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn curve(&self, id: CurveId) -> Option<&Curve> {
        self.curves.iter().find(|c| c.id == id)
    }

    pub fn sphere_radius(&self) -> f64 {
        self.sphere_radius
    }

    /// Counter that changes whenever the graph does
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Curves that start or end at `id`
    pub fn incident_curves(&self, id: PointId) -> Vec<CurveId> {
        self.curves.iter().filter(|c| c.touches(id)).map(|c| c.id).collect()
    }

    /// Current start and end positions of a curve
    pub fn curve_endpoints(&self, id: CurveId) -> Option<(NVec3, NVec3)> {
        let curve = self.curve(id)?;
        let start = self.point(curve.start)?.position;
        let end = self.point(curve.end)?.position;
        Some((start, end))
    }

    /// Sampled polyline of a curve, `samples` points including both ends
    pub fn curve_path(&self, id: CurveId, samples: usize) -> Option<Vec<NVec3>> {
        let bend = self.curve(id)?.bend;
        let (start, end) = self.curve_endpoints(id)?;
        Some(sample_curve(&start, &end, &bend, samples))
    }

    /// Anchor for a curve's hover label
    pub fn curve_label_anchor(&self, id: CurveId) -> Option<NVec3> {
        let bend = self.curve(id)?.bend;
        let (start, end) = self.curve_endpoints(id)?;
        Some(label_anchor(&start, &end, &bend))
    }

    /// Up to `k` point ids ordered by distance to `position`, optionally skipping one point
    pub fn nearest_points(&self, position: &NVec3, k: usize, excluding: Option<PointId>) -> Vec<PointId> {
        let candidates: Vec<PointId> = self.points.iter()
            .map(|p| p.id)
            .filter(|id| Some(*id) != excluding)
            .collect();
        let mut ranked = self.rank_by_distance(position, &candidates);
        ranked.truncate(k);
        ranked
    }

    /// `candidates` sorted by distance to `position`, ties keep their order
    fn rank_by_distance(&self, position: &NVec3, candidates: &[PointId]) -> Vec<PointId> {
        let mut ranked: Vec<(PointId, f64)> = candidates.iter()
            .filter_map(|id| self.point(*id).map(|p| (*id, (p.position - position).norm())))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.into_iter().map(|(id, _)| id).collect()
    }

    fn point_index(&self, id: PointId) -> Result<usize, DemoError> {
        self.points.iter().position(|p| p.id == id).ok_or(DemoError::UnknownPoint(id))
    }

    fn curve_index(&self, id: CurveId) -> Result<usize, DemoError> {
        self.curves.iter().position(|c| c.id == id).ok_or(DemoError::UnknownCurve(id))
    }
}
