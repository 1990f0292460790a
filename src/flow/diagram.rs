//! Node-link flow diagram
//!
//! Input nodes feed processing nodes which feed output nodes. The diagram is
//! mostly static: the only mutations are dragging nodes around (with optional
//! grid snapping) and connecting or disconnecting pairs of nodes.
//!
//! Positions are diagram units with `y` pointing down and name the top-left
//! corner of a node's bounding box.

use bevy::prelude::Resource;

use crate::configuration::config::FlowConfig;
use crate::error::DemoError;
use crate::simulation::states::NVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Input, // only has an outgoing handle
    Process, // in and out
    Output, // only has an incoming handle
}

impl NodeKind {
    pub fn can_be_source(&self) -> bool {
        !matches!(self, NodeKind::Output)
    }

    pub fn can_be_target(&self) -> bool {
        !matches!(self, NodeKind::Input)
    }

    /// Bounding box size: input/output are 150x40 boxes, process nodes are
    /// 140-wide circles
    pub fn size(&self) -> NVec2 {
        match self {
            NodeKind::Input | NodeKind::Output => NVec2::new(150.0, 40.0),
            NodeKind::Process => NVec2::new(140.0, 140.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub position: NVec2, // top-left corner
}

impl FlowNode {
    pub fn center(&self) -> NVec2 {
        self.position + 0.5 * self.kind.size()
    }

    /// Hit test, process nodes are round
    pub fn contains(&self, p: &NVec2) -> bool {
        let size = self.kind.size();
        match self.kind {
            NodeKind::Process => (p - self.center()).norm() <= 0.5 * size.x,
            _ => {
                let d = p - self.position;
                d.x >= 0.0 && d.y >= 0.0 && d.x <= size.x && d.y <= size.y
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Resource, Debug, Clone)]
pub struct FlowDiagram {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    snap: Option<f64>, // grid pitch when snapping is on
}

/// Wiring of the default layout, short names: s = start, m = middle, e = end
const DEFAULT_EDGES: [(&str, &str, &str); 16] = [
    ("e-s1-m1", "start-1", "middle-1"),
    ("e-s5-m1", "start-5", "middle-1"),
    ("e-s10-m1", "start-10", "middle-1"),
    ("e-s6-m2", "start-6", "middle-2"),
    ("e-s7-m2", "start-7", "middle-2"),
    ("e-s2-m2", "start-2", "middle-2"),
    ("e-s9-m2", "start-9", "middle-2"),
    ("e-s3-m3", "start-3", "middle-3"),
    ("e-s4-m3", "start-4", "middle-3"),
    ("e-s8-m3", "start-8", "middle-3"),
    ("e-s6-m3", "start-6", "middle-3"),
    ("e-m1-e4", "middle-1", "end-4"),
    ("e-m1-e2", "middle-1", "end-2"),
    ("e-m2-e1", "middle-2", "end-1"),
    ("e-m2-e3", "middle-2", "end-3"),
    ("e-m3-e5", "middle-3", "end-5"),
];

impl FlowDiagram {
    pub fn empty(cfg: &FlowConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            snap: cfg.snap_to_grid.then_some(cfg.snap_grid),
        }
    }

    /// 10 inputs on the left, 3 processing nodes in the middle, 5 outputs on the right
    pub fn default_layout(cfg: &FlowConfig) -> Self {
        let mut diagram = Self::empty(cfg);

        for i in 0..10 {
            diagram.nodes.push(FlowNode {
                id: format!("start-{}", i + 1),
                kind: NodeKind::Input,
                label: format!("Input {}", i + 1),
                position: NVec2::new(20.0, 50.0 + i as f64 * 80.0),
            });
        }
        for i in 0..3 {
            diagram.nodes.push(FlowNode {
                id: format!("middle-{}", i + 1),
                kind: NodeKind::Process,
                label: format!("Process {}", i + 1),
                // alternate columns so edges into neighbours do not overlap
                position: NVec2::new(if i % 2 == 0 { 600.0 } else { 400.0 }, 200.0 + i as f64 * 200.0),
            });
        }
        for i in 0..5 {
            diagram.nodes.push(FlowNode {
                id: format!("end-{}", i + 1),
                kind: NodeKind::Output,
                label: format!("Output {}", i + 1),
                position: NVec2::new(1000.0, 100.0 + i as f64 * 120.0),
            });
        }

        diagram.edges = DEFAULT_EDGES.iter().map(|(id, s, t)| FlowEdge {
            id: id.to_string(),
            source: s.to_string(),
            target: t.to_string(),
        }).collect();

        diagram
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&FlowEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Topmost node under `p`; later nodes are drawn above earlier ones
    pub fn node_at(&self, p: &NVec2) -> Option<&FlowNode> {
        self.nodes.iter().rev().find(|n| n.contains(p))
    }

    /// Add an edge from `source` to `target`
    ///
    /// An existing edge between the same pair is returned unchanged.
    /// Outputs cannot start an edge, inputs cannot end one
    pub fn connect(&mut self, source: &str, target: &str) -> Result<&FlowEdge, DemoError> {
        let invalid = |reason| DemoError::InvalidConnection {
            from: source.to_string(),
            to: target.to_string(),
            reason,
        };

        let src = self.node(source).ok_or_else(|| DemoError::UnknownNode(source.to_string()))?;
        let dst = self.node(target).ok_or_else(|| DemoError::UnknownNode(target.to_string()))?;
        if source == target {
            return Err(invalid("a node cannot connect to itself"));
        }
        if !src.kind.can_be_source() {
            return Err(invalid("output nodes have no outgoing handle"));
        }
        if !dst.kind.can_be_target() {
            return Err(invalid("input nodes have no incoming handle"));
        }

        let idx = match self.edges.iter().position(|e| e.source == source && e.target == target) {
            Some(idx) => idx,
            None => {
                let edge = FlowEdge {
                    id: format!("e-{source}-{target}"),
                    source: source.to_string(),
                    target: target.to_string(),
                };
                log::debug!("flow: connected {source} -> {target}");
                self.edges.push(edge);
                self.edges.len() - 1
            }
        };
        Ok(&self.edges[idx])
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<FlowEdge, DemoError> {
        let idx = self.edges.iter().position(|e| e.id == id).ok_or_else(|| DemoError::UnknownEdge(id.to_string()))?;
        Ok(self.edges.remove(idx))
    }

    /// Drag a node to `position`, snapped to the grid when snapping is on
    /// Returns the position the node ended up at
    pub fn move_node(&mut self, id: &str, position: NVec2) -> Result<NVec2, DemoError> {
        let snapped = self.snap_point(position);
        let node = self.nodes.iter_mut().find(|n| n.id == id).ok_or_else(|| DemoError::UnknownNode(id.to_string()))?;
        node.position = snapped;
        Ok(snapped)
    }

    pub fn snap_point(&self, p: NVec2) -> NVec2 {
        match self.snap {
            Some(grid) => p.map(|c| (c / grid).round() * grid),
            None => p,
        }
    }

    /// Start and end centers of an edge
    pub fn edge_endpoints(&self, id: &str) -> Option<(NVec2, NVec2)> {
        let edge = self.edge(id)?;
        Some((self.node(&edge.source)?.center(), self.node(&edge.target)?.center()))
    }
}
