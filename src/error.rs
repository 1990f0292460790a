//! Error type shared by the graph editor, the flow diagram and configuration checks

use thiserror::Error;

use crate::graph::points::{CurveId, PointId};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DemoError {
    #[error("no point with id {0}")]
    UnknownPoint(PointId),

    #[error("no curve with id {0}")]
    UnknownCurve(CurveId),

    #[error("the origin has no direction to project onto the sphere")]
    ZeroPosition,

    #[error("a curve needs two distinct endpoints, got {0} twice")]
    DegenerateCurve(PointId),

    #[error("no flow node named `{0}`")]
    UnknownNode(String),

    #[error("no flow edge named `{0}`")]
    UnknownEdge(String),

    #[error("cannot connect `{from}` to `{to}`: {reason}")]
    InvalidConnection {
        from: String,
        to: String,
        reason: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
