pub mod simulation;
pub mod graph;
pub mod flow;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, World, Hsl, IconKind, NVec2, NVec3};
pub use simulation::params::Parameters;
pub use simulation::engine::{step_world, StepReport};
pub use simulation::scenario::BubbleScenario;

pub use graph::editor::CausalGraph;
pub use graph::points::{Point, PointId, Curve, CurveId};
pub use graph::selection::{Selection, ViewToggles};

pub use flow::diagram::{FlowDiagram, FlowNode, FlowEdge, NodeKind};
pub use flow::viewport::Viewport;

pub use configuration::config::{ScenarioConfig, DemoKind, SurfaceConfig, BubbleConfig, GraphConfig, FlowConfig};
pub use error::DemoError;

pub use visualization::{bubble_vis2d::run_bubbles, graph_vis3d::{run_graph, GraphStyle}, flow_vis2d::run_flow};

pub use benchmark::benchmark::{bench_collisions, bench_step_curve};
