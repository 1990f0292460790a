use bubblegraph::{ScenarioConfig, DemoKind, BubbleScenario, CausalGraph, FlowDiagram, Viewport, ViewToggles, GraphStyle};
use bubblegraph::{run_bubbles, run_graph, run_flow};
use bubblegraph::{bench_collisions, bench_step_curve};

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::Logger;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "bubble.yaml")]
    file_name: String,

    /// Step the demo for this many frames without opening a window
    #[arg(long)]
    headless: Option<u64>,

    /// Run the collision benchmarks instead of a demo
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    scenario_cfg.validate()?;
    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn run_headless(cfg: &ScenarioConfig, frames: u64) {
    match cfg.demo {
        DemoKind::Bubble => {
            let mut scenario = BubbleScenario::build_scenario(&cfg.bubble, &cfg.surface);
            let mut last = None;
            for _ in 0..frames {
                last = scenario.step().or(last);
            }
            if let Some(report) = last {
                log::info!(
                    "{} bubbles after {} frames: kinetic energy {:.4}, last frame {} wall / {} pair contacts",
                    scenario.world.bodies.len(), report.frame, report.kinetic_energy, report.wall_contacts, report.pair_contacts
                );
            }
            scenario.dispose();
        }
        DemoKind::Graph => {
            let graph = CausalGraph::build_graph(&cfg.graph);
            log::info!("graph: {} points, {} curves on a sphere of radius {}", graph.points().len(), graph.curves().len(), graph.sphere_radius());
        }
        DemoKind::Flow => {
            let diagram = FlowDiagram::default_layout(&cfg.flow);
            log::info!("flow: {} nodes, {} edges", diagram.nodes().len(), diagram.edges().len());
        }
    }
}

fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;
    let args = Args::parse();

    if args.bench {
        bench_collisions();
        bench_step_curve();
        return Ok(());
    }

    let cfg = load_scenario_from_yaml(&args.file_name)?;

    if let Some(frames) = args.headless {
        run_headless(&cfg, frames);
        return Ok(());
    }

    let (w, h) = (cfg.surface.width, cfg.surface.height);
    match cfg.demo {
        DemoKind::Bubble => run_bubbles(BubbleScenario::build_scenario(&cfg.bubble, &cfg.surface)),
        DemoKind::Graph => {
            let toggles = ViewToggles {
                axes: cfg.graph.show_axes,
                points: cfg.graph.show_points,
                curves: cfg.graph.show_curves,
            };
            let style = GraphStyle {
                curve_samples: cfg.graph.curve_segments,
                lattice_points: cfg.graph.initial_points,
            };
            run_graph(CausalGraph::build_graph(&cfg.graph), toggles, style, w, h);
        }
        DemoKind::Flow => run_flow(FlowDiagram::default_layout(&cfg.flow), Viewport::new(&cfg.flow), w, h),
    }

    Ok(())
}
