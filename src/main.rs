use partsim::{ScenarioConfig, SimulationLoop};
use partsim::bench_force_pass;

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "three_body.yaml")]
    file_name: String,

    /// Run headless for this many frames and print final positions
    #[arg(long)]
    frames: Option<u64>,

    /// Time the force models instead of simulating
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn run_headless(mut sim: SimulationLoop, frames: u64) -> Result<()> {
    for _ in 0..frames {
        sim.advance_frame()?;
    }
    log::info!("t = {:.6} after {} substeps", sim.time(), sim.steps_taken());
    for (i, p) in sim.positions().iter().enumerate() {
        println!("{i:4} {:12.8} {:12.8}", p.x, p.y);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_force_pass();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let sim = SimulationLoop::from_config(scenario_cfg)?;

    match args.frames {
        Some(frames) => run_headless(sim, frames),
        None => run_interactive(sim),
    }
}

#[cfg(feature = "viewer")]
fn run_interactive(sim: SimulationLoop) -> Result<()> {
    partsim::run_2d(sim);
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn run_interactive(sim: SimulationLoop) -> Result<()> {
    log::warn!("built without the `viewer` feature, running 1000 frames headless");
    run_headless(sim, 1000)
}
