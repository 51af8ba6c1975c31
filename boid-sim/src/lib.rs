//! Headless driver for the flocking engine: argument parsing, settings
//! loading, the tick loop and frame snapshots.

use std::path::Path;

use anyhow::{Context, Result};
use boid_shared::SimulationSettings;

pub mod cli;
pub mod simulation;
pub mod snapshot;

pub use cli::{parse_point, Args, PointArg};
pub use simulation::{RunReport, Simulation};

/// Reads settings from a JSON file, or returns the defaults when no path is
/// given.
pub fn load_settings(path: Option<&Path>) -> Result<SimulationSettings> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let settings = SimulationSettings::from_json(&json)
                .with_context(|| format!("Invalid settings in {}", path.display()))?;
            log::info!("Loaded settings from {}", path.display());
            Ok(settings)
        }
        None => Ok(SimulationSettings::default()),
    }
}

/// Runs a whole simulation as described by `args`.
pub fn run(args: &Args) -> Result<RunReport> {
    let settings = load_settings(args.config.as_deref())?;
    let mut sim = Simulation::from_args(args, settings).context("Failed to initialize simulation")?;
    let report = sim.run(args.ticks, args.dt)?;
    log::info!(
        "Finished {} ticks: {} boids (+{} / -{}), mean speed {:.2}",
        report.ticks,
        report.population,
        report.spawned,
        report.despawned,
        report.mean_speed
    );

    let world = sim.finish();
    if let Some(target) = &args.snapshot {
        snapshot::write(&snapshot::capture(&world), target)?;
    }
    Ok(report)
}
