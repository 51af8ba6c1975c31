use anyhow::{Context, Result};
use boid_sim::Args;
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Boid simulation starting...");
    if let Some(config) = &args.config {
        log::info!("Settings: {}", config.display());
    }

    boid_sim::run(&args).context("Simulation error")?;

    Ok(())
}
