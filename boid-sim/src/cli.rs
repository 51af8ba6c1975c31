use std::path::PathBuf;

use clap::Parser;

/// `X,Y` or `X,Y,V` on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointArg {
    pub x: f32,
    pub y: f32,
    /// Attractor magnitude or obstacle size; a default applies when absent.
    pub value: Option<f32>,
}

pub fn parse_point(raw: &str) -> Result<PointArg, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(format!("expected X,Y or X,Y,VALUE, got '{raw}'"));
    }
    let number = |s: &str| {
        s.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{s}' is not a finite number"))
    };
    Ok(PointArg {
        x: number(parts[0])?,
        y: number(parts[1])?,
        value: parts.get(2).map(|s| number(*s)).transpose()?,
    })
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boids flocking simulation", long_about = None)]
pub struct Args {
    /// JSON settings file; command-line values take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// World width (overrides the settings file)
    #[arg(long)]
    pub width: Option<f32>,

    /// World height (overrides the settings file)
    #[arg(long)]
    pub height: Option<f32>,

    /// Number of boids spawned before the first tick
    #[arg(short = 'n', long, default_value_t = 99)]
    pub count: usize,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    pub ticks: u64,

    /// Elapsed time per tick in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Seed for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Place an attractor at X,Y[,MAGNITUDE] (repeatable)
    #[arg(long = "attractor", value_parser = parse_point)]
    pub attractors: Vec<PointArg>,

    /// Place an obstacle at X,Y[,SIZE] (repeatable)
    #[arg(long = "obstacle", value_parser = parse_point)]
    pub obstacles: Vec<PointArg>,

    /// Spawn one random boid every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    pub spawn_every: u64,

    /// Despawn the newest boid every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    pub despawn_every: u64,

    /// Use the spatial grid for neighbour search
    #[arg(long)]
    pub grid: bool,

    /// Log a summary every N ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    pub report_every: u64,

    /// Write the final frame as JSON to this path, or '-' for stdout
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point_with_and_without_value() {
        assert_eq!(
            parse_point("10,20"),
            Ok(PointArg {
                x: 10.0,
                y: 20.0,
                value: None
            })
        );
        assert_eq!(
            parse_point(" 1.5, -2 , 40 "),
            Ok(PointArg {
                x: 1.5,
                y: -2.0,
                value: Some(40.0)
            })
        );
    }

    #[test]
    fn test_parse_point_rejects_garbage() {
        assert!(parse_point("10").is_err());
        assert!(parse_point("1,2,3,4").is_err());
        assert!(parse_point("a,2").is_err());
        assert!(parse_point("inf,2").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["boid-sim"]).unwrap();
        assert_eq!(args.count, 99);
        assert_eq!(args.ticks, 600);
        assert!((args.dt - 1.0 / 60.0).abs() < 1e-6);
        assert!(args.attractors.is_empty());
        assert!(!args.grid);
    }

    #[test]
    fn test_repeated_points() {
        let args = Args::try_parse_from([
            "boid-sim",
            "--attractor",
            "100,100",
            "--attractor",
            "200,200,5",
            "--obstacle",
            "400,300,40",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(args.attractors.len(), 2);
        assert_eq!(args.attractors[1].value, Some(5.0));
        assert_eq!(args.obstacles[0].value, Some(40.0));
        assert_eq!(args.seed, Some(7));
    }
}
