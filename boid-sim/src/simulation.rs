use anyhow::{Context, Result};
use boid_core::{
    Boid, ConfigError, FlockConfig, NeighborSearch, SteeringTimeScale, TickSummary, Vector2D,
    World, WorldBounds,
};
use boid_shared::SimulationSettings;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cli::{Args, PointArg};

/// Drawn size of attractors placed without an explicit magnitude.
pub const DEFAULT_ATTRACTOR_MAGNITUDE: f32 = 10.0;

/// Collision radius of obstacles placed without an explicit size.
pub const DEFAULT_OBSTACLE_SIZE: f32 = 30.0;

/// Splits serialized settings into engine bounds and constants.
pub fn world_parts(settings: &SimulationSettings) -> Result<(WorldBounds, FlockConfig), ConfigError> {
    let bounds = WorldBounds::new(settings.width, settings.height, settings.slop)?;
    let config = FlockConfig {
        perception_range: settings.perception_range,
        view_angle: settings.view_angle,
        boid_collision_distance: settings.boid_collision_distance,
        obstacle_collision_distance: settings.obstacle_collision_distance,
        max_collision_velocity: settings.max_collision_velocity,
        cohesion_weight: settings.cohesion_weight,
        alignment_weight: settings.alignment_weight,
        attraction_weight: settings.attraction_weight,
        boid_avoidance_weight: settings.boid_avoidance_weight,
        obstacle_avoidance_weight: settings.obstacle_avoidance_weight,
        min_speed: settings.min_speed,
        max_speed: settings.max_speed,
        steering_time_scale: if settings.scale_steering_by_dt {
            SteeringTimeScale::ScaledByDt
        } else {
            SteeringTimeScale::PerTick
        },
        neighbor_search: if settings.use_grid {
            NeighborSearch::Grid
        } else {
            NeighborSearch::BruteForce
        },
    };
    config.validate()?;
    Ok((bounds, config))
}

/// Applies command-line overrides on top of file or default settings.
pub fn merge_overrides(mut settings: SimulationSettings, args: &Args) -> SimulationSettings {
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if args.grid {
        settings.use_grid = true;
    }
    settings
}

/// Totals over a whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub ticks: u64,
    pub population: usize,
    pub mean_speed: f32,
    pub spawned: usize,
    pub despawned: usize,
}

/// Owns the world and plays the role of the tick scheduler: population
/// changes happen strictly between ticks.
pub struct Simulation {
    world: World,
    rng: ChaCha8Rng,
    boid_size: f32,
    spawn_every: u64,
    despawn_every: u64,
    report_every: u64,
    spawned: usize,
    despawned: usize,
}

impl Simulation {
    pub fn new(settings: &SimulationSettings, seed: u64) -> Result<Self> {
        let (bounds, config) = world_parts(settings).context("Invalid simulation settings")?;
        let world = World::new(bounds, config)?;
        log::info!(
            "World {}x{} (slop {}), seed {}",
            bounds.width(),
            bounds.height(),
            bounds.slop(),
            seed
        );
        Ok(Self {
            world,
            rng: ChaCha8Rng::seed_from_u64(seed),
            boid_size: settings.boid_size,
            spawn_every: 0,
            despawn_every: 0,
            report_every: 0,
            spawned: 0,
            despawned: 0,
        })
    }

    /// Builds a simulation from parsed arguments and the settings they point at.
    pub fn from_args(args: &Args, settings: SimulationSettings) -> Result<Self> {
        let settings = merge_overrides(settings, args);
        let seed = args.seed.unwrap_or_else(rand::random);
        let mut sim = Self::new(&settings, seed)?;
        sim.spawn_every = args.spawn_every;
        sim.despawn_every = args.despawn_every;
        sim.report_every = args.report_every;

        for _ in 0..args.count {
            sim.spawn_random()?;
        }
        for point in &args.attractors {
            sim.place_attractor(point)?;
        }
        for point in &args.obstacles {
            sim.place_obstacle(point)?;
        }
        log::info!(
            "Seeded {} boids, {} attractors, {} obstacles",
            sim.world.population(),
            sim.world.attractors().len(),
            sim.world.obstacles().len()
        );
        Ok(sim)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn spawn_random(&mut self) -> Result<()> {
        let bounds = self.world.bounds();
        let boid = Boid::random(&mut self.rng, bounds.width(), bounds.height());
        self.world
            .spawn(boid.position, boid.velocity, boid.color, self.boid_size)
            .context("Failed to spawn boid")?;
        self.spawned += 1;
        Ok(())
    }

    pub fn despawn(&mut self) -> Result<()> {
        if self.world.despawn()?.is_some() {
            self.despawned += 1;
        }
        Ok(())
    }

    pub fn place_attractor(&mut self, point: &PointArg) -> Result<()> {
        self.world
            .add_attractor(
                Vector2D::new(point.x, point.y),
                point.value.unwrap_or(DEFAULT_ATTRACTOR_MAGNITUDE),
            )
            .with_context(|| format!("Failed to place attractor at {},{}", point.x, point.y))
    }

    pub fn place_obstacle(&mut self, point: &PointArg) -> Result<()> {
        self.world
            .add_obstacle(
                Vector2D::new(point.x, point.y),
                point.value.unwrap_or(DEFAULT_OBSTACLE_SIZE),
            )
            .with_context(|| format!("Failed to place obstacle at {},{}", point.x, point.y))
    }

    /// Runs one tick, applying any scheduled spawn/despawn before it.
    pub fn step(&mut self, dt: f32) -> Result<TickSummary> {
        let next = self.world.tick() + 1;
        if self.spawn_every > 0 && next % self.spawn_every == 0 {
            self.spawn_random()?;
        }
        if self.despawn_every > 0 && next % self.despawn_every == 0 {
            self.despawn()?;
        }

        let summary = self
            .world
            .advance(dt)
            .with_context(|| format!("Tick {} failed", next))?;

        if self.report_every > 0 && summary.tick % self.report_every == 0 {
            log::info!(
                "tick {}: {} boids, mean speed {:.2}",
                summary.tick,
                summary.population,
                summary.mean_speed
            );
        }
        Ok(summary)
    }

    pub fn run(&mut self, ticks: u64, dt: f32) -> Result<RunReport> {
        log::info!("Running {} ticks at dt={}", ticks, dt);
        for _ in 0..ticks {
            self.step(dt)?;
        }
        Ok(self.report())
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            ticks: self.world.tick(),
            population: self.world.population(),
            mean_speed: self.world.mean_speed(),
            spawned: self.spawned,
            despawned: self.despawned,
        }
    }

    /// Stops the world and hands it back for a final read.
    pub fn finish(mut self) -> World {
        self.world.stop();
        self.world
    }
}
