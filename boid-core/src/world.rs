//! The simulated world and its tick.
//!
//! Every tick is computed against the world exactly as it was when the tick
//! started: all next states are buffered first and only then written back, so
//! the outcome does not depend on the order boids are visited in.

use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "std")]
use rand::Rng;

use crate::behavior::{self, Steering};
use crate::config::{FlockConfig, NeighborSearch, WorldBounds};
use crate::entity::{Attractor, Boid, Color, Obstacle};
use crate::error::{ConfigError, WorldError};
use crate::grid::SpatialGrid;
use crate::integrate;
use crate::perception;
use crate::vector::Vector2D;

/// Whether the world still accepts ticks and mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    Stopped,
}

/// Next position and velocity for one boid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidState {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl BoidState {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// What a committed tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummary {
    pub tick: u64,
    pub population: usize,
    pub mean_speed: f32,
}

pub struct World {
    bounds: WorldBounds,
    config: FlockConfig,
    boids: Vec<Boid>,
    attractors: Vec<Attractor>,
    obstacles: Vec<Obstacle>,
    lifecycle: Lifecycle,
    tick: u64,
}

impl World {
    pub fn new(bounds: WorldBounds, config: FlockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "world created: {}x{} (slop {})",
            bounds.width(),
            bounds.height(),
            bounds.slop()
        );
        Ok(Self {
            bounds,
            config,
            boids: Vec::new(),
            attractors: Vec::new(),
            obstacles: Vec::new(),
            lifecycle: Lifecycle::Running,
            tick: 0,
        })
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn population(&self) -> usize {
        self.boids.len()
    }

    /// Number of ticks committed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Moves the world to its terminal state.
    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("world stopped after {} ticks", self.tick);
        }
        self.lifecycle = Lifecycle::Stopped;
    }

    fn ensure_running(&self) -> Result<(), WorldError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(WorldError::Stopped)
        }
    }

    /// Adds a boid. The position is wrapped into the world like any other
    /// move.
    pub fn spawn(
        &mut self,
        position: Vector2D,
        velocity: Vector2D,
        color: Color,
        size: f32,
    ) -> Result<(), WorldError> {
        self.ensure_running()?;
        if !position.is_finite() {
            return Err(WorldError::NonFinitePosition);
        }
        if !velocity.is_finite() {
            return Err(WorldError::NonFiniteVelocity);
        }
        if !size.is_finite() || size <= 0.0 {
            return Err(WorldError::InvalidBoidSize(size));
        }
        let position = integrate::wrap(position, &self.bounds);
        let boid = Boid::new(position, velocity).with_appearance(color, size);
        self.push_boid(boid);
        Ok(())
    }

    /// Spawns a boid with random placement, velocity and colour.
    #[cfg(feature = "std")]
    pub fn spawn_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), WorldError> {
        self.ensure_running()?;
        let boid = Boid::random(rng, self.bounds.width(), self.bounds.height());
        self.push_boid(boid);
        Ok(())
    }

    /// Spawns `count` random boids.
    #[cfg(feature = "std")]
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Result<(), WorldError> {
        for _ in 0..count {
            self.spawn_random(rng)?;
        }
        Ok(())
    }

    fn push_boid(&mut self, boid: Boid) {
        log::debug!(
            "spawned boid at ({:.1}, {:.1}); population {}",
            boid.position.x,
            boid.position.y,
            self.boids.len() + 1
        );
        self.boids.push(boid);
    }

    /// Removes the most recently spawned boid.
    pub fn despawn(&mut self) -> Result<Option<Boid>, WorldError> {
        self.ensure_running()?;
        let removed = self.boids.pop();
        if removed.is_some() {
            log::debug!("despawned boid; population {}", self.boids.len());
        }
        Ok(removed)
    }

    pub fn add_attractor(&mut self, position: Vector2D, magnitude: f32) -> Result<(), WorldError> {
        self.ensure_running()?;
        if !position.is_finite() {
            return Err(WorldError::NonFinitePosition);
        }
        log::debug!("attractor added at ({:.1}, {:.1})", position.x, position.y);
        self.attractors.push(Attractor::new(position, magnitude));
        Ok(())
    }

    pub fn add_obstacle(&mut self, position: Vector2D, size: f32) -> Result<(), WorldError> {
        self.ensure_running()?;
        if !position.is_finite() {
            return Err(WorldError::NonFinitePosition);
        }
        if !size.is_finite() || size < 0.0 {
            return Err(ConfigError::Negative {
                field: "obstacle size",
                value: size,
            }
            .into());
        }
        log::debug!(
            "obstacle added at ({:.1}, {:.1}) size {}",
            position.x,
            position.y,
            size
        );
        self.obstacles.push(Obstacle::new(position, size));
        Ok(())
    }

    pub fn clear_attractors(&mut self) -> Result<(), WorldError> {
        self.ensure_running()?;
        self.attractors.clear();
        Ok(())
    }

    pub fn clear_obstacles(&mut self) -> Result<(), WorldError> {
        self.ensure_running()?;
        self.obstacles.clear();
        Ok(())
    }

    /// Changes the nominal size, keeping the slop. Boids are re-wrapped into
    /// the new extent.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), WorldError> {
        self.ensure_running()?;
        let bounds = WorldBounds::new(width, height, self.bounds.slop())?;
        for boid in &mut self.boids {
            boid.position = integrate::wrap(boid.position, &bounds);
        }
        self.bounds = bounds;
        log::debug!("world resized to {}x{}", width, height);
        Ok(())
    }

    /// Indices of the boids `boids[index]` perceives.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        perception::nearby_all(
            index,
            &self.boids,
            self.config.perception_range,
            self.config.view_angle,
        )
    }

    fn neighbors_in(&self, index: usize, grid: Option<&SpatialGrid>) -> Vec<usize> {
        match grid {
            Some(grid) => perception::nearby(
                index,
                &self.boids,
                grid.candidates(self.boids[index].position),
                self.config.perception_range,
                self.config.view_angle,
            ),
            None => self.neighbors(index),
        }
    }

    /// The raw steering vectors for `boids[index]` given its perceived
    /// neighbours.
    ///
    /// # Panics
    ///
    /// Panics if `index` or any entry of `neighbors` is out of bounds.
    pub fn steering(&self, index: usize, neighbors: &[usize]) -> Steering {
        let boid = &self.boids[index];
        let visible: Vec<&Boid> = neighbors.iter().map(|&i| &self.boids[i]).collect();
        let others = self
            .boids
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, other)| other);

        Steering {
            cohesion: behavior::cohesion(boid, &visible),
            alignment: behavior::alignment(boid, &visible),
            boid_avoidance: behavior::separation(
                boid,
                others,
                self.config.boid_collision_distance,
                self.config.max_collision_velocity,
            ),
            obstacle_avoidance: behavior::separation(
                boid,
                self.obstacles.iter(),
                self.config.obstacle_collision_distance,
                self.config.max_collision_velocity,
            ),
            attraction: behavior::attraction(boid, &self.attractors),
        }
    }

    /// Computes the next state of `boids[index]` from the current world
    /// without modifying anything.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn step_boid(&self, index: usize, dt: f32) -> BoidState {
        self.compute_state(index, dt, None)
    }

    fn compute_state(&self, index: usize, dt: f32, grid: Option<&SpatialGrid>) -> BoidState {
        let boid = &self.boids[index];
        let neighbors = self.neighbors_in(index, grid);
        let delta = self.steering(index, &neighbors).velocity_delta(&self.config)
            * self.config.steering_time_scale.factor(dt);
        let velocity = integrate::regulate(boid.velocity + delta, &self.config);
        let position = integrate::integrate(boid.position, velocity, dt, &self.bounds);
        BoidState { position, velocity }
    }

    /// Advances the simulation by `dt`.
    ///
    /// Nothing is written back unless every boid's next state is finite.
    pub fn advance(&mut self, dt: f32) -> Result<TickSummary, WorldError> {
        self.ensure_running()?;
        if !dt.is_finite() || dt < 0.0 {
            return Err(WorldError::InvalidTimeStep(dt));
        }

        let grid = match self.config.neighbor_search {
            NeighborSearch::Grid => Some(SpatialGrid::build(
                &self.bounds,
                self.config.perception_range,
                &self.boids,
            )),
            NeighborSearch::BruteForce => None,
        };

        let next = self.compute_all(dt, grid.as_ref());

        if let Some(index) = next.iter().position(|state| !state.is_finite()) {
            log::warn!("tick {} aborted: boid {} went non-finite", self.tick + 1, index);
            return Err(WorldError::NonFiniteState { index });
        }

        for (boid, state) in self.boids.iter_mut().zip(next) {
            boid.position = state.position;
            boid.velocity = state.velocity;
        }
        self.tick += 1;

        let summary = TickSummary {
            tick: self.tick,
            population: self.boids.len(),
            mean_speed: self.mean_speed(),
        };
        log::trace!(
            "tick {} committed: {} boids, mean speed {:.2}",
            summary.tick,
            summary.population,
            summary.mean_speed
        );
        Ok(summary)
    }

    #[cfg(feature = "parallel")]
    fn compute_all(&self, dt: f32, grid: Option<&SpatialGrid>) -> Vec<BoidState> {
        (0..self.boids.len())
            .into_par_iter()
            .map(|index| self.compute_state(index, dt, grid))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_all(&self, dt: f32, grid: Option<&SpatialGrid>) -> Vec<BoidState> {
        (0..self.boids.len())
            .map(|index| self.compute_state(index, dt, grid))
            .collect()
    }

    pub fn mean_speed(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }
        self.boids.iter().map(Boid::speed).sum::<f32>() / self.boids.len() as f32
    }
}
