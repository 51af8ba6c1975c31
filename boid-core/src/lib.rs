#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking update engine.
//!
//! A [`World`] owns a population of [`Boid`]s plus static [`Attractor`]s and
//! [`Obstacle`]s. Each call to [`World::advance`] runs perception, steering,
//! speed regulation and wrapped integration for every boid against the same
//! pre-tick snapshot, then commits all results at once.

extern crate alloc;

mod math;

pub mod behavior;
pub mod config;
pub mod entity;
pub mod error;
pub mod grid;
pub mod integrate;
pub mod perception;
pub mod vector;
pub mod world;

pub use behavior::Steering;
pub use config::{
    FlockConfig, NeighborSearch, SteeringTimeScale, WorldBounds, DEFAULT_BOID_SIZE, DEFAULT_SLOP,
};
pub use entity::{Attractor, Boid, Collidable, Color, Obstacle, RANDOM_VELOCITY_LIMIT};
pub use error::{ConfigError, WorldError};
pub use grid::SpatialGrid;
pub use vector::Vector2D;
pub use world::{BoidState, Lifecycle, TickSummary, World};
