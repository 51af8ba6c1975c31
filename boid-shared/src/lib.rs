#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Represents a 2D position in world coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Everything a renderer needs to draw one boid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoidFrame {
    pub position: Position,
    /// Degrees clockwise from +y.
    pub heading: f32,
    pub size: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttractorFrame {
    pub position: Position,
    pub magnitude: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObstacleFrame {
    pub position: Position,
    pub size: f32,
}

/// Read-only picture of the world between two ticks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub slop: f32,
    pub boids: Vec<BoidFrame>,
    pub attractors: Vec<AttractorFrame>,
    pub obstacles: Vec<ObstacleFrame>,
}

/// Boid simulation configuration
///
/// Missing fields fall back to their defaults when deserializing, so a
/// settings file only needs the values it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub width: f32,
    pub height: f32,
    pub slop: f32,
    pub perception_range: f32,
    pub view_angle: f32,
    pub boid_collision_distance: f32,
    pub obstacle_collision_distance: f32,
    pub max_collision_velocity: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub attraction_weight: f32,
    pub boid_avoidance_weight: f32,
    pub obstacle_avoidance_weight: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub boid_size: f32,
    /// Multiply the steering delta by the elapsed time instead of applying it
    /// once per tick.
    pub scale_steering_by_dt: bool,
    /// Use the uniform grid for neighbour candidates.
    pub use_grid: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            slop: 50.0,
            perception_range: 250.0,
            view_angle: 110.0,
            boid_collision_distance: 45.0,
            obstacle_collision_distance: 250.0,
            max_collision_velocity: 1.0,
            cohesion_weight: 0.03,
            alignment_weight: 0.045,
            attraction_weight: 0.035,
            boid_avoidance_weight: 7.5,
            obstacle_avoidance_weight: 300.0,
            min_speed: 2.0,
            max_speed: 150.0,
            boid_size: 15.0,
            scale_steering_by_dt: false,
            use_grid: false,
        }
    }
}

#[cfg(feature = "std")]
impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
