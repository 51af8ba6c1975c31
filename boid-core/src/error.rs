use thiserror::Error;

/// Errors raised when validating world bounds or flocking constants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("min_speed {min} exceeds max_speed {max}")]
    SpeedBand { min: f32, max: f32 },
    #[error("view_angle {0} must be within 0..=180 degrees")]
    ViewAngle(f32),
}

/// Errors returned by world operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorldError {
    #[error("world is stopped")]
    Stopped,
    #[error("time step {0} must be finite and non-negative")]
    InvalidTimeStep(f32),
    #[error("boid size {0} must be finite and greater than zero")]
    InvalidBoidSize(f32),
    #[error("position must be finite")]
    NonFinitePosition,
    #[error("velocity must be finite")]
    NonFiniteVelocity,
    #[error("boid {index} produced a non-finite state; tick aborted")]
    NonFiniteState { index: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
