use crate::error::ConfigError;

/// Margin beyond the nominal bounds before an agent wraps around.
pub const DEFAULT_SLOP: f32 = 50.0;

/// Visual and collision radius given to boids spawned without an explicit size.
pub const DEFAULT_BOID_SIZE: f32 = 15.0;

/// Extent of the toroidal world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    width: f32,
    height: f32,
    slop: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32, slop: f32) -> Result<Self, ConfigError> {
        require_positive("width", width)?;
        require_positive("height", height)?;
        require_non_negative("slop", slop)?;
        require_finite("width + 2 * slop", width + 2.0 * slop)?;
        require_finite("height + 2 * slop", height + 2.0 * slop)?;
        Ok(Self {
            width,
            height,
            slop,
        })
    }

    /// Bounds with the default slop.
    pub fn with_size(width: f32, height: f32) -> Result<Self, ConfigError> {
        Self::new(width, height, DEFAULT_SLOP)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn slop(&self) -> f32 {
        self.slop
    }

    /// Coordinate at which an agent travelling in +x wraps around.
    pub fn wrap_x(&self) -> f32 {
        self.width + self.slop
    }

    /// Coordinate at which an agent travelling in +y wraps around.
    pub fn wrap_y(&self) -> f32 {
        self.height + self.slop
    }
}

/// How the steering delta relates to elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteeringTimeScale {
    /// The weighted delta is added once per tick regardless of `dt`, so
    /// steering strength depends on the tick rate.
    #[default]
    PerTick,
    /// The weighted delta is multiplied by `dt` before it is applied.
    ScaledByDt,
}

impl SteeringTimeScale {
    pub fn factor(&self, dt: f32) -> f32 {
        match self {
            SteeringTimeScale::PerTick => 1.0,
            SteeringTimeScale::ScaledByDt => dt,
        }
    }
}

/// Strategy used to find perception candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborSearch {
    /// Test every other boid.
    #[default]
    BruteForce,
    /// Pre-filter candidates with a uniform grid. Membership is identical.
    Grid,
}

/// Configuration for the flocking simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    /// Maximum distance at which another boid is perceived.
    pub perception_range: f32,
    /// Half-width of the field of view in degrees, centred on the heading.
    pub view_angle: f32,
    pub boid_collision_distance: f32,
    pub obstacle_collision_distance: f32,
    /// Ceiling on the magnitude of each separation vector.
    pub max_collision_velocity: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub attraction_weight: f32,
    pub boid_avoidance_weight: f32,
    pub obstacle_avoidance_weight: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub steering_time_scale: SteeringTimeScale,
    pub neighbor_search: NeighborSearch,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
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
            steering_time_scale: SteeringTimeScale::PerTick,
            neighbor_search: NeighborSearch::BruteForce,
        }
    }
}

impl FlockConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("perception_range", self.perception_range)?;
        require_finite("view_angle", self.view_angle)?;
        if !(0.0..=180.0).contains(&self.view_angle) {
            return Err(ConfigError::ViewAngle(self.view_angle));
        }
        require_non_negative("boid_collision_distance", self.boid_collision_distance)?;
        require_non_negative(
            "obstacle_collision_distance",
            self.obstacle_collision_distance,
        )?;
        require_non_negative("max_collision_velocity", self.max_collision_velocity)?;
        require_finite("cohesion_weight", self.cohesion_weight)?;
        require_finite("alignment_weight", self.alignment_weight)?;
        require_finite("attraction_weight", self.attraction_weight)?;
        require_finite("boid_avoidance_weight", self.boid_avoidance_weight)?;
        require_finite("obstacle_avoidance_weight", self.obstacle_avoidance_weight)?;
        require_non_negative("min_speed", self.min_speed)?;
        require_non_negative("max_speed", self.max_speed)?;
        if self.min_speed > self.max_speed {
            return Err(ConfigError::SpeedBand {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        Ok(())
    }
}

fn require_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
