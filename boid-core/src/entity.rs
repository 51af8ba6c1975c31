use crate::config::DEFAULT_BOID_SIZE;
use crate::vector::Vector2D;

#[cfg(feature = "std")]
use rand::Rng;

/// Bound on each velocity component of a randomly spawned boid.
pub const RANDOM_VELOCITY_LIMIT: f32 = 50.0;

/// RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen(), rng.gen(), rng.gen())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Anything a boid steers away from: a centre and a radius.
pub trait Collidable {
    fn position(&self) -> Vector2D;
    fn radius(&self) -> f32;
}

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub size: f32,
    pub color: Color,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            size: DEFAULT_BOID_SIZE,
            color: Color::default(),
        }
    }

    pub fn with_appearance(mut self, color: Color, size: f32) -> Self {
        self.color = color;
        self.size = size;
        self
    }

    /// A boid placed uniformly within `width` x `height`, with each velocity
    /// component drawn from `[-RANDOM_VELOCITY_LIMIT, RANDOM_VELOCITY_LIMIT)`
    /// and a random colour.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        let limit = RANDOM_VELOCITY_LIMIT;
        let position = Vector2D::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let velocity = Vector2D::new(rng.gen_range(-limit..limit), rng.gen_range(-limit..limit));
        Self::new(position, velocity).with_appearance(Color::random(rng), DEFAULT_BOID_SIZE)
    }

    /// Facing angle for rendering, `atan2(vx, vy)` in degrees.
    pub fn heading_degrees(&self) -> f32 {
        self.velocity.heading_degrees()
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

impl Collidable for Boid {
    fn position(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f32 {
        self.size
    }
}

/// A fixed point every boid is pulled toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    pub position: Vector2D,
    /// Drawn size only; the pull does not scale with it.
    pub magnitude: f32,
}

impl Attractor {
    pub fn new(position: Vector2D, magnitude: f32) -> Self {
        Self {
            position,
            magnitude,
        }
    }
}

/// A fixed disc boids steer around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Vector2D,
    pub size: f32,
}

impl Obstacle {
    pub fn new(position: Vector2D, size: f32) -> Self {
        Self { position, size }
    }
}

impl Collidable for Obstacle {
    fn position(&self) -> Vector2D {
        self.position
    }

    fn radius(&self) -> f32 {
        self.size
    }
}
