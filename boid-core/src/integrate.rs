//! Speed regulation and position integration on the wrapped world.

use crate::config::{FlockConfig, WorldBounds};
use crate::math;
use crate::vector::Vector2D;

/// Clamps speed into `[min_speed, max_speed]`. A zero velocity stays zero.
pub fn regulate(velocity: Vector2D, config: &FlockConfig) -> Vector2D {
    velocity.limit_magnitude(config.max_speed, config.min_speed)
}

/// Wraps one coordinate so that it ends in `[-slop, bound + slop)`.
///
/// Leaving through the far edge at `bound + slop` re-enters at
/// `(value mod (bound + slop)) - slop`; leaving below `-slop` re-enters
/// `bound + 2 * slop` further along.
pub fn wrap_axis(value: f32, bound: f32, slop: f32) -> f32 {
    let wrap = bound + slop;
    let mut value = value;
    if value < -slop {
        let period = wrap + slop;
        // exact remainder in (-period, 0]; adding one period lands in range
        let offset = math::fmod(value + slop, period);
        value = if offset < 0.0 {
            offset + period - slop
        } else {
            -slop
        };
    }
    if value >= wrap {
        value = math::fmod(value, wrap) - slop;
    }
    value
}

/// Advances `position` by `velocity * dt` and wraps both axes.
pub fn integrate(position: Vector2D, velocity: Vector2D, dt: f32, bounds: &WorldBounds) -> Vector2D {
    let moved = position + velocity * dt;
    wrap(moved, bounds)
}

/// Applies [`wrap_axis`] on both axes.
pub fn wrap(position: Vector2D, bounds: &WorldBounds) -> Vector2D {
    Vector2D::new(
        wrap_axis(position.x, bounds.width(), bounds.slop()),
        wrap_axis(position.y, bounds.height(), bounds.slop()),
    )
}
