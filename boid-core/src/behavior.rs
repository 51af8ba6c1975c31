//! Steering vectors and their weighted composition.

use crate::config::FlockConfig;
use crate::entity::{Attractor, Boid, Collidable};
use crate::math;
use crate::vector::Vector2D;

/// Smallest gap used as a separation divisor.
pub const SEPARATION_EPSILON: f32 = 1e-3;

/// The five raw steering vectors for one boid in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub cohesion: Vector2D,
    pub alignment: Vector2D,
    pub boid_avoidance: Vector2D,
    pub obstacle_avoidance: Vector2D,
    pub attraction: Vector2D,
}

impl Steering {
    /// Weighted sum of the five vectors.
    pub fn velocity_delta(&self, config: &FlockConfig) -> Vector2D {
        self.cohesion * config.cohesion_weight
            + self.alignment * config.alignment_weight
            + self.boid_avoidance * config.boid_avoidance_weight
            + self.obstacle_avoidance * config.obstacle_avoidance_weight
            + self.attraction * config.attraction_weight
    }
}

/// Offset from the boid to the mean position of its neighbours.
pub fn cohesion(boid: &Boid, neighbors: &[&Boid]) -> Vector2D {
    if neighbors.is_empty() {
        return Vector2D::zero();
    }
    let center: Vector2D = neighbors.iter().map(|n| n.position).sum();
    center / neighbors.len() as f32 - boid.position
}

/// Difference between the neighbours' mean velocity and the boid's own.
pub fn alignment(boid: &Boid, neighbors: &[&Boid]) -> Vector2D {
    if neighbors.is_empty() {
        return Vector2D::zero();
    }
    let heading: Vector2D = neighbors.iter().map(|n| n.velocity).sum();
    heading / neighbors.len() as f32 - boid.velocity
}

/// Push away from every object whose gap `distance - boid.size` is at most
/// `collision_distance`, weighted by the inverse square of that gap, then
/// capped at `max_magnitude`.
///
/// Gaps closer to zero than [`SEPARATION_EPSILON`] are replaced by it.
pub fn separation<'a, C, I>(
    boid: &Boid,
    others: I,
    collision_distance: f32,
    max_magnitude: f32,
) -> Vector2D
where
    C: Collidable + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut push = Vector2D::zero();
    for other in others {
        let diff = other.position() - boid.position;
        let gap = diff.magnitude() - boid.radius();
        if gap > collision_distance {
            continue;
        }
        let gap = if math::abs(gap) < SEPARATION_EPSILON {
            SEPARATION_EPSILON
        } else {
            gap
        };
        push -= diff / (gap * gap);
    }
    push.limit(max_magnitude)
}

/// Sum of offsets to every attractor. Not normalised, so the pull grows with
/// distance.
pub fn attraction(boid: &Boid, attractors: &[Attractor]) -> Vector2D {
    attractors
        .iter()
        .map(|a| a.position - boid.position)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Color, Obstacle};

    fn boid(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::new(vx, vy))
    }

    #[test]
    fn test_cohesion_points_at_centre() {
        let me = boid(0.0, 0.0, 1.0, 0.0);
        let a = boid(10.0, 0.0, 0.0, 0.0);
        let b = boid(10.0, 20.0, 0.0, 0.0);
        assert_eq!(cohesion(&me, &[&a, &b]), Vector2D::new(10.0, 10.0));
    }

    #[test]
    fn test_alignment_relative_to_own_velocity() {
        let me = boid(0.0, 0.0, 1.0, 0.0);
        let a = boid(0.0, 0.0, 3.0, 2.0);
        let b = boid(0.0, 0.0, 5.0, -2.0);
        assert_eq!(alignment(&me, &[&a, &b]), Vector2D::new(3.0, 0.0));
    }

    #[test]
    fn test_empty_neighbourhood_is_zero() {
        let me = boid(3.0, 4.0, 1.0, 0.0);
        assert_eq!(cohesion(&me, &[]), Vector2D::zero());
        assert_eq!(alignment(&me, &[]), Vector2D::zero());
        assert_eq!(attraction(&me, &[]), Vector2D::zero());
    }

    #[test]
    fn test_separation_pushes_away() {
        let me = boid(0.0, 0.0, 1.0, 0.0).with_appearance(Color::WHITE, 5.0);
        let other = boid(15.0, 0.0, 0.0, 0.0);
        // gap = 15 - 5 = 10, push = -(15, 0) / 100
        let push = separation(&me, [&other], 45.0, 10.0);
        assert!((push.x + 0.15).abs() < 1e-6);
        assert_eq!(push.y, 0.0);
    }

    #[test]
    fn test_separation_ignores_far_objects() {
        let me = boid(0.0, 0.0, 1.0, 0.0).with_appearance(Color::WHITE, 5.0);
        let other = boid(100.0, 0.0, 0.0, 0.0);
        assert_eq!(separation(&me, [&other], 45.0, 10.0), Vector2D::zero());
    }

    #[test]
    fn test_separation_is_capped() {
        let me = boid(0.0, 0.0, 1.0, 0.0).with_appearance(Color::WHITE, 5.0);
        let other = boid(6.0, 0.0, 0.0, 0.0);
        let push = separation(&me, [&other], 45.0, 1.0);
        assert!((push.magnitude() - 1.0).abs() < 1e-5);
        assert!(push.x < 0.0);
    }

    #[test]
    fn test_separation_gap_equal_to_size_stays_finite() {
        let me = boid(0.0, 0.0, 1.0, 0.0).with_appearance(Color::WHITE, 5.0);
        let touching = boid(5.0, 0.0, 0.0, 0.0);
        let push = separation(&me, [&touching], 45.0, 1.0e9);
        assert!(push.is_finite());
        assert!(push.x < 0.0);
    }

    #[test]
    fn test_separation_coincident_contributes_nothing() {
        let me = boid(2.0, 2.0, 1.0, 0.0).with_appearance(Color::WHITE, 0.0);
        let same = boid(2.0, 2.0, 0.0, 0.0);
        let push = separation(&me, [&same], 45.0, 1.0);
        assert_eq!(push, Vector2D::zero());
    }

    #[test]
    fn test_symmetric_neighbours_cancel() {
        let me = boid(0.0, 0.0, 1.0, 0.0).with_appearance(Color::WHITE, 2.0);
        let left = boid(-10.0, 0.0, 0.0, 0.0);
        let right = boid(10.0, 0.0, 0.0, 0.0);
        let push = separation(&me, [&left, &right], 45.0, 100.0);
        assert!(push.magnitude() < 1e-6);
    }

    #[test]
    fn test_obstacle_separation_uses_same_rule() {
        let me = boid(0.0, 0.0, 1.0, 0.0).with_appearance(Color::WHITE, 5.0);
        let obstacles = [Obstacle::new(Vector2D::new(0.0, 25.0), 40.0)];
        let push = separation(&me, obstacles.iter(), 250.0, 1.0);
        // gap = 25 - 5 = 20, push = -(0, 25) / 400
        assert!((push.y + 25.0 / 400.0).abs() < 1e-6);
    }

    #[test]
    fn test_attraction_grows_with_distance() {
        let me = boid(0.0, 0.0, 1.0, 0.0);
        let near = [Attractor::new(Vector2D::new(10.0, 0.0), 1.0)];
        let far = [Attractor::new(Vector2D::new(500.0, 0.0), 1.0)];
        assert_eq!(attraction(&me, &near), Vector2D::new(10.0, 0.0));
        assert_eq!(attraction(&me, &far), Vector2D::new(500.0, 0.0));
    }

    #[test]
    fn test_velocity_delta_weights() {
        let config = FlockConfig {
            cohesion_weight: 1.0,
            alignment_weight: 2.0,
            boid_avoidance_weight: 3.0,
            obstacle_avoidance_weight: 4.0,
            attraction_weight: 5.0,
            ..FlockConfig::default()
        };
        let unit = Vector2D::new(1.0, 0.0);
        let steering = Steering {
            cohesion: unit,
            alignment: unit,
            boid_avoidance: unit,
            obstacle_avoidance: unit,
            attraction: unit,
        };
        assert_eq!(steering.velocity_delta(&config), Vector2D::new(15.0, 0.0));
    }
}
