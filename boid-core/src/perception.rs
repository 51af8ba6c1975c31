//! Which boids a given boid can see.
//!
//! A candidate is perceived when it is within `range` of the observer and the
//! bearing to it lies within `view_angle` degrees of the observer's heading.

use alloc::vec::Vec;

use crate::entity::Boid;
use crate::vector::Vector2D;

/// Visibility test for a single point.
///
/// An observer with zero velocity has no heading and sees nothing. A point
/// coincident with the observer has no bearing and is not seen either.
pub fn is_visible(observer: &Boid, point: Vector2D, range: f32, view_angle: f32) -> bool {
    if observer.velocity.is_zero() {
        return false;
    }
    let offset = point - observer.position;
    if offset.magnitude() > range {
        return false;
    }
    match observer.velocity.angle_between(&offset) {
        Some(angle) => angle <= view_angle,
        None => false,
    }
}

/// Indices of the boids in `candidates` that `boids[index]` perceives.
///
/// The observer itself is skipped by index. Output order follows `candidates`.
pub fn nearby<I>(index: usize, boids: &[Boid], candidates: I, range: f32, view_angle: f32) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
{
    let observer = &boids[index];
    if observer.velocity.is_zero() {
        return Vec::new();
    }
    candidates
        .into_iter()
        .filter(|&other| other != index)
        .filter(|&other| is_visible(observer, boids[other].position, range, view_angle))
        .collect()
}

/// Brute-force variant scanning the whole population.
pub fn nearby_all(index: usize, boids: &[Boid], range: f32, view_angle: f32) -> Vec<usize> {
    nearby(index, boids, 0..boids.len(), range, view_angle)
}
