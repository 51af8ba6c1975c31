use crate::math;

/// A 2D vector used for position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean length; finite for any finite components.
    pub fn magnitude(&self) -> f32 {
        math::hypot(self.x, self.y)
    }

    pub fn dot(&self, other: &Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    pub fn normalize(&self) -> Self {
        // scale down first so components near f32::MAX keep their direction
        let scale = math::abs(self.x).max(math::abs(self.y));
        if scale == 0.0 {
            return Self::zero();
        }
        let unit = *self / scale;
        unit / unit.magnitude()
    }

    /// Angle between two vectors in degrees, within `[0, 180]`.
    ///
    /// Returns `None` when either vector has zero length, since no bearing
    /// exists for it.
    pub fn angle_between(&self, other: &Vector2D) -> Option<f32> {
        if self.is_zero() || other.is_zero() {
            return None;
        }
        let cos = self.normalize().dot(&other.normalize()).clamp(-1.0, 1.0);
        Some(math::acos(cos).to_degrees())
    }

    /// Clamps the magnitude into `[min, max]`.
    ///
    /// A zero vector has no direction to scale along and is returned as is,
    /// even when `min > 0`.
    pub fn limit_magnitude(&self, max: f32, min: f32) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            *self
        } else if mag > max {
            self.normalize() * max
        } else if mag < min {
            self.normalize() * min
        } else {
            *self
        }
    }

    /// Ceiling-only clamp.
    pub fn limit(&self, max: f32) -> Self {
        self.limit_magnitude(max, 0.0)
    }

    /// Facing angle in degrees measured clockwise from +y, as `atan2(x, y)`.
    pub fn heading_degrees(&self) -> f32 {
        math::atan2(self.x, self.y).to_degrees()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl core::iter::Sum for Vector2D {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_vector2d_dot() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(3.0, -4.0);
        assert_eq!(a.dot(&b), -5.0);
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        assert_eq!(v1 + v2, Vector2D::new(4.0, 6.0));
        assert_eq!(v2 - v1, Vector2D::new(2.0, 2.0));
        assert_eq!(v1 * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(-v1, Vector2D::new(-1.0, -2.0));

        let total: Vector2D = [v1, v2, v1].into_iter().sum();
        assert_eq!(total, Vector2D::new(5.0, 8.0));
    }

    #[test]
    fn test_angle_between() {
        let x = Vector2D::new(1.0, 0.0);
        assert!(approx(x.angle_between(&Vector2D::new(0.0, 5.0)).unwrap(), 90.0));
        assert!(approx(x.angle_between(&Vector2D::new(-2.0, 0.0)).unwrap(), 180.0));
        assert!(approx(x.angle_between(&Vector2D::new(7.0, 0.0)).unwrap(), 0.0));
    }

    #[test]
    fn test_angle_between_zero_vector_is_none() {
        let x = Vector2D::new(1.0, 0.0);
        assert_eq!(x.angle_between(&Vector2D::zero()), None);
        assert_eq!(Vector2D::zero().angle_between(&x), None);
    }

    #[test]
    fn test_angle_between_parallel_never_nan() {
        let a = Vector2D::new(0.1, 0.3);
        let angle = a.angle_between(&(a * 3.0)).unwrap();
        assert!(angle.is_finite());
        assert!(approx(angle, 0.0));
    }

    #[test]
    fn test_limit_magnitude_ceiling_and_floor() {
        let fast = Vector2D::new(30.0, 40.0).limit_magnitude(10.0, 2.0);
        assert!(approx(fast.magnitude(), 10.0));
        assert!(approx(fast.x, 6.0));

        let slow = Vector2D::new(0.3, 0.4).limit_magnitude(10.0, 2.0);
        assert!(approx(slow.magnitude(), 2.0));

        let within = Vector2D::new(3.0, 4.0);
        assert_eq!(within.limit_magnitude(10.0, 2.0), within);
    }

    #[test]
    fn test_magnitude_does_not_overflow() {
        let v = Vector2D::new(2e38, 2e38);
        let mag = v.magnitude();
        assert!(mag.is_finite());
        assert!((mag / 2.828_427e38 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_limit_magnitude_huge_components_keep_direction() {
        let v = Vector2D::new(3e38, 3e38).limit_magnitude(150.0, 2.0);
        assert!(approx(v.magnitude(), 150.0));
        assert!(approx(v.x, v.y));

        let back = Vector2D::new(-f32::MAX, 0.0).limit_magnitude(10.0, 0.0);
        assert_eq!(back, Vector2D::new(-10.0, 0.0));
    }

    #[test]
    fn test_angle_between_huge_vectors() {
        let a = Vector2D::new(3e38, 3e38);
        let b = Vector2D::new(-3e38, 3e38);
        assert!(approx(a.angle_between(&b).unwrap(), 90.0));
    }

    #[test]
    fn test_limit_magnitude_leaves_zero_vector() {
        assert_eq!(Vector2D::zero().limit_magnitude(10.0, 2.0), Vector2D::zero());
    }

    #[test]
    fn test_heading_degrees() {
        assert!(approx(Vector2D::new(0.0, 1.0).heading_degrees(), 0.0));
        assert!(approx(Vector2D::new(1.0, 0.0).heading_degrees(), 90.0));
        assert!(approx(Vector2D::new(0.0, -1.0).heading_degrees(), 180.0));
    }
}
