//! Minimal 3D vector used for node positions, velocities and forces.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point or direction in layout space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Overwrite all three components.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Squared Euclidean length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Vector3) -> f64 {
        (self - other).length_squared()
    }

    /// Distance to `other`.
    #[inline]
    pub fn distance(self, other: Vector3) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Clamp the vector to at most `max_length`, keeping its direction.
    pub fn limit(self, max_length: f64) -> Vector3 {
        let length_squared = self.length_squared();
        if length_squared > max_length * max_length {
            self * (max_length / length_squared.sqrt())
        } else {
            self
        }
    }

    /// Narrowed copy for GPU/JS buffers.
    #[inline]
    pub fn to_f32_array(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }

    /// Components as `[x, y, z]`.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Vector3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    #[inline]
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<f64> for Vector3 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn div(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    #[inline]
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -1.0, 0.5);

        assert_eq!(a + b, Vector3::new(5.0, 1.0, 3.5));
        assert_eq!(a - b, Vector3::new(-3.0, 3.0, 2.5));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a / 2.0, Vector3::new(0.5, 1.0, 1.5));

        let mut c = a;
        c += b;
        c -= b;
        assert_eq!(c, a);
        c *= 0.0;
        assert_eq!(c, Vector3::ZERO);
    }

    #[test]
    fn test_distance_squared_matches_distance() {
        let pairs = [
            (Vector3::new(0.0, 0.0, 0.0), Vector3::new(3.0, 4.0, 0.0)),
            (Vector3::new(-1.5, 2.0, 7.0), Vector3::new(0.25, -3.0, 1.0)),
            (Vector3::new(10.0, 10.0, 10.0), Vector3::new(10.0, 10.0, 10.0)),
        ];
        for (p, q) in pairs {
            let d = p.distance(q);
            assert!((p.distance_squared(q) - d * d).abs() < 1e-9);
        }
        assert_eq!(pairs[0].0.distance(pairs[0].1), 5.0);
    }

    #[test]
    fn test_limit() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        let limited = v.limit(1.0);
        assert!((limited.length() - 1.0).abs() < 1e-12);
        assert!((limited.x - 0.6).abs() < 1e-12);

        // Short vectors pass through untouched
        assert_eq!(v.limit(10.0), v);
        assert_eq!(Vector3::ZERO.limit(0.0), Vector3::ZERO);
    }

    #[test]
    fn test_set_and_display() {
        let mut v = Vector3::ZERO;
        v.set(1.0, -2.0, 0.5);
        assert_eq!(v, Vector3::from([1.0, -2.0, 0.5]));
        assert_eq!(format!("{v}"), "(1, -2, 0.5)");
        assert_eq!(v.to_f32_array(), [1.0f32, -2.0, 0.5]);
    }
}
