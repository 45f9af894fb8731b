use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point on the table surface. Serialized as `[x, y]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_sq(self, other: Point2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Angle of the vector from `self` to `other`, in degrees.
    pub fn direction_deg(self, other: Point2) -> f32 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<[f32; 2]> for Point2 {
    fn from(value: [f32; 2]) -> Self {
        Point2::new(value[0], value[1])
    }
}

impl From<Point2> for [f32; 2] {
    fn from(value: Point2) -> Self {
        [value.x, value.y]
    }
}

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point2::new(3.0, 4.0);
        let b = Point2::new(1.0, 1.0);
        assert_eq!(a - b, Point2::new(2.0, 3.0));
        assert_eq!(a + b, Point2::new(4.0, 5.0));
        assert_eq!(Point2::ZERO.distance_sq(a), 25.0);
        assert!((a - a).is_zero());
    }

    #[test]
    fn direction_points_along_x_axis() {
        let origin = Point2::ZERO;
        assert_eq!(origin.direction_deg(Point2::new(10.0, 0.0)), 0.0);
        assert!((origin.direction_deg(Point2::new(0.0, 10.0)) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn serializes_as_pair() {
        let json = serde_json::to_string(&Point2::new(1.5, -2.0)).expect("encode");
        assert_eq!(json, "[1.5,-2.0]");
        let back: Point2 = serde_json::from_str("[3,4]").expect("decode");
        assert_eq!(back, Point2::new(3.0, 4.0));
    }
}
