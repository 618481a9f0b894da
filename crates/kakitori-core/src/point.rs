//! Point - 2D coordinate pair
//!
//! Strokes are usually normalized to the unit square, but nothing here
//! depends on that.

use std::f64::consts::{PI, TAU};

/// A point in stroke space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate (grows to the right)
    pub x: f64,
    /// Y coordinate (grows downward)
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Direction from this point to `other`, in `[0, 2π)`.
    #[inline]
    pub fn angle_to(&self, other: Point) -> f64 {
        normalize_angle((other.y - self.y).atan2(other.x - self.x))
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Distance from this point to the segment `a`-`b`.
    ///
    /// The projection is clamped to the segment, so points beyond either end
    /// measure their distance to the nearer endpoint.
    pub fn distance_to_segment(&self, a: Point, b: Point) -> f64 {
        let vx = b.x - a.x;
        let vy = b.y - a.y;
        let len2 = vx * vx + vy * vy;
        if len2 <= 0.0 {
            return self.distance(a);
        }
        let t = (((self.x - a.x) * vx + (self.y - a.y) * vy) / len2).clamp(0.0, 1.0);
        self.distance(a.lerp(b, t))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Map any angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Unsigned difference between two directions, in `[0, π]`.
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).abs().rem_euclid(TAU);
    d.min(TAU - d)
}

/// Signed turn from direction `from` to direction `to`, in `(-π, π]`.
#[inline]
pub fn signed_turn(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}
