use crate::{Interval, Vec3};

/// A ray in 3D space with origin, direction, and a valid distance range.
///
/// Points along the ray are `origin + t * direction`. Intersections are only
/// meaningful for `t` inside `dist_bounds`; primitives use it to reject
/// self-intersections and hits beyond an already known closer surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub dist_bounds: Interval,
}

impl Ray {
    /// Create a new ray covering all non-negative distances.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            dist_bounds: Interval::FORWARD,
        }
    }

    /// Replace the valid distance range.
    pub fn with_bounds(self, dist_bounds: Interval) -> Self {
        Self {
            dist_bounds,
            ..self
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray (not necessarily normalized).
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}
