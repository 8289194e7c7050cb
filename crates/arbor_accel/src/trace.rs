//! Trace: the result of a ray query against a primitive or a whole scene.

use crate::Ray;
use arbor_math::{Vec2, Vec3};

/// Record of a ray-surface intersection, or of a miss.
///
/// A fresh `Trace` is a miss at infinite distance, so any real hit compares
/// closer. Traversal keeps one of these on the stack and overwrites it each
/// time a closer hit is reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    /// Whether anything was hit
    pub hit: bool,
    /// Ray parameter of the hit (`+inf` on a miss)
    pub distance: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// UV surface coordinates
    pub uv: Vec2,
    /// Origin of the ray that produced this trace
    pub origin: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl Trace {
    /// A miss at infinite distance.
    pub const MISS: Trace = Trace {
        hit: false,
        distance: f32::INFINITY,
        position: Vec3::ZERO,
        normal: Vec3::ZERO,
        uv: Vec2::ZERO,
        origin: Vec3::ZERO,
        front_face: false,
    };

    pub fn miss() -> Self {
        Self::MISS
    }

    /// A hit at ray parameter `distance`, oriented against the ray.
    pub fn new_hit(ray: &Ray, distance: f32, outward_normal: Vec3, uv: Vec2) -> Self {
        let mut trace = Trace {
            hit: true,
            distance,
            position: ray.at(distance),
            normal: outward_normal,
            uv,
            origin: ray.origin(),
            front_face: true,
        };
        trace.set_face_normal(ray, outward_normal);
        trace
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }

    /// True if this is a hit strictly closer than `other`.
    #[inline]
    pub fn is_closer_than(&self, other: &Trace) -> bool {
        self.hit && self.distance < other.distance
    }

    /// `Some(self)` on a hit.
    pub fn into_hit(self) -> Option<Trace> {
        self.hit.then_some(self)
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::MISS
    }
}
