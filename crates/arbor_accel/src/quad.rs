//! Parallelogram primitive: a corner `q` and two edge vectors `u`, `v`.

use crate::{Primitive, Ray, Trace};
use arbor_math::{Aabb, Vec2, Vec3};

/// A flat quadrilateral spanning `q`, `q + u`, `q + u + v`, `q + v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    /// Unit plane normal
    normal: Vec3,
    /// Plane offset, `normal . p = d` for points on the plane
    d: f32,
    /// `n / (n . n)` with `n = u x v`, used to recover planar coordinates
    w: Vec3,
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Vec3, u: Vec3, v: Vec3) -> Self {
        let n = u.cross(v);
        let normal = n.normalize_or_zero();
        let n_sq = n.length_squared();
        let w = if n_sq > 0.0 { n / n_sq } else { Vec3::ZERO };

        // Box of both diagonals; from_points pads the flat axis
        let diagonal_a = Aabb::from_points(q, q + u + v);
        let diagonal_b = Aabb::from_points(q + u, q + v);

        Self {
            q,
            u,
            v,
            normal,
            d: normal.dot(q),
            w,
            bbox: Aabb::surrounding(&diagonal_a, &diagonal_b),
        }
    }

    pub fn corner(&self) -> Vec3 {
        self.q
    }
}

impl Primitive for Quad {
    fn bbox(&self) -> Aabb {
        self.bbox
    }

    fn hit(&self, ray: &Ray) -> Trace {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return Trace::miss();
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray.dist_bounds.contains(t) {
            return Trace::miss();
        }

        // Planar coordinates of the hit point in the (u, v) frame
        let planar = ray.at(t) - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));
        if !(0.0..=1.0).contains(&alpha) || !(0.0..=1.0).contains(&beta) {
            return Trace::miss();
        }

        Trace::new_hit(ray, t, self.normal, Vec2::new(alpha, beta))
    }
}
