//! Sphere primitive for ray tracing.

use crate::{Primitive, Ray, Trace};
use arbor_math::{Aabb, Vec2, Vec3};
use std::f32::consts::PI;

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    ///
    /// A zero-radius sphere has no surface and is never hit.
    pub fn new(center: Vec3, radius: f32) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> Vec2 {
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        Vec2::new(phi / (2.0 * PI), theta / PI)
    }
}

impl Primitive for Sphere {
    fn bbox(&self) -> Aabb {
        self.bbox
    }

    fn hit(&self, ray: &Ray) -> Trace {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 || a == 0.0 || self.radius <= 0.0 {
            return Trace::miss();
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root inside the bounds, else the far root
        let mut root = (h - sqrtd) / a;
        if !ray.dist_bounds.contains(root) {
            root = (h + sqrtd) / a;
            if !ray.dist_bounds.contains(root) {
                return Trace::miss();
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Trace::new_hit(ray, root, outward_normal, Self::get_sphere_uv(outward_normal))
    }
}
