//! Closed set of scene primitives, including nested hierarchies.

use crate::{Bvh, Primitive, Quad, Ray, Sphere, Trace, Triangle};
use arbor_math::Aabb;

/// Any primitive a scene can hold.
///
/// A `Nested` shape is a whole BVH treated as one primitive, so an object
/// with its own hierarchy can be placed inside a scene-level tree.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Quad(Quad),
    Triangle(Triangle),
    Nested(Bvh<Shape>),
}

impl Primitive for Shape {
    fn bbox(&self) -> Aabb {
        match self {
            Shape::Sphere(sphere) => sphere.bbox(),
            Shape::Quad(quad) => quad.bbox(),
            Shape::Triangle(triangle) => triangle.bbox(),
            Shape::Nested(bvh) => Primitive::bbox(bvh),
        }
    }

    fn hit(&self, ray: &Ray) -> Trace {
        match self {
            Shape::Sphere(sphere) => sphere.hit(ray),
            Shape::Quad(quad) => quad.hit(ray),
            Shape::Triangle(triangle) => triangle.hit(ray),
            Shape::Nested(bvh) => bvh.hit(ray),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Quad> for Shape {
    fn from(quad: Quad) -> Self {
        Shape::Quad(quad)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Bvh<Shape>> for Shape {
    fn from(bvh: Bvh<Shape>) -> Self {
        Shape::Nested(bvh)
    }
}
