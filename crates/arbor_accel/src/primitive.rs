//! Primitive trait and the flat brute-force primitive list.

use crate::{Ray, Trace};
use arbor_math::Aabb;
use std::sync::Arc;

/// Anything a ray can hit and a bounding box can enclose.
///
/// Implementations are the authority on distance bounds: `hit` must only
/// report intersections whose distance lies inside `ray.dist_bounds`. The
/// BVH does not re-validate reported distances.
pub trait Primitive: Send + Sync {
    /// Get the axis-aligned bounding box of this object.
    fn bbox(&self) -> Aabb;

    /// Intersect the ray, returning the nearest hit within its bounds.
    fn hit(&self, ray: &Ray) -> Trace;
}

impl<P: Primitive + ?Sized> Primitive for Box<P> {
    fn bbox(&self) -> Aabb {
        (**self).bbox()
    }

    fn hit(&self, ray: &Ray) -> Trace {
        (**self).hit(ray)
    }
}

impl<P: Primitive + ?Sized> Primitive for Arc<P> {
    fn bbox(&self) -> Aabb {
        (**self).bbox()
    }

    fn hit(&self, ray: &Ray) -> Trace {
        (**self).hit(ray)
    }
}

/// A list of primitives tested one by one.
///
/// This is the linear-time reference that BVH traversal must agree with.
#[derive(Debug, Clone)]
pub struct PrimitiveList<P> {
    primitives: Vec<P>,
    bbox: Aabb,
}

impl<P: Primitive> PrimitiveList<P> {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add a primitive to the list.
    pub fn add(&mut self, primitive: P) {
        self.bbox.enclose(&primitive.bbox());
        self.primitives.push(primitive);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn as_slice(&self) -> &[P] {
        &self.primitives
    }

    pub fn into_vec(self) -> Vec<P> {
        self.primitives
    }
}

impl<P: Primitive> Default for PrimitiveList<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Primitive> FromIterator<P> for PrimitiveList<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut list = Self::new();
        for primitive in iter {
            list.add(primitive);
        }
        list
    }
}

impl<P: Primitive> Primitive for PrimitiveList<P> {
    fn bbox(&self) -> Aabb {
        self.bbox
    }

    fn hit(&self, ray: &Ray) -> Trace {
        let mut best = Trace::miss();
        for primitive in &self.primitives {
            let trace = primitive.hit(ray);
            if trace.is_closer_than(&best) {
                best = trace;
            }
        }
        best
    }
}
