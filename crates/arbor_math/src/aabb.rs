use crate::{Interval, Ray, Vec3};

/// Minimum slab thickness for boxes that bound geometry.
///
/// Flat primitives (quads, axis-aligned triangles) would otherwise produce
/// zero-width slabs that rays parallel to the plane can slip through.
pub const PAD_DELTA: f32 = 0.0001;

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// [`Aabb::EMPTY`] is the identity for [`Aabb::surrounding`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals, padded to [`PAD_DELTA`].
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }.pad(PAD_DELTA)
    }

    /// Create an AABB from two corner points, padded to [`PAD_DELTA`].
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        Self { x, y, z }.pad(PAD_DELTA)
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Grow this box to also enclose `other`.
    pub fn enclose(&mut self, other: &Aabb) {
        *self = Aabb::surrounding(self, other);
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// True if any axis is empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// True if every bound is a finite number (no NaN, no infinities).
    pub fn is_finite(&self) -> bool {
        self.min().is_finite() && self.max().is_finite()
    }

    /// Slab test returning the clipped parametric range `[t_enter, t_exit]`.
    ///
    /// `ray_t` is the range to clip against; the ray's own `dist_bounds` is
    /// not consulted. Returns `None` when the ray misses the box inside `ray_t`.
    pub fn hit_times(&self, r: &Ray, mut ray_t: Interval) -> Option<Interval> {
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];
            let mut t0 = (slab.min - r.origin[axis]) * adinv;
            let mut t1 = (slab.max - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // f32::max/min drop a NaN operand, so an origin lying exactly on a
            // slab plane of a parallel ray keeps the previous bound.
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            // Touching ranges still count, a thin slab can round to t0 == t1
            if ray_t.max < ray_t.min {
                return None;
            }
        }

        Some(ray_t)
    }

    /// Test if a ray intersects this AABB within the given interval.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        self.hit_times(r, ray_t).is_some()
    }

    /// Pad intervals thinner than `delta` by `delta / 2` on each side.
    ///
    /// Far from the origin `delta / 2` can be smaller than one ulp, so the
    /// padding grows with the magnitude of the bounds. A padded interval always
    /// has `min < max`.
    pub fn pad(&self, delta: f32) -> Aabb {
        let pad_axis = |i: Interval| {
            if i.is_empty() || i.size() >= delta {
                return i;
            }
            let magnitude = i.min.abs().max(i.max.abs());
            let half = (delta / 2.0).max(magnitude * 2.0 * f32::EPSILON);
            i.expand(2.0 * half)
        };
        Aabb {
            x: pad_axis(self.x),
            y: pad_axis(self.y),
            z: pad_axis(self.z),
        }
    }

    /// Surface area `2 (dx dy + dy dz + dz dx)`.
    ///
    /// An empty box has zero area so that it adds nothing to a split cost.
    pub fn surface_area(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let (dx, dy, dz) = (self.x.size(), self.y.size(), self.z.size());
        2.0 * (dx * dy + dy * dz + dz * dx)
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(
            self.x.add_scalar(offset.x),
            self.y.add_scalar(offset.y),
            self.z.add_scalar(offset.z),
        )
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size > y_size && x_size > z_size {
            0
        } else if y_size > z_size {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// True if `other` lies entirely inside this box. Every box encloses `EMPTY`.
    pub fn encloses(&self, other: &Aabb) -> bool {
        if other.is_empty() {
            return true;
        }
        (0..3).all(|axis| {
            let outer = self.axis_interval(axis);
            let inner = other.axis_interval(axis);
            outer.min <= inner.min && inner.max <= outer.max
        })
    }

    pub fn contains(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Static constants
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let a = Vec3::new(10.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 10.0, 10.0);
        let aabb = Aabb::from_points(a, b);

        assert_eq!(aabb.x.min, 0.0);
        assert_eq!(aabb.x.max, 10.0);
        assert_eq!(aabb.y.min, 0.0);
        assert_eq!(aabb.z.max, 10.0);
    }

    #[test]
    fn test_aabb_pads_flat_axis() {
        // A quad lying in the z = 2 plane
        let aabb = Aabb::from_points(Vec3::new(0.0, 0.0, 2.0), Vec3::new(1.0, 1.0, 2.0));

        assert!((aabb.z.size() - PAD_DELTA).abs() < 1e-6);
        assert!((aabb.z.min - (2.0 - PAD_DELTA / 2.0)).abs() < 1e-6);
        assert_eq!(aabb.x.size(), 1.0);
    }

    #[test]
    fn test_aabb_pad_far_from_origin() {
        for z in [-2000.0, -1.0e5, 3.0e6] {
            let aabb = Aabb::from_points(Vec3::new(-5.0, -5.0, z), Vec3::new(5.0, 5.0, z));
            assert!(aabb.z.min < z && z < aabb.z.max, "flat slab at z={z}");

            let ray = Ray::new(Vec3::new(0.3, 0.2, 0.0), Vec3::new(0.0, 0.0, z.signum()));
            assert!(aabb.hit(&ray, Interval::new(f32::MIN_POSITIVE, f32::MAX)), "z={z}");
        }
    }

    #[test]
    fn test_aabb_hit_accepts_zero_thickness_slab() {
        let slab = Aabb {
            x: Interval::new(-1.0, 1.0),
            y: Interval::new(-1.0, 1.0),
            z: Interval::new(-3.0, -3.0),
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let times = slab.hit_times(&ray, Interval::new(0.0, f32::MAX));
        assert_eq!(times, Some(Interval::new(3.0, 3.0)));
    }

    #[test]
    fn test_aabb_enclose_grows_in_place() {
        let mut bbox = Aabb::EMPTY;
        bbox.enclose(&Aabb::from_points(Vec3::ZERO, Vec3::ONE));
        bbox.enclose(&Aabb::from_points(Vec3::new(-2.0, 0.5, 0.5), Vec3::new(-1.0, 3.0, 0.5)));

        assert_eq!(bbox.min(), Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(bbox.max(), Vec3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.x.min, 0.0);
        assert_eq!(surrounding.x.max, 10.0);
        assert!(surrounding.encloses(&box1));
        assert!(surrounding.encloses(&box2));
    }

    #[test]
    fn test_aabb_empty_is_union_identity() {
        let b = Aabb::from_points(Vec3::new(-1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &b), b);
        assert!(Aabb::EMPTY.is_empty());
        assert_eq!(Aabb::EMPTY.surface_area(), 0.0);
    }

    #[test]
    fn test_aabb_surface_area() {
        let unit = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        assert_eq!(unit.surface_area(), 6.0);

        let slab = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(slab.surface_area(), 2.0 * (6.0 + 12.0 + 8.0));
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_hit_times() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 2.0));

        let times = aabb
            .hit_times(&ray, Interval::new(0.0, f32::MAX))
            .expect("ray should enter the box");
        assert!((times.min - 2.0).abs() < 1e-6);
        assert!((times.max - 3.0).abs() < 1e-6);

        // Clipped interval ends before the box starts
        assert!(aabb.hit_times(&ray, Interval::new(0.0, 1.5)).is_none());
    }

    #[test]
    fn test_aabb_hit_from_inside() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.2, 1.0));

        let times = aabb
            .hit_times(&ray, Interval::new(f32::MIN_POSITIVE, f32::MAX))
            .expect("origin is inside the box");
        assert_eq!(times.min, f32::MIN_POSITIVE);
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(aabb.centroid(), Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_aabb_longest_axis() {
        let aabb_x = Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0));
        assert_eq!(aabb_x.longest_axis(), 0);

        let aabb_y = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0));
        assert_eq!(aabb_y.longest_axis(), 1);

        let aabb_z = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0));
        assert_eq!(aabb_z.longest_axis(), 2);
    }

    #[test]
    fn test_aabb_is_finite() {
        let good = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        assert!(good.is_finite());

        let nan = Aabb {
            x: Interval::new(f32::NAN, 1.0),
            ..good
        };
        assert!(!nan.is_finite());
        assert!(!Aabb::EMPTY.is_finite());
    }

    #[test]
    fn test_aabb_translate() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let translated = aabb.translate(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(translated.x.min, 5.0);
        assert_eq!(translated.x.max, 6.0);
        assert_eq!(translated.y.min, 0.0);
    }
}
