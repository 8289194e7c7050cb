//! Closest-hit and any-hit BVH queries.
//!
//! Closest-hit traversal is branch and bound: a subtree is skipped when the
//! ray misses its box or enters it beyond the best hit found so far, and the
//! nearer child is always descended first so the bound tightens early.

use crate::bvh::{Bvh, NodeKind};
use crate::{Primitive, Ray, Trace};
use arbor_math::Interval;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Parametric range used for node box tests.
///
/// The ray's own `dist_bounds` are left to the primitives; boxes only prune
/// against the running best distance.
const NODE_T_RANGE: Interval = Interval::new(f32::MIN_POSITIVE, f32::MAX);

/// Work counters for one or more traversals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes entered, including those pruned by their own box test
    pub nodes_visited: usize,
    /// Ray/box slab tests performed
    pub box_tests: usize,
    /// Primitive `hit` calls made from leaves
    pub primitive_tests: usize,
}

impl Add for TraversalStats {
    type Output = TraversalStats;

    fn add(self, rhs: TraversalStats) -> TraversalStats {
        TraversalStats {
            nodes_visited: self.nodes_visited + rhs.nodes_visited,
            box_tests: self.box_tests + rhs.box_tests,
            primitive_tests: self.primitive_tests + rhs.primitive_tests,
        }
    }
}

impl AddAssign for TraversalStats {
    fn add_assign(&mut self, rhs: TraversalStats) {
        *self = *self + rhs;
    }
}

impl Sum for TraversalStats {
    fn sum<I: Iterator<Item = TraversalStats>>(iter: I) -> Self {
        iter.fold(TraversalStats::default(), Add::add)
    }
}

impl<P: Primitive> Bvh<P> {
    /// Closest hit along `ray`, or a miss.
    pub fn hit(&self, ray: &Ray) -> Trace {
        self.hit_with_stats(ray).0
    }

    /// Closest hit along `ray` together with the work it took to find it.
    pub fn hit_with_stats(&self, ray: &Ray) -> (Trace, TraversalStats) {
        let mut best = Trace::miss();
        let mut stats = TraversalStats::default();
        self.visit(self.root, ray, &mut best, &mut stats);
        (best, stats)
    }

    fn visit(&self, idx: usize, ray: &Ray, best: &mut Trace, stats: &mut TraversalStats) {
        let Some(node) = self.nodes.get(idx) else {
            return;
        };
        stats.nodes_visited += 1;
        stats.box_tests += 1;

        match node.bbox.hit_times(ray, NODE_T_RANGE) {
            Some(t) if t.min <= best.distance => {}
            _ => return,
        }

        match node.kind {
            NodeKind::Leaf => {
                for primitive in &self.primitives[node.range()] {
                    stats.primitive_tests += 1;
                    let trace = primitive.hit(ray);
                    if trace.is_closer_than(best) {
                        *best = trace;
                    }
                }
            }
            NodeKind::Interior { left, right } => {
                let t_left = self.entry_time(left, ray, stats);
                let t_right = self.entry_time(right, ray, stats);

                match (t_left, t_right) {
                    (Some(tl), Some(tr)) => {
                        let ((near, _), (far, t_far)) = if tl <= tr {
                            ((left, tl), (right, tr))
                        } else {
                            ((right, tr), (left, tl))
                        };
                        self.visit(near, ray, best, stats);
                        // The near subtree may already have a hit in front of the far box
                        if t_far <= best.distance {
                            self.visit(far, ray, best, stats);
                        }
                    }
                    (Some(_), None) => self.visit(left, ray, best, stats),
                    (None, Some(_)) => self.visit(right, ray, best, stats),
                    (None, None) => {}
                }
            }
        }
    }

    fn entry_time(&self, idx: usize, ray: &Ray, stats: &mut TraversalStats) -> Option<f32> {
        stats.box_tests += 1;
        self.nodes
            .get(idx)?
            .bbox
            .hit_times(ray, NODE_T_RANGE)
            .map(|t| t.min)
    }

    /// True if anything blocks `ray` within its `dist_bounds`.
    ///
    /// Stops at the first hit, so it is cheaper than [`Bvh::hit`] for shadow
    /// rays and visibility checks.
    pub fn occludes(&self, ray: &Ray) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let range = ray.dist_bounds.intersection(&NODE_T_RANGE);
        let mut stack = Vec::with_capacity(64);
        stack.push(self.root);

        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if !node.bbox.hit(ray, range) {
                continue;
            }

            match node.kind {
                NodeKind::Leaf => {
                    if self.primitives[node.range()]
                        .iter()
                        .any(|primitive| primitive.hit(ray).hit)
                    {
                        return true;
                    }
                }
                NodeKind::Interior { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        false
    }
}
