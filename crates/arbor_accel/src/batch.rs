//! Parallel ray batches over a built BVH.

use crate::bvh::Bvh;
use crate::{Primitive, Ray, Trace, TraversalStats};
use rayon::prelude::*;

impl<P: Primitive> Bvh<P> {
    /// Closest hit for every ray, traced in parallel. Output order matches `rays`.
    pub fn trace_batch(&self, rays: &[Ray]) -> Vec<Trace> {
        rays.par_iter().map(|ray| self.hit(ray)).collect()
    }

    /// Like [`Bvh::trace_batch`], also returning the summed traversal work.
    pub fn trace_batch_with_stats(&self, rays: &[Ray]) -> (Vec<Trace>, TraversalStats) {
        let (traces, stats): (Vec<Trace>, Vec<TraversalStats>) =
            rays.par_iter().map(|ray| self.hit_with_stats(ray)).unzip();

        let total: TraversalStats = stats.into_iter().sum();
        log::trace!(
            "Traced {} rays: {} nodes, {} primitive tests",
            rays.len(),
            total.nodes_visited,
            total.primitive_tests
        );
        (traces, total)
    }
}
