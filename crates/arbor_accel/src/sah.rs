//! Top-down BVH construction with a binned surface area heuristic.
//!
//! For each axis, `n` split planes are placed at `i / n` of the range's
//! extent. A primitive goes left of a plane when its bbox centroid is strictly
//! below it. Split costs are evaluated by binning centroids between the planes
//! and sweeping prefix/suffix bounds, so nothing is reordered until the winning
//! plane is known.

use crate::bvh::{Node, NodeKind};
use crate::{BvhConfig, Primitive};
use arbor_math::Aabb;
use partition::partition;

/// A chosen split plane and its heuristic cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Split {
    pub axis: usize,
    pub position: f32,
    pub cost: f32,
}

#[derive(Debug, Clone, Copy)]
struct Bin {
    bounds: Aabb,
    count: usize,
}

impl Bin {
    const EMPTY: Bin = Bin {
        bounds: Aabb::EMPTY,
        count: 0,
    };

    fn merge(&self, other: &Bin) -> Bin {
        Bin {
            bounds: Aabb::surrounding(&self.bounds, &other.bounds),
            count: self.count + other.count,
        }
    }

    /// Surface area weighted by primitive count. Empty sides cost nothing.
    fn cost(&self, inv_area: f32) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        self.bounds.surface_area() * inv_area * self.count as f32
    }
}

/// Build the node arena for `primitives`, returning it with the root index.
///
/// `primitives` must be non-empty and the config already validated.
pub(crate) fn build_nodes<P: Primitive>(
    primitives: &mut [P],
    config: &BvhConfig,
) -> (Vec<Node>, usize) {
    let mut nodes = Vec::with_capacity(2 * primitives.len() / config.max_leaf_size + 1);
    let root = build_range(primitives, 0, &mut nodes, config);
    (nodes, root)
}

fn build_range<P: Primitive>(
    primitives: &mut [P],
    offset: usize,
    nodes: &mut Vec<Node>,
    config: &BvhConfig,
) -> usize {
    let size = primitives.len();
    let bounds: Vec<Aabb> = primitives.iter().map(Primitive::bbox).collect();
    let bbox = bounds
        .iter()
        .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, b));

    if size <= config.max_leaf_size {
        return push_node(
            nodes,
            Node {
                bbox,
                start: offset,
                size,
                kind: NodeKind::Leaf,
            },
        );
    }

    let mid = match best_split(&bounds, &bbox, config.split_candidates) {
        Some(split) => partition_at(primitives, &split),
        None => 0,
    };

    // A split that leaves one side empty would recurse on the same range forever
    let mid = if mid == 0 || mid == size {
        log::trace!("SAH split failed to separate {size} primitives, splitting at median");
        median_split(primitives, &bounds)
    } else {
        mid
    };

    let (left_primitives, right_primitives) = primitives.split_at_mut(mid);
    let left = build_range(left_primitives, offset, nodes, config);
    let right = build_range(right_primitives, offset + mid, nodes, config);

    push_node(
        nodes,
        Node {
            bbox,
            start: offset,
            size,
            kind: NodeKind::Interior { left, right },
        },
    )
}

fn push_node(nodes: &mut Vec<Node>, node: Node) -> usize {
    nodes.push(node);
    nodes.len() - 1
}

/// Find the cheapest split plane over all axes and candidates.
///
/// Ties keep the first candidate found (lower axis, then lower plane).
/// Returns `None` if no candidate has a finite cost.
pub(crate) fn best_split(bounds: &[Aabb], bbox: &Aabb, candidates: usize) -> Option<Split> {
    let area = bbox.surface_area();
    let inv_area = if area > 0.0 && area.is_finite() {
        1.0 / area
    } else {
        1.0
    };

    let mut best: Option<Split> = None;
    for axis in 0..3 {
        let extent = bbox.axis_interval(axis);
        let planes: Vec<f32> = (1..=candidates)
            .map(|i| extent.min + extent.size() * (i as f32 / candidates as f32))
            .collect();

        // bins[k] holds centroids at or past planes[..k] and below planes[k]
        let mut bins = vec![Bin::EMPTY; candidates + 1];
        for b in bounds {
            let c = b.centroid()[axis];
            let k = planes.partition_point(|&plane| plane <= c);
            bins[k] = bins[k].merge(&Bin {
                bounds: *b,
                count: 1,
            });
        }

        // right_of[j] is everything at or above planes[j]
        let mut right_of = vec![Bin::EMPTY; candidates];
        let mut acc = Bin::EMPTY;
        for j in (0..candidates).rev() {
            acc = acc.merge(&bins[j + 1]);
            right_of[j] = acc;
        }

        let mut left = Bin::EMPTY;
        for (j, &position) in planes.iter().enumerate() {
            left = left.merge(&bins[j]);
            let cost = left.cost(inv_area) + right_of[j].cost(inv_area);

            let better = match best {
                Some(current) => cost < current.cost,
                None => cost < f32::MAX,
            };
            if better {
                best = Some(Split {
                    axis,
                    position,
                    cost,
                });
            }
        }
    }

    best
}

/// Reorder so primitives left of the plane come first; returns the left count.
fn partition_at<P: Primitive>(primitives: &mut [P], split: &Split) -> usize {
    let (left, _) = partition(primitives, |p| {
        p.bbox().centroid()[split.axis] < split.position
    });
    left.len()
}

/// Split at the median centroid along the axis where centroids spread most.
///
/// Always leaves both halves non-empty for two or more primitives.
fn median_split<P: Primitive>(primitives: &mut [P], bounds: &[Aabb]) -> usize {
    let centroid_bounds = bounds.iter().fold(Aabb::EMPTY, |acc, b| {
        let c = b.centroid();
        Aabb::surrounding(&acc, &Aabb::from_points(c, c))
    });
    let axis = centroid_bounds.longest_axis();

    let mid = primitives.len() / 2;
    primitives.select_nth_unstable_by(mid, |a, b| {
        a.bbox().centroid()[axis].total_cmp(&b.bbox().centroid()[axis])
    });
    mid
}
