//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Nodes live in a flat arena addressed by index. Construction is post-order,
//! so children always precede their parent and the root is the last node.
//! The primitive array is reordered in place during the build so that every
//! leaf covers one contiguous slice of it.

use crate::sah;
use crate::{BuildError, BvhConfig, Primitive, Ray, Trace};
use arbor_math::Aabb;
use std::ops::Range;
use std::time::Instant;

/// What a node holds below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Terminal node; its primitives are tested directly.
    Leaf,
    /// Two child subtrees, by arena index.
    Interior { left: usize, right: usize },
}

/// A BVH node.
///
/// `start..start + size` is the primitive range of the whole subtree. For an
/// interior node that is the union of its children's ranges, with `start`
/// equal to the left child's start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub bbox: Aabb,
    pub start: usize,
    pub size: usize,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    /// Primitive index range covered by this node.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.size
    }

    /// `(left, right)` child indices for interior nodes.
    pub fn children(&self) -> Option<(usize, usize)> {
        match self.kind {
            NodeKind::Leaf => None,
            NodeKind::Interior { left, right } => Some((left, right)),
        }
    }
}

/// A bounding volume hierarchy over an owned primitive array.
///
/// The BVH exclusively owns its primitives: reordering them would invalidate
/// every leaf range, so they are only handed back by [`Bvh::into_primitives`].
/// Once built the tree is immutable, and `&Bvh` can be shared freely across
/// threads for concurrent traversal.
#[derive(Debug, Clone)]
pub struct Bvh<P> {
    pub(crate) nodes: Vec<Node>,
    pub(crate) primitives: Vec<P>,
    pub(crate) root: usize,
}

impl<P> Default for Bvh<P> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            primitives: Vec::new(),
            root: 0,
        }
    }
}

impl<P: Primitive> Bvh<P> {
    /// Build a BVH with the default split settings and the given leaf size.
    pub fn build(primitives: Vec<P>, max_leaf_size: usize) -> Result<Self, BuildError> {
        Self::build_with(
            primitives,
            &BvhConfig::default().with_max_leaf_size(max_leaf_size),
        )
    }

    /// Build a BVH using the surface area heuristic.
    ///
    /// An empty primitive list yields an empty BVH that misses every ray.
    pub fn build_with(mut primitives: Vec<P>, config: &BvhConfig) -> Result<Self, BuildError> {
        config.validate()?;

        if let Some((index, bbox)) = primitives
            .iter()
            .map(Primitive::bbox)
            .enumerate()
            .find(|(_, bbox)| !bbox.is_finite())
        {
            return Err(BuildError::InvalidBounds { index, bbox });
        }

        if primitives.is_empty() {
            return Ok(Self::default());
        }

        let start = Instant::now();
        let (nodes, root) = sah::build_nodes(&mut primitives, config);
        let bvh = Self {
            nodes,
            primitives,
            root,
        };

        log::debug!(
            "Built BVH: {} primitives, {} nodes, {} leaves, depth {} in {:?}",
            bvh.primitives.len(),
            bvh.nodes.len(),
            bvh.leaf_count(),
            bvh.depth(),
            start.elapsed()
        );

        Ok(bvh)
    }
}

impl<P> Bvh<P> {
    /// Arena index of the root node.
    pub fn root_index(&self) -> usize {
        self.root
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(self.root)
    }

    /// All nodes in construction order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Primitives in their post-build order.
    pub fn primitives(&self) -> &[P] {
        &self.primitives
    }

    pub fn n_primitives(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Number of levels from the root to the deepest leaf (0 when empty).
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }

        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((idx, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            if let Some((left, right)) = self.nodes[idx].children() {
                stack.push((left, level + 1));
                stack.push((right, level + 1));
            }
        }
        max_depth
    }

    /// Drop every node and primitive.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.primitives.clear();
        self.root = 0;
    }

    /// Tear the tree down and hand back the (reordered) primitives.
    pub fn into_primitives(self) -> Vec<P> {
        self.primitives
    }
}

impl<P: Primitive> Primitive for Bvh<P> {
    fn bbox(&self) -> Aabb {
        self.root().map_or(Aabb::EMPTY, |node| node.bbox)
    }

    fn hit(&self, ray: &Ray) -> Trace {
        self.hit_with_stats(ray).0
    }
}
