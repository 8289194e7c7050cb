use arbor_math::Aabb;
use thiserror::Error;

/// Rejected BVH build inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("max_leaf_size must be at least 1")]
    ZeroLeafSize,

    #[error("split_candidates must be at least 1")]
    ZeroSplitCandidates,

    #[error("primitive {index} has a non-finite bounding box: {bbox:?}")]
    InvalidBounds { index: usize, bbox: Aabb },
}

/// Failures converting a built tree to [`PackedNode`](crate::PackedNode) form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("index {value} does not fit a packed 32-bit node field")]
    IndexOverflow { value: usize },
}
