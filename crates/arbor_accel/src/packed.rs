//! Flat, GPU-friendly node layout.

use crate::bvh::{Bvh, NodeKind};
use crate::PackError;
use bytemuck::{Pod, Zeroable};

/// Child index stored in both `left` and `right` of a leaf.
pub const LEAF_SENTINEL: u32 = u32::MAX;

/// A BVH node laid out for upload to a storage buffer (48 bytes).
///
/// Bounds and ranges are interleaved so each `vec4` slot carries one corner
/// plus one range field.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PackedNode {
    pub min: [f32; 3],
    pub start: u32,
    pub max: [f32; 3],
    pub size: u32,
    pub left: u32,
    pub right: u32,
    _pad: [u32; 2],
}

impl PackedNode {
    pub fn is_leaf(&self) -> bool {
        self.left == LEAF_SENTINEL && self.right == LEAF_SENTINEL
    }
}

impl<P> Bvh<P> {
    /// Export the node arena in [`PackedNode`] form, same order and indices.
    ///
    /// Fails if a node index or primitive range does not fit below
    /// [`LEAF_SENTINEL`].
    pub fn packed_nodes(&self) -> Result<Vec<PackedNode>, PackError> {
        self.nodes
            .iter()
            .map(|node| {
                let (left, right) = match node.kind {
                    NodeKind::Leaf => (LEAF_SENTINEL, LEAF_SENTINEL),
                    NodeKind::Interior { left, right } => (to_u32(left)?, to_u32(right)?),
                };
                Ok(PackedNode {
                    min: node.bbox.min().to_array(),
                    start: to_u32(node.start)?,
                    max: node.bbox.max().to_array(),
                    size: to_u32(node.size)?,
                    left,
                    right,
                    _pad: [0; 2],
                })
            })
            .collect()
    }
}

fn to_u32(value: usize) -> Result<u32, PackError> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v != LEAF_SENTINEL)
        .ok_or(PackError::IndexOverflow { value })
}
