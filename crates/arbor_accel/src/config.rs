//! BVH construction settings.

use crate::BuildError;
use serde::{Deserialize, Serialize};

/// Default maximum primitives per leaf node.
pub const DEFAULT_MAX_LEAF_SIZE: usize = 4;

/// Default number of evenly spaced split planes tried per axis.
pub const DEFAULT_SPLIT_CANDIDATES: usize = 10;

/// BVH build configuration.
///
/// Missing fields fall back to their defaults when deserializing, so a
/// scene description only needs to name what it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhConfig {
    /// Ranges with at most this many primitives become leaves
    pub max_leaf_size: usize,
    /// Split planes evaluated per axis at `i / n` of the extent, `i = 1..=n`
    pub split_candidates: usize,
}

impl BvhConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_leaf_size(mut self, max_leaf_size: usize) -> Self {
        self.max_leaf_size = max_leaf_size;
        self
    }

    pub fn with_split_candidates(mut self, split_candidates: usize) -> Self {
        self.split_candidates = split_candidates;
        self
    }

    /// Check the settings before any work is done.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_leaf_size == 0 {
            return Err(BuildError::ZeroLeafSize);
        }
        if self.split_candidates == 0 {
            return Err(BuildError::ZeroSplitCandidates);
        }
        Ok(())
    }
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            max_leaf_size: DEFAULT_MAX_LEAF_SIZE,
            split_candidates: DEFAULT_SPLIT_CANDIDATES,
        }
    }
}
