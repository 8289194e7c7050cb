//! Arbor acceleration - BVH construction and ray traversal
//!
//! Builds a bounding volume hierarchy over any [`Primitive`] with a binned
//! surface area heuristic, then answers closest-hit and any-hit ray queries
//! against it by ordered branch-and-bound traversal.
//!
//! A built [`Bvh`] is itself a [`Primitive`], so hierarchies nest through the
//! closed [`Shape`] enum.

mod batch;
mod bvh;
mod config;
mod error;
mod packed;
mod primitive;
mod quad;
mod sah;
mod shape;
mod sphere;
mod trace;
mod traverse;
mod triangle;

pub use bvh::{Bvh, Node, NodeKind};
pub use config::{BvhConfig, DEFAULT_MAX_LEAF_SIZE, DEFAULT_SPLIT_CANDIDATES};
pub use error::{BuildError, PackError};
pub use packed::{PackedNode, LEAF_SENTINEL};
pub use primitive::{Primitive, PrimitiveList};
pub use quad::Quad;
pub use shape::Shape;
pub use sphere::Sphere;
pub use trace::Trace;
pub use traverse::TraversalStats;
pub use triangle::Triangle;

/// Re-export the math types that appear in this crate's API
pub use arbor_math::{Aabb, Interval, Ray, Vec2, Vec3};
